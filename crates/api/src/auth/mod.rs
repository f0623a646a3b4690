//! Bearer token handling for the external identity provider.
//!
//! - [`jwt`] -- HS256 token validation (and issuance for tooling and tests).

pub mod jwt;
