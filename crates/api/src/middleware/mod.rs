//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's user id from a JWT Bearer token.

pub mod auth;
