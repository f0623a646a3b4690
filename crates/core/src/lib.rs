//! Domain logic for the xenorank backend.
//!
//! Everything in this crate is free of I/O: persona catalog and
//! assignment, vote transition planning for the reputation ledger, handle
//! validation and paging helpers. The `db` and `api` crates build on it.

pub mod error;
pub mod handle;
pub mod ledger;
pub mod paging;
pub mod persona;
pub mod types;
