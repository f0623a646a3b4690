//! Request handlers.
//!
//! Each submodule holds the async handler functions for one resource.
//! Handlers delegate to `xeno_core` for rules, to the repositories in
//! `xeno_db` for storage, and map errors via [`AppError`](crate::error::AppError).

pub mod leaderboard;
pub mod personas;
pub mod profiles;
pub mod users;
pub mod votes;
