//! Social-platform profile lookup.
//!
//! The rest of the system only sees the [`ProfileSource`] trait; the
//! production implementation is [`rapidapi::RapidApiProfileSource`].

use async_trait::async_trait;
use serde::Serialize;

pub mod rapidapi;

pub use rapidapi::{RapidApiConfig, RapidApiProfileSource};

/// Public metrics of one profile as reported by the platform.
///
/// The handle is not echoed back; callers keep the one they asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedProfile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub follower_count: i64,
    pub post_count: i64,
}

/// Errors from a profile lookup.
#[derive(Debug, thiserror::Error)]
pub enum ProfileFetchError {
    /// The handle does not exist or the account is not active.
    #[error("Profile '{0}' not found")]
    NotFound(String),

    /// The platform throttled the request.
    #[error("Profile lookup rate limited")]
    RateLimited,

    /// Transport failure, unexpected status or unreadable payload.
    #[error("Profile lookup failed: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ProfileFetchError {
    fn from(err: reqwest::Error) -> Self {
        ProfileFetchError::Upstream(err.to_string())
    }
}

/// Source of profile metrics, called once per submitted handle.
///
/// Implementations must not retry; callers decide how to surface failures.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, handle: &str) -> Result<FetchedProfile, ProfileFetchError>;
}
