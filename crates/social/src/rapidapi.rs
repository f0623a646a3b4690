//! Profile lookup through the RapidAPI `twitter-api45` screen-name endpoint.
//!
//! `GET {base_url}/screenname.php?screenname={handle}` with the RapidAPI
//! host and key headers. A payload whose `status` is not `"active"` means
//! the account does not exist or is suspended.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{FetchedProfile, ProfileFetchError, ProfileSource};

/// Default RapidAPI host for the screen-name endpoint.
pub const DEFAULT_RAPIDAPI_HOST: &str = "twitter-api45.p.rapidapi.com";

/// Connection settings for the RapidAPI client.
#[derive(Debug, Clone)]
pub struct RapidApiConfig {
    /// Value sent in `x-rapidapi-key`.
    pub api_key: String,
    /// Value sent in `x-rapidapi-host`.
    pub host: String,
    /// Base URL, `https://{host}` in production.
    pub base_url: String,
}

impl RapidApiConfig {
    /// Config targeting the public RapidAPI host.
    pub fn new(api_key: String, host: String) -> Self {
        let base_url = format!("https://{host}");
        Self {
            api_key,
            host,
            base_url,
        }
    }
}

/// Raw payload of the screen-name endpoint. Only the fields we use.
#[derive(Debug, Deserialize)]
struct ScreenNamePayload {
    status: Option<String>,
    name: Option<String>,
    avatar: Option<String>,
    sub_count: Option<i64>,
    statuses_count: Option<i64>,
}

/// HTTP client for the RapidAPI profile endpoint.
pub struct RapidApiProfileSource {
    client: reqwest::Client,
    config: RapidApiConfig,
}

impl RapidApiProfileSource {
    pub fn new(config: RapidApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ProfileSource for RapidApiProfileSource {
    async fn fetch_profile(&self, handle: &str) -> Result<FetchedProfile, ProfileFetchError> {
        let response = self
            .client
            .get(format!("{}/screenname.php", self.config.base_url))
            .query(&[("screenname", handle)])
            .header("x-rapidapi-host", &self.config.host)
            .header("x-rapidapi-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(handle, status = status.as_u16(), "Profile lookup rejected");
            return Err(classify_status(status, handle, &body));
        }

        let body = response.text().await?;
        profile_from_payload(handle, &body)
    }
}

/// Map a non-success HTTP status to a lookup error.
fn classify_status(status: StatusCode, handle: &str, body: &str) -> ProfileFetchError {
    match status {
        StatusCode::NOT_FOUND => ProfileFetchError::NotFound(handle.to_string()),
        StatusCode::TOO_MANY_REQUESTS => ProfileFetchError::RateLimited,
        other => ProfileFetchError::Upstream(format!("status {}: {body}", other.as_u16())),
    }
}

/// Turn a screen-name payload into a [`FetchedProfile`].
///
/// Missing counts read as zero and negative counts are clamped.
fn profile_from_payload(handle: &str, body: &str) -> Result<FetchedProfile, ProfileFetchError> {
    let payload: ScreenNamePayload = serde_json::from_str(body)
        .map_err(|e| ProfileFetchError::Upstream(format!("invalid profile payload: {e}")))?;

    if payload.status.as_deref() != Some("active") {
        return Err(ProfileFetchError::NotFound(handle.to_string()));
    }

    Ok(FetchedProfile {
        display_name: payload.name.filter(|n| !n.is_empty()),
        avatar_url: payload.avatar.filter(|a| !a.is_empty()),
        follower_count: payload.sub_count.unwrap_or(0).max(0),
        post_count: payload.statuses_count.unwrap_or(0).max(0),
    })
}
