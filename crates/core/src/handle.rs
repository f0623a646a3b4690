//! Social handle normalization and validation.
//!
//! Handles are stored exactly as submitted apart from surrounding
//! whitespace and a single leading `@`. Comparison is case-sensitive.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum handle length accepted by the upstream platform.
pub const MAX_HANDLE_LEN: usize = 15;

/// Letters, digits and underscores only.
const HANDLE_PATTERN: &str = r"^[A-Za-z0-9_]+$";

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HANDLE_PATTERN).expect("valid regex"));

/// Trim whitespace and a leading `@`, then validate the remaining handle.
pub fn normalize_handle(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    if handle.is_empty() {
        return Err(CoreError::Validation("Handle must not be empty".into()));
    }
    if handle.len() > MAX_HANDLE_LEN {
        return Err(CoreError::Validation(format!(
            "Handle must be at most {MAX_HANDLE_LEN} characters, got {}",
            handle.len()
        )));
    }
    if !HANDLE_RE.is_match(handle) {
        return Err(CoreError::Validation(format!(
            "Handle '{handle}' may only contain letters, digits and underscores"
        )));
    }
    Ok(handle.to_string())
}
