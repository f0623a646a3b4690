//! Limit/offset clamping shared by list endpoints.

/// Maximum number of rows a single list request may ask for explicitly.
pub const MAX_PAGE_LIMIT: i64 = 200;

/// Clamp a user-provided limit to `[1, max]`.
///
/// An absent limit stays `None`, which the SQL layer binds as `LIMIT NULL`
/// (no limit), so unpaged listings return every row.
pub fn clamp_limit(limit: Option<i64>, max: i64) -> Option<i64> {
    limit.map(|l| l.clamp(1, max))
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_limit_is_unbounded() {
        assert_eq!(clamp_limit(None, MAX_PAGE_LIMIT), None);
    }

    #[test]
    fn limit_is_bounded() {
        assert_eq!(clamp_limit(Some(0), MAX_PAGE_LIMIT), Some(1));
        assert_eq!(clamp_limit(Some(-5), MAX_PAGE_LIMIT), Some(1));
        assert_eq!(clamp_limit(Some(10_000), MAX_PAGE_LIMIT), Some(200));
        assert_eq!(clamp_limit(Some(25), MAX_PAGE_LIMIT), Some(25));
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
