//! Freshness policy for cached records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::settings::CacheConfig;

/// TTL category a record is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Watchlist,
    /// Providers and runtime share one TTL.
    Metadata,
}

/// A record is fresh strictly before `cached_at + ttl_hours`.
///
/// An expiry past the representable date range never arrives, so the record
/// stays fresh.
pub fn is_fresh(cached_at: DateTime<Utc>, ttl_hours: u32, now: DateTime<Utc>) -> bool {
    match cached_at.checked_add_signed(Duration::hours(i64::from(ttl_hours))) {
        Some(expires_at) => now < expires_at,
        None => true,
    }
}

/// Per-category TTLs in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub watchlist_hours: u32,
    pub metadata_hours: u32,
}

impl TtlPolicy {
    pub fn ttl_hours(&self, category: Category) -> u32 {
        match category {
            Category::Watchlist => self.watchlist_hours,
            Category::Metadata => self.metadata_hours,
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            watchlist_hours: 6,
            metadata_hours: 24,
        }
    }
}

impl From<&CacheConfig> for TtlPolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            watchlist_hours: config.watchlist_ttl_hours,
            metadata_hours: config.metadata_ttl_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let cached_at = base();
        let just_before = cached_at + Duration::hours(6) - Duration::milliseconds(1);
        assert!(is_fresh(cached_at, 6, just_before));
        assert!(!is_fresh(cached_at, 6, cached_at + Duration::hours(6)));
    }

    #[test]
    fn test_expiry_beyond_date_range_is_fresh() {
        assert!(is_fresh(DateTime::<Utc>::MAX_UTC, 1, base()));
        assert!(is_fresh(base(), u32::MAX, base() + Duration::days(365 * 1000)));
        assert!(!is_fresh(DateTime::<Utc>::MIN_UTC, 1, base()));
    }

    #[test]
    fn test_default_policy() {
        let policy = TtlPolicy::default();
        assert_eq!(policy.ttl_hours(Category::Watchlist), 6);
        assert_eq!(policy.ttl_hours(Category::Metadata), 24);
    }

    proptest! {
        #[test]
        fn prop_fresh_iff_elapsed_below_ttl(ttl in 1u32..=240, elapsed_secs in 0i64..(241 * 3600)) {
            let cached_at = base();
            let now = cached_at + Duration::seconds(elapsed_secs);
            prop_assert_eq!(is_fresh(cached_at, ttl, now), elapsed_secs < i64::from(ttl) * 3600);
        }

        #[test]
        fn prop_clock_skew_keeps_record_fresh(ttl in 1u32..=48, skew_secs in 1i64..86_400) {
            // Write stamped in the future relative to the reader.
            let now = base();
            prop_assert!(is_fresh(now + Duration::seconds(skew_secs), ttl, now));
        }
    }
}
