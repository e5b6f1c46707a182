//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: deterministic article field values (always available)
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let title = builder.title("main");
//!     let created = builder.created();
//! }
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same values, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Short unique title, well under the 100 character column limit
    pub fn title(&self, suffix: &str) -> String {
        format!("title-{}-{}", self.seed % 1_000_000, suffix)
    }

    pub fn summary(&self, suffix: &str) -> String {
        format!("summary of {} ({})", self.title(suffix), self.seed % 97)
    }

    /// Fixed point in time derived from the seed, truncated to whole seconds
    /// so it survives a round trip through `timestamptz`.
    pub fn created(&self) -> DateTime<Utc> {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH);
        base + Duration::seconds((self.seed % 86_400) as i64)
    }

    /// `created()` shifted by `offset_secs`, for ordering tests
    pub fn created_plus(&self, offset_secs: i64) -> DateTime<Utc> {
        self.created() + Duration::seconds(offset_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.title("a"), builder2.title("a"));
        assert_eq!(builder1.created(), builder2.created());
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.title("a"), builder2.title("a"));
    }

    #[test]
    fn test_created_plus_orders() {
        let builder = TestDataBuilder::new(7);
        assert!(builder.created_plus(10) > builder.created());
        assert_eq!(builder.created().timestamp_subsec_nanos(), 0);
    }
}
