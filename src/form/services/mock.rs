//! # Offline Mock API
//!
//! Stand-in for the remote API when no URL is configured. Every name is
//! available except the literal `"invalid name"`. Each check sleeps for a
//! per-name delay below the configured maximum, so quick typing produces
//! overlapping checks that can finish out of order.

use super::{LocationProvider, NameValidator};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Locations offered by the mock API
pub const MOCK_LOCATIONS: [&str; 4] = ["Canada", "China", "USA", "Brazil"];

/// The one name the mock API reports as taken
pub const MOCK_TAKEN_NAME: &str = "invalid name";

#[derive(Debug, Clone)]
pub struct MockFormApi {
    max_delay: Duration,
}

impl MockFormApi {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }

    /// Upper bound in whole milliseconds, saturating for very long durations
    fn max_delay_ms(&self) -> u64 {
        u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Simulated latency for `name`, stable for a given name
    pub fn delay_for(&self, name: &str) -> Duration {
        let max_ms = self.max_delay_ms();
        if max_ms == 0 {
            return Duration::ZERO;
        }
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Duration::from_millis(hasher.finish() % max_ms)
    }
}

impl Default for MockFormApi {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_MOCK_DELAY_MS))
    }
}

#[async_trait]
impl LocationProvider for MockFormApi {
    async fn get_locations(&self) -> Result<Vec<String>> {
        Ok(MOCK_LOCATIONS.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl NameValidator for MockFormApi {
    async fn is_name_valid(&self, name: &str) -> Result<bool> {
        let delay = self.delay_for(name);
        tracing::trace!("Mock validation of {:?} sleeping {:?}", name, delay);
        tokio::time::sleep(delay).await;
        Ok(name != MOCK_TAKEN_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_should_offer_fixed_locations() {
        let api = MockFormApi::new(Duration::ZERO);
        assert_eq!(
            api.get_locations().await.unwrap(),
            vec!["Canada", "China", "USA", "Brazil"]
        );
    }

    #[tokio::test]
    async fn mock_should_reject_only_the_reserved_name() {
        let api = MockFormApi::new(Duration::ZERO);
        assert!(api.is_name_valid("Alice").await.unwrap());
        assert!(!api.is_name_valid("invalid name").await.unwrap());
    }

    #[test]
    fn delay_should_be_bounded_and_stable() {
        let api = MockFormApi::new(Duration::from_millis(100));
        let first = api.delay_for("Alice");
        assert!(first < Duration::from_millis(100));
        assert_eq!(first, api.delay_for("Alice"));
        assert_eq!(MockFormApi::new(Duration::ZERO).delay_for("Alice"), Duration::ZERO);
    }

    #[test]
    fn oversized_max_delay_should_saturate_instead_of_wrapping() {
        assert_eq!(MockFormApi::new(Duration::from_secs(u64::MAX)).max_delay_ms(), u64::MAX);
        assert_eq!(MockFormApi::new(Duration::from_millis(250)).max_delay_ms(), 250);
        assert!(MockFormApi::new(Duration::MAX).delay_for("Alice") < Duration::MAX);
    }
}
