//! # Table Configuration
//!
//! Everything the table needs to know before the first philosopher sits down. The
//! struct deserializes from any serde format with millisecond fields, so a host can
//! load it from a file; every field has a default.
//!
//! ```rust
//! use dining_philosophers::lifecycle::{TableConfig, TimeoutPolicy};
//!
//! let config = TableConfig::default()
//!     .with_philosophers(7)
//!     .with_max_cycles(10)
//!     .with_timeout_policy(TimeoutPolicy::Abort);
//! assert!(config.validate().is_ok());
//! ```

use super::error::ConfigError;
use crate::framework::AcquisitionOrder;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inclusive range of milliseconds a delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub const fn millis(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draws a uniformly random delay in `[min_ms, max_ms]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedRange {
                name,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

/// What a philosopher does after a fork acquisition times out.
///
/// Held forks are released before either choice takes effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Go back to thinking and try again next cycle.
    #[default]
    Restart,
    /// Stop the philosopher and return the timeout error from its task.
    Abort,
}

/// Construction input for a [`DiningTable`](super::DiningTable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Number of philosophers, and therefore of forks.
    pub philosophers: usize,
    pub think: DurationRange,
    pub eat: DurationRange,
    /// Upper bound on any single fork acquisition.
    pub acquire_timeout_ms: u64,
    pub on_timeout: TimeoutPolicy,
    /// Fork acquisition order. Leave at [`AcquisitionOrder::Ascending`]: the only
    /// other value, `LeftFirst`, can deadlock the table and exists for tests.
    pub order: AcquisitionOrder,
    /// Meals per philosopher before it halts. `None` runs until the table is shut down.
    pub max_cycles: Option<u64>,
    /// Seed for reproducible delays. Philosopher `i` uses `seed + i`.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            philosophers: 5,
            think: DurationRange::millis(10, 20),
            eat: DurationRange::millis(8, 14),
            acquire_timeout_ms: 5_000,
            on_timeout: TimeoutPolicy::Restart,
            order: AcquisitionOrder::Ascending,
            max_cycles: None,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_philosophers(mut self, philosophers: usize) -> Self {
        self.philosophers = philosophers;
        self
    }

    pub fn with_think(mut self, think: DurationRange) -> Self {
        self.think = think;
        self
    }

    pub fn with_eat(mut self, eat: DurationRange) -> Self {
        self.eat = eat;
        self
    }

    /// Sets the acquisition timeout, in whole milliseconds.
    ///
    /// Fractions of a millisecond round up, so any non-zero duration stays non-zero.
    /// Durations beyond `u64::MAX` milliseconds saturate.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.acquire_timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.on_timeout = policy;
        self
    }

    pub fn with_order(mut self, order: AcquisitionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Rejects configurations that cannot form a working table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.philosophers < 2 {
            return Err(ConfigError::TooFewPhilosophers(self.philosophers));
        }
        self.think.validate("think")?;
        self.eat.validate("eat")?;
        if self.acquire_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::ZeroCycles);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_config_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.philosophers, 5);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_single_philosopher() {
        for n in [0, 1] {
            let config = TableConfig::default().with_philosophers(n);
            assert_eq!(config.validate(), Err(ConfigError::TooFewPhilosophers(n)));
        }
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let config = TableConfig::default().with_eat(DurationRange::millis(20, 5));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "eat",
                min_ms: 20,
                max_ms: 5
            })
        );

        let config = TableConfig::default().with_think(DurationRange::millis(3, 2));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { name: "think", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timeout_and_zero_cycles() {
        let config = TableConfig::default().with_acquire_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = TableConfig::default().with_max_cycles(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCycles));
    }

    #[test]
    fn test_acquire_timeout_rounds_up_to_whole_millis() {
        let config = TableConfig::default().with_acquire_timeout(Duration::from_micros(300));
        assert_eq!(config.acquire_timeout_ms, 1);
        assert!(config.validate().is_ok());

        let config = TableConfig::default().with_acquire_timeout(Duration::from_micros(2_001));
        assert_eq!(config.acquire_timeout(), Duration::from_millis(3));

        let config = TableConfig::default().with_acquire_timeout(Duration::from_millis(250));
        assert_eq!(config.acquire_timeout_ms, 250);

        let config = TableConfig::default().with_acquire_timeout(Duration::MAX);
        assert_eq!(config.acquire_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_default_order_is_deadlock_free() {
        let config = TableConfig::default();
        assert_eq!(config.order, AcquisitionOrder::Ascending);
        assert!(config.order.is_deadlock_free());
        assert!(!AcquisitionOrder::LeftFirst.is_deadlock_free());
    }

    #[test]
    fn test_sample_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let range = DurationRange::millis(8, 14);
        for _ in 0..1_000 {
            let d = range.sample(&mut rng);
            assert!(d >= Duration::from_millis(8) && d <= Duration::from_millis(14));
        }
        assert_eq!(
            DurationRange::millis(10, 10).sample(&mut rng),
            Duration::from_millis(10)
        );
    }
}
