//! Cache tuning knobs.

// self
use crate::{_prelude::*, error::ConfigError};

/// Validated cache configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
	/// How long a caller holding cached groups waits for a fresh listing before receiving the
	/// cached ones instead.
	pub stale_budget: Duration,
}
impl CacheConfig {
	/// Stale budget applied when none is configured.
	pub const DEFAULT_STALE_BUDGET: Duration = Duration::from_millis(500);

	/// Returns a builder seeded with defaults.
	pub fn builder() -> CacheConfigBuilder {
		CacheConfigBuilder::default()
	}
}
impl Default for CacheConfig {
	fn default() -> Self {
		Self { stale_budget: Self::DEFAULT_STALE_BUDGET }
	}
}

/// Builder for [`CacheConfig`] values.
#[derive(Debug)]
pub struct CacheConfigBuilder {
	/// Stale budget being configured.
	pub stale_budget: Duration,
}
impl CacheConfigBuilder {
	/// Overrides the stale budget.
	pub fn stale_budget(mut self, budget: Duration) -> Self {
		self.stale_budget = budget;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<CacheConfig, ConfigError> {
		if self.stale_budget.is_zero() {
			return Err(ConfigError::ZeroStaleBudget);
		}

		Ok(CacheConfig { stale_budget: self.stale_budget })
	}
}
impl Default for CacheConfigBuilder {
	fn default() -> Self {
		Self { stale_budget: CacheConfig::DEFAULT_STALE_BUDGET }
	}
}
