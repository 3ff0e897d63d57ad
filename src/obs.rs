//! Optional observability helpers for refreshes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to emit structured spans named `resource_group_cache.refresh`
//!   with the `subscription` and `stage` fields, plus log events for absorbed failures, stale
//!   serves, and default-subscription changes.
//! - Enable `metrics` to increment the `resource_group_cache_refresh_total` counter labeled by
//!   `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each refresh request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
	/// Entry to the coordinator.
	Attempt,
	/// The request joined a refresh that was already in flight.
	Deduplicated,
	/// A remote listing completed and was cached.
	Success,
	/// A remote listing failed.
	Failure,
	/// The caller received the previously cached groups.
	Stale,
}
impl RefreshOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RefreshOutcome::Attempt => "attempt",
			RefreshOutcome::Deduplicated => "deduplicated",
			RefreshOutcome::Success => "success",
			RefreshOutcome::Failure => "failure",
			RefreshOutcome::Stale => "stale",
		}
	}
}
impl Display for RefreshOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
