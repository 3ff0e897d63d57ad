// self
use crate::_prelude::*;

/// Thread-safe counters for refresh coordination.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	started: AtomicU64,
	deduplicated: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	stale_served: AtomicU64,
	superseded: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of refresh requests received.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of remote listings started.
	pub fn started(&self) -> u64 {
		self.started.load(Ordering::Relaxed)
	}

	/// Returns the number of requests that joined an in-flight listing.
	pub fn deduplicated(&self) -> u64 {
		self.deduplicated.load(Ordering::Relaxed)
	}

	/// Returns the number of listings that completed successfully.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of listings that failed.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of requests answered with previously cached groups.
	pub fn stale_served(&self) -> u64 {
		self.stale_served.load(Ordering::Relaxed)
	}

	/// Returns the number of successful listings discarded for being older than the cache.
	pub fn superseded(&self) -> u64 {
		self.superseded.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_started(&self) {
		self.started.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_deduplicated(&self) {
		self.deduplicated.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_stale_served(&self) {
		self.stale_served.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_superseded(&self) {
		self.superseded.fetch_add(1, Ordering::Relaxed);
	}
}
