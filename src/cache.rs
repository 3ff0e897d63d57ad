//! Stale-while-revalidate coordination for per-subscription group listings.
//!
//! [`GroupCache::ensure_refreshed`] starts at most one remote listing per subscription at a
//! time and shares its settled result with every concurrent caller. Callers that already have
//! cached groups wait at most [`CacheConfig::stale_budget`] for the fresh listing and otherwise
//! receive the cached groups; callers without cached groups wait for the listing to settle.
//!
//! Listings run as spawned tasks. They are never cancelled by callers going away, and they
//! update the cache before publishing their result, so a caller woken by a fresh result always
//! observes the cache it produced.

mod config;
mod metrics;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use metrics::RefreshMetrics;

// crates.io
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::runtime::Handle;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, SubscriptionId},
	group::{GroupList, GroupLister, ListError},
	obs::{self, RefreshOutcome, RefreshSpan},
	subscription::Subscription,
};

type PendingRefresh = Shared<BoxFuture<'static, Result<GroupList, ListError>>>;

/// Groups produced by the most recent accepted listing of a subscription.
#[derive(Clone, Debug)]
pub struct CachedGroups {
	/// Listed groups.
	pub groups: GroupList,
	/// Instant the listing completed.
	pub refreshed_at: OffsetDateTime,
	/// Generation of the refresh that produced the groups.
	pub generation: u64,
}

struct Pending {
	generation: u64,
	future: PendingRefresh,
}

#[derive(Default)]
struct CacheState {
	pending: HashMap<SubscriptionId, Pending>,
	cached: HashMap<SubscriptionId, CachedGroups>,
	next_generation: u64,
}
impl CacheState {
	fn on_refresh_start(&mut self) -> u64 {
		self.next_generation += 1;

		self.next_generation
	}

	/// Clears the pending slot and caches the groups unless a newer generation is cached.
	///
	/// Returns `false` when the groups were discarded.
	fn on_refresh_success(
		&mut self,
		id: &SubscriptionId,
		generation: u64,
		groups: GroupList,
	) -> bool {
		self.clear_pending(id, generation);

		if self.cached.get(id).is_some_and(|cached| cached.generation > generation) {
			return false;
		}

		self.cached.insert(
			id.clone(),
			CachedGroups { groups, refreshed_at: OffsetDateTime::now_utc(), generation },
		);

		true
	}

	fn on_refresh_failure(&mut self, id: &SubscriptionId, generation: u64) {
		self.clear_pending(id, generation);
	}

	fn clear_pending(&mut self, id: &SubscriptionId, generation: u64) {
		if self.pending.get(id).is_some_and(|pending| pending.generation == generation) {
			self.pending.remove(id);
		}
	}
}

/// Clears the pending slot if the refresh task unwinds before settling.
struct PendingGuard {
	state: Arc<Mutex<CacheState>>,
	id: SubscriptionId,
	generation: u64,
}
impl Drop for PendingGuard {
	fn drop(&mut self) {
		self.state.lock().on_refresh_failure(&self.id, self.generation);
	}
}

/// Per-subscription group cache with deduplicated background refreshes.
#[derive(Clone)]
pub struct GroupCache {
	lister: Arc<dyn GroupLister>,
	config: CacheConfig,
	runtime: Handle,
	state: Arc<Mutex<CacheState>>,
	metrics: Arc<RefreshMetrics>,
}
impl GroupCache {
	/// Creates a cache whose refresh tasks are spawned on `runtime`.
	pub fn new(lister: Arc<dyn GroupLister>, config: CacheConfig, runtime: Handle) -> Self {
		Self {
			lister,
			config,
			runtime,
			state: Default::default(),
			metrics: Default::default(),
		}
	}

	/// Returns the active configuration.
	pub fn config(&self) -> &CacheConfig {
		&self.config
	}

	/// Returns the shared refresh counters.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Returns groups for `subscription`, refreshing them in the background.
	///
	/// - With no cached groups, resolves when the listing settles and surfaces its failure as
	///   [`Error::RefreshFailed`].
	/// - With cached groups, resolves to the fresh listing if it succeeds within the stale
	///   budget and to the cached groups otherwise; listing failures are logged, not returned.
	///
	/// Must be awaited inside a Tokio runtime with the time driver enabled.
	pub async fn ensure_refreshed(
		&self,
		credentials: &Credentials,
		subscription: &Subscription,
	) -> Result<GroupList> {
		let span = RefreshSpan::new(&subscription.id, "ensure_refreshed");

		span.instrument(async move {
			self.record_attempt();

			let (pending, stale) = {
				let mut state = self.state.lock();
				let pending = self.start_or_join(&mut state, credentials, subscription);

				(pending, state.cached.get(&subscription.id).cloned())
			};
			let Some(stale) = stale else {
				return pending.await.map_err(Error::from);
			};
			let reason = match tokio::time::timeout(self.config.stale_budget, pending).await {
				Ok(Ok(fresh)) => return Ok(fresh),
				Ok(Err(_)) => "refresh failed",
				Err(_) => "stale budget elapsed",
			};

			self.metrics.record_stale_served();
			obs::record_refresh_outcome(RefreshOutcome::Stale);
			obs::log_stale_served(&subscription.id, reason);

			Ok(stale.groups)
		})
		.await
	}

	/// Starts a refresh for `subscription` unless one is already in flight, without waiting.
	pub fn refresh(&self, credentials: &Credentials, subscription: &Subscription) {
		self.record_attempt();

		let mut state = self.state.lock();

		// The task keeps running after the shared handle is dropped.
		drop(self.start_or_join(&mut state, credentials, subscription));
	}

	/// Returns the cached groups for the subscription, if any listing has succeeded.
	pub fn cached(&self, id: &SubscriptionId) -> Option<CachedGroups> {
		self.state.lock().cached.get(id).cloned()
	}

	/// Returns `true` while a listing for the subscription is in flight.
	pub fn is_refreshing(&self, id: &SubscriptionId) -> bool {
		self.state.lock().pending.contains_key(id)
	}

	/// Drops the cached groups for the subscription and returns them.
	///
	/// An in-flight listing is left running and will repopulate the cache when it succeeds.
	pub fn invalidate(&self, id: &SubscriptionId) -> Option<CachedGroups> {
		self.state.lock().cached.remove(id)
	}

	fn record_attempt(&self) {
		self.metrics.record_attempt();
		obs::record_refresh_outcome(RefreshOutcome::Attempt);
	}

	fn start_or_join(
		&self,
		state: &mut CacheState,
		credentials: &Credentials,
		subscription: &Subscription,
	) -> PendingRefresh {
		if let Some(pending) = state.pending.get(&subscription.id) {
			self.metrics.record_deduplicated();
			obs::record_refresh_outcome(RefreshOutcome::Deduplicated);
			obs::log_refresh_joined(&subscription.id);

			return pending.future.clone();
		}

		let generation = state.on_refresh_start();

		self.metrics.record_started();

		let future = self.spawn_listing(generation, credentials.clone(), subscription.clone());

		state
			.pending
			.insert(subscription.id.clone(), Pending { generation, future: future.clone() });

		future
	}

	/// Spawns the listing task and returns its shared result.
	///
	/// The caller holds the state lock, so the task cannot settle before its pending slot is
	/// recorded. Nothing dropped synchronously by `spawn` may touch the lock.
	fn spawn_listing(
		&self,
		generation: u64,
		credentials: Credentials,
		subscription: Subscription,
	) -> PendingRefresh {
		let lister = self.lister.clone();
		let state = self.state.clone();
		let metrics = self.metrics.clone();
		let span = RefreshSpan::new(&subscription.id, "list_groups");
		let id = subscription.id.clone();
		let task = async move {
			let id = subscription.id.clone();
			let _guard = PendingGuard { state: state.clone(), id: id.clone(), generation };
			let result =
				lister.list_groups(&credentials, &subscription).await.map(GroupList::from);

			match &result {
				Ok(groups) => {
					let accepted =
						state.lock().on_refresh_success(&id, generation, groups.clone());

					metrics.record_success();
					obs::record_refresh_outcome(RefreshOutcome::Success);

					if !accepted {
						metrics.record_superseded();
						obs::log_refresh_superseded(&id, generation);
					}
				},
				Err(e) => {
					state.lock().on_refresh_failure(&id, generation);
					metrics.record_failure();
					obs::record_refresh_outcome(RefreshOutcome::Failure);
					obs::log_refresh_failure(&id, e);
				},
			}

			result
		};
		let state = self.state.clone();
		let metrics = self.metrics.clone();

		self.runtime
			.spawn(span.instrument(task))
			.map(move |joined| {
				joined.unwrap_or_else(|e| {
					// The task panicked, was aborted, or never ran (runtime shutting down).
					let error = ListError::Interrupted { message: e.to_string() };

					state.lock().on_refresh_failure(&id, generation);
					metrics.record_failure();
					obs::record_refresh_outcome(RefreshOutcome::Failure);
					obs::log_refresh_failure(&id, &error);

					Err(error)
				})
			})
			.boxed()
			.shared()
	}
}
impl Debug for GroupCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.lock();

		f.debug_struct("GroupCache")
			.field("config", &self.config)
			.field("pending", &state.pending.len())
			.field("cached", &state.cached.len())
			.finish()
	}
}
