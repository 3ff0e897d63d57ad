//! Service facade wiring the subscription feed, credential lookup, and group cache.
//!
//! [`GroupService`] follows the feed's default subscription: every time the default's
//! identifier changes it resolves credentials for the new default's tenant and starts a
//! background refresh. [`GroupService::fetch_groups`] serves the same cache on demand.

// crates.io
use tokio::runtime::Handle;
// self
use crate::{
	_prelude::*,
	auth::CredentialSource,
	cache::{CacheConfig, GroupCache},
	dispose::Disposables,
	error::ConfigError,
	group::{GroupList, GroupLister},
	obs,
	subscription::{DefaultChange, Subscription, SubscriptionFeed, SubscriptionTracker},
};

struct ServiceInner {
	tracker: SubscriptionTracker,
	credentials: Arc<dyn CredentialSource>,
	cache: GroupCache,
}
impl ServiceInner {
	fn on_subscriptions_updated(&self) {
		let DefaultChange::Changed { previous, current } = self.tracker.on_updated() else {
			return;
		};

		obs::log_default_changed(previous.as_ref(), current.as_ref().map(|s| &s.id));

		let Some(subscription) = current else {
			return;
		};

		match self.credentials.lookup_credentials(&subscription.tenant_id) {
			Some(credentials) => self.cache.refresh(&credentials, &subscription),
			None => obs::log_missing_credentials(&subscription.id),
		}
	}
}

/// Supplies resource groups for the active subscription.
///
/// Dropping the service detaches it from the subscription feed, same as
/// [`GroupService::dispose`].
pub struct GroupService {
	inner: Arc<ServiceInner>,
	disposables: Disposables,
}
impl GroupService {
	/// Returns a builder for the provided collaborators.
	pub fn builder(
		feed: Arc<dyn SubscriptionFeed>,
		credentials: Arc<dyn CredentialSource>,
		lister: Arc<dyn GroupLister>,
	) -> GroupServiceBuilder {
		GroupServiceBuilder {
			feed,
			credentials,
			lister,
			config: CacheConfig::default(),
			runtime: None,
		}
	}

	/// Returns groups for the current default subscription.
	///
	/// Fails with [`Error::Unauthenticated`] when no default subscription is tracked or its
	/// tenant has no credentials, and with [`Error::RefreshFailed`] when the first listing for
	/// the subscription fails.
	pub async fn fetch_groups(&self) -> Result<GroupList> {
		let subscription = self
			.inner
			.tracker
			.current()
			.ok_or_else(|| Error::unauthenticated("no default subscription is selected"))?;
		let credentials =
			self.inner.credentials.lookup_credentials(&subscription.tenant_id).ok_or_else(|| {
				Error::unauthenticated(format!(
					"no credentials are available for tenant `{}`",
					subscription.tenant_id
				))
			})?;

		self.inner.cache.ensure_refreshed(&credentials, &subscription).await
	}

	/// Returns the tracked default subscription.
	pub fn default_subscription(&self) -> Option<Subscription> {
		self.inner.tracker.current()
	}

	/// Returns the underlying cache.
	pub fn cache(&self) -> &GroupCache {
		&self.inner.cache
	}

	/// Detaches from the subscription feed. In-flight refreshes still settle into the cache.
	pub fn dispose(&self) {
		self.disposables.dispose();
	}

	/// Returns `true` once the service has been disposed.
	pub fn is_disposed(&self) -> bool {
		self.disposables.is_disposed()
	}
}
impl Debug for GroupService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GroupService")
			.field("tracker", &self.inner.tracker)
			.field("cache", &self.inner.cache)
			.field("disposed", &self.is_disposed())
			.finish()
	}
}

/// Builder for [`GroupService`] values.
pub struct GroupServiceBuilder {
	feed: Arc<dyn SubscriptionFeed>,
	credentials: Arc<dyn CredentialSource>,
	lister: Arc<dyn GroupLister>,
	config: CacheConfig,
	runtime: Option<Handle>,
}
impl GroupServiceBuilder {
	/// Overrides the cache configuration.
	pub fn config(mut self, config: CacheConfig) -> Self {
		self.config = config;

		self
	}

	/// Spawns refresh tasks on the provided runtime instead of the current one.
	pub fn runtime(mut self, handle: Handle) -> Self {
		self.runtime = Some(handle);

		self
	}

	/// Builds the service, attaches it to the feed, and evaluates the feed's current default.
	pub fn build(self) -> Result<GroupService> {
		let runtime = match self.runtime {
			Some(handle) => handle,
			None => Handle::try_current().map_err(|_| ConfigError::MissingRuntime)?,
		};
		let inner = Arc::new(ServiceInner {
			tracker: SubscriptionTracker::new(self.feed.clone()),
			credentials: self.credentials,
			cache: GroupCache::new(self.lister, self.config, runtime),
		});
		let disposables = Disposables::default();
		let weak = Arc::downgrade(&inner);

		disposables.push(self.feed.on_updated(Arc::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.on_subscriptions_updated();
			}
		})));
		inner.on_subscriptions_updated();

		Ok(GroupService { inner, disposables })
	}
}
impl Debug for GroupServiceBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GroupServiceBuilder")
			.field("config", &self.config)
			.field("runtime_set", &self.runtime.is_some())
			.finish()
	}
}
