//! Default-subscription tracking driven by feed notifications.

// self
use crate::{
	_prelude::*,
	auth::SubscriptionId,
	subscription::{Subscription, SubscriptionFeed, default_subscription},
};

/// Outcome of re-evaluating the default subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultChange {
	/// The default's identifier matches the stored one (both may be absent).
	Unchanged,
	/// The default moved; `current` is the new default, if any.
	Changed {
		/// Identifier of the default that was replaced.
		previous: Option<SubscriptionId>,
		/// Newly stored default.
		current: Option<Subscription>,
	},
}

/// Remembers the active subscription and detects when its identifier changes.
pub struct SubscriptionTracker {
	feed: Arc<dyn SubscriptionFeed>,
	current: Mutex<Option<Subscription>>,
}
impl SubscriptionTracker {
	/// Creates a tracker with no default stored yet.
	///
	/// Call [`SubscriptionTracker::on_updated`] once after construction to pick up the feed's
	/// initial state.
	pub fn new(feed: Arc<dyn SubscriptionFeed>) -> Self {
		Self { feed, current: Mutex::new(None) }
	}

	/// Returns the stored default subscription.
	pub fn current(&self) -> Option<Subscription> {
		self.current.lock().clone()
	}

	/// Recomputes the default from the feed and stores it when its identifier differs.
	///
	/// The feed is read while the stored default is locked, so concurrent notifications settle
	/// in feed order. Feeds must not call back into the tracker from
	/// [`SubscriptionFeed::subscriptions`].
	pub fn on_updated(&self) -> DefaultChange {
		let mut current = self.current.lock();
		let subscriptions = self.feed.subscriptions();
		let next = default_subscription(&subscriptions);

		if current.as_ref().map(|s| &s.id) == next.map(|s| &s.id) {
			return DefaultChange::Unchanged;
		}

		let previous = current.take().map(|s| s.id);

		*current = next.cloned();

		DefaultChange::Changed { previous, current: current.clone() }
	}
}
impl Debug for SubscriptionTracker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SubscriptionTracker").field("current", &*self.current.lock()).finish()
	}
}
