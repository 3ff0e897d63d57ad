//! In-process [`SubscriptionFeed`] for embedding hosts and tests.

// self
use crate::{
	_prelude::*,
	dispose::Registration,
	subscription::{Subscription, SubscriptionFeed, UpdateListener},
};

#[derive(Default)]
struct FeedState {
	subscriptions: RwLock<Vec<Subscription>>,
	listeners: Mutex<BTreeMap<u64, UpdateListener>>,
	next_listener: AtomicU64,
}

/// Thread-safe subscription feed whose set is replaced wholesale by the host.
#[derive(Clone, Default)]
pub struct MemorySubscriptionFeed(Arc<FeedState>);
impl MemorySubscriptionFeed {
	/// Creates a feed seeded with the provided subscriptions.
	pub fn new(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
		let feed = Self::default();

		*feed.0.subscriptions.write() = subscriptions.into_iter().collect();

		feed
	}

	/// Replaces the subscription set and notifies every attached listener.
	pub fn replace(&self, subscriptions: impl IntoIterator<Item = Subscription>) {
		*self.0.subscriptions.write() = subscriptions.into_iter().collect();

		self.notify();
	}

	/// Fires every attached listener without changing the set.
	pub fn notify(&self) {
		// Listeners may attach or detach re-entrantly.
		let listeners = self.0.listeners.lock().values().cloned().collect::<Vec<_>>();

		for listener in listeners {
			listener();
		}
	}

	/// Number of attached listeners.
	pub fn listener_count(&self) -> usize {
		self.0.listeners.lock().len()
	}
}
impl SubscriptionFeed for MemorySubscriptionFeed {
	fn subscriptions(&self) -> Vec<Subscription> {
		self.0.subscriptions.read().clone()
	}

	fn on_updated(&self, listener: UpdateListener) -> Registration {
		let id = self.0.next_listener.fetch_add(1, Ordering::Relaxed);

		self.0.listeners.lock().insert(id, listener);

		let state = Arc::downgrade(&self.0);

		Registration::new(move || {
			if let Some(state) = state.upgrade() {
				state.listeners.lock().remove(&id);
			}
		})
	}
}
impl Debug for MemorySubscriptionFeed {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemorySubscriptionFeed")
			.field("subscriptions", &self.0.subscriptions.read().len())
			.field("listeners", &self.listener_count())
			.finish()
	}
}
