#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
// self
use resource_group_cache::{
	Group,
	auth::{Credentials, GroupId, SubscriptionId, TenantId},
	group::{GroupLister, ListError, ListFuture},
	subscription::Subscription,
};

pub mod _preludet {
	//! Shared imports and fixtures for the integration tests.

	pub use std::{sync::Arc, time::Duration};

	pub use resource_group_cache::{
		Error,
		auth::SubscriptionId,
		group::{GroupLister, ListError},
	};

	pub use super::{ScriptedLister, Step, credentials, groups, names, subscription};
}

/// One scripted listing: wait `delay`, then resolve to `outcome`.
#[derive(Clone, Debug)]
pub struct Step {
	pub delay: Duration,
	pub outcome: Result<Vec<Group>, ListError>,
}
impl Step {
	pub fn ok(delay_ms: u64, names: &[&str]) -> Self {
		Self { delay: Duration::from_millis(delay_ms), outcome: Ok(groups(names)) }
	}

	pub fn fail(delay_ms: u64, message: &str) -> Self {
		Self {
			delay: Duration::from_millis(delay_ms),
			outcome: Err(ListError::transport(message)),
		}
	}
}

/// Lister that replays scripted steps and counts invocations per subscription.
#[derive(Debug, Default)]
pub struct ScriptedLister {
	steps: Mutex<VecDeque<Step>>,
	calls: AtomicUsize,
	seen: Mutex<Vec<SubscriptionId>>,
}
impl ScriptedLister {
	pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
		Arc::new(Self { steps: Mutex::new(steps.into_iter().collect()), ..Default::default() })
	}

	pub fn push(&self, step: Step) {
		self.steps.lock().push_back(step);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn seen(&self) -> Vec<SubscriptionId> {
		self.seen.lock().clone()
	}
}
impl GroupLister for ScriptedLister {
	fn list_groups<'a>(
		&'a self,
		_credentials: &'a Credentials,
		subscription: &'a Subscription,
	) -> ListFuture<'a> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.seen.lock().push(subscription.id.clone());

		let step = self.steps.lock().pop_front().unwrap_or_else(|| Step::ok(0, &[]));

		Box::pin(async move {
			tokio::time::sleep(step.delay).await;

			step.outcome
		})
	}
}

pub fn groups(names: &[&str]) -> Vec<Group> {
	names
		.iter()
		.map(|name| {
			let id = GroupId::new(format!("/subscriptions/sub/resourceGroups/{name}"))
				.expect("Group fixture should be valid.");

			Group::new(id, *name)
		})
		.collect()
}

pub fn names(groups: &[Group]) -> Vec<String> {
	groups.iter().map(|group| group.name.clone()).collect()
}

pub fn tenant() -> TenantId {
	TenantId::new("tenant-1").expect("Tenant fixture should be valid.")
}

pub fn subscription(id: &str, is_default: bool) -> Subscription {
	Subscription::new(SubscriptionId::new(id).expect("Subscription fixture should be valid."), tenant())
		.with_name(format!("Subscription {id}"))
		.with_default(is_default)
}

pub fn credentials() -> Credentials {
	Credentials::new(tenant(), "bearer-secret")
}
