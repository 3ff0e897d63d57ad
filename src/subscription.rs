//! Subscription model, the change-feed contract, and default-subscription tracking.

pub mod memory;
pub mod tracker;

pub use memory::MemorySubscriptionFeed;
pub use tracker::{DefaultChange, SubscriptionTracker};

// self
use crate::{
	_prelude::*,
	auth::{SubscriptionId, TenantId},
	dispose::Registration,
};

/// Callback invoked whenever the feed's subscription set changes.
pub type UpdateListener = Arc<dyn Fn() + Send + Sync>;

/// Externally owned account/billing scope.
///
/// Only `id`, `tenant_id`, and `is_default` drive caching decisions; `name` is carried for
/// display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
	/// Subscription identifier.
	pub id: SubscriptionId,
	/// Tenant owning the subscription.
	pub tenant_id: TenantId,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Whether this subscription is the currently active one.
	#[serde(default)]
	pub is_default: bool,
}
impl Subscription {
	/// Creates a non-default subscription with an empty display name.
	pub fn new(id: SubscriptionId, tenant_id: TenantId) -> Self {
		Self { id, tenant_id, name: String::new(), is_default: false }
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();

		self
	}

	/// Marks the subscription as the default one.
	pub fn with_default(mut self, is_default: bool) -> Self {
		self.is_default = is_default;

		self
	}
}

/// Subscription-change notification source.
pub trait SubscriptionFeed
where
	Self: Send + Sync,
{
	/// Returns the current subscription set.
	fn subscriptions(&self) -> Vec<Subscription>;

	/// Attaches a listener fired after every update; dropping or releasing the returned
	/// [`Registration`] detaches it.
	fn on_updated(&self, listener: UpdateListener) -> Registration;
}

/// Picks the subscription flagged as default, if any.
pub fn default_subscription(subscriptions: &[Subscription]) -> Option<&Subscription> {
	subscriptions.iter().find(|subscription| subscription.is_default)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn subscription(id: &str, is_default: bool) -> Subscription {
		Subscription::new(
			SubscriptionId::new(id).expect("Subscription fixture should be valid."),
			TenantId::new("tenant-1").expect("Tenant fixture should be valid."),
		)
		.with_default(is_default)
	}

	#[test]
	fn default_subscription_picks_flagged_entry() {
		let set = [subscription("a", false), subscription("b", true), subscription("c", false)];

		assert_eq!(default_subscription(&set).map(|s| &*s.id), Some("b"));
		assert!(default_subscription(&set[..1]).is_none());
		assert!(default_subscription(&[]).is_none());
	}

	#[test]
	fn subscription_deserializes_camel_case_payloads() {
		let payload = r#"{"id":"sub-1","tenantId":"tenant-1","isDefault":true}"#;
		let parsed: Subscription =
			serde_json::from_str(payload).expect("Subscription payload should deserialize.");

		assert!(parsed.is_default);
		assert_eq!(&*parsed.tenant_id, "tenant-1");
		assert!(parsed.name.is_empty());
	}
}
