mod common;

// self
use common::_preludet::*;
use resource_group_cache::{
	GroupService,
	auth::MemoryCredentialSource,
	error::LOGIN_GUIDANCE,
	subscription::{MemorySubscriptionFeed, Subscription},
};

struct Harness {
	feed: MemorySubscriptionFeed,
	credentials: MemoryCredentialSource,
	lister: Arc<ScriptedLister>,
	service: GroupService,
}

fn harness(
	subscriptions: Vec<Subscription>,
	signed_in: bool,
	steps: Vec<Step>,
) -> Harness {
	let feed = MemorySubscriptionFeed::new(subscriptions);
	let credentials = MemoryCredentialSource::default();

	if signed_in {
		credentials.sign_in(common::credentials());
	}

	let lister = ScriptedLister::new(steps);
	let service = GroupService::builder(
		Arc::new(feed.clone()),
		Arc::new(credentials.clone()),
		lister.clone(),
	)
	.build()
	.expect("Service should build inside a runtime.");

	Harness { feed, credentials, lister, service }
}

fn id(value: &str) -> SubscriptionId {
	SubscriptionId::new(value).expect("Subscription fixture should be valid.")
}

async fn settle() {
	tokio::time::sleep(Duration::from_millis(5_000)).await;
}

#[tokio::test(start_paused = true)]
async fn fetch_without_default_subscription_is_unauthenticated() {
	let h = harness(vec![subscription("sub-1", false)], true, vec![]);
	let err = h.service.fetch_groups().await.expect_err("No default subscription is tracked.");

	assert!(matches!(err, Error::Unauthenticated { .. }));
	assert!(err.to_string().ends_with(LOGIN_GUIDANCE));
	assert_eq!(h.lister.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn construction_refreshes_the_initial_default() {
	let h = harness(
		vec![subscription("sub-1", true), subscription("sub-2", false)],
		true,
		vec![Step::ok(100, &["rg-a"]), Step::ok(2_000, &["rg-b"])],
	);

	assert_eq!(h.service.default_subscription().map(|s| s.id), Some(id("sub-1")));
	assert!(h.service.cache().is_refreshing(&id("sub-1")));

	settle().await;

	assert_eq!(h.lister.seen(), [id("sub-1")]);

	// The fetch starts a slow listing, so the groups from construction are served.
	let groups = h.service.fetch_groups().await.expect("Fetch should serve the cached groups.");

	assert_eq!(names(&groups), ["rg-a"]);
	assert_eq!(h.lister.calls(), 2);
	assert_eq!(h.service.cache().metrics().stale_served(), 1);
}

#[tokio::test(start_paused = true)]
async fn fetch_joins_the_notification_refresh() {
	let h = harness(vec![subscription("sub-1", true)], true, vec![Step::ok(1_000, &["rg-a"])]);
	let groups = h.service.fetch_groups().await.expect("Fetch should join the in-flight refresh.");

	assert_eq!(names(&groups), ["rg-a"]);
	assert_eq!(h.lister.calls(), 1);
	assert_eq!(h.service.cache().metrics().deduplicated(), 1);
}

#[tokio::test(start_paused = true)]
async fn redundant_notifications_do_not_refresh_again() {
	let h = harness(vec![subscription("sub-1", true)], true, vec![]);

	settle().await;
	h.feed.notify();
	h.feed.replace([subscription("sub-1", true).with_name("renamed"), subscription("sub-2", false)]);
	settle().await;

	assert_eq!(h.lister.calls(), 1);
	assert_eq!(h.service.cache().metrics().started(), 1);
}

#[tokio::test(start_paused = true)]
async fn default_change_refreshes_the_new_subscription() {
	let h = harness(
		vec![subscription("sub-1", true), subscription("sub-2", false)],
		true,
		vec![Step::ok(0, &["one"]), Step::ok(0, &["two"]), Step::ok(0, &["two"])],
	);

	settle().await;
	h.feed.replace([subscription("sub-1", false), subscription("sub-2", true)]);
	settle().await;

	assert_eq!(h.lister.seen(), [id("sub-1"), id("sub-2")]);

	let cached =
		h.service.cache().cached(&id("sub-2")).expect("New default should have been refreshed.");

	assert_eq!(names(&cached.groups), ["two"]);
	assert_eq!(names(&h.service.fetch_groups().await.expect("Fetch should succeed.")), ["two"]);
}

#[tokio::test(start_paused = true)]
async fn default_change_without_credentials_skips_refresh() {
	let h = harness(vec![subscription("sub-1", true)], false, vec![]);

	settle().await;

	assert_eq!(h.lister.calls(), 0);
	assert!(matches!(
		h.service.fetch_groups().await,
		Err(Error::Unauthenticated { ref reason }) if reason.contains("tenant-1")
	));

	h.credentials.sign_in(credentials());

	// The stored default is unchanged, so only an explicit fetch triggers a listing.
	h.feed.notify();
	settle().await;

	assert_eq!(h.lister.calls(), 0);
	assert!(h.service.fetch_groups().await.is_ok());
	assert_eq!(h.lister.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn losing_the_default_makes_fetch_unauthenticated() {
	let h = harness(vec![subscription("sub-1", true)], true, vec![]);

	settle().await;
	h.feed.replace([]);

	assert!(h.service.default_subscription().is_none());
	assert!(matches!(h.service.fetch_groups().await, Err(Error::Unauthenticated { .. })));
}

#[tokio::test(start_paused = true)]
async fn dispose_detaches_but_lets_refreshes_settle() {
	let h = harness(vec![subscription("sub-1", true)], true, vec![Step::ok(1_000, &["rg-a"])]);

	assert_eq!(h.feed.listener_count(), 1);

	h.service.dispose();
	h.service.dispose();

	assert!(h.service.is_disposed());
	assert_eq!(h.feed.listener_count(), 0);

	h.feed.replace([subscription("sub-2", true)]);
	settle().await;

	assert_eq!(h.service.default_subscription().map(|s| s.id), Some(id("sub-1")));
	assert_eq!(h.lister.seen(), [id("sub-1")]);
	assert!(h.service.cache().cached(&id("sub-1")).is_some());
}
