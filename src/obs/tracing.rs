// self
use crate::{_prelude::*, auth::SubscriptionId, group::ListError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRefresh<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRefresh<F> = F;

/// A span builder used around refresh work.
#[derive(Clone, Debug)]
pub struct RefreshSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RefreshSpan {
	/// Creates a new span tagged with the subscription + stage.
	pub fn new(subscription: &SubscriptionId, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"resource_group_cache.refresh",
				subscription = %subscription,
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (subscription, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRefresh<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a refresh failure that no caller will observe directly.
pub(crate) fn log_refresh_failure(subscription: &SubscriptionId, error: &ListError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(subscription = %subscription, %error, "Group refresh failed.");
	#[cfg(not(feature = "tracing"))]
	let _ = (subscription, error);
}

/// Logs that a caller was handed the previously cached groups.
pub(crate) fn log_stale_served(subscription: &SubscriptionId, reason: &'static str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(subscription = %subscription, reason, "Serving cached groups.");
	#[cfg(not(feature = "tracing"))]
	let _ = (subscription, reason);
}

/// Logs that a request joined an in-flight refresh.
pub(crate) fn log_refresh_joined(subscription: &SubscriptionId) {
	#[cfg(feature = "tracing")]
	tracing::debug!(subscription = %subscription, "Joining in-flight group refresh.");
	#[cfg(not(feature = "tracing"))]
	let _ = subscription;
}

/// Logs that a completed refresh lost to a newer cached generation.
pub(crate) fn log_refresh_superseded(subscription: &SubscriptionId, generation: u64) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		subscription = %subscription,
		generation,
		"Discarding refresh result older than the cached one."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (subscription, generation);
}

/// Logs a default-subscription transition.
pub(crate) fn log_default_changed(
	previous: Option<&SubscriptionId>,
	current: Option<&SubscriptionId>,
) {
	#[cfg(feature = "tracing")]
	tracing::info!(
		previous = previous.map(|id| &**id),
		current = current.map(|id| &**id),
		"Default subscription changed."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (previous, current);
}

/// Logs that a new default could not be refreshed for lack of credentials.
pub(crate) fn log_missing_credentials(subscription: &SubscriptionId) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		subscription = %subscription,
		"No credentials for the default subscription's tenant; skipping refresh."
	);
	#[cfg(not(feature = "tracing"))]
	let _ = subscription;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let subscription =
			SubscriptionId::new("sub-span").expect("Subscription fixture should be valid.");
		let span = RefreshSpan::new(&subscription, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
