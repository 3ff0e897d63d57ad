//! Crate-level error types surfaced by the cache and the service facade.

// self
use crate::{_prelude::*, group::ListError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Remediation appended to every unauthenticated error.
pub const LOGIN_GUIDANCE: &str = "Log in first to list resource groups.";

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// No default subscription is tracked or its tenant has no credentials.
	#[error("Not signed in: {reason}. {guidance}", guidance = LOGIN_GUIDANCE)]
	Unauthenticated {
		/// Why no credentials could be used.
		reason: String,
	},
	/// The first refresh for a subscription failed and no cached groups exist to fall back to.
	#[error("Resource groups could not be refreshed.")]
	RefreshFailed(
		#[from]
		#[source]
		ListError,
	),
}
impl Error {
	pub(crate) fn unauthenticated(reason: impl Into<String>) -> Self {
		Self::Unauthenticated { reason: reason.into() }
	}
}

/// Configuration and validation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// The stale budget must leave room for a fresh result to win.
	#[error("The stale budget must be greater than zero.")]
	ZeroStaleBudget,
	/// Refresh tasks need a Tokio runtime to be spawned on.
	#[error("No Tokio runtime is available; build the service inside a runtime or pass a handle.")]
	MissingRuntime,
}
