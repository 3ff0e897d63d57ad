//! Resource group model and the remote listing contract.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, GroupId},
	subscription::Subscription,
};

/// Immutable list of groups shared between the cache and every caller.
pub type GroupList = Arc<[Group]>;

/// Boxed future returned by [`GroupLister::list_groups`].
pub type ListFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Group>, ListError>> + 'a + Send>>;

/// Named logical container belonging to a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
	/// Identity of the group.
	pub id: GroupId,
	/// Display name.
	pub name: String,
}
impl Group {
	/// Creates a group.
	pub fn new(id: GroupId, name: impl Into<String>) -> Self {
		Self { id, name: name.into() }
	}
}

/// Remote listing collaborator that retrieves every group of a subscription.
pub trait GroupLister
where
	Self: Send + Sync,
{
	/// Lists the groups visible to `credentials` within `subscription`.
	fn list_groups<'a>(
		&'a self,
		credentials: &'a Credentials,
		subscription: &'a Subscription,
	) -> ListFuture<'a>;
}

/// Failure reported by a [`GroupLister`] or by the refresh task that drives it.
///
/// One settled refresh is observed by every caller waiting on it, so the error is cloneable and
/// carries rendered messages rather than transport-specific sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ListError {
	/// The listing endpoint could not be reached.
	#[error("Group listing transport failed: {message}.")]
	Transport {
		/// Human-readable error payload.
		message: String,
	},
	/// The listing endpoint answered with an error.
	#[error("Group listing was rejected: {message}.")]
	Rejected {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Human-readable error payload.
		message: String,
	},
	/// The refresh task stopped before producing a result.
	#[error("Group refresh was interrupted: {message}.")]
	Interrupted {
		/// Human-readable error payload.
		message: String,
	},
}
impl ListError {
	/// Builds a transport failure from any displayable error.
	pub fn transport(message: impl Display) -> Self {
		Self::Transport { message: message.to_string() }
	}

	/// Builds a rejection with an optional status code.
	pub fn rejected(status: Option<u16>, message: impl Display) -> Self {
		Self::Rejected { status, message: message.to_string() }
	}
}
