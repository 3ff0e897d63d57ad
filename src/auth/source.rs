//! Credential lookup contract and an in-memory implementation.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TenantId},
};

/// Login collaborator that resolves usable credentials for a tenant.
///
/// Lookups are synchronous: the source is expected to answer from its own session state and
/// return `None` when the user is not signed in to the tenant.
pub trait CredentialSource
where
	Self: Send + Sync,
{
	/// Returns credentials for the tenant, if any are available.
	fn lookup_credentials(&self, tenant: &TenantId) -> Option<Credentials>;
}

/// Thread-safe credential source that keeps signed-in tenants in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialSource(Arc<RwLock<HashMap<TenantId, Credentials>>>);
impl MemoryCredentialSource {
	/// Records credentials for their tenant, replacing any previous entry.
	pub fn sign_in(&self, credentials: Credentials) {
		self.0.write().insert(credentials.tenant.clone(), credentials);
	}

	/// Forgets the credentials for the tenant and returns them.
	pub fn sign_out(&self, tenant: &TenantId) -> Option<Credentials> {
		self.0.write().remove(tenant)
	}
}
impl CredentialSource for MemoryCredentialSource {
	fn lookup_credentials(&self, tenant: &TenantId) -> Option<Credentials> {
		self.0.read().get(tenant).cloned()
	}
}
