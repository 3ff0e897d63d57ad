//! Tenant-scoped credentials that redact their secret material.

// self
use crate::{_prelude::*, auth::TenantId};

/// Redacted bearer secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSecret(String);
impl AccessSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessSecret").field(&"<redacted>").finish()
	}
}
impl Display for AccessSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Credentials issued for a tenant, handed to the group lister on every refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Tenant the credentials were issued under.
	pub tenant: TenantId,
	/// Bearer secret presented to the listing endpoint.
	pub secret: AccessSecret,
}
impl Credentials {
	/// Creates credentials for the provided tenant.
	pub fn new(tenant: TenantId, secret: impl Into<String>) -> Self {
		Self { tenant, secret: AccessSecret::new(secret) }
	}
}
