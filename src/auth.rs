//! Identity-domain identifiers, credentials, and the credential lookup seam.

pub mod credentials;
pub mod id;
pub mod source;

pub use credentials::*;
pub use id::*;
pub use source::*;
