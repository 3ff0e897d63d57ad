//! Stale-while-revalidate resource group cache for the active cloud subscription: deduplicated
//! background refreshes, a bounded stale fallback, and subscription-aware wiring in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod dispose;
pub mod error;
pub mod group;
pub mod obs;
pub mod service;
pub mod subscription;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		mem,
		pin::Pin,
		str::FromStr,
		sync::{
			Arc,
			atomic::{AtomicBool, AtomicU64, Ordering},
		},
		time::Duration,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

pub use crate::{
	cache::{CacheConfig, CachedGroups, GroupCache},
	error::{Error, Result},
	group::{Group, GroupList, GroupLister},
	service::GroupService,
};
#[cfg(test)] use {color_eyre as _, serde_json as _};
