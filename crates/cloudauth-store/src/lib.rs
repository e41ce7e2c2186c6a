#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for the in-memory store.
pub const TRACING_TARGET_MEMORY: &str = "cloudauth_store::memory";

/// Tracing target for the file-backed store.
///
/// Use this target for logging table directory setup and record reads/writes.
pub const TRACING_TARGET_FILE: &str = "cloudauth_store::file";

mod error;
pub mod model;
mod store;

pub use crate::error::{StoreError, StoreResult};
pub use crate::model::User;
pub use crate::store::{FileStoreConfig, FileUserStore, MemoryUserStore, UserStore};
