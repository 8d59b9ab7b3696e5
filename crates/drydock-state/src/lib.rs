//! Durable environment state for Drydock.
//!
//! This crate provides the persistence layer: `StateLayout` for the
//! well-known on-disk paths, `StateEntry` for the tagged-union document
//! format, and `StateStore` for atomically writing the state file after an
//! apply and reconstructing a `Config` from it for a later destroy.

pub mod entry;
pub mod layout;
pub mod store;

pub use entry::StateEntry;
pub use layout::StateLayout;
pub use store::{config_from_state, load_entries, StateStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("malformed state entry: {0}")]
    Malformed(String),
}
