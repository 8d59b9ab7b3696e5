//! The Drydock engine.
//!
//! This crate ties blueprint parsing, providers, and the state store into
//! the `Engine`, the dependency-ordered parallel resource lifecycle
//! manager. The plan builder maps a `Config` onto seven fixed provider
//! groups; the executor runs one group at a time with first-error
//! semantics on create and best-effort semantics on destroy; the facade
//! persists what was actually created so a later run can destroy it from
//! state alone.

pub mod engine;
pub mod exec;
pub mod plan;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::Engine;
pub use plan::{generate_providers, Plan, PLAN_GROUPS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("blueprint error: {0}")]
    Config(#[from] drydock_config::ConfigError),
    #[error("state error: {0}")]
    State(#[from] drydock_state::StateError),
    #[error("client error: {0}")]
    Client(#[from] drydock_runtime::ClientError),
    // provider errors pass through verbatim
    #[error(transparent)]
    Provider(#[from] drydock_runtime::ProviderError),
}
