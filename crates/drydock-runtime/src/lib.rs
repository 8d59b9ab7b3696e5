//! Resource providers and external-system clients for Drydock.
//!
//! This crate implements the execution layer beneath the engine: the
//! `Provider` trait with one implementation per resource kind, the typed
//! client traits (`ContainerRuntime`, `ContainerTasks`, `Kubernetes`,
//! `Command`, `Http`) with CLI-backed implementations, and the `Clients`
//! bundle the engine constructs once and hands to every provider.

pub mod clients;
pub mod providers;

pub use clients::{Clients, ContainerRuntime, ContainerTasks, Http, Kubernetes, RunOptions};
pub use providers::Provider;

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("'{command}' exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
    #[error("'{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    #[error("empty command")]
    EmptyCommand,
    #[error("health check for '{url}' failed: {reason}")]
    HealthCheck { url: String, reason: String },
    #[error("client I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{kind} '{name}': {source}")]
    Client {
        kind: &'static str,
        name: String,
        #[source]
        source: ClientError,
    },
    #[error("{kind} '{name}': {message}")]
    Failed {
        kind: &'static str,
        name: String,
        message: String,
    },
}

impl ProviderError {
    pub fn client(kind: &'static str, name: &str, source: ClientError) -> Self {
        Self::Client {
            kind,
            name: name.to_owned(),
            source,
        }
    }

    pub fn failed(kind: &'static str, name: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            name: name.to_owned(),
            message: message.into(),
        }
    }
}
