//! Blueprint model and parsing for Drydock environments.
//!
//! This crate defines the configuration layer: the typed resource records
//! (`Network`, `Container`, `Cluster`, ...), the `Config` aggregate with its
//! synthesised WAN network, TOML blueprint-folder parsing
//! (`parse_folder`/`parse_str`), and cross-kind reference resolution
//! (`resolve_references`).

pub mod config;
pub mod parser;
pub mod reference;
pub mod resources;

pub use config::{Config, WAN_NETWORK_NAME, WAN_SUBNET};
pub use parser::{parse_folder, parse_str};
pub use reference::resolve_references;
pub use resources::{
    Blueprint, Cluster, Container, Docs, Helm, Ingress, K8sConfig, LocalExec, Network,
    PortMapping, RemoteExec, Volume,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read blueprint: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse blueprint: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("blueprint path '{0}' is not a directory")]
    NotADirectory(String),
    #[error("blueprint folder '{0}' contains no .toml files")]
    EmptyBlueprint(String),
    #[error("duplicate {kind} '{name}'")]
    DuplicateResource { kind: &'static str, name: String },
    #[error("blueprint metadata declared more than once")]
    DuplicateBlueprint,
    #[error("docs site declared more than once")]
    DuplicateDocs,
    #[error("network name '{0}' is reserved")]
    ReservedName(String),
    #[error("{kind} '{name}' references unknown {target_kind} '{target}'")]
    UnknownReference {
        kind: &'static str,
        name: String,
        target_kind: &'static str,
        target: String,
    },
}
