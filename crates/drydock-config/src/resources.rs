//! Typed records for every resource kind a blueprint can declare.
//!
//! Field shapes double as the persistable snapshot each provider reports
//! after a successful create, so every record derives the full serde pair.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blueprint metadata. Opaque to the engine; surfaced by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blueprint {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub intro: String,
}

/// A named bridge network on the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Network {
    pub name: String,
    pub subnet: String,
}

/// A host-path or named volume mounted into a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Volume {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortMapping {
    /// Port inside the container.
    pub local: u16,
    /// Port exposed on the host.
    pub host: u16,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_protocol() -> String {
    "tcp".to_owned()
}

/// A long-running workload attached to one or more networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Container {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub ports: Vec<PortMapping>,
    #[serde(default)]
    pub privileged: bool,
}

/// A proxy container routing external traffic to a backend container or
/// cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingress {
    pub name: String,
    /// Name of the container or cluster the proxy forwards to.
    pub target: String,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub ports: Vec<PortMapping>,
}

/// The optional documentation site, a specialised container serving a
/// local folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Docs {
    pub name: String,
    pub path: String,
    #[serde(default = "default_docs_port")]
    pub port: u16,
}

fn default_docs_port() -> u16 {
    8080
}

/// An ephemeral Kubernetes cluster bootstrapped on the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cluster {
    pub name: String,
    #[serde(default = "default_cluster_driver")]
    pub driver: String,
    #[serde(default = "default_cluster_version")]
    pub version: String,
    pub network: String,
    #[serde(default = "default_cluster_nodes")]
    pub nodes: u8,
}

fn default_cluster_driver() -> String {
    "k3s".to_owned()
}

fn default_cluster_version() -> String {
    "v1.30.4-k3s1".to_owned()
}

fn default_cluster_nodes() -> u8 {
    1
}

/// A Helm release targeting a named cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Helm {
    pub name: String,
    pub cluster: String,
    pub chart: String,
    #[serde(default)]
    pub values: Option<String>,
    #[serde(default)]
    pub set: BTreeMap<String, String>,
}

/// A bundle of raw manifests applied to a named cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct K8sConfig {
    pub name: String,
    pub cluster: String,
    pub paths: Vec<String>,
    #[serde(default)]
    pub wait_until_ready: bool,
}

/// A shell command run on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalExec {
    pub name: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub working_directory: Option<String>,
}

/// A shell command run inside a target container (or a cluster's server
/// container).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteExec {
    pub name: String,
    pub target: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}
