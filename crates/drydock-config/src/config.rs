//! The `Config` aggregate: every resource a blueprint declared, in
//! declaration order, plus the synthesised WAN network.

use crate::resources::{
    Blueprint, Cluster, Container, Docs, Helm, Ingress, K8sConfig, LocalExec, Network, RemoteExec,
};

/// Name of the implicit top-level network every environment gets.
pub const WAN_NETWORK_NAME: &str = "wan";

/// Subnet of the implicit WAN network.
pub const WAN_SUBNET: &str = "10.200.0.0/16";

/// In-memory representation of a blueprint after parsing, or of a state
/// file after reconstruction. Read-only once built; collections preserve
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub blueprint: Option<Blueprint>,
    /// Synthesised at construction, never parsed or reloaded from state.
    pub wan: Network,
    pub networks: Vec<Network>,
    pub containers: Vec<Container>,
    pub ingresses: Vec<Ingress>,
    pub docs: Option<Docs>,
    pub clusters: Vec<Cluster>,
    pub helm_charts: Vec<Helm>,
    pub k8s_configs: Vec<K8sConfig>,
    pub local_execs: Vec<LocalExec>,
    pub remote_execs: Vec<RemoteExec>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            blueprint: None,
            wan: Network {
                name: WAN_NETWORK_NAME.to_owned(),
                subnet: WAN_SUBNET.to_owned(),
            },
            networks: Vec::new(),
            containers: Vec::new(),
            ingresses: Vec::new(),
            docs: None,
            clusters: Vec::new(),
            helm_charts: Vec::new(),
            k8s_configs: Vec::new(),
            local_execs: Vec::new(),
            remote_execs: Vec::new(),
        }
    }

    /// Total number of declared resources across all kinds. The WAN is
    /// implicit and not counted.
    pub fn resource_count(&self) -> usize {
        self.networks.len()
            + self.containers.len()
            + self.ingresses.len()
            + usize::from(self.docs.is_some())
            + self.clusters.len()
            + self.helm_charts.len()
            + self.k8s_configs.len()
            + self.local_execs.len()
            + self.remote_execs.len()
    }

    /// Look up a declared network by name. The WAN resolves too, so
    /// resources may attach to it without declaring it.
    pub fn network(&self, name: &str) -> Option<&Network> {
        if name == WAN_NETWORK_NAME {
            return Some(&self.wan);
        }
        self.networks.iter().find(|n| n.name == name)
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.name == name)
    }

    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
