//! Cross-kind reference resolution.
//!
//! The parser leaves references as plain names; this pass checks that every
//! name points at a declared resource (or the implicit WAN) before any
//! provider is constructed.

use crate::config::Config;
use crate::ConfigError;

/// Validate every cross-kind reference in `config`.
///
/// Checked references:
/// - container, ingress, and cluster network attachments;
/// - helm and k8s_config cluster targets;
/// - ingress and remote_exec targets (a container or a cluster).
pub fn resolve_references(config: &Config) -> Result<(), ConfigError> {
    for container in &config.containers {
        for network in &container.networks {
            require_network(config, "container", &container.name, network)?;
        }
    }

    for ingress in &config.ingresses {
        for network in &ingress.networks {
            require_network(config, "ingress", &ingress.name, network)?;
        }
        require_workload(config, "ingress", &ingress.name, &ingress.target)?;
    }

    for cluster in &config.clusters {
        require_network(config, "cluster", &cluster.name, &cluster.network)?;
    }

    for helm in &config.helm_charts {
        require_cluster(config, "helm", &helm.name, &helm.cluster)?;
    }

    for k8s in &config.k8s_configs {
        require_cluster(config, "k8s_config", &k8s.name, &k8s.cluster)?;
    }

    for exec in &config.remote_execs {
        require_workload(config, "remote_exec", &exec.name, &exec.target)?;
    }

    Ok(())
}

fn require_network(
    config: &Config,
    kind: &'static str,
    name: &str,
    network: &str,
) -> Result<(), ConfigError> {
    if config.network(network).is_none() {
        return Err(ConfigError::UnknownReference {
            kind,
            name: name.to_owned(),
            target_kind: "network",
            target: network.to_owned(),
        });
    }
    Ok(())
}

fn require_cluster(
    config: &Config,
    kind: &'static str,
    name: &str,
    cluster: &str,
) -> Result<(), ConfigError> {
    if config.cluster(cluster).is_none() {
        return Err(ConfigError::UnknownReference {
            kind,
            name: name.to_owned(),
            target_kind: "cluster",
            target: cluster.to_owned(),
        });
    }
    Ok(())
}

/// A target that may be either a container or a cluster.
fn require_workload(
    config: &Config,
    kind: &'static str,
    name: &str,
    target: &str,
) -> Result<(), ConfigError> {
    if config.container(target).is_none() && config.cluster(target).is_none() {
        return Err(ConfigError::UnknownReference {
            kind,
            name: name.to_owned(),
            target_kind: "container or cluster",
            target: target.to_owned(),
        });
    }
    Ok(())
}
