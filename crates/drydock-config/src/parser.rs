//! Blueprint folder parsing.
//!
//! A blueprint is a directory of `.toml` files, each holding optional
//! `[blueprint]` metadata plus arrays of resource tables. Files are parsed
//! in lexicographic filename order and merged into a single [`Config`];
//! within a kind, declaration order is preserved.

use crate::config::{Config, WAN_NETWORK_NAME};
use crate::resources::{
    Blueprint, Cluster, Container, Docs, Helm, Ingress, K8sConfig, LocalExec, Network, RemoteExec,
};
use crate::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The serde shape of one blueprint file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlueprintFile {
    #[serde(default)]
    blueprint: Option<Blueprint>,
    #[serde(default)]
    network: Vec<Network>,
    #[serde(default)]
    container: Vec<Container>,
    #[serde(default)]
    ingress: Vec<Ingress>,
    #[serde(default)]
    docs: Vec<Docs>,
    #[serde(default)]
    cluster: Vec<Cluster>,
    #[serde(default)]
    helm: Vec<Helm>,
    #[serde(default)]
    k8s_config: Vec<K8sConfig>,
    #[serde(default)]
    local_exec: Vec<LocalExec>,
    #[serde(default)]
    remote_exec: Vec<RemoteExec>,
}

/// Parse a single blueprint document into a fresh [`Config`].
pub fn parse_str(input: &str) -> Result<Config, ConfigError> {
    let mut config = Config::new();
    let file: BlueprintFile = toml::from_str(input)?;
    merge_file(&mut config, file)?;
    Ok(config)
}

/// Parse every `.toml` file in `folder` into a [`Config`].
pub fn parse_folder(folder: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(ConfigError::NotADirectory(folder.display().to_string()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "toml") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(ConfigError::EmptyBlueprint(folder.display().to_string()));
    }
    paths.sort();

    let mut config = Config::new();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let file: BlueprintFile = toml::from_str(&content)?;
        merge_file(&mut config, file)?;
    }
    Ok(config)
}

fn merge_file(config: &mut Config, file: BlueprintFile) -> Result<(), ConfigError> {
    if let Some(blueprint) = file.blueprint {
        if config.blueprint.is_some() {
            return Err(ConfigError::DuplicateBlueprint);
        }
        config.blueprint = Some(blueprint);
    }

    for network in file.network {
        if network.name == WAN_NETWORK_NAME {
            return Err(ConfigError::ReservedName(network.name));
        }
        push_unique(&mut config.networks, network, "network", |n| &n.name)?;
    }
    for container in file.container {
        push_unique(&mut config.containers, container, "container", |c| &c.name)?;
    }
    for ingress in file.ingress {
        push_unique(&mut config.ingresses, ingress, "ingress", |i| &i.name)?;
    }
    for docs in file.docs {
        if config.docs.is_some() {
            return Err(ConfigError::DuplicateDocs);
        }
        config.docs = Some(docs);
    }
    for cluster in file.cluster {
        push_unique(&mut config.clusters, cluster, "cluster", |c| &c.name)?;
    }
    for helm in file.helm {
        push_unique(&mut config.helm_charts, helm, "helm", |h| &h.name)?;
    }
    for k8s in file.k8s_config {
        push_unique(&mut config.k8s_configs, k8s, "k8s_config", |k| &k.name)?;
    }
    for exec in file.local_exec {
        push_unique(&mut config.local_execs, exec, "local_exec", |e| &e.name)?;
    }
    for exec in file.remote_exec {
        push_unique(&mut config.remote_execs, exec, "remote_exec", |e| &e.name)?;
    }

    Ok(())
}

fn push_unique<T>(
    collection: &mut Vec<T>,
    item: T,
    kind: &'static str,
    name: impl Fn(&T) -> &String,
) -> Result<(), ConfigError> {
    if collection.iter().any(|existing| name(existing) == name(&item)) {
        return Err(ConfigError::DuplicateResource {
            kind,
            name: name(&item).clone(),
        });
    }
    collection.push(item);
    Ok(())
}
