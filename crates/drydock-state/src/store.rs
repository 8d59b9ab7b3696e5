//! Saving and reloading the state document.

use crate::entry::StateEntry;
use crate::layout::StateLayout;
use crate::StateError;
use drydock_config::{Config, WAN_NETWORK_NAME};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes the ordered entry list to the well-known state path.
pub struct StateStore {
    layout: StateLayout,
}

impl StateStore {
    pub fn new(layout: StateLayout) -> Self {
        Self { layout }
    }

    pub fn state_path(&self) -> std::path::PathBuf {
        self.layout.state_path()
    }

    /// Replace the state file with `entries`.
    ///
    /// The state directory is created if absent; a failure there is
    /// tolerated (the write below reports the real problem). Any previous
    /// state file is removed before the new document is persisted
    /// atomically.
    pub fn save(&self, entries: &[StateEntry]) -> Result<(), StateError> {
        let dir = self.layout.state_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            debug!("could not create state dir {}: {e}", dir.display());
        }

        let path = self.layout.state_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StateError::Io(e.error))?;

        Ok(())
    }
}

/// Decode the state file into entries, in file order.
///
/// Entries with an unrecognized `Type` are skipped so newer state files
/// stay readable; a malformed `Value` under a known tag is an error.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<StateEntry>, StateError> {
    let content = fs::read_to_string(path)?;
    let raw: Vec<Value> = serde_json::from_str(&content)?;

    let mut entries = Vec::with_capacity(raw.len());
    for value in raw {
        let tag = value
            .get("Type")
            .and_then(Value::as_str)
            .ok_or_else(|| StateError::Malformed("entry is missing a Type tag".to_owned()))?
            .to_owned();
        if !StateEntry::KNOWN_TAGS.contains(&tag.as_str()) {
            debug!("skipping state entry with unknown type '{tag}'");
            continue;
        }
        let entry = serde_json::from_value(value)
            .map_err(|e| StateError::Malformed(format!("bad {tag} entry: {e}")))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Reconstruct a [`Config`] from a state file.
///
/// Appends each entry to the matching collection in file order. The WAN is
/// synthesised by `Config::new`, so any persisted network named `wan` is
/// dropped rather than reintroduced.
pub fn config_from_state(path: impl AsRef<Path>) -> Result<Config, StateError> {
    let mut config = Config::new();
    for entry in load_entries(path)? {
        match entry {
            StateEntry::Network(n) => {
                if n.name != WAN_NETWORK_NAME {
                    config.networks.push(n);
                }
            }
            StateEntry::Container(c) => config.containers.push(c),
            StateEntry::Ingress(i) => config.ingresses.push(i),
            StateEntry::Docs(d) => config.docs = Some(d),
            StateEntry::Cluster(c) => config.clusters.push(c),
            StateEntry::Helm(h) => config.helm_charts.push(h),
            StateEntry::K8sConfig(k) => config.k8s_configs.push(k),
            StateEntry::LocalExec(e) => config.local_execs.push(e),
            StateEntry::RemoteExec(e) => config.remote_execs.push(e),
        }
    }
    Ok(config)
}
