use std::path::{Path, PathBuf};

/// Well-known paths under the Drydock home directory.
///
/// The state file lives at `<root>/state/state.json`; per-cluster
/// kubeconfigs live under `<root>/clusters/<name>/`.
#[derive(Debug, Clone)]
pub struct StateLayout {
    root: PathBuf,
}

impl StateLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.drydock`, or `.drydock` relative to the working directory when
    /// no home directory is set.
    pub fn default_root() -> PathBuf {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".drydock"))
            .unwrap_or_else(|| PathBuf::from(".drydock"))
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn state_dir(&self) -> PathBuf {
        self.root.join("state")
    }

    #[inline]
    pub fn state_path(&self) -> PathBuf {
        self.state_dir().join("state.json")
    }

    #[inline]
    pub fn cluster_dir(&self, cluster: &str) -> PathBuf {
        self.root.join("clusters").join(cluster)
    }

    #[inline]
    pub fn kubeconfig_path(&self, cluster: &str) -> PathBuf {
        self.cluster_dir(cluster).join("kubeconfig.yaml")
    }
}

impl Default for StateLayout {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

/// Kubeconfig path for a cluster under the default home, for callers with
/// no layout in hand.
pub fn default_kubeconfig_path(cluster: &str) -> PathBuf {
    StateLayout::default().kubeconfig_path(cluster)
}
