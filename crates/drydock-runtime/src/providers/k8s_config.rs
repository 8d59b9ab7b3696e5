use crate::clients::Kubernetes;
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::K8sConfig;
use drydock_state::layout::default_kubeconfig_path;
use drydock_state::StateEntry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const KIND: &str = "k8s_config";

pub struct K8sConfigProvider {
    config: K8sConfig,
    kubeconfig: PathBuf,
    kubernetes: Arc<dyn Kubernetes>,
}

impl K8sConfigProvider {
    pub fn new(config: K8sConfig, kubernetes: Arc<dyn Kubernetes>) -> Self {
        let kubeconfig = default_kubeconfig_path(&config.cluster);
        Self {
            config,
            kubeconfig,
            kubernetes,
        }
    }
}

impl Provider for K8sConfigProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!(
            "applying {} manifest path(s) for '{}' to cluster '{}'",
            self.config.paths.len(),
            self.config.name,
            self.config.cluster
        );
        self.kubernetes
            .apply_manifests(
                &self.kubeconfig,
                &self.config.paths,
                self.config.wait_until_ready,
            )
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("deleting manifests for '{}'", self.config.name);
        self.kubernetes
            .delete_manifests(&self.kubeconfig, &self.config.paths)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::K8sConfig(self.config.clone())
    }
}
