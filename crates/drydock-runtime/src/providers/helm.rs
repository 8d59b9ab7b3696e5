use crate::clients::Kubernetes;
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::Helm;
use drydock_state::layout::default_kubeconfig_path;
use drydock_state::StateEntry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const KIND: &str = "helm";

pub struct HelmProvider {
    config: Helm,
    kubeconfig: PathBuf,
    kubernetes: Arc<dyn Kubernetes>,
}

impl HelmProvider {
    pub fn new(config: Helm, kubernetes: Arc<dyn Kubernetes>) -> Self {
        let kubeconfig = default_kubeconfig_path(&config.cluster);
        Self {
            config,
            kubeconfig,
            kubernetes,
        }
    }
}

impl Provider for HelmProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!(
            "installing release '{}' ({}) on cluster '{}'",
            self.config.name, self.config.chart, self.config.cluster
        );
        self.kubernetes
            .install_release(&self.kubeconfig, &self.config)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("uninstalling release '{}'", self.config.name);
        self.kubernetes
            .uninstall_release(&self.kubeconfig, &self.config)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Helm(self.config.clone())
    }
}
