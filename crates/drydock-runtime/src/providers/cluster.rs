//! Ephemeral k3s clusters bootstrapped on the container runtime.

use crate::clients::{ContainerTasks, Http, Kubernetes, RunOptions};
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::{Cluster, PortMapping};
use drydock_state::layout::default_kubeconfig_path;
use drydock_state::StateEntry;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const KIND: &str = "cluster";

const K3S_IMAGE: &str = "rancher/k3s";
const API_PORT: u16 = 6443;
const KUBECONFIG_CONTAINER_PATH: &str = "/etc/rancher/k3s/k3s.yaml";

/// How long to keep probing the API endpoint before giving up.
const START_ATTEMPTS: u32 = 30;
const START_INTERVAL: Duration = Duration::from_secs(2);

/// Name of the server container backing a cluster.
pub fn server_container_name(cluster: &str) -> String {
    format!("{cluster}-server")
}

pub struct ClusterProvider {
    config: Cluster,
    kubeconfig: PathBuf,
    tasks: Arc<dyn ContainerTasks>,
    kubernetes: Arc<dyn Kubernetes>,
    http: Arc<dyn Http>,
}

impl ClusterProvider {
    pub fn new(
        config: Cluster,
        tasks: Arc<dyn ContainerTasks>,
        kubernetes: Arc<dyn Kubernetes>,
        http: Arc<dyn Http>,
    ) -> Self {
        let kubeconfig = default_kubeconfig_path(&config.name);
        Self {
            config,
            kubeconfig,
            tasks,
            kubernetes,
            http,
        }
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            name: server_container_name(&self.config.name),
            image: format!("{K3S_IMAGE}:{}", self.config.version),
            command: vec![
                "server".to_owned(),
                "--disable".to_owned(),
                "traefik".to_owned(),
            ],
            networks: vec![self.config.network.clone()],
            ports: vec![PortMapping {
                local: API_PORT,
                host: API_PORT,
                protocol: "tcp".to_owned(),
            }],
            privileged: true,
            ..RunOptions::default()
        }
    }

    fn wait_for_api(&self) -> Result<(), ProviderError> {
        let url = format!("https://127.0.0.1:{API_PORT}/ping");
        for attempt in 1..=START_ATTEMPTS {
            match self.http.health_check(&url) {
                Ok(()) => return Ok(()),
                Err(e) => debug!(
                    "cluster '{}' API not ready (attempt {attempt}/{START_ATTEMPTS}): {e}",
                    self.config.name
                ),
            }
            std::thread::sleep(START_INTERVAL);
        }
        Err(ProviderError::failed(
            KIND,
            &self.config.name,
            format!("API endpoint did not become ready within {START_ATTEMPTS} attempts"),
        ))
    }

    fn write_kubeconfig(&self, server: &str) -> Result<(), ProviderError> {
        let content = self
            .tasks
            .exec(
                server,
                &["cat".to_owned(), KUBECONFIG_CONTAINER_PATH.to_owned()],
                &BTreeMap::new(),
            )
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))?;

        if let Some(dir) = self.kubeconfig.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ProviderError::client(KIND, &self.config.name, e.into()))?;
        }
        std::fs::write(&self.kubeconfig, content)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e.into()))
    }
}

impl Provider for ClusterProvider {
    fn create(&self) -> Result<(), ProviderError> {
        let server = server_container_name(&self.config.name);
        info!(
            "creating {} cluster '{}' on network '{}'",
            self.config.driver, self.config.name, self.config.network
        );

        let exists = self
            .tasks
            .container_exists(&server)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))?;
        if exists {
            debug!("cluster server '{server}' already present");
            return Ok(());
        }

        self.tasks
            .run_container(&self.run_options())
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))?;

        self.wait_for_api()?;
        self.write_kubeconfig(&server)?;
        self.kubernetes
            .wait_node_ready(&self.kubeconfig)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        let server = server_container_name(&self.config.name);
        info!("destroying cluster '{}'", self.config.name);
        if let Some(dir) = self.kubeconfig.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
        self.tasks
            .remove_container(&server)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Cluster(self.config.clone())
    }
}
