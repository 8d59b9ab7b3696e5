use crate::clients::{ContainerTasks, RunOptions};
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::Ingress;
use drydock_state::StateEntry;
use std::sync::Arc;
use tracing::info;

const KIND: &str = "ingress";

/// Image used for the proxy container.
pub const INGRESS_IMAGE: &str = "alpine/socat:1.8.0.0";

pub struct IngressProvider {
    config: Ingress,
    /// Container the proxy forwards to; a cluster target resolves to its
    /// server container before the provider is constructed.
    target_container: String,
    tasks: Arc<dyn ContainerTasks>,
}

impl IngressProvider {
    pub fn new(config: Ingress, target_container: String, tasks: Arc<dyn ContainerTasks>) -> Self {
        Self {
            config,
            target_container,
            tasks,
        }
    }
}

/// The proxy listens on the first port mapping and forwards to the same
/// port on the target.
fn proxy_command(target: &str, port: u16) -> Vec<String> {
    vec![
        format!("TCP-LISTEN:{port},fork,reuseaddr"),
        format!("TCP:{target}:{port}"),
    ]
}

impl Provider for IngressProvider {
    fn create(&self) -> Result<(), ProviderError> {
        let port = self
            .config
            .ports
            .first()
            .ok_or_else(|| {
                ProviderError::failed(KIND, &self.config.name, "at least one port is required")
            })?
            .clone();

        info!(
            "starting ingress '{}' -> {}:{}",
            self.config.name, self.target_container, port.local
        );

        let opts = RunOptions {
            name: self.config.name.clone(),
            image: INGRESS_IMAGE.to_owned(),
            command: proxy_command(&self.target_container, port.local),
            networks: self.config.networks.clone(),
            ports: self.config.ports.clone(),
            ..RunOptions::default()
        };
        self.tasks
            .run_container(&opts)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("removing ingress '{}'", self.config.name);
        self.tasks
            .remove_container(&self.config.name)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Ingress(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::container::tests::FakeTasks;
    use drydock_config::PortMapping;

    fn sample() -> Ingress {
        Ingress {
            name: "web-ingress".to_owned(),
            target: "web".to_owned(),
            networks: vec!["cloud".to_owned()],
            ports: vec![PortMapping {
                local: 80,
                host: 8080,
                protocol: "tcp".to_owned(),
            }],
        }
    }

    #[test]
    fn create_runs_proxy_toward_target() {
        let tasks = Arc::new(FakeTasks::default());
        IngressProvider::new(sample(), "web".to_owned(), tasks.clone())
            .create()
            .unwrap();

        let running = tasks.running.lock().unwrap();
        assert_eq!(running[0].image, INGRESS_IMAGE);
        assert_eq!(running[0].command, ["TCP-LISTEN:80,fork,reuseaddr", "TCP:web:80"]);
    }

    #[test]
    fn create_without_ports_fails() {
        let mut config = sample();
        config.ports.clear();
        let err = IngressProvider::new(config, "web".to_owned(), Arc::new(FakeTasks::default()))
            .create()
            .unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn snapshot_is_ingress_entry() {
        let provider =
            IngressProvider::new(sample(), "web".to_owned(), Arc::new(FakeTasks::default()));
        assert_eq!(provider.snapshot(), StateEntry::Ingress(sample()));
    }
}
