use crate::clients::{ContainerTasks, RunOptions};
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::{Docs, PortMapping, Volume, WAN_NETWORK_NAME};
use drydock_state::StateEntry;
use std::sync::Arc;
use tracing::info;

const KIND: &str = "docs";

/// Image serving the documentation folder.
pub const DOCS_IMAGE: &str = "nginx:1.27-alpine";

const DOCS_CONTENT_DIR: &str = "/usr/share/nginx/html";

pub struct DocsProvider {
    config: Docs,
    tasks: Arc<dyn ContainerTasks>,
}

impl DocsProvider {
    pub fn new(config: Docs, tasks: Arc<dyn ContainerTasks>) -> Self {
        Self { config, tasks }
    }
}

impl Provider for DocsProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!("starting docs site '{}' on port {}", self.config.name, self.config.port);
        let opts = RunOptions {
            name: self.config.name.clone(),
            image: DOCS_IMAGE.to_owned(),
            networks: vec![WAN_NETWORK_NAME.to_owned()],
            volumes: vec![Volume {
                source: self.config.path.clone(),
                destination: DOCS_CONTENT_DIR.to_owned(),
            }],
            ports: vec![PortMapping {
                local: 80,
                host: self.config.port,
                protocol: "tcp".to_owned(),
            }],
            ..RunOptions::default()
        };
        self.tasks
            .run_container(&opts)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("removing docs site '{}'", self.config.name);
        self.tasks
            .remove_container(&self.config.name)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Docs(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::container::tests::FakeTasks;

    fn sample() -> Docs {
        Docs {
            name: "docs".to_owned(),
            path: "./docs".to_owned(),
            port: 8080,
        }
    }

    #[test]
    fn docs_site_serves_folder_on_wan() {
        let tasks = Arc::new(FakeTasks::default());
        DocsProvider::new(sample(), tasks.clone()).create().unwrap();

        let running = tasks.running.lock().unwrap();
        assert_eq!(running[0].networks, [WAN_NETWORK_NAME]);
        assert_eq!(running[0].volumes[0].source, "./docs");
        assert_eq!(running[0].ports[0].host, 8080);
        assert_eq!(running[0].ports[0].local, 80);
    }

    #[test]
    fn snapshot_is_docs_entry() {
        let provider = DocsProvider::new(sample(), Arc::new(FakeTasks::default()));
        assert_eq!(provider.snapshot(), StateEntry::Docs(sample()));
    }
}
