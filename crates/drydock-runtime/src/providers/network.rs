use crate::clients::ContainerRuntime;
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::Network;
use drydock_state::StateEntry;
use std::sync::Arc;
use tracing::{debug, info};

const KIND: &str = "network";

pub struct NetworkProvider {
    config: Network,
    runtime: Arc<dyn ContainerRuntime>,
}

impl NetworkProvider {
    pub fn new(config: Network, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { config, runtime }
    }
}

impl Provider for NetworkProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!("creating network '{}' ({})", self.config.name, self.config.subnet);
        let exists = self
            .runtime
            .network_exists(&self.config.name)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))?;
        if exists {
            debug!("network '{}' already present", self.config.name);
            return Ok(());
        }
        self.runtime
            .create_network(&self.config.name, &self.config.subnet)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("removing network '{}'", self.config.name);
        self.runtime
            .remove_network(&self.config.name)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Network(self.config.clone())
    }
}
