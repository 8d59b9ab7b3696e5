//! Side-effect command steps. Commands are not retractable, so both
//! providers treat destroy as a no-op.

use crate::clients::{Command, ContainerTasks};
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::{LocalExec, RemoteExec};
use drydock_state::StateEntry;
use std::sync::Arc;
use tracing::{debug, info};

pub struct LocalExecProvider {
    config: LocalExec,
    command: Arc<dyn Command>,
}

impl LocalExecProvider {
    pub fn new(config: LocalExec, command: Arc<dyn Command>) -> Self {
        Self { config, command }
    }
}

impl Provider for LocalExecProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!("running local exec '{}'", self.config.name);
        self.command
            .run(
                &self.config.command,
                &self.config.env,
                self.config.working_directory.as_deref(),
            )
            .map_err(|e| ProviderError::client("local_exec", &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        debug!("local exec '{}' has nothing to destroy", self.config.name);
        Ok(())
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::LocalExec(self.config.clone())
    }
}

pub struct RemoteExecProvider {
    config: RemoteExec,
    /// Resolved before construction: the target container, or the server
    /// container of a target cluster.
    target_container: String,
    tasks: Arc<dyn ContainerTasks>,
}

impl RemoteExecProvider {
    pub fn new(config: RemoteExec, target_container: String, tasks: Arc<dyn ContainerTasks>) -> Self {
        Self {
            config,
            target_container,
            tasks,
        }
    }
}

impl Provider for RemoteExecProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!(
            "running remote exec '{}' in container '{}'",
            self.config.name, self.target_container
        );
        let stdout = self
            .tasks
            .exec(&self.target_container, &self.config.command, &self.config.env)
            .map_err(|e| ProviderError::client("remote_exec", &self.config.name, e))?;
        if !stdout.trim().is_empty() {
            debug!("remote exec '{}' output: {}", self.config.name, stdout.trim());
        }
        Ok(())
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        debug!("remote exec '{}' has nothing to destroy", self.config.name);
        Ok(())
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::RemoteExec(self.config.clone())
    }
}
