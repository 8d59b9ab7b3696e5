//! No-op clients for plan and engine tests.

use drydock_config::Helm;
use drydock_runtime::clients::{Command, RunOptions};
use drydock_runtime::{ClientError, Clients, ContainerRuntime, ContainerTasks, Http, Kubernetes};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

struct NullRuntime;

impl ContainerRuntime for NullRuntime {
    fn create_network(&self, _: &str, _: &str) -> Result<(), ClientError> {
        Ok(())
    }
    fn remove_network(&self, _: &str) -> Result<(), ClientError> {
        Ok(())
    }
    fn network_exists(&self, _: &str) -> Result<bool, ClientError> {
        Ok(false)
    }
}

struct NullTasks;

impl ContainerTasks for NullTasks {
    fn run_container(&self, _: &RunOptions) -> Result<(), ClientError> {
        Ok(())
    }
    fn remove_container(&self, _: &str) -> Result<(), ClientError> {
        Ok(())
    }
    fn container_exists(&self, _: &str) -> Result<bool, ClientError> {
        Ok(false)
    }
    fn exec(
        &self,
        _: &str,
        _: &[String],
        _: &BTreeMap<String, String>,
    ) -> Result<String, ClientError> {
        Ok(String::new())
    }
}

struct NullKubernetes;

impl Kubernetes for NullKubernetes {
    fn apply_manifests(&self, _: &Path, _: &[String], _: bool) -> Result<(), ClientError> {
        Ok(())
    }
    fn delete_manifests(&self, _: &Path, _: &[String]) -> Result<(), ClientError> {
        Ok(())
    }
    fn wait_node_ready(&self, _: &Path) -> Result<(), ClientError> {
        Ok(())
    }
    fn install_release(&self, _: &Path, _: &Helm) -> Result<(), ClientError> {
        Ok(())
    }
    fn uninstall_release(&self, _: &Path, _: &Helm) -> Result<(), ClientError> {
        Ok(())
    }
}

struct NullCommand;

impl Command for NullCommand {
    fn run(
        &self,
        _: &[String],
        _: &BTreeMap<String, String>,
        _: Option<&str>,
    ) -> Result<(), ClientError> {
        Ok(())
    }
}

struct NullHttp;

impl Http for NullHttp {
    fn health_check(&self, _: &str) -> Result<(), ClientError> {
        Ok(())
    }
}

pub(crate) fn stub_clients() -> Clients {
    Clients {
        runtime: Arc::new(NullRuntime),
        tasks: Arc::new(NullTasks),
        kubernetes: Arc::new(NullKubernetes),
        command: Arc::new(NullCommand),
        http: Arc::new(NullHttp),
    }
}
