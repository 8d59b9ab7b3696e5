//! Typed handles to the external subsystems providers act on.
//!
//! Each trait has one CLI-backed implementation; tests substitute their
//! own. The bundle is constructed once per engine with fixed timeouts and
//! cloned into providers by `Arc`.

pub mod command;
pub mod docker;
pub mod http;
pub mod kubernetes;

pub use command::ShellCommand;
pub use docker::{DockerCli, DockerTasks};
pub use http::UreqHttp;
pub use kubernetes::KubectlCli;

use crate::ClientError;
use drydock_config::{Helm, PortMapping, Volume};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const KUBERNETES_TIMEOUT: Duration = Duration::from_secs(60);
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(1);

/// Network-level operations on the container runtime.
pub trait ContainerRuntime: Send + Sync {
    fn create_network(&self, name: &str, subnet: &str) -> Result<(), ClientError>;
    fn remove_network(&self, name: &str) -> Result<(), ClientError>;
    fn network_exists(&self, name: &str) -> Result<bool, ClientError>;
}

/// Everything a provider needs to start one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub networks: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub volumes: Vec<Volume>,
    pub ports: Vec<PortMapping>,
    pub privileged: bool,
}

impl RunOptions {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Self::default()
        }
    }
}

/// Container lifecycle operations, layered over the runtime handle.
pub trait ContainerTasks: Send + Sync {
    fn run_container(&self, opts: &RunOptions) -> Result<(), ClientError>;
    fn remove_container(&self, name: &str) -> Result<(), ClientError>;
    fn container_exists(&self, name: &str) -> Result<bool, ClientError>;
    /// Run a command inside a container and return its stdout.
    fn exec(
        &self,
        container: &str,
        command: &[String],
        env: &BTreeMap<String, String>,
    ) -> Result<String, ClientError>;
}

/// Cluster-level operations against a kubeconfig.
pub trait Kubernetes: Send + Sync {
    fn apply_manifests(
        &self,
        kubeconfig: &Path,
        paths: &[String],
        wait_until_ready: bool,
    ) -> Result<(), ClientError>;
    fn delete_manifests(&self, kubeconfig: &Path, paths: &[String]) -> Result<(), ClientError>;
    fn wait_node_ready(&self, kubeconfig: &Path) -> Result<(), ClientError>;
    fn install_release(&self, kubeconfig: &Path, release: &Helm) -> Result<(), ClientError>;
    fn uninstall_release(&self, kubeconfig: &Path, release: &Helm) -> Result<(), ClientError>;
}

/// Host shell execution.
pub trait Command: Send + Sync {
    fn run(
        &self,
        command: &[String],
        env: &BTreeMap<String, String>,
        working_dir: Option<&str>,
    ) -> Result<(), ClientError>;
}

/// Plain HTTP health probing.
pub trait Http: Send + Sync {
    fn health_check(&self, url: &str) -> Result<(), ClientError>;
}

/// The client bundle handed to providers. Constructed once; fields are
/// shared handles, so cloning the bundle is cheap.
#[derive(Clone)]
pub struct Clients {
    pub runtime: Arc<dyn ContainerRuntime>,
    pub tasks: Arc<dyn ContainerTasks>,
    pub kubernetes: Arc<dyn Kubernetes>,
    pub command: Arc<dyn Command>,
    pub http: Arc<dyn Http>,
}

impl Clients {
    /// Construct the default CLI-backed clients with the fixed timeouts.
    ///
    /// Fails when the container runtime binary is not usable; the other
    /// binaries are only probed when a provider first needs them.
    pub fn default_clients() -> Result<Self, ClientError> {
        let docker = Arc::new(DockerCli::new()?);
        let tasks = Arc::new(DockerTasks::new(Arc::clone(&docker)));
        Ok(Self {
            runtime: docker,
            tasks,
            kubernetes: Arc::new(KubectlCli::new(KUBERNETES_TIMEOUT)),
            command: Arc::new(ShellCommand::new(COMMAND_TIMEOUT)),
            // cluster API endpoints serve self-signed certificates
            http: Arc::new(UreqHttp::insecure(HTTP_TIMEOUT)),
        })
    }
}
