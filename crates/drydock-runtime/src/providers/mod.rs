//! One provider per resource kind.
//!
//! A provider creates or destroys exactly one resource instance and
//! reports the snapshot the engine persists after a successful create.
//! Providers are written against the client traits only, so tests swap in
//! in-memory clients.

pub mod cluster;
pub mod container;
pub mod docs;
pub mod exec;
pub mod helm;
pub mod ingress;
pub mod k8s_config;
pub mod mock;
pub mod network;

pub use cluster::{server_container_name, ClusterProvider};
pub use container::ContainerProvider;
pub use docs::DocsProvider;
pub use exec::{LocalExecProvider, RemoteExecProvider};
pub use helm::HelmProvider;
pub use ingress::IngressProvider;
pub use k8s_config::K8sConfigProvider;
pub use mock::MockProvider;
pub use network::NetworkProvider;

use crate::ProviderError;
use drydock_state::StateEntry;

/// The capability surface the engine sees.
pub trait Provider: Send + Sync {
    /// Bring the resource up. Any error fails the whole apply group.
    fn create(&self) -> Result<(), ProviderError>;

    /// Tear the resource down. Errors are observed but not propagated.
    fn destroy(&self) -> Result<(), ProviderError>;

    /// The persistable snapshot appended to state after a successful
    /// create.
    fn snapshot(&self) -> StateEntry;
}
