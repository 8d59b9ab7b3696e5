//! The plan builder: a pure mapping from `Config` to seven ordered
//! provider groups.
//!
//! Groups encode the inter-kind dependency DAG as a fixed schedule:
//!
//! | group | contents |
//! |-------|----------|
//! | 0 | WAN, then user networks |
//! | 1 | containers, ingresses, docs |
//! | 2 | clusters |
//! | 3 | helm releases |
//! | 4 | raw cluster manifests |
//! | 5 | reserved, always empty |
//! | 6 | local then remote exec steps |
//!
//! Groups 3 and 4 stay separate from 2 so CRDs installed by Helm exist
//! before raw manifests apply. Intra-kind references were already resolved
//! by the parser, so no topological pass is needed; insertion order is
//! preserved within each group.

use drydock_config::Config;
use drydock_runtime::providers::{
    server_container_name, ClusterProvider, ContainerProvider, DocsProvider, HelmProvider,
    IngressProvider, K8sConfigProvider, LocalExecProvider, NetworkProvider, RemoteExecProvider,
};
use drydock_runtime::{Clients, Provider};
use std::sync::Arc;

/// Number of groups in every plan, including the reserved one.
pub const PLAN_GROUPS: usize = 7;

pub type Plan = Vec<Vec<Arc<dyn Provider>>>;

/// Resolve an ingress or exec target to the container it lands on.
fn target_container(config: &Config, target: &str) -> String {
    if config.cluster(target).is_some() {
        server_container_name(target)
    } else {
        target.to_owned()
    }
}

/// Map `config` onto the fixed group schedule.
pub fn generate_providers(config: &Config, clients: &Clients) -> Plan {
    let mut groups: Plan = (0..PLAN_GROUPS).map(|_| Vec::new()).collect();

    groups[0].push(Arc::new(NetworkProvider::new(
        config.wan.clone(),
        Arc::clone(&clients.runtime),
    )) as Arc<dyn Provider>);
    for network in &config.networks {
        groups[0].push(Arc::new(NetworkProvider::new(
            network.clone(),
            Arc::clone(&clients.runtime),
        )));
    }

    for container in &config.containers {
        groups[1].push(Arc::new(ContainerProvider::new(
            container.clone(),
            Arc::clone(&clients.tasks),
        )));
    }
    for ingress in &config.ingresses {
        let target = target_container(config, &ingress.target);
        groups[1].push(Arc::new(IngressProvider::new(
            ingress.clone(),
            target,
            Arc::clone(&clients.tasks),
        )));
    }
    if let Some(docs) = &config.docs {
        groups[1].push(Arc::new(DocsProvider::new(
            docs.clone(),
            Arc::clone(&clients.tasks),
        )));
    }

    for cluster in &config.clusters {
        groups[2].push(Arc::new(ClusterProvider::new(
            cluster.clone(),
            Arc::clone(&clients.tasks),
            Arc::clone(&clients.kubernetes),
            Arc::clone(&clients.http),
        )));
    }

    for helm in &config.helm_charts {
        groups[3].push(Arc::new(HelmProvider::new(
            helm.clone(),
            Arc::clone(&clients.kubernetes),
        )));
    }

    for k8s in &config.k8s_configs {
        groups[4].push(Arc::new(K8sConfigProvider::new(
            k8s.clone(),
            Arc::clone(&clients.kubernetes),
        )));
    }

    for exec in &config.local_execs {
        groups[6].push(Arc::new(LocalExecProvider::new(
            exec.clone(),
            Arc::clone(&clients.command),
        )));
    }
    for exec in &config.remote_execs {
        let target = target_container(config, &exec.target);
        groups[6].push(Arc::new(RemoteExecProvider::new(
            exec.clone(),
            target,
            Arc::clone(&clients.tasks),
        )));
    }

    groups
}
