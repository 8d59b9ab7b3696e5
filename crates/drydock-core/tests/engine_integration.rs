//! End-to-end engine scenarios against mock providers and in-memory
//! clients, with real state files in temp directories.

use drydock_config::{parse_str, resolve_references, Config, Helm};
use drydock_core::{generate_providers, Engine, Plan, PLAN_GROUPS};
use drydock_runtime::clients::{Command, RunOptions};
use drydock_runtime::providers::MockProvider;
use drydock_runtime::{
    ClientError, Clients, ContainerRuntime, ContainerTasks, Http, Kubernetes, Provider,
};
use drydock_state::{config_from_state, load_entries, StateLayout};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

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

fn null_clients() -> Clients {
    Clients {
        runtime: Arc::new(NullRuntime),
        tasks: Arc::new(NullTasks),
        kubernetes: Arc::new(NullKubernetes),
        command: Arc::new(NullCommand),
        http: Arc::new(NullHttp),
    }
}

fn test_layout() -> (tempfile::TempDir, StateLayout) {
    let dir = tempfile::tempdir().unwrap();
    let layout = StateLayout::new(dir.path());
    (dir, layout)
}

fn empty_plan() -> Plan {
    (0..PLAN_GROUPS).map(|_| Vec::new()).collect()
}

fn dyn_group(providers: &[Arc<MockProvider>]) -> Vec<Arc<dyn Provider>> {
    providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn Provider>)
        .collect()
}

/// Two networks and a container: the plan has the documented shape and
/// apply persists one entry per resource plus the WAN.
#[test]
fn apply_small_blueprint_end_to_end() {
    let config = parse_str(
        r#"
[[network]]
name = "net-a"
subnet = "10.5.0.0/16"

[[network]]
name = "net-b"
subnet = "10.6.0.0/16"

[[container]]
name = "web"
image = "nginx:1.27-alpine"
networks = ["net-a"]
"#,
    )
    .unwrap();
    resolve_references(&config).unwrap();

    let plan = generate_providers(&config, &null_clients());
    assert_eq!(plan.len(), 7);
    assert_eq!(plan[0].len(), 3, "wan, net-a, net-b");
    assert_eq!(plan[1].len(), 1, "web");
    for group in &plan[2..] {
        assert!(group.is_empty());
    }

    let (_dir, layout) = test_layout();
    let engine = Engine::new(config, null_clients(), layout.clone());
    engine.apply().unwrap();

    let entries = load_entries(layout.state_path()).unwrap();
    assert_eq!(entries.len(), 4);
}

/// A failing container: apply returns the error, the state file is still
/// written, and the entries created before the failure are present.
#[test]
fn failed_apply_still_persists_partial_state() {
    let (_dir, layout) = test_layout();

    let networks: Vec<Arc<MockProvider>> = ["wan", "net-a", "net-b"]
        .iter()
        .map(|n| Arc::new(MockProvider::new(n)))
        .collect();
    let web = Arc::new(MockProvider::failing("web"));

    let engine = Engine::with_generator(
        Config::new(),
        null_clients(),
        layout.clone(),
        |_, _| {
            let mut plan = empty_plan();
            plan[0] = dyn_group(&networks);
            plan[1] = dyn_group(&[web.clone()]);
            plan
        },
    );

    let err = engine.apply().unwrap_err();
    assert!(err.to_string().contains("web"));

    let entries = load_entries(layout.state_path()).unwrap();
    assert_eq!(entries.len(), 3, "the three networks made it to state");
    assert!(entries.iter().all(|e| e.resource_name() != "web"));
}

/// A failing group stops the apply: later groups are never entered.
#[test]
fn later_groups_do_not_start_after_failure() {
    let (_dir, layout) = test_layout();

    let bad_network = Arc::new(MockProvider::failing("net-a"));
    let web = Arc::new(MockProvider::new("web"));

    let engine = Engine::with_generator(
        Config::new(),
        null_clients(),
        layout,
        |_, _| {
            let mut plan = empty_plan();
            plan[0] = dyn_group(&[bad_network.clone()]);
            plan[1] = dyn_group(&[web.clone()]);
            plan
        },
    );

    assert!(engine.apply().is_err());
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(web.create_calls(), 0);
}

/// Cluster, helm, and manifests run in strict group order: the cluster
/// completes before helm starts, helm before the manifests.
#[test]
fn cluster_helm_manifests_run_in_stage_order() {
    let (_dir, layout) = test_layout();
    let log = Arc::new(Mutex::new(Vec::new()));

    let cluster = Arc::new(
        MockProvider::new("dev")
            .with_delay(Duration::from_millis(50))
            .with_sequence_log(log.clone(), "cluster"),
    );
    let helm = Arc::new(
        MockProvider::new("consul")
            .with_delay(Duration::from_millis(20))
            .with_sequence_log(log.clone(), "helm"),
    );
    let manifests = Arc::new(MockProvider::new("app").with_sequence_log(log.clone(), "k8s"));

    let engine = Engine::with_generator(
        Config::new(),
        null_clients(),
        layout,
        |_, _| {
            let mut plan = empty_plan();
            plan[2] = dyn_group(&[cluster.clone()]);
            plan[3] = dyn_group(&[helm.clone()]);
            plan[4] = dyn_group(&[manifests.clone()]);
            plan
        },
    );

    engine.apply().unwrap();
    assert_eq!(*log.lock().unwrap(), ["cluster", "helm", "k8s"]);
}

/// State reload: the wan entry is dropped, everything else lands in its
/// collection, and the regenerated plan has the WAN re-synthesised.
#[test]
fn state_reload_filters_wan_and_rebuilds_plan() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(
        &state_path,
        r#"[
          {"Type":"config.Network","Value":{"name":"wan","subnet":"10.200.0.0/16"}},
          {"Type":"config.Network","Value":{"name":"net-a","subnet":"10.5.0.0/16"}},
          {"Type":"config.Container","Value":{"name":"web","image":"nginx:1.27-alpine","networks":["net-a"]}}
        ]"#,
    )
    .unwrap();

    let config = config_from_state(&state_path).unwrap();
    assert_eq!(config.networks.len(), 1);
    assert_eq!(config.networks[0].name, "net-a");
    assert_eq!(config.containers.len(), 1);

    let plan = generate_providers(&config, &null_clients());
    let group0: Vec<String> = plan[0]
        .iter()
        .map(|p| p.snapshot().resource_name().to_owned())
        .collect();
    assert_eq!(group0, ["wan", "net-a"]);
}

/// Round-trip: a plan rebuilt from persisted state has the same group
/// shapes and kind sequences as the original.
#[test]
fn round_trip_preserves_plan_shape() {
    let config = parse_str(
        r#"
[[network]]
name = "cloud"
subnet = "10.5.0.0/16"

[[container]]
name = "web"
image = "nginx:1.27-alpine"
networks = ["cloud"]

[[cluster]]
name = "dev"
network = "cloud"

[[helm]]
name = "consul"
cluster = "dev"
chart = "hashicorp/consul"

[[local_exec]]
name = "hosts"
command = ["true"]
"#,
    )
    .unwrap();

    let (_dir, layout) = test_layout();
    let engine = Engine::new(config.clone(), null_clients(), layout.clone());
    engine.apply().unwrap();

    let reloaded = config_from_state(layout.state_path()).unwrap();
    let original = generate_providers(&config, &null_clients());
    let rebuilt = generate_providers(&reloaded, &null_clients());

    assert_eq!(original.len(), rebuilt.len());
    for (a, b) in original.iter().zip(rebuilt.iter()) {
        assert_eq!(a.len(), b.len());
        let kinds_a: Vec<&str> = a.iter().map(|p| p.snapshot().kind_tag()).collect();
        let kinds_b: Vec<&str> = b.iter().map(|p| p.snapshot().kind_tag()).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}

/// Destroy visits groups in reverse: the container group is torn down
/// before the network group, and every provider in a later group finishes
/// before any provider in an earlier one starts.
#[test]
fn destroy_walks_groups_in_reverse() {
    let (_dir, layout) = test_layout();
    let log = Arc::new(Mutex::new(Vec::new()));

    let networks: Vec<Arc<MockProvider>> = (0..2)
        .map(|i| {
            Arc::new(
                MockProvider::new(&format!("net-{i}"))
                    .with_delay(Duration::from_millis(30))
                    .with_sequence_log(log.clone(), "network"),
            )
        })
        .collect();
    let workloads: Vec<Arc<MockProvider>> = (0..2)
        .map(|i| {
            Arc::new(
                MockProvider::new(&format!("web-{i}"))
                    .with_delay(Duration::from_millis(30))
                    .with_sequence_log(log.clone(), "workload"),
            )
        })
        .collect();

    let engine = Engine::with_generator(
        Config::new(),
        null_clients(),
        layout,
        |_, _| {
            let mut plan = empty_plan();
            plan[0] = dyn_group(&networks);
            plan[1] = dyn_group(&workloads);
            plan
        },
    );

    engine.destroy().unwrap();

    let order = log.lock().unwrap();
    assert_eq!(order.len(), 4);
    assert!(
        order[..2].iter().all(|l| l == "workload"),
        "workloads destroyed first: {order:?}"
    );
    assert!(order[2..].iter().all(|l| l == "network"));
    for network in &networks {
        assert_eq!(network.destroy_calls(), 1);
    }
}

/// Unknown kind tags in the state file are skipped, the rest decodes.
#[test]
fn unknown_state_entries_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(
        &state_path,
        r#"[
          {"Type":"config.Unknown","Value":{"future":"field"}},
          {"Type":"config.Network","Value":{"name":"net-a","subnet":"10.5.0.0/16"}}
        ]"#,
    )
    .unwrap();

    let config = config_from_state(&state_path).unwrap();
    assert_eq!(config.resource_count(), 1);
    assert_eq!(config.networks[0].name, "net-a");
}

/// Applying twice on a fresh engine rewrites the state file rather than
/// appending to it.
#[test]
fn reapply_rewrites_state_file() {
    let config = parse_str(
        r#"
[[network]]
name = "cloud"
subnet = "10.5.0.0/16"
"#,
    )
    .unwrap();

    let (_dir, layout) = test_layout();
    Engine::new(config.clone(), null_clients(), layout.clone())
        .apply()
        .unwrap();
    Engine::new(config, null_clients(), layout.clone())
        .apply()
        .unwrap();

    let entries = load_entries(layout.state_path()).unwrap();
    assert_eq!(entries.len(), 2, "wan + cloud, not doubled");
}
