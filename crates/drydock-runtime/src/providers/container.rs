use crate::clients::{ContainerTasks, RunOptions};
use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::Container;
use drydock_state::StateEntry;
use std::sync::Arc;
use tracing::info;

const KIND: &str = "container";

pub struct ContainerProvider {
    config: Container,
    tasks: Arc<dyn ContainerTasks>,
}

impl ContainerProvider {
    pub fn new(config: Container, tasks: Arc<dyn ContainerTasks>) -> Self {
        Self { config, tasks }
    }
}

fn run_options(config: &Container) -> RunOptions {
    RunOptions {
        name: config.name.clone(),
        image: config.image.clone(),
        command: config.command.clone(),
        networks: config.networks.clone(),
        env: config.env.clone(),
        volumes: config.volumes.clone(),
        ports: config.ports.clone(),
        privileged: config.privileged,
    }
}

impl Provider for ContainerProvider {
    fn create(&self) -> Result<(), ProviderError> {
        info!("starting container '{}' ({})", self.config.name, self.config.image);
        self.tasks
            .run_container(&run_options(&self.config))
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        info!("removing container '{}'", self.config.name);
        self.tasks
            .remove_container(&self.config.name)
            .map_err(|e| ProviderError::client(KIND, &self.config.name, e))
    }

    fn snapshot(&self) -> StateEntry {
        StateEntry::Container(self.config.clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ClientError;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory container runtime shared by several provider tests.
    #[derive(Default)]
    pub(crate) struct FakeTasks {
        pub running: Mutex<Vec<RunOptions>>,
        pub execs: Mutex<Vec<(String, Vec<String>)>>,
        pub fail_run: bool,
    }

    impl ContainerTasks for FakeTasks {
        fn run_container(&self, opts: &RunOptions) -> Result<(), ClientError> {
            if self.fail_run {
                return Err(ClientError::CommandFailed {
                    command: "docker run".to_owned(),
                    code: 125,
                    stderr: "image not found".to_owned(),
                });
            }
            self.running.lock().unwrap().push(opts.clone());
            Ok(())
        }

        fn remove_container(&self, name: &str) -> Result<(), ClientError> {
            self.running.lock().unwrap().retain(|o| o.name != name);
            Ok(())
        }

        fn container_exists(&self, name: &str) -> Result<bool, ClientError> {
            Ok(self.running.lock().unwrap().iter().any(|o| o.name == name))
        }

        fn exec(
            &self,
            container: &str,
            command: &[String],
            _env: &BTreeMap<String, String>,
        ) -> Result<String, ClientError> {
            self.execs
                .lock()
                .unwrap()
                .push((container.to_owned(), command.to_vec()));
            Ok(String::new())
        }
    }

    fn sample() -> Container {
        Container {
            name: "web".to_owned(),
            image: "nginx:1.27-alpine".to_owned(),
            command: Vec::new(),
            networks: vec!["cloud".to_owned()],
            env: BTreeMap::new(),
            volumes: Vec::new(),
            ports: Vec::new(),
            privileged: false,
        }
    }

    #[test]
    fn create_runs_with_config_shape() {
        let tasks = Arc::new(FakeTasks::default());
        ContainerProvider::new(sample(), tasks.clone()).create().unwrap();

        let running = tasks.running.lock().unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].name, "web");
        assert_eq!(running[0].networks, ["cloud"]);
    }

    #[test]
    fn destroy_removes_container() {
        let tasks = Arc::new(FakeTasks::default());
        let provider = ContainerProvider::new(sample(), tasks.clone());
        provider.create().unwrap();
        provider.destroy().unwrap();
        assert!(tasks.running.lock().unwrap().is_empty());
    }

    #[test]
    fn run_failure_surfaces_stderr() {
        let tasks = Arc::new(FakeTasks {
            fail_run: true,
            ..Default::default()
        });
        let err = ContainerProvider::new(sample(), tasks).create().unwrap_err();
        assert!(err.to_string().contains("web"));
    }

    #[test]
    fn snapshot_is_container_entry() {
        let provider = ContainerProvider::new(sample(), Arc::new(FakeTasks::default()));
        assert!(matches!(provider.snapshot(), StateEntry::Container(_)));
    }
}
