//! The engine facade: construction, apply, and destroy.

use crate::exec::GroupExecutor;
use crate::plan::{self, Plan};
use crate::CoreError;
use drydock_config::{parse_folder, resolve_references, Blueprint, Config};
use drydock_runtime::Clients;
use drydock_state::{config_from_state, StateEntry, StateLayout, StateStore};
use std::path::Path;
use tracing::{error, info};

/// Creates and destroys the resources a blueprint describes.
///
/// The plan is derived exactly once, at construction. `apply` walks the
/// groups forward and persists what was created; `destroy` walks them in
/// reverse. One engine instance serves one `apply` or one `destroy`;
/// invoking both concurrently on the same instance is unsupported.
pub struct Engine {
    config: Config,
    providers: Plan,
    executor: GroupExecutor,
    store: StateStore,
}

impl Engine {
    /// Engine for a blueprint folder: parse, resolve references, build the
    /// default clients and the plan.
    pub fn from_folder(folder: impl AsRef<Path>, layout: StateLayout) -> Result<Self, CoreError> {
        let config = parse_folder(folder)?;
        resolve_references(&config)?;
        let clients = Clients::default_clients()?;
        Ok(Self::new(config, clients, layout))
    }

    /// Engine reconstructed from a state file, for destroying an
    /// environment whose blueprint may be gone.
    pub fn from_state(
        state_path: impl AsRef<Path>,
        layout: StateLayout,
    ) -> Result<Self, CoreError> {
        let config = config_from_state(state_path)?;
        resolve_references(&config)?;
        let clients = Clients::default_clients()?;
        Ok(Self::new(config, clients, layout))
    }

    pub fn new(config: Config, clients: Clients, layout: StateLayout) -> Self {
        Self::with_generator(config, clients, layout, plan::generate_providers)
    }

    /// Like [`new`](Self::new), with an injected plan generator. The
    /// generator runs exactly once, before the facade is returned, so
    /// tests can move stub providers into it.
    pub fn with_generator(
        config: Config,
        clients: Clients,
        layout: StateLayout,
        generate_providers: impl FnOnce(&Config, &Clients) -> Plan,
    ) -> Self {
        let providers = generate_providers(&config, &clients);
        Self {
            config,
            providers,
            executor: GroupExecutor::new(),
            store: StateStore::new(layout),
        }
    }

    /// Create all resources, group by group.
    ///
    /// Stops at the first create error but persists the state file in
    /// every case: a partial state is still the authoritative record for a
    /// later destroy. A state-persist failure is returned only when the
    /// apply itself succeeded; otherwise the create error dominates.
    pub fn apply(&self) -> Result<(), CoreError> {
        let mut first_err = None;
        for group in &self.providers {
            if let Err(e) = self.executor.create_group(group) {
                first_err = Some(e);
                break;
            }
        }

        let saved = self.save_state();

        match first_err {
            Some(e) => Err(e.into()),
            None => saved,
        }
    }

    /// Destroy all resources in reverse group order. Best-effort: provider
    /// failures are absorbed so teardown reaches every group.
    pub fn destroy(&self) -> Result<(), CoreError> {
        for group in self.providers.iter().rev() {
            self.executor.destroy_group(group);
        }
        Ok(())
    }

    /// Number of resources in the plan, excluding the implicit WAN.
    pub fn resource_count(&self) -> usize {
        self.config.resource_count()
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.config.blueprint.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The state list as recorded so far.
    pub fn state_snapshot(&self) -> Vec<StateEntry> {
        self.executor.snapshot()
    }

    fn save_state(&self) -> Result<(), CoreError> {
        info!("writing state file");
        let entries = self.executor.snapshot();
        if let Err(e) = self.store.save(&entries) {
            error!("unable to write state: {e}");
            return Err(e.into());
        }
        Ok(())
    }
}
