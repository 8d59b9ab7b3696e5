//! Group execution.
//!
//! Create and destroy have deliberately different semantics, so they are
//! two distinct paths rather than one parameterized one: create returns on
//! the first error without waiting for its siblings, destroy waits for
//! everything and absorbs failures.

use drydock_runtime::{Provider, ProviderError};
use drydock_state::StateEntry;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::warn;

/// Runs one provider group at a time and owns the only shared mutable
/// object in the engine: the ordered list of snapshots for everything that
/// was actually created.
pub(crate) struct GroupExecutor {
    state: Arc<Mutex<Vec<StateEntry>>>,
}

impl GroupExecutor {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Clone of the state list as it stands right now.
    pub fn snapshot(&self) -> Vec<StateEntry> {
        lock_state(&self.state).clone()
    }

    /// Create every provider in `group` concurrently.
    ///
    /// Each task appends its snapshot to the state list under the mutex
    /// after a successful create, then reports over the channel. The first
    /// reported error is returned immediately; sibling threads are not
    /// cancelled and their late appends stay safe behind the shared `Arc`
    /// (late sends to the dropped receiver are simply discarded).
    pub fn create_group(&self, group: &[Arc<dyn Provider>]) -> Result<(), ProviderError> {
        let (tx, rx) = mpsc::channel();

        for provider in group {
            let provider = Arc::clone(provider);
            let state = Arc::clone(&self.state);
            let tx = tx.clone();
            thread::spawn(move || {
                let result = provider.create();
                if result.is_ok() {
                    lock_state(&state).push(provider.snapshot());
                }
                let _ = tx.send(result);
            });
        }
        drop(tx);

        for result in rx {
            result?;
        }
        Ok(())
    }

    /// Destroy every provider in `group` concurrently, waiting for all of
    /// them. Individual failures are logged and absorbed so teardown
    /// removes as much as possible.
    pub fn destroy_group(&self, group: &[Arc<dyn Provider>]) {
        let mut handles = Vec::with_capacity(group.len());
        for provider in group {
            let provider = Arc::clone(provider);
            handles.push(thread::spawn(move || {
                if let Err(e) = provider.destroy() {
                    warn!("destroy failed: {e}");
                }
            }));
        }
        for handle in handles {
            let _ = handle.join();
        }
    }
}

/// A poisoned lock still guards valid entries; keep going with them.
fn lock_state(state: &Mutex<Vec<StateEntry>>) -> std::sync::MutexGuard<'_, Vec<StateEntry>> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
