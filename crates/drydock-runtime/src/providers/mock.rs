//! In-memory provider for engine and executor tests.

use crate::providers::Provider;
use crate::ProviderError;
use drydock_config::Network;
use drydock_state::StateEntry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A provider that records its lifecycle calls instead of touching any
/// external system.
///
/// Tests keep an `Arc<MockProvider>` for assertions and hand a clone to
/// the plan as `Arc<dyn Provider>`. An optional shared sequence log
/// captures cross-provider ordering; an optional delay widens race
/// windows deliberately.
pub struct MockProvider {
    entry: StateEntry,
    fail_create: bool,
    fail_destroy: bool,
    delay: Option<Duration>,
    create_calls: AtomicUsize,
    destroy_calls: AtomicUsize,
    sequence: Option<SequenceLog>,
}

struct SequenceLog {
    log: Arc<Mutex<Vec<String>>>,
    label: String,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            entry: StateEntry::Network(Network {
                name: name.to_owned(),
                subnet: "10.99.0.0/16".to_owned(),
            }),
            fail_create: false,
            fail_destroy: false,
            delay: None,
            create_calls: AtomicUsize::new(0),
            destroy_calls: AtomicUsize::new(0),
            sequence: None,
        }
    }

    /// A provider whose `create` always fails.
    pub fn failing(name: &str) -> Self {
        let mut provider = Self::new(name);
        provider.fail_create = true;
        provider
    }

    /// Make `destroy` fail as well.
    pub fn with_failing_destroy(mut self) -> Self {
        self.fail_destroy = true;
        self
    }

    /// Use `entry` as the snapshot instead of the default network record.
    pub fn with_entry(mut self, entry: StateEntry) -> Self {
        self.entry = entry;
        self
    }

    /// Sleep for `delay` inside `create` and `destroy`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Push `label` onto `log` on every lifecycle call.
    pub fn with_sequence_log(mut self, log: Arc<Mutex<Vec<String>>>, label: &str) -> Self {
        self.sequence = Some(SequenceLog {
            log,
            label: label.to_owned(),
        });
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        if let Some(seq) = &self.sequence {
            seq.log.lock().unwrap().push(seq.label.clone());
        }
    }
}

impl Provider for MockProvider {
    fn create(&self) -> Result<(), ProviderError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.record();
        if self.fail_create {
            return Err(ProviderError::failed(
                "mock",
                self.entry.resource_name(),
                "injected create failure",
            ));
        }
        Ok(())
    }

    fn destroy(&self) -> Result<(), ProviderError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        self.record();
        if self.fail_destroy {
            return Err(ProviderError::failed(
                "mock",
                self.entry.resource_name(),
                "injected destroy failure",
            ));
        }
        Ok(())
    }

    fn snapshot(&self) -> StateEntry {
        self.entry.clone()
    }
}
