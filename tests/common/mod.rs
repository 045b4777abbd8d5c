//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use tokio::sync::Semaphore;
use view_router::routing::LoadFuture;
use view_router::{LoadError, ViewSource};

/// A rendered view as the tests see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View(pub String);

/// View source that counts loads per component and can hold them on a gate.
#[derive(Default)]
pub struct CountingSource {
    loads: Mutex<HashMap<String, Arc<AtomicUsize>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    failures: Mutex<HashMap<String, usize>>,
}

#[allow(dead_code)]
impl CountingSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make loads of `component` wait until [`release`](Self::release) is called.
    pub fn hold(&self, component: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(component.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let held loads of `component` finish.
    pub fn release(&self, component: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(component) {
            gate.add_permits(1024);
        }
    }

    /// Fail the next `times` loads of `component`.
    pub fn fail_next(&self, component: &str, times: usize) {
        self.failures.lock().unwrap().insert(component.to_string(), times);
    }

    pub fn loads(&self, component: &str) -> usize {
        self.counter(component).load(Ordering::SeqCst)
    }

    fn counter(&self, component: &str) -> Arc<AtomicUsize> {
        self.loads
            .lock()
            .unwrap()
            .entry(component.to_string())
            .or_default()
            .clone()
    }

    fn take_failure(&self, component: &str) -> bool {
        let mut failures = self.failures.lock().unwrap();
        match failures.get_mut(component) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        }
    }
}

impl ViewSource<View> for CountingSource {
    fn resolve(&self, component: &str) -> Result<View, LoadError> {
        Ok(View(component.to_string()))
    }

    fn load(&self, component: &str) -> LoadFuture<View> {
        self.counter(component).fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(component).cloned();
        let fail = self.take_failure(component);
        let component = component.to_string();

        async move {
            if let Some(gate) = gate {
                let _permit = gate.acquire().await.map_err(LoadError::new)?;
            }
            if fail {
                return Err(LoadError::new(format!("failed to fetch {}", component)));
            }
            Ok(View(component))
        }
        .boxed()
    }
}
