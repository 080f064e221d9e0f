//! Shared helpers for integration tests.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use boundlog::serialize::{HostObject, ObjectRef, Value};

/// Host object that counts how often it is rendered.
///
/// The serializer renders host objects through `Display`, so a count of zero
/// proves the serializer never touched the value.
#[derive(Clone, Default)]
pub struct RenderCounter {
    renders: Arc<AtomicUsize>,
}

impl RenderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn value(&self) -> Value {
        Value::host(self.clone())
    }
}

impl fmt::Display for RenderCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renders.fetch_add(1, Ordering::SeqCst);
        f.write_str("counter")
    }
}

impl HostObject for RenderCounter {}

/// `{"level1": {"level2": {"level3": leaf}}}`
#[allow(dead_code)]
pub fn nested_three(leaf: impl Into<Value>) -> Value {
    let level3 = ObjectRef::new();
    level3.insert("level3", leaf);
    let level2 = ObjectRef::new();
    level2.insert("level2", level3);
    let level1 = ObjectRef::new();
    level1.insert("level1", level2);
    Value::from(level1)
}
