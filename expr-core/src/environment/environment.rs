use std::collections::HashMap;

use super::value::Value;

/// A flat mutable binding of names to values, shared across every
/// expression evaluated in one session.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self { store: HashMap::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn set(&mut self, name: String, value: Value) {
        let _ = self.store.insert(name, value);
    }
}
