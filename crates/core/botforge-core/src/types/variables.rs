//! Variable store seam

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// A single variable assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableUpdate {
    /// Variable id
    pub id: String,
    /// New value
    pub value: serde_json::Value,
}

impl VariableUpdate {
    /// Create an update
    pub fn new(id: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Host-owned key/value store shared between actions of a session
pub trait VariableStore: Send + Sync {
    /// Apply a batch of assignments
    fn set(&self, updates: Vec<VariableUpdate>);

    /// Read a variable
    fn get(&self, id: &str) -> Option<serde_json::Value>;
}

/// In-memory variable store for one session
#[derive(Debug, Default)]
pub struct SessionVariables {
    values: RwLock<HashMap<String, serde_json::Value>>,
    history: RwLock<Vec<Vec<VariableUpdate>>>,
}

impl SessionVariables {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch passed to `set`, in order
    pub fn history(&self) -> Vec<Vec<VariableUpdate>> {
        self.history
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl VariableStore for SessionVariables {
    fn set(&self, updates: Vec<VariableUpdate>) {
        {
            let mut values = self
                .values
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for update in &updates {
                values.insert(update.id.clone(), update.value.clone());
            }
        }
        self.history
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(updates);
    }

    fn get(&self, id: &str) -> Option<serde_json::Value> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }
}
