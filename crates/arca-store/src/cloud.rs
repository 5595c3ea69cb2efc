use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::history::{HistoryRecord, Operation, OperationHistory};
use crate::traits::{Storage, Trackable};

#[derive(Debug, Default)]
struct CloudState {
    entries: HashMap<String, Vec<u8>>,
    history: OperationHistory,
}

/// In-memory storage that records every save, load and delete.
///
/// The entry map and the history share a single lock, so the storage effect
/// of a call and its history record become visible together. Every tracked
/// call is recorded, whether or not the name existed.
pub struct CloudStore {
    state: RwLock<CloudState>,
}

impl CloudStore {
    /// Create a new empty store with an empty history.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CloudState::default()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        let state = self.state.read().map_err(StoreError::poisoned)?;
        Ok(state.entries.len())
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for CloudStore {
    fn default() -> Self {
        Self::new()
    }
}

fn append(state: &mut CloudState, operation: Operation, name: &str) {
    state
        .history
        .push(HistoryRecord::new(operation.label(), name));
}

impl Storage for CloudStore {
    fn save(&self, name: &str, data: &[u8]) -> StoreResult<bool> {
        let mut state = self.state.write().map_err(StoreError::poisoned)?;
        state.entries.insert(name.to_string(), data.to_vec());
        append(&mut state, Operation::Save, name);
        debug!(backend = "cloud", name, bytes = data.len(), "entry saved");
        Ok(true)
    }

    fn load(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut state = self.state.write().map_err(StoreError::poisoned)?;
        append(&mut state, Operation::Load, name);
        Ok(state.entries.get(name).cloned())
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let mut state = self.state.write().map_err(StoreError::poisoned)?;
        let removed = state.entries.remove(name).is_some();
        append(&mut state, Operation::Delete, name);
        debug!(backend = "cloud", name, removed, "entry deleted");
        Ok(removed)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let state = self.state.read().map_err(StoreError::poisoned)?;
        let mut names: Vec<String> = state.entries.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn backend_name(&self) -> &'static str {
        "cloud"
    }
}

impl Trackable for CloudStore {
    fn record_operation(&self, operation: &str, name: &str) -> StoreResult<()> {
        let mut state = self.state.write().map_err(StoreError::poisoned)?;
        state.history.push(HistoryRecord::new(operation, name));
        Ok(())
    }

    fn records(&self) -> StoreResult<Vec<HistoryRecord>> {
        let state = self.state.read().map_err(StoreError::poisoned)?;
        Ok(state.history.records().to_vec())
    }
}

impl std::fmt::Debug for CloudStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (entries, history) = self
            .state
            .read()
            .map(|s| (s.entries.len(), s.history.len()))
            .unwrap_or((0, 0));
        f.debug_struct("CloudStore")
            .field("entry_count", &entries)
            .field("history_len", &history)
            .finish()
    }
}
