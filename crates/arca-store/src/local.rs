use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::Storage;

/// In-memory, HashMap-based storage without history.
///
/// Payloads are held behind a `RwLock` and cloned on read. Data is lost when
/// the store is dropped.
pub struct LocalStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl LocalStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        let map = self.entries.read().map_err(StoreError::poisoned)?;
        Ok(map.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Total payload bytes across all entries.
    pub fn total_bytes(&self) -> StoreResult<u64> {
        let map = self.entries.read().map_err(StoreError::poisoned)?;
        Ok(map.values().map(|data| data.len() as u64).sum())
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStore {
    fn save(&self, name: &str, data: &[u8]) -> StoreResult<bool> {
        let mut map = self.entries.write().map_err(StoreError::poisoned)?;
        map.insert(name.to_string(), data.to_vec());
        debug!(backend = "local", name, bytes = data.len(), "entry saved");
        Ok(true)
    }

    fn load(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.entries.read().map_err(StoreError::poisoned)?;
        Ok(map.get(name).cloned())
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let mut map = self.entries.write().map_err(StoreError::poisoned)?;
        let removed = map.remove(name).is_some();
        debug!(backend = "local", name, removed, "entry deleted");
        Ok(removed)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let map = self.entries.read().map_err(StoreError::poisoned)?;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|map| map.len()).unwrap_or(0);
        f.debug_struct("LocalStore")
            .field("entry_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    #[test]
    fn save_and_load() {
        let store = LocalStore::new();
        assert!(store.save("notes.txt", b"hello world").unwrap());

        let data = store.load("notes.txt").unwrap().expect("should exist");
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn load_missing_returns_none() {
        let store = LocalStore::new();
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn save_overwrites() {
        let store = LocalStore::new();
        store.save("a", b"first").unwrap();
        store.save("a", b"second").unwrap();

        assert_eq!(store.load("a").unwrap().unwrap(), b"second");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn empty_payload_is_stored() {
        let store = LocalStore::new();
        store.save("empty", b"").unwrap();
        assert_eq!(store.load("empty").unwrap(), Some(Vec::new()));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_present_entry() {
        let store = LocalStore::new();
        store.save("to-delete", b"x").unwrap();

        assert!(store.delete("to-delete").unwrap()); // was present
        assert!(store.load("to-delete").unwrap().is_none()); // now gone
        assert!(!store.delete("to-delete").unwrap()); // second delete = false
    }

    #[test]
    fn delete_missing_leaves_store_unchanged() {
        let store = LocalStore::new();
        store.save("keep", b"data").unwrap();

        assert!(!store.delete("never-written").unwrap());
        assert_eq!(store.list().unwrap(), vec!["keep"]);
        assert_eq!(store.load("keep").unwrap().unwrap(), b"data");
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[test]
    fn list_returns_all_names() {
        let store = LocalStore::new();
        store.save("c", b"3").unwrap();
        store.save("a", b"1").unwrap();
        store.save("b", b"2").unwrap();

        let names: HashSet<String> = store.list().unwrap().into_iter().collect();
        let expected: HashSet<String> =
            ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn list_empty_store() {
        let store = LocalStore::new();
        assert!(store.list().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_total_bytes() {
        let store = LocalStore::new();
        assert!(store.is_empty().unwrap());

        store.save("a", b"12345").unwrap();
        store.save("b", b"123456789").unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.total_bytes().unwrap(), 14);
    }

    #[test]
    fn backend_name_is_local() {
        assert_eq!(LocalStore::default().backend_name(), "local");
    }

    #[test]
    fn debug_format() {
        let store = LocalStore::new();
        store.save("x", b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("LocalStore"));
        assert!(debug.contains("entry_count"));
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(LocalStore::new());
        store.save("shared", b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let data = store.load("shared").unwrap();
                    assert_eq!(data.as_deref(), Some(&b"shared data"[..]));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    proptest! {
        #[test]
        fn save_then_load_roundtrips(
            name in ".{0,32}",
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let store = LocalStore::new();
            prop_assert!(store.save(&name, &payload).unwrap());
            prop_assert_eq!(store.load(&name).unwrap(), Some(payload));
        }
    }
}
