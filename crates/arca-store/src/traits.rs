use crate::error::StoreResult;
use crate::history::HistoryRecord;

/// Named byte storage.
///
/// All implementations must satisfy these invariants:
/// - Names are unique within a backend. Saving an existing name replaces the
///   payload; no versions are kept.
/// - Absence is not an error: `load` returns `Ok(None)` and `delete` returns
///   `Ok(false)` for unknown names.
/// - The store never interprets payloads.
pub trait Storage: Send + Sync {
    /// Store `data` under `name`, overwriting any previous payload.
    ///
    /// Returns `Ok(true)` once the payload is stored. No backend currently
    /// reports `Ok(false)`; the flag is kept so one could.
    fn save(&self, name: &str, data: &[u8]) -> StoreResult<bool>;

    /// Load the payload stored under `name`.
    ///
    /// Returns `Ok(None)` if the name was never saved or has been deleted.
    fn load(&self, name: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Delete the entry stored under `name`. Returns `true` if it existed.
    fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Names of all stored entries.
    ///
    /// Callers must treat the result as unordered. The bundled backends
    /// happen to return names sorted.
    fn list(&self) -> StoreResult<Vec<String>>;

    /// Short identifier of the backend, used in logs and CLI output.
    fn backend_name(&self) -> &'static str;
}

/// A backend that keeps an audit trail of the operations applied to it.
pub trait Trackable: Send + Sync {
    /// Append `"{operation} - {name}"` to the history.
    fn record_operation(&self, operation: &str, name: &str) -> StoreResult<()>;

    /// Structured history records in append order.
    fn records(&self) -> StoreResult<Vec<HistoryRecord>>;

    /// The rendered history in append order.
    ///
    /// The returned vector is a snapshot; later operations are not reflected
    /// in it.
    fn history(&self) -> StoreResult<Vec<String>> {
        Ok(self.records()?.iter().map(ToString::to_string).collect())
    }
}
