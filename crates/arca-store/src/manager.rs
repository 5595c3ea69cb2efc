use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::traits::Storage;

/// Façade over exactly one storage backend.
///
/// The backend is injected at construction; there is no default.
pub struct FileManager {
    storage: Arc<dyn Storage>,
}

impl FileManager {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Save a file through the backend.
    ///
    /// The backend's success flag is discarded. Only infrastructure errors
    /// are propagated.
    pub fn save_file(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        debug!(backend = self.storage.backend_name(), name, "saving file");
        self.storage.save(name, data)?;
        Ok(())
    }

    /// The backend this manager writes to.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }
}

impl std::fmt::Debug for FileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileManager")
            .field("backend", &self.storage.backend_name())
            .finish()
    }
}
