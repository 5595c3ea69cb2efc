use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cloud::CloudStore;
use crate::error::StoreError;
use crate::local::LocalStore;
use crate::traits::{Storage, Trackable};

/// Which storage backend to construct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Plain in-memory storage.
    #[default]
    Local,
    /// In-memory storage with an operation history.
    Cloud,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" => Ok(Self::Cloud),
            other => Err(StoreError::UnknownBackend(other.to_string())),
        }
    }
}

/// A constructed backend, keeping the concrete type so capabilities beyond
/// [`Storage`] stay reachable.
#[derive(Clone, Debug)]
pub enum Backend {
    Local(Arc<LocalStore>),
    Cloud(Arc<CloudStore>),
}

impl Backend {
    /// Build an empty backend of the given kind.
    pub fn new(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Local => Self::Local(Arc::new(LocalStore::new())),
            BackendKind::Cloud => Self::Cloud(Arc::new(CloudStore::new())),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Local(_) => BackendKind::Local,
            Self::Cloud(_) => BackendKind::Cloud,
        }
    }

    /// Shared handle to the storage capability.
    pub fn storage(&self) -> Arc<dyn Storage> {
        match self {
            Self::Local(store) => store.clone() as Arc<dyn Storage>,
            Self::Cloud(store) => store.clone(),
        }
    }

    /// The history capability, if this backend tracks operations.
    pub fn trackable(&self) -> Option<&dyn Trackable> {
        match self {
            Self::Local(_) => None,
            Self::Cloud(store) => {
                let tracker: &dyn Trackable = &**store;
                Some(tracker)
            }
        }
    }
}
