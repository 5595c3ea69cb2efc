//! Pluggable in-memory storage with operation history.
//!
//! Every backend implements the [`Storage`] trait: named byte payloads that
//! can be saved, loaded, deleted and listed. Backends that keep an audit
//! trail additionally implement [`Trackable`].
//!
//! # Storage Backends
//!
//! - [`LocalStore`] -- plain `HashMap`-based store
//! - [`CloudStore`] -- same semantics, plus a history of every save, load
//!   and delete (`"Salvar - name"`, `"Carregar - name"`, `"Excluir - name"`)
//!
//! [`FileManager`] is a thin façade that holds one injected backend, and
//! [`Backend`] builds either variant from a [`BackendKind`].
//!
//! # Design Rules
//!
//! 1. Absence is not an error: `load` yields `None`, `delete` yields `false`.
//! 2. Saving an existing name overwrites it; nothing is versioned.
//! 3. History is append-only and records failed lookups too.
//! 4. Each backend guards its state with one lock.

pub mod backend;
pub mod cloud;
pub mod config;
pub mod error;
pub mod history;
pub mod local;
pub mod manager;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use backend::{Backend, BackendKind};
pub use cloud::CloudStore;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use history::{HistoryRecord, Operation, OperationHistory};
pub use local::LocalStore;
pub use manager::FileManager;
pub use traits::{Storage, Trackable};
