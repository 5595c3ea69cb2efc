/// Errors from storage backends and store configuration.
///
/// Storage operations never fail for domain reasons: a missing entry is
/// `Ok(None)` on load and `Ok(false)` on delete. Only infrastructure
/// failures reach this type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A backend lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An unrecognised backend name was supplied.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn poisoned<E: std::fmt::Display>(err: E) -> Self {
        Self::LockPoisoned(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
