//! Deterministic resource release.
//!
//! Release happens in `Drop`, so it runs on every exit path: normal return,
//! `?`, and unwinding. Explicit release is idempotent and the later drop
//! becomes a no-op. There is no finalizer-style backstop.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// Shared, ordered log of lifecycle events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        let event = event.into();
        debug!(event = %event, "resource event");
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event);
    }

    /// All events so far, oldest first.
    pub fn events(&self) -> Vec<String> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A connection that is disposed exactly once.
#[derive(Debug)]
pub struct Connection {
    log: EventLog,
    disposed: bool,
}

impl Connection {
    pub fn open(log: &EventLog) -> Self {
        log.push("connection opened");
        Self {
            log: log.clone(),
            disposed: false,
        }
    }

    /// Release the connection. Calling this more than once has no effect.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.log.push("dispose called");
            self.disposed = true;
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Release chains
// ---------------------------------------------------------------------------

/// Something that holds a resource to give back.
pub trait Release {
    fn release(&mut self);
}

/// Root of every release chain.
#[derive(Debug)]
pub struct BaseResource {
    log: EventLog,
}

impl BaseResource {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Release for BaseResource {
    fn release(&mut self) {
        self.log.push("releasing base resource");
    }
}

/// Releases its file handle, then its base.
#[derive(Debug)]
pub struct FileResource {
    path: String,
    base: BaseResource,
}

impl FileResource {
    pub fn new(path: impl Into<String>, log: &EventLog) -> Self {
        Self {
            path: path.into(),
            base: BaseResource::new(log),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Release for FileResource {
    fn release(&mut self) {
        self.base.log.push(format!("releasing file resource {}", self.path));
        self.base.release();
    }
}

/// Releases its database session, then its base.
#[derive(Debug)]
pub struct DatabaseResource {
    dsn: String,
    base: BaseResource,
}

impl DatabaseResource {
    pub fn new(dsn: impl Into<String>, log: &EventLog) -> Self {
        Self {
            dsn: dsn.into(),
            base: BaseResource::new(log),
        }
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }
}

impl Release for DatabaseResource {
    fn release(&mut self) {
        self.base
            .log
            .push(format!("releasing database resource {}", self.dsn));
        self.base.release();
    }
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Owns a [`Release`] value and releases it exactly once.
#[derive(Debug)]
pub struct Guard<R: Release> {
    resource: R,
    released: bool,
}

impl<R: Release> Guard<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            released: false,
        }
    }

    /// Release now instead of at the end of scope.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.resource.release();
        }
    }
}

impl<R: Release> std::ops::Deref for Guard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R: Release> Drop for Guard<R> {
    fn drop(&mut self) {
        self.release_once();
    }
}

/// Run `f` with a guarded resource; the resource is released afterwards on
/// every path, including an early `Err` or a panic inside `f`.
pub fn scoped<R, T, E, F>(resource: R, f: F) -> Result<T, E>
where
    R: Release,
    F: FnOnce(&R) -> Result<T, E>,
{
    let guard = Guard::new(resource);
    f(&guard)
}
