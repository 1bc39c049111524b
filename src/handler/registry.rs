//! Handler registry
//!
//! A concurrency-safe map from command to handler. Owned by the process that
//! builds the server and shared with the dispatcher through an `Arc`; changes
//! are visible to the next dispatched request.

use hyper::body::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::nfc::{Command, Params};

/// Error type returned by a failing handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Payload on success, error otherwise
pub type HandlerResult = Result<Bytes, HandlerError>;

/// Handler invoked for one NFC command
pub type HandlerFn = dyn Fn(Params) -> HandlerResult + Send + Sync;

/// Maps an NFC command to its handler
#[derive(Default)]
pub struct Handlers {
    inner: RwLock<HashMap<Command, Arc<HandlerFn>>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`, for populating a registry before sharing it
    #[must_use]
    pub fn with<F>(self, command: Command, handler: F) -> Self
    where
        F: Fn(Params) -> HandlerResult + Send + Sync + 'static,
    {
        self.set(command, handler);
        self
    }

    /// Set the handler for the given command, replacing any previous one
    pub fn set<F>(&self, command: Command, handler: F)
    where
        F: Fn(Params) -> HandlerResult + Send + Sync + 'static,
    {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(command, Arc::new(handler));
    }

    /// Remove the handler for the given command. No-op if none is set.
    pub fn del(&self, command: &Command) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(command);
    }

    /// Look up a handler. The returned `Arc` is independent of the lock, so
    /// the caller can run it while the registry is being modified.
    pub(crate) fn get(&self, command: &Command) -> Option<Arc<HandlerFn>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(command)
            .cloned()
    }

    pub fn contains(&self, command: &Command) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(command)
    }

    /// Registered commands, in no particular order
    pub fn commands(&self) -> Vec<Command> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("commands", &self.commands())
            .finish()
    }
}
