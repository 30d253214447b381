//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::submission::{InMemorySubmissionStore, SubmissionStore};

/// Shared application state.
///
/// Holds the loaded payroll configuration and the submission store every
/// handler writes to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn SubmissionStore>,
}

impl AppState {
    /// Creates a state backed by an in-memory submission store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(InMemorySubmissionStore::new()))
    }

    /// Creates a state backed by the given submission store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the submission store.
    pub fn store(&self) -> &dyn SubmissionStore {
        self.store.as_ref()
    }
}
