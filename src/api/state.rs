//! Application state for the deduction administration API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::employees::{AccessSelection, EmployeeDirectory};
use crate::error::AdminResult;
use crate::extraction::DeductionExtractor;
use crate::store::DeductionStore;

/// Shared application state.
///
/// Holds the catalog, the deduction list, the employee roster with its
/// access selection, and the extraction client.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<DeductionStore>,
    directory: Arc<EmployeeDirectory>,
    access: Arc<RwLock<AccessSelection>>,
    extractor: Arc<dyn DeductionExtractor>,
}

impl AppState {
    /// Builds the state from a loaded catalog.
    ///
    /// Seeds the deduction list and roster from the catalog and makes the
    /// configured number of employees visible.
    pub fn new(config: ConfigLoader, extractor: Arc<dyn DeductionExtractor>) -> AdminResult<Self> {
        let now = Utc::now();
        let store = DeductionStore::from_config(&config, now)?;
        let roster = config.config().roster();
        let directory = EmployeeDirectory::from_config(roster, now);
        let access = AccessSelection::first(&directory, roster.initial_visible);

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            directory: Arc::new(directory),
            access: Arc::new(RwLock::new(access)),
            extractor,
        })
    }

    /// Returns a reference to the catalog.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the deduction store.
    pub fn store(&self) -> &DeductionStore {
        &self.store
    }

    /// Returns the employee roster.
    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    /// Returns the access selection lock.
    pub fn access(&self) -> &RwLock<AccessSelection> {
        &self.access
    }

    /// Returns the extraction client.
    pub fn extractor(&self) -> &dyn DeductionExtractor {
        self.extractor.as_ref()
    }
}
