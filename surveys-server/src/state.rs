//! Shared application state for the surveys server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use surveys_core::{InMemorySurveyStore, StoreError, SurveyStore};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing store for surveys and results
    pub store: Arc<dyn SurveyStore>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create AppState over an already opened store
    pub fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }

    /// Create AppState over a seeded in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(InMemorySurveyStore::seeded()?)))
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
