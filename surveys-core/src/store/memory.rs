//! In-memory SurveyStore implementation.
//!
//! Collections live for as long as the store and are shared by every caller
//! holding it. Nothing is persisted.

use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{Result, SurveyStore, default_survey_name, next_survey_id, requested_name};
use crate::demo::{demo_results, demo_surveys};
use crate::types::{EMPTY_SCHEMA, ResultSet, Survey};

/// In-memory implementation of SurveyStore.
pub struct InMemorySurveyStore {
    /// Surveys in insertion order
    surveys: RwLock<Vec<Survey>>,
    /// Result sets in creation order
    results: RwLock<Vec<ResultSet>>,
}

impl InMemorySurveyStore {
    /// Create an empty store without demo data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surveys: RwLock::new(Vec::new()),
            results: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding the demo surveys and results.
    pub fn seeded() -> Result<Self> {
        let store = Self::new();
        store.seed_if_empty()?;
        Ok(store)
    }

    /// Load the demo set if no surveys exist yet.
    ///
    /// Returns whether anything was loaded. Result sets already present are
    /// left alone.
    pub fn seed_if_empty(&self) -> Result<bool> {
        let mut surveys = self.surveys.write()?;
        if !surveys.is_empty() {
            return Ok(false);
        }

        let mut results = self.results.write()?;
        surveys.extend(demo_surveys());
        for demo in demo_results() {
            if !results.iter().any(|r| r.id == demo.id) {
                results.push(demo);
            }
        }

        info!(surveys = surveys.len(), "seeded demo surveys");
        Ok(true)
    }
}

impl Default for InMemorySurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyStore for InMemorySurveyStore {
    fn list_surveys(&self) -> Result<Vec<Survey>> {
        Ok(self.surveys.read()?.clone())
    }

    fn get_survey(&self, id: &str) -> Result<Option<Survey>> {
        let surveys = self.surveys.read()?;
        Ok(surveys.iter().find(|s| s.id == id).cloned())
    }

    #[instrument(skip(self), level = "debug")]
    fn create_survey(&self, name: Option<&str>) -> Result<Survey> {
        let mut surveys = self.surveys.write()?;
        let id = next_survey_id(surveys.iter().map(|s| s.id.as_str()))?;
        let name = requested_name(name).map_or_else(|| default_survey_name(&id), str::to_string);

        let survey = Survey::new(id, name, EMPTY_SCHEMA);
        surveys.push(survey.clone());
        debug!(id = %survey.id, "created survey");
        Ok(survey)
    }

    #[instrument(skip(self), level = "debug")]
    fn rename_survey(&self, id: &str, name: &str) -> Result<Option<Survey>> {
        let mut surveys = self.surveys.write()?;
        Ok(surveys.iter_mut().find(|s| s.id == id).map(|survey| {
            survey.name = name.to_string();
            survey.clone()
        }))
    }

    #[instrument(skip(self, schema), level = "debug")]
    fn upsert_survey_schema(&self, id: &str, name: Option<&str>, schema: &str) -> Result<Survey> {
        let mut surveys = self.surveys.write()?;
        if let Some(survey) = surveys.iter_mut().find(|s| s.id == id) {
            survey.schema = schema.to_string();
            return Ok(survey.clone());
        }

        let survey = Survey::new(id, name.unwrap_or(id), schema);
        surveys.push(survey.clone());
        debug!(id, "inserted survey from schema upsert");
        Ok(survey)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_survey(&self, id: &str) -> Result<Option<Survey>> {
        let mut surveys = self.surveys.write()?;
        Ok(surveys
            .iter()
            .position(|s| s.id == id)
            .map(|index| surveys.remove(index)))
    }

    #[instrument(skip(self, value), level = "debug")]
    fn append_result(&self, post_id: &str, value: Value) -> Result<()> {
        let mut results = self.results.write()?;
        match results.iter_mut().find(|r| r.id == post_id) {
            Some(set) => set.data.push(value),
            None => results.push(ResultSet::first(post_id, value)),
        }
        Ok(())
    }

    fn get_results(&self, post_id: &str) -> Result<Option<ResultSet>> {
        let results = self.results.read()?;
        Ok(results.iter().find(|r| r.id == post_id).cloned())
    }

    fn survey_count(&self) -> Result<usize> {
        Ok(self.surveys.read()?.len())
    }
}
