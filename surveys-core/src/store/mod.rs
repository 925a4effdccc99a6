//! Storage trait and backends for surveys and results.
//!
//! - [`InMemorySurveyStore`] - process-lifetime collections behind `RwLock`s
//! - [`SqliteSurveyStore`] - a single SQLite file, one statement group per call
//!
//! Both backends assign survey ids with [`next_survey_id`] and seed the demo
//! set from their constructors, never from a read.

mod error;
mod memory;
mod migrations;
mod sqlite;

pub use error::{Result, StoreError};
pub use memory::InMemorySurveyStore;
pub use sqlite::SqliteSurveyStore;

use serde_json::Value;

use crate::types::{ResultSet, Survey};

/// Storage for surveys and submitted results.
///
/// Identifiers are compared as strings. Lookups that find nothing return
/// `Ok(None)`; errors are reserved for storage failures.
pub trait SurveyStore: Send + Sync {
    /// All surveys in insertion order.
    fn list_surveys(&self) -> Result<Vec<Survey>>;

    fn get_survey(&self, id: &str) -> Result<Option<Survey>>;

    /// Create a survey with the next free id and an empty schema.
    ///
    /// Without a name the survey is called `"{DEFAULT_SURVEY_NAME} {id}"`.
    fn create_survey(&self, name: Option<&str>) -> Result<Survey>;

    /// Overwrite the name of an existing survey.
    fn rename_survey(&self, id: &str, name: &str) -> Result<Option<Survey>>;

    /// Store a schema under `id`.
    ///
    /// An existing survey only has its schema replaced; `name` is ignored even
    /// when given. A missing survey is inserted with `name`, or with the id as
    /// its name.
    fn upsert_survey_schema(&self, id: &str, name: Option<&str>, schema: &str) -> Result<Survey>;

    /// Remove a survey, returning what was removed. Result sets are untouched.
    fn delete_survey(&self, id: &str) -> Result<Option<Survey>>;

    /// Append one submission, creating the result set on first use.
    fn append_result(&self, post_id: &str, value: Value) -> Result<()>;

    fn get_results(&self, post_id: &str) -> Result<Option<ResultSet>>;

    fn survey_count(&self) -> Result<usize>;
}

/// Next survey id: one past the largest id that parses as an integer.
///
/// Ids that are not integers are ignored. Deleting the highest survey makes
/// its id available again. Fails when the largest id is `u64::MAX`.
pub fn next_survey_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let max = ids
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    max.checked_add(1)
        .map(|next| next.to_string())
        .ok_or(StoreError::IdsExhausted(max))
}

/// Name to store for a new survey; an empty name counts as none.
pub(crate) fn requested_name(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

/// Name given to a survey created without one.
pub(crate) fn default_survey_name(id: &str) -> String {
    format!("{} {}", crate::demo::DEFAULT_SURVEY_NAME, id)
}
