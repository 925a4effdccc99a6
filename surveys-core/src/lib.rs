//! surveys-core - storage for survey definitions and submitted results
//!
//! # Architecture
//!
//! - **Types** ([`Survey`], [`ResultSet`]) are the records the HTTP layer
//!   serializes verbatim
//! - **Storage** ([`SurveyStore`]) is the only seam between the API and the
//!   backing collections; "not found" is always `Ok(None)`
//! - **Backends** ([`InMemorySurveyStore`], [`SqliteSurveyStore`]) seed the
//!   demo set once, when they are constructed over an empty collection

pub mod demo;
pub mod store;
mod types;

pub use demo::DEFAULT_SURVEY_NAME;
pub use store::{
    InMemorySurveyStore, SqliteSurveyStore, StoreError, SurveyStore, next_survey_id,
};
pub use types::{EMPTY_SCHEMA, ResultSet, Survey, schema_from_value};
