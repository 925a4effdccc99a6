//! SQLite implementation of survey storage.
//!
//! Every call runs on one shared connection and commits before returning.
//! Calls that read before writing wrap both steps in a transaction so two
//! requests cannot interleave between the read and the write.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::migrations::Migrator;
use super::{
    Result, StoreError, SurveyStore, default_survey_name, next_survey_id, requested_name,
};
use crate::demo::{demo_results, demo_surveys};
use crate::types::{EMPTY_SCHEMA, ResultSet, Survey};

/// SQLite-backed survey store
pub struct SqliteSurveyStore {
    conn: Mutex<Connection>,
}

impl SqliteSurveyStore {
    /// Open or create the database at `path`, loading the demo set if it has
    /// no surveys.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::init(Connection::open(path.as_ref())?)?;
        info!(path = %path.as_ref().display(), "opened survey database");
        store.seed_if_empty()?;
        Ok(store)
    }

    /// Open an in-memory database holding the demo set (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self::open_in_memory_unseeded()?;
        store.seed_if_empty()?;
        Ok(store)
    }

    /// Open an empty in-memory database (for testing).
    pub fn open_in_memory_unseeded() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        Migrator::new(&conn).migrate()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Load the demo set if the surveys table is empty.
    ///
    /// Returns whether anything was loaded. Existing result rows are kept.
    pub fn seed_if_empty(&self) -> Result<bool> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        let surveys = demo_surveys();
        for survey in &surveys {
            tx.execute(
                "INSERT INTO surveys (id, name, json_data) VALUES (?1, ?2, ?3)",
                params![survey.id, survey.name, survey.schema],
            )?;
        }
        for result in demo_results() {
            tx.execute(
                "INSERT OR IGNORE INTO results (id, data) VALUES (?1, ?2)",
                params![result.id, serde_json::to_string(&result.data)?],
            )?;
        }
        tx.commit()?;

        info!(surveys = surveys.len(), "seeded demo surveys");
        Ok(true)
    }

    fn row_to_survey(row: &rusqlite::Row) -> rusqlite::Result<Survey> {
        Ok(Survey {
            id: row.get(0)?,
            name: row.get(1)?,
            schema: row.get(2)?,
        })
    }

    fn find_survey(conn: &Connection, id: &str) -> Result<Option<Survey>> {
        let survey = conn
            .query_row(
                "SELECT id, name, json_data FROM surveys WHERE id = ?1",
                [id],
                Self::row_to_survey,
            )
            .optional()?;
        Ok(survey)
    }

    fn parse_data(post_id: &str, raw: &str) -> Result<Vec<Value>> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Array(data) => Ok(data),
            _ => Err(StoreError::InvalidData(format!(
                "results for {} are not an array",
                post_id
            ))),
        }
    }
}

impl SurveyStore for SqliteSurveyStore {
    #[instrument(skip(self), level = "debug")]
    fn list_surveys(&self) -> Result<Vec<Survey>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, json_data FROM surveys ORDER BY seq")?;
        let surveys = stmt
            .query_map([], Self::row_to_survey)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(surveys)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_survey(&self, id: &str) -> Result<Option<Survey>> {
        let conn = self.conn.lock()?;
        Self::find_survey(&conn, id)
    }

    #[instrument(skip(self), level = "debug")]
    fn create_survey(&self, name: Option<&str>) -> Result<Survey> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let ids = {
            let mut stmt = tx.prepare("SELECT id FROM surveys")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            ids
        };
        let id = next_survey_id(ids.iter().map(String::as_str))?;
        let name = requested_name(name).map_or_else(|| default_survey_name(&id), str::to_string);

        tx.execute(
            "INSERT INTO surveys (id, name, json_data) VALUES (?1, ?2, ?3)",
            params![id, name, EMPTY_SCHEMA],
        )?;
        tx.commit()?;

        debug!(id = %id, "created survey");
        Ok(Survey::new(id, name, EMPTY_SCHEMA))
    }

    #[instrument(skip(self), level = "debug")]
    fn rename_survey(&self, id: &str, name: &str) -> Result<Option<Survey>> {
        let conn = self.conn.lock()?;
        let changed = conn.execute(
            "UPDATE surveys SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::find_survey(&conn, id)
    }

    #[instrument(skip(self, schema), level = "debug")]
    fn upsert_survey_schema(&self, id: &str, name: Option<&str>, schema: &str) -> Result<Survey> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE surveys SET json_data = ?1 WHERE id = ?2",
            params![schema, id],
        )?;
        if changed == 0 {
            tx.execute(
                "INSERT INTO surveys (id, name, json_data) VALUES (?1, ?2, ?3)",
                params![id, name.unwrap_or(id), schema],
            )?;
            debug!(id, "inserted survey from schema upsert");
        }

        let survey = Self::find_survey(&tx, id)?;
        tx.commit()?;

        survey.ok_or_else(|| {
            StoreError::InvalidData(format!("survey {} missing after upsert", id))
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_survey(&self, id: &str) -> Result<Option<Survey>> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let survey = Self::find_survey(&tx, id)?;
        if survey.is_some() {
            tx.execute("DELETE FROM surveys WHERE id = ?1", [id])?;
        }
        tx.commit()?;

        Ok(survey)
    }

    #[instrument(skip(self, value), level = "debug")]
    fn append_result(&self, post_id: &str, value: Value) -> Result<()> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
            .query_row("SELECT data FROM results WHERE id = ?1", [post_id], |row| {
                row.get(0)
            })
            .optional()?;

        match existing {
            Some(raw) => {
                let mut data = Self::parse_data(post_id, &raw)?;
                data.push(value);
                tx.execute(
                    "UPDATE results SET data = ?1 WHERE id = ?2",
                    params![serde_json::to_string(&data)?, post_id],
                )?;
            }
            None => {
                tx.execute(
                    "INSERT INTO results (id, data) VALUES (?1, ?2)",
                    params![post_id, serde_json::to_string(&[value])?],
                )?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn get_results(&self, post_id: &str) -> Result<Option<ResultSet>> {
        let conn = self.conn.lock()?;
        let raw: Option<String> = conn
            .query_row("SELECT data FROM results WHERE id = ?1", [post_id], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(ResultSet {
                id: post_id.to_string(),
                data: Self::parse_data(post_id, &raw)?,
            })),
            None => Ok(None),
        }
    }

    fn survey_count(&self) -> Result<usize> {
        let conn = self.conn.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
