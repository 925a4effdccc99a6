//! Survey and result records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema stored for a survey that has not been edited yet.
pub const EMPTY_SCHEMA: &str = "{}";

/// A survey definition.
///
/// The schema is kept as an opaque string and is never parsed by the store.
/// On the wire the field is called `json`, which is what the editor front end
/// reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: String,
    pub name: String,
    #[serde(rename = "json")]
    pub schema: String,
}

impl Survey {
    pub fn new(id: impl Into<String>, name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schema: schema.into(),
        }
    }
}

/// All results submitted for one post id, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub id: String,
    pub data: Vec<Value>,
}

impl ResultSet {
    /// A result set holding its first submission.
    pub fn first(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            data: vec![value],
        }
    }
}

/// Coerce an incoming schema payload to the stored string form.
///
/// Strings are kept verbatim, `null` becomes [`EMPTY_SCHEMA`], and any other
/// value is stored as its compact JSON text.
pub fn schema_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => EMPTY_SCHEMA.to_string(),
        other => other.to_string(),
    }
}
