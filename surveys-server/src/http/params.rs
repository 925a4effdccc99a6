//! Query strings and request bodies accepted by the API

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `?surveyId=`
#[derive(Debug, Deserialize)]
pub struct SurveyIdQuery {
    #[serde(rename = "surveyId")]
    pub survey_id: String,
}

/// `?id=`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

/// `?id=&name=`
#[derive(Debug, Deserialize)]
pub struct ChangeNameQuery {
    pub id: String,
    pub name: String,
}

/// `?name=`, optional
#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub name: Option<String>,
}

impl CreateQuery {
    /// The requested name, treating an empty one as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// `?postId=`
#[derive(Debug, Deserialize)]
pub struct PostIdQuery {
    #[serde(rename = "postId")]
    pub post_id: String,
}

/// Body of `POST /api/changeJson`
#[derive(Debug, Deserialize)]
pub struct ChangeJsonRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Schema as a JSON string, or as a JSON document to be stored as text
    #[serde(default)]
    pub json: Value,
}

/// Body of `POST /api/post`
#[derive(Debug, Deserialize)]
pub struct PostResultRequest {
    #[serde(rename = "postId", deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(rename = "surveyResult", default)]
    pub survey_result: Value,
}

/// Accept an identifier sent either as a string or as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}
