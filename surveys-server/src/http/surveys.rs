//! Survey REST API endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use surveys_core::{Survey, schema_from_value};

use super::params::{ChangeJsonRequest, ChangeNameQuery, CreateQuery, IdQuery, SurveyIdQuery};
use crate::{AppState, error::ApiError};

/// Response for a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: String,
}

/// GET /api/getActive
pub async fn get_active(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Survey>>, ApiError> {
    Ok(Json(state.store.list_surveys()?))
}

/// GET /api/getSurvey?surveyId=
pub async fn get_survey(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SurveyIdQuery>,
) -> Result<Json<Survey>, ApiError> {
    state
        .store
        .get_survey(&query.survey_id)?
        .map(Json)
        .ok_or_else(|| ApiError::survey_not_found(query.survey_id))
}

/// GET /api/changeName?id=&name=
pub async fn change_name(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChangeNameQuery>,
) -> Result<Json<Survey>, ApiError> {
    state
        .store
        .rename_survey(&query.id, &query.name)?
        .map(Json)
        .ok_or_else(|| ApiError::survey_not_found(query.id))
}

/// GET /api/create?name=
pub async fn create(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateQuery>,
) -> Result<Json<Survey>, ApiError> {
    let survey = state.store.create_survey(query.name())?;
    tracing::info!(id = %survey.id, "survey created");
    Ok(Json(survey))
}

/// POST /api/changeJson
///
/// Stores the schema only. An existing survey keeps its name; a new one is
/// named after its id.
pub async fn change_json(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChangeJsonRequest>,
) -> Result<Json<Survey>, ApiError> {
    let schema = schema_from_value(body.json);
    Ok(Json(state.store.upsert_survey_schema(&body.id, None, &schema)?))
}

/// GET /api/delete?id=
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<DeletedResponse>, ApiError> {
    match state.store.delete_survey(&query.id)? {
        Some(survey) => {
            tracing::info!(id = %survey.id, "survey deleted");
            Ok(Json(DeletedResponse { id: query.id }))
        }
        None => Err(ApiError::survey_not_found(query.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorResponse;
    use crate::http::create_router;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use surveys_core::{DEFAULT_SURVEY_NAME, InMemorySurveyStore};

    fn seeded_server() -> TestServer {
        let state = Arc::new(AppState::in_memory().unwrap());
        TestServer::new(create_router(state)).unwrap()
    }

    fn empty_server() -> TestServer {
        let state = Arc::new(AppState::new(Arc::new(InMemorySurveyStore::new())));
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_get_active_lists_demo_surveys() {
        let server = seeded_server();

        let response = server.get("/api/getActive").await;
        response.assert_status_ok();

        let surveys: Vec<Survey> = response.json();
        assert!(!surveys.is_empty());
        assert_eq!(surveys[0].id, "1");
    }

    #[tokio::test]
    async fn test_get_survey_exists() {
        let server = seeded_server();

        let response = server
            .get("/api/getSurvey")
            .add_query_param("surveyId", "2")
            .await;
        response.assert_status_ok();

        let survey: Survey = response.json();
        assert_eq!(survey.id, "2");
    }

    #[tokio::test]
    async fn test_get_survey_not_found() {
        let server = seeded_server();

        let response = server
            .get("/api/getSurvey")
            .add_query_param("surveyId", "9999")
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.error, "survey not found: 9999");
    }

    #[tokio::test]
    async fn test_get_survey_requires_id() {
        let server = seeded_server();

        let response = server.get("/api/getSurvey").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_name() {
        let server = empty_server();

        let response = server
            .get("/api/create")
            .add_query_param("name", "Test Create")
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"id": "1", "name": "Test Create", "json": "{}"}));
    }

    #[tokio::test]
    async fn test_create_without_name() {
        let server = seeded_server();

        let survey: Survey = server.get("/api/create").await.json();

        assert_eq!(survey.id, "3");
        assert_eq!(survey.name, format!("{DEFAULT_SURVEY_NAME} 3"));
    }

    #[tokio::test]
    async fn test_change_name() {
        let server = empty_server();
        let created: Survey = server
            .get("/api/create")
            .add_query_param("name", "Alpha")
            .await
            .json();

        let response = server
            .get("/api/changeName")
            .add_query_param("id", &created.id)
            .add_query_param("name", "Beta")
            .await;
        response.assert_status_ok();

        let fetched: Survey = server
            .get("/api/getSurvey")
            .add_query_param("surveyId", &created.id)
            .await
            .json();
        assert_eq!(fetched, Survey::new(created.id, "Beta", "{}"));
    }

    #[tokio::test]
    async fn test_change_name_not_found() {
        let server = seeded_server();

        let response = server
            .get("/api/changeName")
            .add_query_param("id", "404")
            .add_query_param("name", "x")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_change_json_with_object_schema() {
        let server = seeded_server();

        let response = server
            .post("/api/changeJson")
            .json(&json!({"id": "1", "json": {"question": "Test?"}}))
            .await;
        response.assert_status_ok();

        let survey: Survey = response.json();
        assert_eq!(survey.name, "Product Feedback Survey");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&survey.schema).unwrap(),
            json!({"question": "Test?"})
        );
    }

    #[tokio::test]
    async fn test_change_json_creates_missing_survey() {
        let server = empty_server();

        let response = server
            .post("/api/changeJson")
            .json(&json!({"id": "77", "json": "{\"pages\":[]}"}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"id": "77", "name": "77", "json": "{\"pages\":[]}"}));
    }

    #[tokio::test]
    async fn test_delete_survey() {
        let server = seeded_server();
        let created: Survey = server.get("/api/create").await.json();

        let response = server
            .get("/api/delete")
            .add_query_param("id", &created.id)
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"id": &created.id}));

        server
            .get("/api/getSurvey")
            .add_query_param("surveyId", &created.id)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_survey() {
        let server = seeded_server();

        let response = server.get("/api/delete").add_query_param("id", "999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let surveys: Vec<Survey> = server.get("/api/getActive").await.json();
        assert_eq!(surveys.len(), 2);
    }

    #[tokio::test]
    async fn test_create_after_largest_id_is_500_and_store_stays_usable() {
        let server = empty_server();
        server
            .post("/api/changeJson")
            .json(&json!({"id": "18446744073709551615", "json": {}}))
            .await
            .assert_status_ok();

        let response = server.get("/api/create").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INTERNAL_ERROR");

        let surveys: Vec<Survey> = server.get("/api/getActive").await.json();
        assert_eq!(surveys.len(), 1);
    }
}
