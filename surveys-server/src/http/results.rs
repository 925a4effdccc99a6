//! Result submission endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Map, Value};
use surveys_core::ResultSet;

use super::params::{PostIdQuery, PostResultRequest};
use crate::{AppState, error::ApiError};

/// POST /api/post
///
/// Responds with an empty object once the submission is stored.
pub async fn post_result(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PostResultRequest>,
) -> Result<Json<Value>, ApiError> {
    state.store.append_result(&body.post_id, body.survey_result)?;
    tracing::debug!(post_id = %body.post_id, "result stored");
    Ok(Json(Value::Object(Map::new())))
}

/// GET /api/results?postId=
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostIdQuery>,
) -> Result<Json<ResultSet>, ApiError> {
    state
        .store
        .get_results(&query.post_id)?
        .map(Json)
        .ok_or_else(|| ApiError::results_not_found(query.post_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::create_router;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn create_test_server() -> TestServer {
        let state = Arc::new(AppState::in_memory().unwrap());
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_post_results_returns_empty_object() {
        let server = create_test_server();

        let response = server
            .post("/api/post")
            .json(&json!({"postId": "123", "surveyResult": {"answer": 42}}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({}));
    }

    #[tokio::test]
    async fn test_results_accumulate_in_order() {
        let server = create_test_server();

        for a in [1, 2] {
            server
                .post("/api/post")
                .json(&json!({"postId": "p1", "surveyResult": {"a": a}}))
                .await
                .assert_status_ok();
        }

        let response = server
            .get("/api/results")
            .add_query_param("postId", "p1")
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"id": "p1", "data": [{"a": 1}, {"a": 2}]}));
    }

    #[tokio::test]
    async fn test_demo_results_available() {
        let server = create_test_server();

        let results: ResultSet = server
            .get("/api/results")
            .add_query_param("postId", "1")
            .await
            .json();

        assert_eq!(results.id, "1");
        assert!(!results.data.is_empty());
    }

    #[tokio::test]
    async fn test_results_not_found() {
        let server = create_test_server();

        let response = server
            .get("/api/results")
            .add_query_param("postId", "non_existent")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_rejects_malformed_body() {
        let server = create_test_server();

        let response = server
            .post("/api/post")
            .text("{not json")
            .expect_failure()
            .await;

        assert!(response.status_code().is_client_error());
    }
}
