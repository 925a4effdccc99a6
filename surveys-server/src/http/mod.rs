//! HTTP server module

mod api;
mod params;
mod results;
mod static_files;
mod surveys;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{AppState, ServerConfig};

pub use api::HealthResponse;
pub use params::{ChangeJsonRequest, PostResultRequest};

/// Create the `/api` router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(api::health))
        .route("/getActive", get(surveys::get_active))
        .route("/getSurvey", get(surveys::get_survey))
        .route("/changeName", get(surveys::change_name))
        .route("/create", get(surveys::create))
        .route("/changeJson", post(surveys::change_json))
        .route("/delete", get(surveys::delete))
        .route("/post", post(results::post_result))
        .route("/results", get(results::get_results))
        .fallback(api::not_found);

    Router::new().nest("/api", api).with_state(state)
}

/// Create the full application: API, front end, and middleware
pub fn create_app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = create_router(state);

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(static_files::spa_service(dir));
    }

    if config.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    )
}
