use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::auth::require_bearer_token;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod shoes;

use auth::ServerState;

pub const WELCOME: &str = "Welcome to \"The Shoes Shop\" API.";

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome string", body = String)))]
pub async fn welcome() -> Json<&'static str> {
    Json(WELCOME)
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public reads, auth endpoints and the
/// token-gated shoe mutations.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes: welcome, health, auth and catalog reads
    let public = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/shoes", get(shoes::list))
        .route("/shoes/:id", get(shoes::get))
        .route("/search-shoes", get(shoes::search));

    // Token-gated mutations; route_layer so unmatched paths still 404 instead of 401
    let protected = Router::new()
        .route("/shoes", post(shoes::create))
        .route("/shoes/:id", put(shoes::update).delete(shoes::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer_token));

    // Compose, with API docs under /docs
    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path; headers stay out (Authorization)
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // request arrival
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response with status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
