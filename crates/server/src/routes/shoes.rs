use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use models::{NewShoe, Shoe, ShoePatch, ShoeQuery};
use service::auth::token::Claims;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::ShoeBody;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/shoes", tag = "shoes", responses((status = 200, description = "All shoes in creation order", body = [crate::openapi::ShoeDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Shoe>>, ApiError> {
    Ok(Json(state.shoes.list().await?))
}

#[utoipa::path(get, path = "/shoes/{id}", tag = "shoes", params(("id" = String, Path, description = "Shoe id")), responses((status = 200, body = crate::openapi::ShoeDoc), (status = 404, body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Shoe>, ApiError> {
    Ok(Json(state.shoes.get(&id).await?))
}

#[utoipa::path(post, path = "/shoes", tag = "shoes", request_body = crate::openapi::NewShoeDoc, responses((status = 201, body = crate::openapi::ShoeDoc), (status = 401, body = crate::openapi::ErrorDoc), (status = 400, body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    ShoeBody(input): ShoeBody<NewShoe>,
) -> Result<(StatusCode, Json<Shoe>), ApiError> {
    let shoe = state.shoes.create(input).await?;
    info!(shoe_id = %shoe.id, user_id = %claims.id, "shoe created by user");
    Ok((StatusCode::CREATED, Json(shoe)))
}

#[utoipa::path(put, path = "/shoes/{id}", tag = "shoes", params(("id" = String, Path, description = "Shoe id")), request_body = crate::openapi::ShoePatchDoc, responses((status = 200, body = crate::openapi::ShoeDoc), (status = 404, body = crate::openapi::ErrorDoc)))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ShoeBody(patch): ShoeBody<ShoePatch>,
) -> Result<Json<Shoe>, ApiError> {
    Ok(Json(state.shoes.update(&id, patch).await?))
}

#[utoipa::path(delete, path = "/shoes/{id}", tag = "shoes", params(("id" = String, Path, description = "Shoe id")), responses((status = 204, description = "Deleted"), (status = 404, body = crate::openapi::ErrorDoc)))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.shoes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/search-shoes",
    tag = "shoes",
    params(
        ("brand" = Option<String>, Query, description = "Case-insensitive substring"),
        ("model" = Option<String>, Query, description = "Case-insensitive substring"),
        ("size" = Option<String>, Query, description = "Loose equality"),
        ("color" = Option<String>, Query, description = "Case-insensitive substring"),
        ("price" = Option<String>, Query, description = "Loose equality"),
    ),
    responses((status = 200, body = [crate::openapi::ShoeDoc]), (status = 400, body = crate::openapi::ErrorDoc))
)]
pub async fn search(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<ShoeQuery>, ApiError>,
) -> Result<Json<Vec<Shoe>>, ApiError> {
    Ok(Json(state.shoes.search(&query).await?))
}
