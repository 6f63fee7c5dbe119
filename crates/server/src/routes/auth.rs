use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use common::types::MessageBody;
use serde::{Deserialize, Serialize};
use service::auth::{
    domain::{LoginInput, RegisterInput},
    repo::file::FileUserRepository,
    service::{AuthConfig, AuthService},
};
use service::shoes::ShoeService;
use service::storage::json_document_store::JsonDocumentStore;

use crate::errors::ApiError;

/// Application context handed to every handler: the auth service (which owns
/// the signing secret) and the catalog, both over the same store.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<FileUserRepository>>,
    pub shoes: Arc<ShoeService>,
}

impl ServerState {
    pub fn new(store: Arc<JsonDocumentStore>, auth: AuthConfig) -> Self {
        let repo = Arc::new(FileUserRepository { store: Arc::clone(&store) });
        Self {
            auth: Arc::new(AuthService::new(repo, auth)),
            shoes: Arc::new(ShoeService::new(store)),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct LoginOutput {
    pub token: String,
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 201, description = "Registered", body = crate::openapi::MessageDoc), (status = 400, description = "User already exists", body = crate::openapi::ErrorDoc)))]
pub async fn register(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<RegisterInput>, ApiError>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(MessageBody { message: "User registered successfully".into() })))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 200, description = "Logged in", body = crate::openapi::TokenDoc), (status = 401, description = "Invalid username or password", body = crate::openapi::ErrorDoc)))]
pub async fn login(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<LoginInput>, ApiError>,
) -> Result<Json<LoginOutput>, ApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { token: session.token }))
}
