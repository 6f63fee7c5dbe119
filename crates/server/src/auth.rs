use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

/// Route-layer middleware for mutating shoe routes: verifies
/// `Authorization: Bearer <token>` (prefix optional) and attaches the claims
/// to the request. Missing header is 401, bad or expired token is 400.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    match state.auth.verify_bearer(header) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %req.uri().path(), method = %req.method(), code = e.code(), err = %e, "token check failed");
            Err(e.into())
        }
    }
}
