//! Authentication middleware

use crate::api::server::SharedState;
use crate::auth::models::UserPrincipal;
use crate::error::ErrorBody;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Bearer token from the Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Attach the caller's principal when the request carries a valid token.
/// Never rejects; protected routes are guarded by `require_auth`.
pub async fn authenticate(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers()).map(str::to_string);

    if let Some(token) = token {
        if state.jwt.validate_token(&token) {
            let loaded = match state.jwt.username_from_token(&token) {
                Ok(username) => state.user_details.load_user_by_username(&username).await,
                Err(e) => Err(e),
            };

            match loaded {
                Ok(principal) => {
                    tracing::debug!("Authenticated {}", principal.username);
                    req.extensions_mut().insert(principal);
                }
                Err(e) => tracing::error!("Cannot set user authentication: {}", e),
            }
        }
    }

    next.run(req).await
}

/// Reject requests that `authenticate` left anonymous
pub async fn require_auth(req: Request, next: Next) -> Response {
    if req.extensions().get::<UserPrincipal>().is_some() {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    tracing::debug!("Unauthorized request to {}", path);
    let body = ErrorBody::new(
        StatusCode::UNAUTHORIZED,
        "Full authentication is required to access this resource",
    )
    .with_path(path);

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
