use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use service::auth::{Principal, TokenCodec};
use tracing::warn;

use crate::errors::ApiError;

/// Gate for authenticated routes.
///
/// Extracts `Authorization: Bearer <token>`; a missing or ill-formed header
/// fails with 401 before any handler runs. A present token is verified, and
/// any failure yields 403 — malformed, expired, and subject-less tokens are
/// logged apart but answered alike, so the response leaks nothing about the
/// verification internals. On success the `Principal` rides the request
/// extensions for the rest of this request only.
pub async fn require_session(
    State(tokens): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match bearer {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => return Err(ApiError::unauthorized("missing credentials")),
    };

    match tokens.verify(&token) {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %req.uri().path(), reason = %e, "token verification failed");
            Err(ApiError::forbidden("invalid credentials"))
        }
    }
}

/// Role gate for admin routes. Runs after `require_session` (the router
/// guarantees the order) and only inspects the Principal it left behind; it
/// never verifies tokens itself. No Principal means the ordering contract
/// was broken, which is also a refusal.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<Principal>() {
        Some(p) if p.is_admin => Ok(next.run(req).await),
        _ => Err(ApiError::forbidden("admin access required")),
    }
}
