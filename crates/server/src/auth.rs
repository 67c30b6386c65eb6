use std::sync::Arc;

use axum::{extract::State, Json};
use sea_orm::DatabaseConnection;

use common::types::{AuthPayload, LoginRequest, RegisterRequest, UserProfile, VerifyEmailRequest};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::auth::TokenCodec;
use service::mailer::Mailer;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenCodec>,
    pub mailer: Arc<dyn Mailer>,
}

impl ServerState {
    pub(crate) fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(repo, Arc::clone(&self.tokens), Arc::clone(&self.mailer), AuthConfig::default())
    }
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequestDoc, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<AuthPayload>, ApiError> {
    let session = state.auth_service().register(input).await?;
    Ok(Json(session))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthPayload>, ApiError> {
    let session = state.auth_service().login(input).await?;
    Ok(Json(session))
}

#[utoipa::path(post, path = "/auth/verify", tag = "auth", request_body = crate::openapi::VerifyEmailRequestDoc, responses((status = 200, description = "Verified"), (status = 400, description = "Bad Request")))]
pub async fn verify_email(
    State(state): State<ServerState>,
    Json(input): Json<VerifyEmailRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.auth_service().verify_email(&input.token).await?;
    Ok(Json(user))
}
