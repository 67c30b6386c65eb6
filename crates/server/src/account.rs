use axum::{extract::State, http::StatusCode, Extension, Json};

use common::types::{ChangePasswordRequest, DeleteAccountRequest, UpdateProfileRequest, UserProfile};
use service::auth::Principal;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[utoipa::path(get, path = "/account/me", tag = "account", responses((status = 200, description = "OK"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.auth_service().current_user(principal.user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(put, path = "/account/profile", tag = "account", request_body = crate::openapi::UpdateProfileRequestDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request")))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.auth_service().update_profile(principal.user_id, input).await?;
    Ok(Json(user))
}

#[utoipa::path(put, path = "/account/password", tag = "account", request_body = crate::openapi::ChangePasswordRequestDoc, responses((status = 204, description = "Changed"), (status = 400, description = "Bad Request")))]
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    state.auth_service().change_password(principal.user_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/account", tag = "account", request_body = crate::openapi::DeleteAccountRequestDoc, responses((status = 204, description = "Deleted"), (status = 400, description = "Bad Request")))]
pub async fn delete_account(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<DeleteAccountRequest>,
) -> Result<StatusCode, ApiError> {
    state.auth_service().delete_account(principal.user_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/account/verification/resend", tag = "account", responses((status = 202, description = "Accepted"), (status = 400, description = "Bad Request")))]
pub async fn resend_verification(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, ApiError> {
    state.auth_service().resend_verification(principal.user_id).await?;
    Ok(StatusCode::ACCEPTED)
}
