use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use common::types::UserProfile;

use crate::auth::ServerState;
use crate::errors::ApiError;

#[utoipa::path(get, path = "/admin/users", tag = "admin", responses((status = 200, description = "OK"), (status = 403, description = "Forbidden")))]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users = state.auth_service().list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(put, path = "/admin/providers/{id}/enable", tag = "admin", params(("id" = Uuid, Path, description = "Provider user id")), responses((status = 200, description = "Enabled"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn enable_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.auth_service().enable_provider(id).await?;
    Ok(Json(user))
}
