use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
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

use crate::middleware as mw;
use crate::{account, admin, auth, openapi};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public, account, and admin routes.
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", post(auth::verify_email));

    // Account routes require a verified bearer token
    let account = Router::new()
        .route("/account/me", get(account::me))
        .route("/account/profile", put(account::update_profile))
        .route("/account/password", put(account::change_password))
        .route("/account", delete(account::delete_account))
        .route("/account/verification/resend", post(account::resend_verification))
        .route_layer(from_fn_with_state(state.tokens.clone(), mw::require_session));

    // Admin routes: the session gate must run before the role gate, so it is
    // added last (outermost layer runs first).
    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/providers/:id/enable", put(admin::enable_provider))
        .route_layer(from_fn(mw::require_admin))
        .route_layer(from_fn_with_state(state.tokens.clone(), mw::require_session));

    public
        .merge(account)
        .merge(admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
