use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequestDoc {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub is_provider: bool,
}

#[derive(utoipa::ToSchema)]
pub struct LoginRequestDoc { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct VerifyEmailRequestDoc { pub token: String }

#[derive(utoipa::ToSchema)]
pub struct UpdateProfileRequestDoc {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct ChangePasswordRequestDoc { pub current_password: String, pub new_password: String }

#[derive(utoipa::ToSchema)]
pub struct DeleteAccountRequestDoc { pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::auth::register,
        crate::auth::login,
        crate::auth::verify_email,
        crate::account::me,
        crate::account::update_profile,
        crate::account::change_password,
        crate::account::delete_account,
        crate::account::resend_verification,
        crate::admin::list_users,
        crate::admin::enable_provider,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequestDoc,
            LoginRequestDoc,
            VerifyEmailRequestDoc,
            UpdateProfileRequestDoc,
            ChangePasswordRequestDoc,
            DeleteAccountRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "account"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
