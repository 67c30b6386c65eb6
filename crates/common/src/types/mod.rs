use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Error body every failing endpoint returns.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub message: String,
}

/// Denormalized user projection returned by the server and cached by the
/// client. Display data only: authorization always comes from the token's
/// claims, never from this struct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub is_provider: bool,
    pub provider_enabled: bool,
    pub is_admin: bool,
    pub email_verified: bool,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
}

/// Successful login/register response: the bearer token plus the user it
/// belongs to.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub is_provider: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub experience_years: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteAccountRequest {
    pub password: String,
}
