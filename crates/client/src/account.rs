use common::location::{reconcile, LocationField, LocationFields};
use common::types::{
    AuthPayload, ChangePasswordRequest, DeleteAccountRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest, UserProfile,
};
use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;
use crate::pipeline::ApiClient;

/// Account operations. Each mutation rides the pipeline, so every failure
/// arrives as an [`crate::OperationFailure`] callers can unwrap down to a
/// user-facing message.
impl ApiClient {
    /// Register and open a session from the returned payload.
    pub async fn register(&self, input: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let payload: AuthPayload = self.call_json(Method::POST, "/auth/register", Some(input)).await?;
        self.session().set_session(payload.token, payload.user.clone()).await?;
        Ok(payload.user)
    }

    /// Log in and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let input = LoginRequest { email: email.into(), password: password.into() };
        let payload: AuthPayload = self.call_json(Method::POST, "/auth/login", Some(&input)).await?;
        self.session().set_session(payload.token, payload.user.clone()).await?;
        Ok(payload.user)
    }

    /// Bearer credentials are stateless; logging out is dropping the session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session().clear().await
    }

    /// Fresh projection of the authenticated user.
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.call_json(Method::GET, "/account/me", None::<&Value>).await
    }

    /// Update the profile; on success the cached user is replaced wholesale,
    /// credential untouched.
    pub async fn update_profile(&self, input: &UpdateProfileRequest) -> Result<UserProfile, ClientError> {
        let user: UserProfile = self.call_json(Method::PUT, "/account/profile", Some(input)).await?;
        if let Some(credential) = self.session().credential().await {
            self.session().set_session(credential, user.clone()).await?;
        }
        Ok(user)
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<(), ClientError> {
        let input = ChangePasswordRequest {
            current_password: current_password.into(),
            new_password: new_password.into(),
        };
        self.call(Method::PUT, "/account/password", Some(&input)).await?;
        Ok(())
    }

    /// Delete the account; the session goes with it.
    pub async fn delete_account(&self, password: &str) -> Result<(), ClientError> {
        let input = DeleteAccountRequest { password: password.into() };
        self.call(Method::DELETE, "/account", Some(&input)).await?;
        self.session().clear().await
    }

    pub async fn resend_verification(&self) -> Result<(), ClientError> {
        self.call(Method::POST, "/account/verification/resend", None::<&Value>).await?;
        Ok(())
    }

    /// Build the profile update for one edit of a location field.
    ///
    /// Provider accounts get the reconcile rule (derived display string,
    /// back-propagation); everyone else just gets the edited field.
    pub fn edit_location(user: &UserProfile, field: LocationField, value: &str) -> UpdateProfileRequest {
        if !user.is_provider {
            let mut request = UpdateProfileRequest::default();
            match field {
                LocationField::City => request.city = Some(value.to_string()),
                LocationField::State => request.state = Some(value.to_string()),
                LocationField::Location => request.location = Some(value.to_string()),
            }
            return request;
        }
        let current = LocationFields {
            city: user.city.clone().unwrap_or_default(),
            state: user.state.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
        };
        let next = reconcile(&current, field, value);
        UpdateProfileRequest {
            city: Some(next.city),
            state: Some(next.state),
            location: Some(next.location),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn provider() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: "Paulo".into(),
            email: "paulo@example.com".into(),
            phone: None,
            document: None,
            is_provider: true,
            provider_enabled: true,
            is_admin: false,
            email_verified: true,
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            location: None,
            bio: None,
            experience_years: None,
        }
    }

    #[test]
    fn provider_edit_derives_display_location() {
        let request = ApiClient::edit_location(&provider(), LocationField::State, "RJ");
        assert_eq!(request.city.as_deref(), Some("São Paulo"));
        assert_eq!(request.state.as_deref(), Some("RJ"));
        assert_eq!(request.location.as_deref(), Some("São Paulo - RJ"));
    }

    #[test]
    fn provider_location_edit_back_propagates() {
        let request =
            ApiClient::edit_location(&provider(), LocationField::Location, "Rio de Janeiro - RJ");
        assert_eq!(request.city.as_deref(), Some("Rio de Janeiro"));
        assert_eq!(request.state.as_deref(), Some("RJ"));
        assert_eq!(request.location.as_deref(), Some("Rio de Janeiro - RJ"));
    }

    #[test]
    fn non_provider_edit_touches_only_the_edited_field() {
        let mut user = provider();
        user.is_provider = false;
        let request = ApiClient::edit_location(&user, LocationField::State, "RJ");
        assert!(request.city.is_none());
        assert_eq!(request.state.as_deref(), Some("RJ"));
        assert!(request.location.is_none());
    }
}
