use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use common::types::{
    AuthPayload, ChangePasswordRequest, DeleteAccountRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest, UserProfile,
};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{NewUser, ProfileChanges};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenCodec;
use crate::mailer::Mailer;

const MIN_PASSWORD_LEN: usize = 8;
const VERIFICATION_TOKEN_LEN: usize = 32;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub password_algorithm: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { password_algorithm: "argon2".into() }
    }
}

/// Account business service independent of the web framework.
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: Arc<TokenCodec>,
    mailer: Arc<dyn Mailer>,
    cfg: AuthConfig,
}

/// Role claims are derived from the row, never from the cached projection a
/// client may hold.
fn effective_provider(user: &UserProfile) -> bool {
    user.is_provider && user.provider_enabled
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenCodec>, mailer: Arc<dyn Mailer>, cfg: AuthConfig) -> Self {
        Self { repo, tokens, mailer, cfg }
    }

    fn issue_for(&self, user: &UserProfile) -> Result<String, AuthError> {
        self.tokens.issue(user.id, effective_provider(user), user.is_admin)
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }

    fn check_password(&self, hash: &str, password: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    fn new_verification_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(VERIFICATION_TOKEN_LEN)
            .map(char::from)
            .collect()
    }

    /// Register a new user with a hashed password and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::types::RegisterRequest;
    /// use service::auth::repository::mock::MockAuthRepository;
    /// use service::auth::service::{AuthConfig, AuthService};
    /// use service::auth::TokenCodec;
    /// use service::mailer::LogMailer;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let tokens = Arc::new(TokenCodec::new("secret", chrono::Duration::hours(12)));
    /// let svc = AuthService::new(repo, tokens, Arc::new(LogMailer), AuthConfig::default());
    /// let input = RegisterRequest {
    ///     name: "Maria".into(),
    ///     email: "maria@example.com".into(),
    ///     password: "Secret123".into(),
    ///     phone: None,
    ///     document: None,
    ///     is_provider: false,
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "maria@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> Result<AuthPayload, AuthError> {
        models::user::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        models::user::validate_name(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(doc) = &input.document {
            models::user::validate_document(doc).map_err(|e| AuthError::Validation(e.to_string()))?;
        }
        if self.repo.find_user_by_email(&input.email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let user = self
            .repo
            .create_user(NewUser {
                name: input.name,
                email: input.email,
                phone: input.phone,
                document: input.document,
                is_provider: input.is_provider,
            })
            .await?;
        let hash = self.hash_password(&input.password)?;
        let _cred = self
            .repo
            .upsert_password(user.id, hash, self.cfg.password_algorithm.clone())
            .await?;

        // Verification mail is best effort; registration already happened.
        let verification = Self::new_verification_token();
        self.repo.set_verification_token(user.id, Some(verification.clone())).await?;
        if let Err(e) = self.mailer.send_verification(&user.email, &verification).await {
            warn!(user_id = %user.id, error = %e, "verification mail failed at registration");
        }

        let token = self.issue_for(&user)?;
        info!(user_id = %user.id, email = %user.email, provider = user.is_provider, "user_registered");
        Ok(AuthPayload { token, user })
    }

    /// Authenticate a user and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::types::{LoginRequest, RegisterRequest};
    /// use service::auth::repository::mock::MockAuthRepository;
    /// use service::auth::service::{AuthConfig, AuthService};
    /// use service::auth::TokenCodec;
    /// use service::mailer::LogMailer;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let tokens = Arc::new(TokenCodec::new("secret", chrono::Duration::hours(12)));
    /// let svc = AuthService::new(repo, tokens, Arc::new(LogMailer), AuthConfig::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterRequest {
    ///     name: "N".into(),
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    ///     phone: None,
    ///     document: None,
    ///     is_provider: false,
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginRequest {
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    /// }))
    /// .unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> Result<AuthPayload, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !self.check_password(&cred.password_hash, &input.password)? {
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_for(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthPayload { token, user })
    }

    /// Fresh projection of the authenticated user.
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)
    }

    /// Apply a partial profile update and return the fresh projection.
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        input: UpdateProfileRequest,
    ) -> Result<UserProfile, AuthError> {
        if let Some(name) = &input.name {
            models::user::validate_name(name).map_err(|e| AuthError::Validation(e.to_string()))?;
        }
        let updated = self
            .repo
            .update_profile(
                user_id,
                ProfileChanges {
                    name: input.name,
                    phone: input.phone,
                    city: input.city,
                    state: input.state,
                    location: input.location,
                    bio: input.bio,
                    experience_years: input.experience_years,
                },
            )
            .await?;
        info!(user_id = %updated.id, "profile_updated");
        Ok(updated)
    }

    /// Replace the password; the current one must match.
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn change_password(
        &self,
        user_id: Uuid,
        input: ChangePasswordRequest,
    ) -> Result<(), AuthError> {
        let cred = self
            .repo
            .get_credentials(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;
        if !self.check_password(&cred.password_hash, &input.current_password)? {
            return Err(AuthError::WrongPassword);
        }
        if input.new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let hash = self.hash_password(&input.new_password)?;
        self.repo
            .upsert_password(user_id, hash, self.cfg.password_algorithm.clone())
            .await?;
        info!(user_id = %user_id, "password_changed");
        Ok(())
    }

    /// Remove the account; the password must match. Credentials go with it.
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn delete_account(
        &self,
        user_id: Uuid,
        input: DeleteAccountRequest,
    ) -> Result<(), AuthError> {
        let cred = self
            .repo
            .get_credentials(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;
        if !self.check_password(&cred.password_hash, &input.password)? {
            return Err(AuthError::WrongPassword);
        }
        self.repo.delete_user(user_id).await?;
        info!(user_id = %user_id, "account_deleted");
        Ok(())
    }

    /// Rotate the verification token and send it again.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn resend_verification(&self, user_id: Uuid) -> Result<(), AuthError> {
        let user = self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)?;
        if user.email_verified {
            return Err(AuthError::AlreadyVerified);
        }
        let verification = Self::new_verification_token();
        self.repo.set_verification_token(user.id, Some(verification.clone())).await?;
        self.mailer
            .send_verification(&user.email, &verification)
            .await
            .map_err(|e| AuthError::Mail(e.to_string()))?;
        info!(user_id = %user.id, "verification_mail_resent");
        Ok(())
    }

    /// Confirm an emailed verification token.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<UserProfile, AuthError> {
        let user = self
            .repo
            .find_user_by_verification_token(token)
            .await?
            .ok_or_else(|| AuthError::Validation("invalid verification token".into()))?;
        let verified = self.repo.mark_email_verified(user.id).await?;
        info!(user_id = %verified.id, "email_verified");
        Ok(verified)
    }

    /// Admin: approve a registered provider for hire.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn enable_provider(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        let user = self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)?;
        if !user.is_provider {
            return Err(AuthError::Validation("user is not a provider".into()));
        }
        let updated = self.repo.enable_provider(user.id).await?;
        info!(user_id = %updated.id, "provider_enabled");
        Ok(updated)
    }

    /// Admin: every registered user.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
        self.repo.list_users().await
    }
}
