use common::types::UserProfile;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{Credentials, NewUser, ProfileChanges};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn project(u: models::user::Model) -> UserProfile {
    UserProfile {
        id: u.id,
        name: u.name,
        email: u.email,
        phone: u.phone,
        document: u.document,
        is_provider: u.is_provider,
        provider_enabled: u.provider_enabled,
        is_admin: u.is_admin,
        email_verified: u.email_verified,
        city: u.city,
        state: u.state,
        location: u.location,
        bio: u.bio,
        experience_years: u.experience_years,
    }
}

fn map_err(e: models::errors::ModelError) -> AuthError {
    match e {
        models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
        models::errors::ModelError::Db(msg) => AuthError::Repository(msg),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await.map_err(map_err)?;
        Ok(res.map(project))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError> {
        let res = models::user::find_by_id(&self.db, id).await.map_err(map_err)?;
        Ok(res.map(project))
    }

    async fn create_user(&self, new: NewUser) -> Result<UserProfile, AuthError> {
        let created = models::user::create(
            &self.db,
            models::user::NewUser {
                name: new.name,
                email: new.email,
                phone: new.phone,
                document: new.document,
                is_provider: new.is_provider,
            },
        )
        .await
        .map_err(map_err)?;
        Ok(project(created))
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<UserProfile, AuthError> {
        let updated = models::user::update_profile(
            &self.db,
            id,
            models::user::ProfileChanges {
                name: changes.name,
                phone: changes.phone,
                city: changes.city,
                state: changes.state,
                location: changes.location,
                bio: changes.bio,
                experience_years: changes.experience_years,
            },
        )
        .await
        .map_err(map_err)?;
        Ok(project(updated))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
        let users = models::user::list(&self.db).await.map_err(map_err)?;
        Ok(users.into_iter().map(project).collect())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
        models::user::hard_delete(&self.db, id).await.map_err(map_err)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id)
            .await
            .map_err(map_err)?;
        Ok(res.map(|c| Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm)
            .await
            .map_err(map_err)?;
        Ok(Credentials {
            user_id: c.user_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        })
    }

    async fn set_verification_token(&self, user_id: Uuid, token: Option<String>) -> Result<(), AuthError> {
        models::user::set_verification_token(&self.db, user_id, token)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn find_user_by_verification_token(&self, token: &str) -> Result<Option<UserProfile>, AuthError> {
        let res = models::user::find_by_verification_token(&self.db, token)
            .await
            .map_err(map_err)?;
        Ok(res.map(project))
    }

    async fn mark_email_verified(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        let updated = models::user::mark_email_verified(&self.db, user_id)
            .await
            .map_err(map_err)?;
        Ok(project(updated))
    }

    async fn enable_provider(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        let updated = models::user::enable_provider(&self.db, user_id)
            .await
            .map_err(map_err)?;
        Ok(project(updated))
    }
}
