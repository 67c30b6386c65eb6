use async_trait::async_trait;
use common::types::UserProfile;
use uuid::Uuid;

use super::domain::{Credentials, NewUser, ProfileChanges};
use super::errors::AuthError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError>;
    async fn create_user(&self, new: NewUser) -> Result<UserProfile, AuthError>;
    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<UserProfile, AuthError>;
    async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<Credentials, AuthError>;

    async fn set_verification_token(&self, user_id: Uuid, token: Option<String>) -> Result<(), AuthError>;
    async fn find_user_by_verification_token(&self, token: &str) -> Result<Option<UserProfile>, AuthError>;
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<UserProfile, AuthError>;
    async fn enable_provider(&self, user_id: Uuid) -> Result<UserProfile, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, UserProfile>>,
        creds: Mutex<HashMap<Uuid, Credentials>>,
        verification_tokens: Mutex<HashMap<Uuid, String>>,
    }

    impl MockAuthRepository {
        /// Test hook: the verification token currently stored for a user.
        pub fn get_verification_token(&self, id: Uuid) -> Option<String> {
            self.verification_tokens.lock().unwrap().get(&id).cloned()
        }

        fn touch(&self, id: Uuid, f: impl FnOnce(&mut UserProfile)) -> Result<UserProfile, AuthError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&id).ok_or(AuthError::NotFound)?;
            f(user);
            Ok(user.clone())
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).cloned())
        }

        async fn create_user(&self, new: NewUser) -> Result<UserProfile, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == new.email) {
                return Err(AuthError::Conflict);
            }
            let user = UserProfile {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                phone: new.phone,
                document: new.document,
                is_provider: new.is_provider,
                provider_enabled: false,
                is_admin: false,
                email_verified: false,
                city: None,
                state: None,
                location: None,
                bio: None,
                experience_years: None,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<UserProfile, AuthError> {
            self.touch(id, |user| {
                if let Some(name) = changes.name {
                    user.name = name;
                }
                if let Some(phone) = changes.phone {
                    user.phone = Some(phone);
                }
                if let Some(city) = changes.city {
                    user.city = Some(city);
                }
                if let Some(state) = changes.state {
                    user.state = Some(state);
                }
                if let Some(location) = changes.location {
                    user.location = Some(location);
                }
                if let Some(bio) = changes.bio {
                    user.bio = Some(bio);
                }
                if let Some(years) = changes.experience_years {
                    user.experience_years = Some(years);
                }
            })
        }

        async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().cloned().collect())
        }

        async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
            let mut users = self.users.lock().unwrap();
            users.remove(&id).ok_or(AuthError::NotFound)?;
            self.creds.lock().unwrap().remove(&id);
            self.verification_tokens.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(
            &self,
            user_id: Uuid,
            password_hash: String,
            password_algorithm: String,
        ) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }

        async fn set_verification_token(&self, user_id: Uuid, token: Option<String>) -> Result<(), AuthError> {
            if !self.users.lock().unwrap().contains_key(&user_id) {
                return Err(AuthError::NotFound);
            }
            let mut tokens = self.verification_tokens.lock().unwrap();
            match token {
                Some(t) => {
                    tokens.insert(user_id, t);
                }
                None => {
                    tokens.remove(&user_id);
                }
            }
            Ok(())
        }

        async fn find_user_by_verification_token(&self, token: &str) -> Result<Option<UserProfile>, AuthError> {
            let id = {
                let tokens = self.verification_tokens.lock().unwrap();
                tokens.iter().find(|(_, t)| t.as_str() == token).map(|(id, _)| *id)
            };
            match id {
                Some(id) => self.find_user_by_id(id).await,
                None => Ok(None),
            }
        }

        async fn mark_email_verified(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
            self.verification_tokens.lock().unwrap().remove(&user_id);
            self.touch(user_id, |user| user.email_verified = true)
        }

        async fn enable_provider(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
            self.touch(user_id, |user| user.provider_enabled = true)
        }
    }
}
