use std::path::PathBuf;
use std::sync::Arc;

use common::types::UserProfile;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::error::ClientError;

const CREDENTIAL_FILE: &str = "credential";
const USER_FILE: &str = "user.json";

/// The current credential and the cached user projection it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub credential: String,
    pub user: UserProfile,
}

/// Holder of at most one session, persisted across restarts.
///
/// Two independently keyed values live under the store directory: the raw
/// credential string and the JSON user projection. They are written together
/// under the write lock, so no reader ever observes memory and disk
/// disagreeing. This store is the single writer of persisted session state;
/// everything else reads through it.
///
/// The cached user is display data only. Authorization always comes from the
/// credential's claims, verified server-side.
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
    dir: PathBuf,
}

fn storage(e: std::io::Error) -> ClientError {
    ClientError::Storage(e.to_string())
}

impl SessionStore {
    /// Open the store, hydrating once from disk.
    ///
    /// A persisted credential whose user projection is missing or
    /// unparseable is discarded outright: never an authenticated-but-
    /// user-less state.
    pub async fn open<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ClientError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(storage)?;
        let credential_path = dir.join(CREDENTIAL_FILE);
        let user_path = dir.join(USER_FILE);

        let session = match fs::read_to_string(&credential_path).await {
            Ok(credential) if !credential.trim().is_empty() => {
                let user = match fs::read(&user_path).await {
                    Ok(bytes) => serde_json::from_slice::<UserProfile>(&bytes).ok(),
                    Err(_) => None,
                };
                match user {
                    Some(user) => Some(Session { credential, user }),
                    None => {
                        warn!("persisted session unreadable; discarding");
                        let _ = fs::remove_file(&credential_path).await;
                        let _ = fs::remove_file(&user_path).await;
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(Arc::new(Self { inner: RwLock::new(session), dir }))
    }

    /// Replace credential and cached user together, in memory and on disk.
    pub async fn set_session(&self, credential: String, user: UserProfile) -> Result<(), ClientError> {
        let mut guard = self.inner.write().await;
        let bytes = serde_json::to_vec(&user).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(self.dir.join(CREDENTIAL_FILE), credential.as_bytes())
            .await
            .map_err(storage)?;
        fs::write(self.dir.join(USER_FILE), bytes).await.map_err(storage)?;
        *guard = Some(Session { credential, user });
        Ok(())
    }

    /// Remove both values, in memory and on disk.
    pub async fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self.inner.write().await;
        for name in [CREDENTIAL_FILE, USER_FILE] {
            match fs::remove_file(self.dir.join(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(storage(e)),
            }
        }
        *guard = None;
        Ok(())
    }

    pub async fn credential(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.credential.clone())
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.inner.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
