use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use uuid::Uuid;

use client::{ApiClient, ClientError, SessionStore};
use common::types::RegisterRequest;
use server::auth::ServerState;
use server::routes;
use service::auth::TokenCodec;
use service::mailer::LogMailer;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

/// Spin up the real server on an ephemeral port; skip gracefully when the
/// database is unreachable.
async fn start_server() -> anyhow::Result<String> {
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }

    let state = ServerState {
        db,
        tokens: Arc::new(TokenCodec::new("e2e-secret", Duration::hours(1))),
        mailer: Arc::new(LogMailer),
    };
    let app: Router = routes::build_router(state, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(base_url)
}

fn register_input(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Marcos Lima".into(),
        email: email.into(),
        password: "S3curePass!".into(),
        phone: Some("+55 21 97777-0000".into()),
        document: Some("529.982.247-25".into()),
        is_provider: true,
    }
}

#[tokio::test]
async fn full_session_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let base_url = match start_server().await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("skip e2e: {}", e);
            return Ok(());
        }
    };

    let dir = tempfile::tempdir()?;
    let store = SessionStore::open(dir.path()).await?;
    let api = ApiClient::new(&base_url, Arc::clone(&store));
    assert!(!store.is_authenticated().await);

    // Register opens a session
    let email = format!("e2e_{}@example.com", Uuid::new_v4());
    let user = api.register(&register_input(&email)).await?;
    assert!(store.is_authenticated().await);
    assert_eq!(store.current_user().await.unwrap().email, email);

    // Logout drops it; the next call goes out without a bearer header
    api.logout().await?;
    assert!(!store.is_authenticated().await);
    match api.me().await {
        Err(ClientError::Operation(op)) => assert_eq!(op.status, 401),
        other => panic!("expected 401 operation failure, got {:?}", other),
    }

    // Login restores a session
    api.login(&email, "S3curePass!").await?;
    assert!(store.is_authenticated().await);
    let credential_after_login = store.credential().await.unwrap();

    // Profile update replaces the cached user wholesale, credential unchanged
    let mut edit = ApiClient::edit_location(
        &store.current_user().await.unwrap(),
        client::LocationField::City,
        "Niterói",
    );
    edit.state = Some("RJ".into());
    edit.location = Some("Niterói - RJ".into());
    edit.bio = Some("Pintor profissional".into());
    let updated = api.update_profile(&edit).await?;
    assert_eq!(updated.city.as_deref(), Some("Niterói"));
    let cached = store.current_user().await.unwrap();
    assert_eq!(cached, updated);
    assert_eq!(store.credential().await.unwrap(), credential_after_login);

    // Wrong-password deletion surfaces the structured message, session intact
    match api.delete_account("not-the-password").await {
        Err(ClientError::Operation(op)) => {
            assert_eq!(op.status, 400);
            assert_eq!(op.display_message(), "current password does not match");
        }
        other => panic!("expected 400 operation failure, got {:?}", other),
    }
    assert!(store.is_authenticated().await);

    // A parallel client over the same directory hydrates the same session
    let rehydrated = SessionStore::open(dir.path()).await?;
    assert_eq!(rehydrated.credential().await, store.credential().await);
    assert_eq!(rehydrated.current_user().await.unwrap().email, user.email);

    // Real deletion clears the session
    api.delete_account("S3curePass!").await?;
    assert!(!store.is_authenticated().await);
    assert!(store.credential().await.is_none());
    Ok(())
}

#[tokio::test]
async fn resend_verification_travels_the_pipeline() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let base_url = match start_server().await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("skip e2e: {}", e);
            return Ok(());
        }
    };

    let dir = tempfile::tempdir()?;
    let store = SessionStore::open(dir.path()).await?;
    let api = ApiClient::new(&base_url, Arc::clone(&store));

    let email = format!("e2e_mail_{}@example.com", Uuid::new_v4());
    api.register(&register_input(&email)).await?;

    // First resend succeeds; unauthenticated resend is refused up front
    api.resend_verification().await?;
    api.logout().await?;
    match api.resend_verification().await {
        Err(ClientError::Operation(op)) => assert_eq!(op.status, 401),
        other => panic!("expected 401 operation failure, got {:?}", other),
    }
    Ok(())
}
