use crate::db::connect;
use crate::{user, user_credentials};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn sample_user(email: String) -> user::NewUser {
    user::NewUser {
        name: "Maria Souza".into(),
        email,
        phone: Some("+55 11 99999-0001".into()),
        document: Some("529.982.247-25".into()),
        is_provider: true,
    }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("crud_{}@example.com", Uuid::new_v4());
    let created = user::create(&db, sample_user(email.clone())).await?;
    assert_eq!(created.email, email);
    assert!(created.is_provider);
    assert!(!created.provider_enabled);
    assert!(!created.email_verified);

    let found = user::find_by_email(&db, &email).await?.unwrap();
    assert_eq!(found.id, created.id);

    let updated = user::update_profile(
        &db,
        created.id,
        user::ProfileChanges {
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            location: Some("São Paulo - SP".into()),
            bio: Some("Eletricista com atendimento 24h".into()),
            experience_years: Some(8),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.city.as_deref(), Some("São Paulo"));
    assert_eq!(updated.location.as_deref(), Some("São Paulo - SP"));
    assert_eq!(updated.experience_years, Some(8));

    let enabled = user::enable_provider(&db, created.id).await?;
    assert!(enabled.provider_enabled);

    let with_token = user::set_verification_token(&db, created.id, Some("tok-123".into())).await?;
    assert_eq!(with_token.verification_token.as_deref(), Some("tok-123"));
    let by_token = user::find_by_verification_token(&db, "tok-123").await?.unwrap();
    assert_eq!(by_token.id, created.id);
    let verified = user::mark_email_verified(&db, created.id).await?;
    assert!(verified.email_verified);
    assert!(verified.verification_token.is_none());

    user::soft_delete(&db, created.id).await?;
    let after_soft = user::find_by_id(&db, created.id).await?.unwrap();
    assert!(after_soft.deleted_at.is_some());

    user::hard_delete(&db, created.id).await?;
    assert!(user::find_by_id(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert_and_cascade() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("cred_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, sample_user(email)).await?;

    let c1 = user_credentials::upsert_password(&db, u.id, "hash-one".into(), "argon2").await?;
    assert_eq!(c1.password_hash, "hash-one");

    // Second upsert updates in place
    let c2 = user_credentials::upsert_password(&db, u.id, "hash-two".into(), "argon2").await?;
    assert_eq!(c2.id, c1.id);
    assert_eq!(c2.password_hash, "hash-two");

    // Deleting the user cascades to credentials
    user::hard_delete(&db, u.id).await?;
    assert!(user_credentials::find_by_user(&db, u.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_bad_document() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let mut new = sample_user(format!("doc_{}@example.com", Uuid::new_v4()));
    new.document = Some("123.456.789-00".into());
    assert!(user::create(&db, new).await.is_err());
    Ok(())
}
