use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub is_provider: bool,
    pub provider_enabled: bool,
    pub is_admin: bool,
    pub email_verified: bool,
    pub verification_token: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(crate::user_credentials::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields required to create a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub is_provider: bool,
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// CPF check: 11 digits, not all identical, both check digits valid.
/// Accepts punctuation (`529.982.247-25`); only digits are considered.
pub fn validate_document(document: &str) -> Result<(), errors::ModelError> {
    let digits: Vec<u32> = document
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != 11 {
        return Err(errors::ModelError::Validation("invalid CPF".into()));
    }
    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err(errors::ModelError::Validation("invalid CPF".into()));
    }
    let check_digit = |n: usize| -> u32 {
        let sum: u32 = digits[..n]
            .iter()
            .zip((2..=(n as u32 + 1)).rev())
            .map(|(d, w)| d * w)
            .sum();
        match (sum * 10) % 11 {
            10 => 0,
            r => r,
        }
    };
    if check_digit(9) != digits[9] || check_digit(10) != digits[10] {
        return Err(errors::ModelError::Validation("invalid CPF".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewUser) -> Result<Model, errors::ModelError> {
    validate_email(&new.email)?;
    validate_name(&new.name)?;
    if let Some(doc) = &new.document {
        validate_document(doc)?;
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new.email),
        name: Set(new.name),
        phone: Set(new.phone),
        document: Set(new.document),
        is_provider: Set(new.is_provider),
        provider_enabled: Set(false),
        is_admin: Set(false),
        email_verified: Set(false),
        verification_token: Set(None),
        city: Set(None),
        state: Set(None),
        location: Set(None),
        bio: Set(None),
        experience_years: Set(None),
        status: Set("active".into()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_verification_token(
    db: &DatabaseConnection,
    token: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::VerificationToken.eq(token))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

async fn active_by_id(db: &DatabaseConnection, id: Uuid) -> Result<ActiveModel, errors::ModelError> {
    Ok(Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("user not found".into()))?
        .into())
}

pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    changes: ProfileChanges,
) -> Result<Model, errors::ModelError> {
    if let Some(name) = &changes.name {
        validate_name(name)?;
    }
    let mut am = active_by_id(db, id).await?;
    if let Some(name) = changes.name {
        am.name = Set(name);
    }
    if let Some(phone) = changes.phone {
        am.phone = Set(Some(phone));
    }
    if let Some(city) = changes.city {
        am.city = Set(Some(city));
    }
    if let Some(state) = changes.state {
        am.state = Set(Some(state));
    }
    if let Some(location) = changes.location {
        am.location = Set(Some(location));
    }
    if let Some(bio) = changes.bio {
        am.bio = Set(Some(bio));
    }
    if let Some(years) = changes.experience_years {
        am.experience_years = Set(Some(years));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn set_verification_token(
    db: &DatabaseConnection,
    id: Uuid,
    token: Option<String>,
) -> Result<Model, errors::ModelError> {
    let mut am = active_by_id(db, id).await?;
    am.verification_token = Set(token);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn mark_email_verified(db: &DatabaseConnection, id: Uuid) -> Result<Model, errors::ModelError> {
    let mut am = active_by_id(db, id).await?;
    am.email_verified = Set(true);
    am.verification_token = Set(None);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Used by seed tooling; there is no HTTP surface for promoting admins.
pub async fn set_admin(db: &DatabaseConnection, id: Uuid, is_admin: bool) -> Result<Model, errors::ModelError> {
    let mut am = active_by_id(db, id).await?;
    am.is_admin = Set(is_admin);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn enable_provider(db: &DatabaseConnection, id: Uuid) -> Result<Model, errors::ModelError> {
    let mut am = active_by_id(db, id).await?;
    am.provider_enabled = Set(true);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    let mut am = active_by_id(db, id).await?;
    am.deleted_at = Set(Some(Utc::now().into()));
    am.status = Set("deleted".into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
