//! Service layer providing the marketplace's account business logic on top
//! of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod auth;
pub mod mailer;
#[cfg(test)]
pub mod test_support;
