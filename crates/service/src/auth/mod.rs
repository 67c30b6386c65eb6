//! Auth module: three-layer architecture (domain, repository, service)
//! plus the bearer-token codec.
//!
//! Centralizes registration, login, and all account mutations under the
//! service crate.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::{Principal, TokenCodec, VerifyError};
