//! Client SDK for the marketplace API: the persisted session store, the
//! authenticated operation pipeline, and the account operations built on
//! both.

pub mod account;
pub mod error;
pub mod pipeline;
pub mod session;

pub use common::location::{reconcile, LocationField, LocationFields};
pub use error::{ClientError, OperationFailure};
pub use pipeline::ApiClient;
pub use session::{Session, SessionStore};
