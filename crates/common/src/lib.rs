//! Shared contract between the marketplace server and its client SDK:
//! wire types, the provider location reconcile rule, and logging helpers.

pub mod location;
pub mod types;
pub mod utils;
