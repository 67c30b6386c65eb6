/// CRUD operations tests for the marketplace models
pub mod crud_tests;
