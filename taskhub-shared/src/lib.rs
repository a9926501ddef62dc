//! # Taskhub Shared Library
//!
//! Shared types and data access used by the Taskhub API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `db`: Connection pool and migration runner
//! - `auth`: Password hashing and JWT tokens

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskhub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
