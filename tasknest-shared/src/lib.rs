//! # Tasknest Shared Library
//!
//! This crate contains the types, validation rules, and business logic shared
//! by the Tasknest API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures (users, tasks, notes)
//! - `auth`: Password hashing, identity tokens, and auth middleware
//! - `validation`: Ordered, fail-fast payload validation rules
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the Tasknest shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
