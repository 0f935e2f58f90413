//! # BoardSync Shared Library
//!
//! Pure domain layer for the BoardSync task board. Everything in this crate
//! is free of I/O: the client crate owns the network boundary and feeds
//! fetched collections into the projection and resolver functions here.
//!
//! ## Module Organization
//!
//! - `models`: Task, status, user, and message data structures
//! - `auth`: Session context (credential decode + lifecycle) and the
//!   role-based authorization policy
//! - `board`: Board projection and drag-transition resolution

pub mod auth;
pub mod board;
pub mod models;

/// Current version of the BoardSync shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
