//! # BoardSync Client Library
//!
//! Client core for the BoardSync task board. This crate owns the network
//! boundary and the orchestration around it:
//!
//! ## Modules
//!
//! - `repository`: The `TaskRepository` contract, its HTTP implementation,
//!   and an in-memory mock for tests
//! - `workflow`: The task workflow controller (create / move / edit /
//!   discuss, with reconciliation reloads)
//! - `poller`: The live message poller for an open task-detail view
//! - `config`: Environment-based client configuration
//!
//! ## Consistency model
//!
//! Every mutation is followed by a full authoritative re-fetch instead of
//! a speculative local merge. The fetched collections are replaced
//! wholesale, which eliminates partial-update races by construction.

pub mod config;
pub mod poller;
pub mod repository;
pub mod workflow;

/// Current version of the BoardSync client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
