//! # TaskLink Shared Library
//!
//! This crate contains the persistence layer and business rules used by the
//! TaskLink API server.
//!
//! ## Module Organization
//!
//! - `db`: SQLite connection pool and embedded migrations
//! - `models`: Row models (users, tasks, user-task assignments) and their queries
//! - `validation`: Fail-fast field validation contract
//! - `auth`: Password hashing

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the TaskLink shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
