//! # Postboard Infrastructure
//!
//! Concrete implementations of the `PostRepository` port from `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All store backends enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - Document store via the official MongoDB driver
//! - `postgres` - PostgreSQL via SeaORM

pub mod database;

pub use database::{DatabaseBackend, DatabaseConfig, DatabaseConnections, InMemoryPostRepository};
