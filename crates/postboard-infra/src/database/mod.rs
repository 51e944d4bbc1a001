//! Store adapters and connection management.

mod connections;
mod memory;

#[cfg(feature = "mongodb")]
pub mod mongo;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use connections::{DatabaseBackend, DatabaseConfig, DatabaseConnections};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use mongo::MongoPostRepository;
#[cfg(feature = "postgres")]
pub use postgres::PostgresPostRepository;
