//! # Postboard Core
//!
//! The domain layer of the posts service: the `Post` resource, the errors
//! it can fail with, and the repository port every store adapter implements.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{NewPost, Post, PostChanges, PostId};
pub use error::{DomainError, RepoError};
