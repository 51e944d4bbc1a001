//! # Postboard Shared
//!
//! Wire types of the posts API: request and response bodies, and the
//! problem-details error shape.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
