//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::PostRepository;
use postboard_infra::{DatabaseConnections, InMemoryPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the state on top of an open database, or the in-memory store.
    pub fn new(db: Option<&DatabaseConnections>) -> Self {
        let posts = match db {
            Some(db) => db.post_repository(),
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new()) as Arc<dyn PostRepository>
            }
        };

        tracing::info!(store = posts.backend(), "Application state initialized");

        Self { posts }
    }

    #[cfg(test)]
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
