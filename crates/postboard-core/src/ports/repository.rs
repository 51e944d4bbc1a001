use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Post repository - one call against the post collection per operation.
///
/// Identifiers the backend cannot parse are treated like unknown ones:
/// lookups answer `Ok(None)` instead of failing.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Short name of the backing store, reported by the health check.
    fn backend(&self) -> &'static str;

    /// All posts, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError>;

    /// Persist a new post. The store assigns the identifier.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply `changes` and return the post as stored afterwards.
    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Remove a post, returning the removed record.
    async fn delete(&self, id: &PostId) -> Result<Option<Post>, RepoError>;
}
