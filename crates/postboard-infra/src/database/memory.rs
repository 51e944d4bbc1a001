//! In-memory post store - used when no database is configured, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postboard_core::ports::PostRepository;
use postboard_core::{NewPost, Post, PostChanges, PostId, RepoError};

/// In-memory post repository backed by a `Vec` behind an async `RwLock`.
///
/// Posts are listed in insertion order. Identifiers are UUIDv4 strings.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| &p.id == id).cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = post.into_post(PostId::new(Uuid::new_v4().to_string()));
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };
        changes.apply(post);
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts
            .iter()
            .position(|p| &p.id == id)
            .map(|idx| posts.remove(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, content: &str) -> NewPost {
        NewPost::new(Some(title.into()), Some(content.into()), None).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("A", "B")).await.unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(!found.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for title in ["first", "second", "third"] {
            repo.create(new_post(title, "body")).await.unwrap();
        }

        let titles: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryPostRepository::new();
        let changes = PostChanges::new(Some("x".into()), None, None);
        assert!(repo.update(&PostId::new("nope"), changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_post() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("A", "B")).await.unwrap();

        let removed = repo.delete(&created.id).await.unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
        assert!(repo.delete(&created.id).await.unwrap().is_none());
    }
}
