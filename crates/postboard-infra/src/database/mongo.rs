//! MongoDB post repository - the document store backend.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use postboard_core::ports::PostRepository;
use postboard_core::{NewPost, Post, PostChanges, PostId, RepoError};

/// Collection holding post documents.
pub const POSTS_COLLECTION: &str = "posts";

/// Stored shape of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// BSON dates carry milliseconds. Missing on documents written
    /// without one; those fall back to the ObjectId creation time.
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<bson::DateTime>,
}

impl PostDocument {
    fn from_new(post: NewPost) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title,
            content: post.content,
            updated_at: Some(bson::DateTime::from_chrono(post.updated_at)),
        }
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or_else(|| self.id.timestamp()).to_chrono()
    }
}

impl From<PostDocument> for Post {
    fn from(document: PostDocument) -> Self {
        let updated_at = document.updated_at();
        Self {
            id: PostId::new(document.id.to_hex()),
            title: document.title,
            content: document.content,
            updated_at,
        }
    }
}

/// Parse a post id as an ObjectId. Malformed ids match nothing.
fn object_id(id: &PostId) -> Option<ObjectId> {
    match ObjectId::parse_str(id.as_str()) {
        Ok(oid) => Some(oid),
        Err(_) => {
            tracing::debug!(post_id = %id, "Malformed ObjectId, treating as not found");
            None
        }
    }
}

/// `$set` document for a partial update; `updatedAt` is always included.
fn update_document(changes: PostChanges) -> Document {
    let mut set = doc! { "updatedAt": bson::DateTime::from_chrono(changes.updated_at) };
    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(content) = changes.content {
        set.insert("content", content);
    }
    doc! { "$set": set }
}

fn query_error(e: mongodb::error::Error) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Post repository over a MongoDB collection.
#[derive(Clone)]
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(POSTS_COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let documents: Vec<PostDocument> = self
            .collection
            .find(None, None)
            .await
            .map_err(query_error)?
            .try_collect()
            .await
            .map_err(query_error)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(query_error)?;

        Ok(document.map(Into::into))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let document = PostDocument::from_new(post);
        self.collection
            .insert_one(&document, None)
            .await
            .map_err(query_error)?;

        tracing::debug!(post_id = %document.id, "Post inserted");
        Ok(document.into())
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, update_document(changes), options)
            .await
            .map_err(query_error)?;

        Ok(document.map(Into::into))
    }

    async fn delete(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await
            .map_err(query_error)?;

        Ok(document.map(Into::into))
    }
}
