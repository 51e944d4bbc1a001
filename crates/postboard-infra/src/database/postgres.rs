//! PostgreSQL post repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use postboard_core::ports::PostRepository;
use postboard_core::{NewPost, Post, PostChanges, PostId, RepoError};

use super::entity::post::{self, Entity as PostEntity};

fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Parse a post id as a UUID. Malformed ids match nothing.
fn parse_id(id: &PostId) -> Option<Uuid> {
    match Uuid::parse_str(id.as_str()) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            tracing::debug!(post_id = %id, "Malformed UUID, treating as not found");
            None
        }
    }
}

/// PostgreSQL post repository.
#[derive(Clone)]
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };

        let result = PostEntity::find_by_id(uuid)
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(self.db.as_ref()).await.map_err(query_error)?;

        tracing::debug!(post_id = %model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };

        let updated_at: DateTimeWithTimeZone = changes.updated_at.into();
        let mut query =
            PostEntity::update_many().col_expr(post::Column::UpdatedAt, Expr::value(updated_at));
        if let Some(title) = changes.title {
            query = query.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = changes.content {
            query = query.col_expr(post::Column::Content, Expr::value(content));
        }

        // Single UPDATE ... RETURNING, so the write and the read agree.
        let rows = query
            .filter(post::Column::Id.eq(uuid))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn delete(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };

        let rows = PostEntity::delete_many()
            .filter(post::Column::Id.eq(uuid))
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().next().map(Into::into))
    }
}
