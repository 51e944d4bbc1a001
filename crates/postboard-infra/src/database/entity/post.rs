//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use postboard_core::{NewPost, PostId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for postboard_core::Post {
    fn from(model: Model) -> Self {
        Self {
            id: PostId::new(model.id.to_string()),
            title: model.title,
            content: model.content,
            updated_at: model.updated_at.into(),
        }
    }
}

/// A new row for `post`, with a freshly minted primary key.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            title: Set(post.title),
            content: Set(post.content),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
