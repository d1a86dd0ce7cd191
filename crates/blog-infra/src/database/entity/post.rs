//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{
    AggregateRoot, CreationTimestamp, Identifier, Post, PostContent, PostStatus, PostTitle,
};
use blog_core::error::RepoError;

use super::corrupted;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: String,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Rebuild a domain Post, re-validating every stored value.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Post::reconstitute(
            Identifier::from_uuid(model.id),
            PostTitle::from_string(&model.title).map_err(corrupted)?,
            PostContent::from_string(&model.content).map_err(corrupted)?,
            PostStatus::from_string(&model.status).map_err(corrupted)?,
            Identifier::from_uuid(model.author_id),
            CreationTimestamp::from_datetime(model.created_at.into()),
            model
                .published_at
                .map(|at| CreationTimestamp::from_datetime(at.into())),
        ))
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(*post.id().as_uuid()),
            title: Set(post.title().as_str().to_owned()),
            content: Set(post.content().as_str().to_owned()),
            status: Set(post.status().as_str().to_owned()),
            author_id: Set(*post.author_id().as_uuid()),
            created_at: Set(post.created_at().as_datetime().into()),
            published_at: Set(post.published_at().map(|at| at.as_datetime().into())),
        }
    }
}
