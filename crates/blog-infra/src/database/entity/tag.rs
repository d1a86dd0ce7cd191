//! Tag entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{
    AggregateRoot, CreationTimestamp, Identifier, Tag, TagColor, TagName, TagSlug,
};
use blog_core::error::RepoError;

use super::corrupted;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub color: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Tag {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Tag::reconstitute(
            Identifier::from_uuid(model.id),
            TagName::from_string(&model.name).map_err(corrupted)?,
            TagSlug::from_string(&model.slug).map_err(corrupted)?,
            TagColor::from_string(&model.color).map_err(corrupted)?,
            CreationTimestamp::from_datetime(model.created_at.into()),
        ))
    }
}

impl From<Tag> for ActiveModel {
    fn from(tag: Tag) -> Self {
        Self {
            id: Set(*tag.id().as_uuid()),
            name: Set(tag.name().as_str().to_owned()),
            slug: Set(tag.slug().as_str().to_owned()),
            color: Set(tag.color().as_str().to_owned()),
            created_at: Set(tag.created_at().as_datetime().into()),
        }
    }
}
