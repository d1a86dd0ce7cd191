//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{
    AggregateRoot, CreationTimestamp, EmailAddress, Identifier, User, UserRole,
};
use blog_core::error::RepoError;

use super::corrupted;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl TryFrom<Model> for User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User::reconstitute(
            Identifier::from_uuid(model.id),
            EmailAddress::from_string(&model.email).map_err(corrupted)?,
            model.password_hash,
            UserRole::from_string(&model.role).map_err(corrupted)?,
            CreationTimestamp::from_datetime(model.created_at.into()),
        ))
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(*user.id().as_uuid()),
            email: Set(user.email().as_str().to_owned()),
            password_hash: Set(user.password_hash().to_owned()),
            role: Set(user.role().as_str().to_owned()),
            created_at: Set(user.created_at().as_datetime().into()),
        }
    }
}
