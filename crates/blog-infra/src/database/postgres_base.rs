use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, Select, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{AggregateRoot, Identifier};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository over one SeaORM entity.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Run a select and rebuild every row as a domain entity.
    pub(crate) async fn fetch<T>(&self, select: Select<E>) -> Result<Vec<T>, RepoError>
    where
        T: TryFrom<E::Model, Error = RepoError>,
    {
        select
            .all(&self.db)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    pub(crate) async fn fetch_one<T>(&self, select: Select<E>) -> Result<Option<T>, RepoError>
    where
        T: TryFrom<E::Model, Error = RepoError>,
    {
        select
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(T::try_from)
            .transpose()
    }
}

pub(crate) fn query_error(err: DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

fn write_error(err: DbErr) -> RepoError {
    let message = err.to_string();
    if message.contains("duplicate") || message.contains("unique") {
        RepoError::Constraint(message)
    } else {
        RepoError::Query(message)
    }
}

#[async_trait]
impl<E, T> BaseRepository<T> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    T: AggregateRoot + Clone + TryFrom<E::Model, Error = RepoError> + Into<E::ActiveModel>,
    T: Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Identifier) -> Result<Option<T>, RepoError> {
        self.fetch_one(E::find_by_id(*id.as_uuid())).await
    }

    async fn save(&self, entity: &T) -> Result<(), RepoError> {
        let id = *entity.id().as_uuid();
        let txn = self.db.begin().await.map_err(query_error)?;

        let exists = E::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_error)?
            .is_some();

        let model: E::ActiveModel = entity.clone().into();
        if exists {
            model.update(&txn).await.map_err(write_error)?;
        } else {
            model.insert(&txn).await.map_err(write_error)?;
        }

        txn.commit().await.map_err(query_error)?;
        tracing::debug!(entity = T::NAME, %id, inserted = !exists, "Saved entity");
        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepoError> {
        let result = E::delete_by_id(*entity.id().as_uuid())
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
