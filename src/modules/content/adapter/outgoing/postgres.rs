use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use uuid::Uuid;

use super::sea_orm_entity::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as Record,
    Model as RecordModel,
};
use crate::content::application::domain::{
    find_unique_conflict, CollectionResource, Resource, SingletonResource,
};
use crate::content::application::ports::outgoing::{
    CollectionRepository, RepositoryError, SingletonRepository, StorageProbe,
};
use crate::content::application::schema::{materialize, merge, Draft, Patch};

//
// ──────────────────────────────────────────────────────────
// Shared helpers
// ──────────────────────────────────────────────────────────
//

fn map_db_err(e: DbErr) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn decode<E: Resource>(model: RecordModel) -> Result<E, RepositoryError> {
    Ok(serde_json::from_value(model.body)?)
}

/// Serializes writers to one resource until the surrounding transaction ends.
fn resource_lock_stmt(resource: &str) -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        vec![resource.into()],
    )
}

async fn lock_resource<C: ConnectionTrait>(
    conn: &C,
    resource: &str,
) -> Result<(), RepositoryError> {
    conn.execute(resource_lock_stmt(resource))
        .await
        .map_err(map_db_err)?;
    Ok(())
}

async fn rows_of<E: Resource, C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<RecordModel>, RepositoryError> {
    Record::find()
        .filter(RecordColumn::Resource.eq(E::PATH))
        .order_by_asc(RecordColumn::Position)
        .all(conn)
        .await
        .map_err(map_db_err)
}

async fn insert_record<E: Resource, C: ConnectionTrait>(
    conn: &C,
    entity: &E,
) -> Result<(), RepositoryError> {
    let now = Utc::now().fixed_offset();
    let active = RecordActiveModel {
        id: Set(entity.id()),
        resource: Set(E::PATH.to_string()),
        position: NotSet,
        body: Set(serde_json::to_value(entity)?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Record::insert(active)
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

async fn replace_body<E: Resource, C: ConnectionTrait>(
    conn: &C,
    entity: &E,
) -> Result<(), RepositoryError> {
    let result = Record::update_many()
        .col_expr(RecordColumn::Body, Expr::value(serde_json::to_value(entity)?))
        .col_expr(RecordColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(RecordColumn::Resource.eq(E::PATH))
        .filter(RecordColumn::Id.eq(entity.id()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

//
// ──────────────────────────────────────────────────────────
// Collection
// ──────────────────────────────────────────────────────────
//

#[derive(Debug)]
pub struct PostgresCollectionRepository<E> {
    db: Arc<DatabaseConnection>,
    resource: PhantomData<fn() -> E>,
}

impl<E> PostgresCollectionRepository<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            resource: PhantomData,
        }
    }
}

impl<E> Clone for PostgresCollectionRepository<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.db))
    }
}

#[async_trait]
impl<E: CollectionResource> CollectionRepository<E> for PostgresCollectionRepository<E> {
    async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        rows_of::<E, _>(&*self.db)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let model = Record::find()
            .filter(RecordColumn::Resource.eq(E::PATH))
            .filter(RecordColumn::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model.map(decode).transpose()
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError> {
        let entity = materialize(draft, Uuid::new_v4(), Utc::now())?;

        let txn = self.db.begin().await.map_err(map_db_err)?;
        lock_resource(&txn, E::PATH).await?;

        if !entity.unique_keys().is_empty() {
            let existing = rows_of::<E, _>(&txn)
                .await?
                .into_iter()
                .map(decode)
                .collect::<Result<Vec<E>, _>>()?;

            if let Some((field, value)) = find_unique_conflict(&entity, existing.iter()) {
                return Err(RepositoryError::Duplicate { field, value });
            }
        }

        insert_record(&txn, &entity).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(entity)
    }

    async fn update(&self, id: Uuid, patch: Patch<E>) -> Result<E, RepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        lock_resource(&txn, E::PATH).await?;

        let existing = rows_of::<E, _>(&txn)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<E>, _>>()?;

        let current = existing
            .iter()
            .find(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;

        let updated = merge(current, &patch, Utc::now())?;
        if let Some((field, value)) = find_unique_conflict(&updated, existing.iter()) {
            return Err(RepositoryError::Duplicate { field, value });
        }

        replace_body(&txn, &updated).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = Record::delete_many()
            .filter(RecordColumn::Resource.eq(E::PATH))
            .filter(RecordColumn::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

//
// ──────────────────────────────────────────────────────────
// Singleton
// ──────────────────────────────────────────────────────────
//

#[derive(Debug)]
pub struct PostgresSingletonRepository<E> {
    db: Arc<DatabaseConnection>,
    resource: PhantomData<fn() -> E>,
}

impl<E> PostgresSingletonRepository<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            resource: PhantomData,
        }
    }
}

impl<E> Clone for PostgresSingletonRepository<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.db))
    }
}

impl<E: SingletonResource> PostgresSingletonRepository<E> {
    async fn current<C: ConnectionTrait>(conn: &C) -> Result<Option<E>, RepositoryError> {
        let model = Record::find()
            .filter(RecordColumn::Resource.eq(E::PATH))
            .order_by_asc(RecordColumn::Position)
            .one(conn)
            .await
            .map_err(map_db_err)?;

        model.map(decode).transpose()
    }
}

#[async_trait]
impl<E: SingletonResource> SingletonRepository<E> for PostgresSingletonRepository<E> {
    async fn get(&self) -> Result<Option<E>, RepositoryError> {
        Self::current(&*self.db).await
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        lock_resource(&txn, E::PATH).await?;

        if Self::current(&txn).await?.is_some() {
            return Err(RepositoryError::AlreadyExists);
        }

        let entity = materialize(draft, Uuid::new_v4(), Utc::now())?;
        insert_record(&txn, &entity).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(entity)
    }

    async fn update(&self, patch: Patch<E>) -> Result<E, RepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        lock_resource(&txn, E::PATH).await?;

        let current = Self::current(&txn).await?.ok_or(RepositoryError::NotFound)?;
        let updated = merge(&current, &patch, Utc::now())?;

        replace_body(&txn, &updated).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(updated)
    }
}

//
// ──────────────────────────────────────────────────────────
// Probe
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct PostgresStorageProbe {
    db: Arc<DatabaseConnection>,
}

impl PostgresStorageProbe {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StorageProbe for PostgresStorageProbe {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1",
            ))
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}
