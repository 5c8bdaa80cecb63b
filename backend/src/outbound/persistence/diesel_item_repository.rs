//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! Every item mutation also refreshes the owning list's `updated_at` inside
//! the same transaction.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, NewItem, Quantity};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::{shopping_list_items, shopping_lists};

/// Diesel-backed implementation of the `ItemRepository` port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside an item transaction.
#[derive(Debug)]
enum TransactionError {
    Diesel(diesel::result::Error),
    Item(ItemRepositoryError),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<TransactionError> for ItemRepositoryError {
    fn from(error: TransactionError) -> Self {
        match error {
            TransactionError::Diesel(inner) => map_diesel_error(inner),
            TransactionError::Item(inner) => inner,
        }
    }
}

fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    map_basic_pool_error(error, ItemRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ItemRepositoryError {
    map_basic_diesel_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

fn row_to_item(row: ItemRow) -> Item {
    Item {
        id: row.id,
        name: row.name,
        product_id: row.product_id,
        quantity: row.quantity.map(Quantity::new),
        fit: row.fit,
        completed: row.completed,
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    }
}

async fn ensure_list_exists<C>(conn: &mut C, shopping_list_id: &str) -> Result<(), TransactionError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let exists = diesel::select(diesel::dsl::exists(
        shopping_lists::table.filter(shopping_lists::id.eq(shopping_list_id)),
    ))
    .get_result::<bool>(conn)
    .await?;

    if exists {
        Ok(())
    } else {
        Err(TransactionError::Item(
            ItemRepositoryError::shopping_list_not_found(shopping_list_id),
        ))
    }
}

async fn touch_list<C>(conn: &mut C, shopping_list_id: &str) -> Result<(), TransactionError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::update(shopping_lists::table.filter(shopping_lists::id.eq(shopping_list_id)))
        .set(shopping_lists::updated_at.eq(diesel::dsl::now))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list_items(&self, shopping_list_id: &str) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ensure_list_exists(&mut conn, shopping_list_id).await?;

        let rows: Vec<ItemRow> = shopping_list_items::table
            .filter(shopping_list_items::shopping_list_id.eq(shopping_list_id))
            .order(shopping_list_items::position.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ensure_list_exists(&mut conn, shopping_list_id).await?;

        let row = shopping_list_items::table
            .filter(shopping_list_items::shopping_list_id.eq(shopping_list_id))
            .filter(shopping_list_items::id.eq(item_id))
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item)
            .ok_or_else(|| ItemRepositoryError::item_not_found(item_id))
    }

    async fn add_item(
        &self,
        shopping_list_id: &str,
        item: &NewItem,
    ) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4().to_string();

        let row = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    ensure_list_exists(conn, shopping_list_id).await?;
                    let new_row = NewItemRow {
                        id: id.as_str(),
                        shopping_list_id,
                        name: item.name.as_str(),
                        product_id: item.product_id.as_deref(),
                        quantity: item.quantity.map(Quantity::value),
                        fit: item.fit.as_deref(),
                    };
                    let row = diesel::insert_into(shopping_list_items::table)
                        .values(&new_row)
                        .returning(ItemRow::as_returning())
                        .get_result(conn)
                        .await?;
                    touch_list(conn, shopping_list_id).await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        Ok(row_to_item(row))
    }

    async fn remove_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<(), ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TransactionError, _>(|conn| {
            async move {
                ensure_list_exists(conn, shopping_list_id).await?;
                let deleted = diesel::delete(
                    shopping_list_items::table
                        .filter(shopping_list_items::shopping_list_id.eq(shopping_list_id))
                        .filter(shopping_list_items::id.eq(item_id)),
                )
                .execute(conn)
                .await?;
                if deleted == 0 {
                    return Err(TransactionError::Item(ItemRepositoryError::item_not_found(
                        item_id,
                    )));
                }
                touch_list(conn, shopping_list_id).await
            }
            .scope_boxed()
        })
        .await?;

        Ok(())
    }

    async fn set_completed(
        &self,
        shopping_list_id: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    ensure_list_exists(conn, shopping_list_id).await?;
                    let row = diesel::update(
                        shopping_list_items::table
                            .filter(shopping_list_items::shopping_list_id.eq(shopping_list_id))
                            .filter(shopping_list_items::id.eq(item_id)),
                    )
                    .set((
                        shopping_list_items::completed.eq(completed),
                        shopping_list_items::updated_at.eq(diesel::dsl::now),
                    ))
                    .returning(ItemRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                    let Some(row) = row else {
                        return Err(TransactionError::Item(ItemRepositoryError::item_not_found(
                            item_id,
                        )));
                    };
                    touch_list(conn, shopping_list_id).await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        Ok(row_to_item(row))
    }
}
