//! PostgreSQL-backed `ShoppingListRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ShoppingList;
use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewShoppingListRow, ShoppingListRow};
use super::pool::{DbPool, PoolError};
use super::schema::{shopping_list_members, shopping_lists};

/// Diesel-backed implementation of the `ShoppingListRepository` port.
///
/// Deleting a list relies on `ON DELETE CASCADE` to drop its items and
/// memberships.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListRepositoryError {
    map_basic_pool_error(error, ShoppingListRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListRepositoryError {
    map_basic_diesel_error(
        error,
        ShoppingListRepositoryError::query,
        ShoppingListRepositoryError::connection,
    )
}

fn row_to_list(row: ShoppingListRow) -> ShoppingList {
    ShoppingList {
        id: row.id,
        name: row.name,
        owner_id: row.owner_id,
        archived: row.archived,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn find_owner_id(&self, id: &str) -> Result<Option<String>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        shopping_lists::table
            .filter(shopping_lists::id.eq(id))
            .select(shopping_lists::owner_id)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = shopping_lists::table
            .filter(shopping_lists::id.eq(id))
            .select(ShoppingListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_list))
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        archived: Option<bool>,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let shared = shopping_list_members::table
            .filter(shopping_list_members::user_id.eq(user_id))
            .select(shopping_list_members::shopping_list_id);

        let mut query = shopping_lists::table
            .filter(
                shopping_lists::owner_id
                    .eq(user_id)
                    .or(shopping_lists::id.eq_any(shared)),
            )
            .select(ShoppingListRow::as_select())
            .order((shopping_lists::created_at.asc(), shopping_lists::id.asc()))
            .into_boxed();

        if let Some(flag) = archived {
            query = query.filter(shopping_lists::archived.eq(flag));
        }

        let rows: Vec<ShoppingListRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_list).collect())
    }

    async fn create(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4().to_string();
        let new_row = NewShoppingListRow {
            id: id.as_str(),
            name,
            owner_id,
        };

        let row = diesel::insert_into(shopping_lists::table)
            .values(&new_row)
            .returning(ShoppingListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_list(row))
    }

    async fn rename(&self, id: &str, name: &str) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(shopping_lists::table.filter(shopping_lists::id.eq(id)))
            .set((
                shopping_lists::name.eq(name),
                shopping_lists::updated_at.eq(diesel::dsl::now),
            ))
            .returning(ShoppingListRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_list)
            .ok_or_else(|| ShoppingListRepositoryError::not_found(id))
    }

    async fn archive(&self, id: &str) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(shopping_lists::table.filter(shopping_lists::id.eq(id)))
            .set((
                shopping_lists::archived.eq(true),
                shopping_lists::updated_at.eq(diesel::dsl::now),
            ))
            .returning(ShoppingListRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_list)
            .ok_or_else(|| ShoppingListRepositoryError::not_found(id))
    }

    async fn delete(&self, id: &str) -> Result<(), ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(shopping_lists::table.filter(shopping_lists::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(ShoppingListRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.
    use super::*;
    use chrono::{TimeZone, Utc};
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_domain_lists() {
        let stamp = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let list = row_to_list(ShoppingListRow {
            id: "list-1".to_owned(),
            name: "Groceries".to_owned(),
            owner_id: "user1".to_owned(),
            archived: true,
            created_at: stamp,
            updated_at: stamp,
        });

        assert_eq!(list.name, "Groceries");
        assert_eq!(list.owner_id, "user1");
        assert!(list.archived);
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection reset".to_owned()),
        );
        assert_eq!(
            map_diesel_error(error),
            ShoppingListRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn pool_checkout_maps_to_connection_error() {
        assert!(matches!(
            map_pool_error(PoolError::checkout("timed out")),
            ShoppingListRepositoryError::Connection { .. }
        ));
    }
}
