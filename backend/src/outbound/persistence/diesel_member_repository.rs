//! PostgreSQL-backed `MemberRepository` implementation using Diesel ORM.
//!
//! Membership uniqueness is enforced by the `(shopping_list_id, user_id)`
//! unique index; a violation surfaces as `AlreadyExists`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{Member, MemberRole};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MemberRow, NewMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::shopping_list_members;

/// Diesel-backed implementation of the `MemberRepository` port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MemberRepositoryError {
    map_basic_pool_error(error, MemberRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MemberRepositoryError {
    map_basic_diesel_error(
        error,
        MemberRepositoryError::query,
        MemberRepositoryError::connection,
    )
}

fn row_to_member(row: MemberRow) -> Member {
    let role = row.role.parse().unwrap_or_else(|_| {
        warn!(
            value = row.role.as_str(),
            member_id = row.id.as_str(),
            "unrecognised member role, defaulting to Member"
        );
        MemberRole::Member
    });

    Member {
        id: row.id,
        user_id: row.user_id,
        shopping_list_id: row.shopping_list_id,
        role,
        joined_at: Some(row.joined_at),
    }
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn list_members(
        &self,
        shopping_list_id: &str,
    ) -> Result<Vec<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MemberRow> = shopping_list_members::table
            .filter(shopping_list_members::shopping_list_id.eq(shopping_list_id))
            .order((shopping_list_members::joined_at.asc(), shopping_list_members::id.asc()))
            .select(MemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_member).collect())
    }

    async fn member_ids(&self, shopping_list_id: &str) -> Result<Vec<String>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        shopping_list_members::table
            .filter(shopping_list_members::shopping_list_id.eq(shopping_list_id))
            .order((shopping_list_members::joined_at.asc(), shopping_list_members::id.asc()))
            .select(shopping_list_members::user_id)
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn is_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<bool, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            shopping_list_members::table
                .filter(shopping_list_members::shopping_list_id.eq(shopping_list_id))
                .filter(shopping_list_members::user_id.eq(user_id)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn add_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Member, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4().to_string();
        let new_row = NewMemberRow {
            id: id.as_str(),
            shopping_list_id,
            user_id,
            role: role.as_str(),
        };

        let row = diesel::insert_into(shopping_list_members::table)
            .values(&new_row)
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    MemberRepositoryError::already_exists(shopping_list_id, user_id)
                } else {
                    map_diesel_error(error)
                }
            })?;

        Ok(row_to_member(row))
    }

    async fn remove_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<(), MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            shopping_list_members::table
                .filter(shopping_list_members::shopping_list_id.eq(shopping_list_id))
                .filter(shopping_list_members::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(MemberRepositoryError::not_found(shopping_list_id, user_id));
        }
        Ok(())
    }
}
