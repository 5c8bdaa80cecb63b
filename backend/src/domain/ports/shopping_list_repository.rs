//! Port abstraction for shopping list persistence.
//!
//! Expected misses surface as `Option::None` or a `NotFound` variant; only
//! unexpected storage failures use `Connection` or `Query`.
use async_trait::async_trait;

use crate::domain::ShoppingList;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by shopping list repository adapters.
    pub enum ShoppingListRepositoryError {
        /// No list with the given id exists.
        NotFound { id: String } => "shopping list {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } => "shopping list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "shopping list repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Owner of the list, or `None` when the list does not exist.
    async fn find_owner_id(&self, id: &str) -> Result<Option<String>, ShoppingListRepositoryError>;

    /// Fetch one list.
    async fn find_by_id(&self, id: &str)
    -> Result<Option<ShoppingList>, ShoppingListRepositoryError>;

    /// Lists owned by `user_id` or shared with them, optionally filtered by
    /// the archived flag. Ordered by creation time.
    async fn list_for_user(
        &self,
        user_id: &str,
        archived: Option<bool>,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError>;

    /// Create an active, empty list owned by `owner_id`.
    async fn create(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<ShoppingList, ShoppingListRepositoryError>;

    /// Rename a list.
    async fn rename(&self, id: &str, name: &str)
    -> Result<ShoppingList, ShoppingListRepositoryError>;

    /// Set the archived flag.
    async fn archive(&self, id: &str) -> Result<ShoppingList, ShoppingListRepositoryError>;

    /// Delete a list together with its items and memberships.
    async fn delete(&self, id: &str) -> Result<(), ShoppingListRepositoryError>;
}
