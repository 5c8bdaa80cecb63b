//! Port abstraction for items embedded in a shopping list.
use async_trait::async_trait;

use crate::domain::{Item, NewItem};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// The owning list does not exist.
        ShoppingListNotFound { id: String } => "shopping list {id} not found",
        /// The list exists but holds no such item.
        ItemNotFound { id: String } => "item {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Items of a list in insertion order.
    async fn list_items(&self, shopping_list_id: &str) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Fetch one item.
    async fn find_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<Item, ItemRepositoryError>;

    /// Append an item with a fresh id and timestamps; `completed` starts false.
    async fn add_item(
        &self,
        shopping_list_id: &str,
        item: &NewItem,
    ) -> Result<Item, ItemRepositoryError>;

    /// Remove an item.
    async fn remove_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<(), ItemRepositoryError>;

    /// Set the completion flag and refresh `updated_at`.
    async fn set_completed(
        &self,
        shopping_list_id: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<Item, ItemRepositoryError>;
}
