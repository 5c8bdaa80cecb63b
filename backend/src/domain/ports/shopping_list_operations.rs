//! Driving port for shopping list use-cases.
//!
//! Inbound adapters hand over an authenticated [`Identity`] and an already
//! validated dtoIn. Implementations resolve the owner and member ids from
//! storage, authorize, and only then mutate, returning the operation's
//! dtoOut or a [`Failure`] whose kind selects the response status.

use async_trait::async_trait;

use crate::domain::validation::{
    ItemAddDtoIn, ItemRefDtoIn, MemberAddDtoIn, MemberRemoveDtoIn, ShoppingListCreateDtoIn,
    ShoppingListIdDtoIn, ShoppingListListDtoIn, ShoppingListRefDtoIn, ShoppingListRenameDtoIn,
};
use crate::domain::{
    Failure, Identity, ItemAddDtoOut, ItemCompletionDtoOut, ItemListDtoOut, ItemRemoveDtoOut,
    MemberAddDtoOut, MemberRemoveDtoOut, ShoppingListDeleteDtoOut, ShoppingListDtoOut,
    ShoppingListGetDtoOut, ShoppingListListDtoOut,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListOperations: Send + Sync {
    /// Lists owned by or shared with the caller.
    async fn list(
        &self,
        identity: &Identity,
        dto_in: ShoppingListListDtoIn,
    ) -> Result<ShoppingListListDtoOut, Failure>;

    /// One list with its items and members; owner or member only.
    async fn get(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListGetDtoOut, Failure>;

    /// Create a list owned by the caller.
    async fn create(
        &self,
        identity: &Identity,
        dto_in: ShoppingListCreateDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure>;

    /// Delete a list; owner only.
    async fn delete(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListDeleteDtoOut, Failure>;

    /// Rename a list; owner only.
    async fn rename(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRenameDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure>;

    /// Archive a list; owner only.
    async fn archive(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure>;

    /// Items of a list; owner or member only.
    async fn list_items(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRefDtoIn,
    ) -> Result<ItemListDtoOut, Failure>;

    /// Add an item; owner or member only.
    async fn add_item(
        &self,
        identity: &Identity,
        dto_in: ItemAddDtoIn,
    ) -> Result<ItemAddDtoOut, Failure>;

    /// Remove an item; owner or member only.
    async fn remove_item(
        &self,
        identity: &Identity,
        dto_in: ItemRefDtoIn,
    ) -> Result<ItemRemoveDtoOut, Failure>;

    /// Set an item's completion flag; owner or member only.
    async fn set_item_completion(
        &self,
        identity: &Identity,
        dto_in: ItemRefDtoIn,
        completed: bool,
    ) -> Result<ItemCompletionDtoOut, Failure>;

    /// Add a member; owner only.
    async fn add_member(
        &self,
        identity: &Identity,
        dto_in: MemberAddDtoIn,
    ) -> Result<MemberAddDtoOut, Failure>;

    /// Remove a member; owner only.
    async fn remove_member(
        &self,
        identity: &Identity,
        dto_in: MemberRemoveDtoIn,
    ) -> Result<MemberRemoveDtoOut, Failure>;

    /// Remove the caller's own membership; members only.
    async fn leave(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRefDtoIn,
    ) -> Result<MemberRemoveDtoOut, Failure>;
}
