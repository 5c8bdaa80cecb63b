//! Shopping list application service.
//!
//! Implements [`ShoppingListOperations`] over the three repository ports.
//! Every operation follows the same order: profile permission, resolve the
//! owner and member ids from storage, run the authorization predicate, then
//! touch the data. A missing list therefore answers 404 before any 403.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::authorization::{
    AuthorizationOutcome, require_member, require_owner, require_owner_or_member, require_profile,
};
use super::error_map::{
    DATABASE_KEY, ErrorEntry, ErrorMap, ITEM_KEY, MEMBER_KEY, SHOPPING_LIST_KEY,
};
use super::identity::{Identity, Permission, Profile, has_permission};
use super::ports::{
    ItemRepository, ItemRepositoryError, MemberRepository, MemberRepositoryError,
    ShoppingListOperations, ShoppingListRepository, ShoppingListRepositoryError,
};
use super::shopping_list::NewItem;
use super::validation::{
    ItemAddDtoIn, ItemRefDtoIn, MemberAddDtoIn, MemberRemoveDtoIn, ShoppingListCreateDtoIn,
    ShoppingListIdDtoIn, ShoppingListListDtoIn, ShoppingListRefDtoIn, ShoppingListRenameDtoIn,
    require,
};
use super::{
    Failure, ItemAddDtoOut, ItemCompletionDtoOut, ItemDtoOut, ItemListDtoOut, ItemRemoveDtoOut,
    MemberAddDtoOut, MemberDtoOut, MemberRemoveDtoOut, ShoppingListDeleteDtoOut,
    ShoppingListDtoOut, ShoppingListGetDtoOut, ShoppingListListDtoOut, ShoppingListSummary,
};

const ALL_PROFILES: [Profile; 2] = [Profile::Authorities, Profile::Operatives];

/// Owner and member ids resolved before authorizing.
struct AccessContext {
    owner_id: String,
    member_ids: Vec<String>,
}

/// Shopping list service implementing the driving port.
pub struct ShoppingListService<L, I, M> {
    lists: Arc<L>,
    items: Arc<I>,
    members: Arc<M>,
}

impl<L, I, M> Clone for ShoppingListService<L, I, M> {
    fn clone(&self) -> Self {
        Self {
            lists: Arc::clone(&self.lists),
            items: Arc::clone(&self.items),
            members: Arc::clone(&self.members),
        }
    }
}

impl<L, I, M> ShoppingListService<L, I, M> {
    /// Create a service over the given repositories.
    pub fn new(lists: Arc<L>, items: Arc<I>, members: Arc<M>) -> Self {
        Self {
            lists,
            items,
            members,
        }
    }
}

fn database_failure(message: &str) -> Failure {
    error!(%message, "shopping list storage failed");
    Failure::internal(ErrorMap::single(DATABASE_KEY, ErrorEntry::database()))
}

fn list_not_found() -> Failure {
    Failure::not_found(ErrorMap::single(
        SHOPPING_LIST_KEY,
        ErrorEntry::shopping_list_not_found(),
    ))
}

fn map_list_error(error: ShoppingListRepositoryError) -> Failure {
    match error {
        ShoppingListRepositoryError::NotFound { id } => {
            debug!(%id, "shopping list missing");
            list_not_found()
        }
        ShoppingListRepositoryError::Connection { message }
        | ShoppingListRepositoryError::Query { message } => database_failure(&message),
    }
}

fn map_item_error(error: ItemRepositoryError) -> Failure {
    match error {
        ItemRepositoryError::ShoppingListNotFound { id } => {
            debug!(%id, "shopping list missing");
            list_not_found()
        }
        ItemRepositoryError::ItemNotFound { id } => {
            debug!(%id, "item missing");
            Failure::not_found(ErrorMap::single(ITEM_KEY, ErrorEntry::item_not_found()))
        }
        ItemRepositoryError::Connection { message } | ItemRepositoryError::Query { message } => {
            database_failure(&message)
        }
    }
}

fn map_member_error(error: MemberRepositoryError) -> Failure {
    match error {
        MemberRepositoryError::AlreadyExists { .. } => Failure::conflict(ErrorMap::single(
            MEMBER_KEY,
            ErrorEntry::member_already_exists(),
        )),
        MemberRepositoryError::NotFound { .. } => {
            Failure::not_found(ErrorMap::single(MEMBER_KEY, ErrorEntry::member_not_found()))
        }
        MemberRepositoryError::Connection { message }
        | MemberRepositoryError::Query { message } => database_failure(&message),
    }
}

/// Turn a refused predicate into the matching failure.
fn authorize(identity: &Identity, outcome: AuthorizationOutcome) -> Result<(), Failure> {
    if outcome.is_ok() {
        return Ok(());
    }
    debug!(user_id = identity.user_id(), "authorization refused");
    if outcome.is_unauthenticated() {
        Err(Failure::unauthenticated(outcome.into_errors()))
    } else {
        Err(Failure::forbidden(outcome.into_errors()))
    }
}

/// Require the caller's profile to grant `permission`.
fn ensure_permission(identity: &Identity, permission: Permission) -> Result<(), Failure> {
    let allowed: Vec<Profile> = ALL_PROFILES
        .into_iter()
        .filter(|profile| has_permission(*profile, permission))
        .collect();
    authorize(identity, require_profile(Some(identity), &allowed))
}

impl<L, I, M> ShoppingListService<L, I, M>
where
    L: ShoppingListRepository,
    I: ItemRepository,
    M: MemberRepository,
{
    async fn owner_of(&self, shopping_list_id: &str) -> Result<String, Failure> {
        self.lists
            .find_owner_id(shopping_list_id)
            .await
            .map_err(map_list_error)?
            .ok_or_else(list_not_found)
    }

    async fn access_context(&self, shopping_list_id: &str) -> Result<AccessContext, Failure> {
        let owner_id = self.owner_of(shopping_list_id).await?;
        let member_ids = self
            .members
            .member_ids(shopping_list_id)
            .await
            .map_err(map_member_error)?;
        Ok(AccessContext {
            owner_id,
            member_ids,
        })
    }

    async fn authorize_owner(&self, identity: &Identity, shopping_list_id: &str) -> Result<(), Failure> {
        let owner_id = self.owner_of(shopping_list_id).await?;
        authorize(identity, require_owner(Some(identity), &owner_id))
    }

    async fn authorize_owner_or_member(
        &self,
        identity: &Identity,
        shopping_list_id: &str,
    ) -> Result<(), Failure> {
        let context = self.access_context(shopping_list_id).await?;
        authorize(
            identity,
            require_owner_or_member(Some(identity), &context.owner_id, &context.member_ids),
        )
    }
}

#[async_trait]
impl<L, I, M> ShoppingListOperations for ShoppingListService<L, I, M>
where
    L: ShoppingListRepository,
    I: ItemRepository,
    M: MemberRepository,
{
    async fn list(
        &self,
        identity: &Identity,
        dto_in: ShoppingListListDtoIn,
    ) -> Result<ShoppingListListDtoOut, Failure> {
        ensure_permission(identity, Permission::ShoppingListRead)?;
        let lists = self
            .lists
            .list_for_user(identity.user_id(), dto_in.archived)
            .await
            .map_err(map_list_error)?;
        Ok(ShoppingListListDtoOut {
            awid: identity.awid().to_owned(),
            items: lists.iter().map(ShoppingListSummary::from).collect(),
        })
    }

    async fn get(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListGetDtoOut, Failure> {
        let id = require(dto_in.id, "id")?;
        ensure_permission(identity, Permission::ShoppingListRead)?;
        self.authorize_owner_or_member(identity, &id).await?;

        let list = self
            .lists
            .find_by_id(&id)
            .await
            .map_err(map_list_error)?
            .ok_or_else(list_not_found)?;
        let items = self.items.list_items(&id).await.map_err(map_item_error)?;
        let members = self
            .members
            .list_members(&id)
            .await
            .map_err(map_member_error)?;

        Ok(ShoppingListGetDtoOut {
            list: ShoppingListDtoOut::from_list(identity.awid(), &list),
            items: items.into_iter().map(ItemDtoOut::from).collect(),
            members: members.into_iter().map(MemberDtoOut::from).collect(),
        })
    }

    async fn create(
        &self,
        identity: &Identity,
        dto_in: ShoppingListCreateDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure> {
        let name = require(dto_in.name, "name")?;
        ensure_permission(identity, Permission::ShoppingListCreate)?;
        let list = self
            .lists
            .create(&name, identity.user_id())
            .await
            .map_err(map_list_error)?;
        Ok(ShoppingListDtoOut::from_list(identity.awid(), &list))
    }

    async fn delete(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListDeleteDtoOut, Failure> {
        let id = require(dto_in.id, "id")?;
        self.authorize_owner(identity, &id).await?;
        self.lists.delete(&id).await.map_err(map_list_error)?;
        Ok(ShoppingListDeleteDtoOut {
            awid: identity.awid().to_owned(),
            id,
        })
    }

    async fn rename(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRenameDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure> {
        let id = require(dto_in.id, "id")?;
        let name = require(dto_in.name, "name")?;
        ensure_permission(identity, Permission::ShoppingListUpdate)?;
        self.authorize_owner(identity, &id).await?;
        let list = self.lists.rename(&id, &name).await.map_err(map_list_error)?;
        Ok(ShoppingListDtoOut::from_list(identity.awid(), &list))
    }

    async fn archive(
        &self,
        identity: &Identity,
        dto_in: ShoppingListIdDtoIn,
    ) -> Result<ShoppingListDtoOut, Failure> {
        let id = require(dto_in.id, "id")?;
        ensure_permission(identity, Permission::ShoppingListArchive)?;
        self.authorize_owner(identity, &id).await?;
        let list = self.lists.archive(&id).await.map_err(map_list_error)?;
        Ok(ShoppingListDtoOut::from_list(identity.awid(), &list))
    }

    async fn list_items(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRefDtoIn,
    ) -> Result<ItemListDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        ensure_permission(identity, Permission::ShoppingListRead)?;
        self.authorize_owner_or_member(identity, &shopping_list_id)
            .await?;
        let items = self
            .items
            .list_items(&shopping_list_id)
            .await
            .map_err(map_item_error)?;
        Ok(ItemListDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            items: items.into_iter().map(ItemDtoOut::from).collect(),
        })
    }

    async fn add_item(
        &self,
        identity: &Identity,
        dto_in: ItemAddDtoIn,
    ) -> Result<ItemAddDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let name = require(dto_in.name, "name")?;
        ensure_permission(identity, Permission::ItemManage)?;
        self.authorize_owner_or_member(identity, &shopping_list_id)
            .await?;
        let new_item = NewItem {
            name,
            product_id: dto_in.product_id,
            quantity: dto_in.quantity,
            fit: dto_in.fit,
        };
        let item = self
            .items
            .add_item(&shopping_list_id, &new_item)
            .await
            .map_err(map_item_error)?;
        Ok(ItemAddDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            item: ItemDtoOut::from(item),
        })
    }

    async fn remove_item(
        &self,
        identity: &Identity,
        dto_in: ItemRefDtoIn,
    ) -> Result<ItemRemoveDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let item_id = require(dto_in.item_id, "itemId")?;
        ensure_permission(identity, Permission::ItemManage)?;
        self.authorize_owner_or_member(identity, &shopping_list_id)
            .await?;
        self.items
            .remove_item(&shopping_list_id, &item_id)
            .await
            .map_err(map_item_error)?;
        Ok(ItemRemoveDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            item_id,
        })
    }

    async fn set_item_completion(
        &self,
        identity: &Identity,
        dto_in: ItemRefDtoIn,
        completed: bool,
    ) -> Result<ItemCompletionDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let item_id = require(dto_in.item_id, "itemId")?;
        ensure_permission(identity, Permission::ItemManage)?;
        self.authorize_owner_or_member(identity, &shopping_list_id)
            .await?;
        let item = self
            .items
            .set_completed(&shopping_list_id, &item_id, completed)
            .await
            .map_err(map_item_error)?;
        Ok(ItemCompletionDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            item_id: item.id,
            completed: item.completed,
            updated_at: item.updated_at,
        })
    }

    async fn add_member(
        &self,
        identity: &Identity,
        dto_in: MemberAddDtoIn,
    ) -> Result<MemberAddDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let user_id = require(dto_in.user_id, "userId")?;
        let role = dto_in.role.unwrap_or_default();
        ensure_permission(identity, Permission::MemberManage)?;
        self.authorize_owner(identity, &shopping_list_id).await?;

        // Early answer for the common case; the store still rejects races.
        let already_member = self
            .members
            .is_member(&shopping_list_id, &user_id)
            .await
            .map_err(map_member_error)?;
        if already_member {
            return Err(map_member_error(MemberRepositoryError::already_exists(
                shopping_list_id,
                user_id,
            )));
        }

        let member = self
            .members
            .add_member(&shopping_list_id, &user_id, role)
            .await
            .map_err(map_member_error)?;
        Ok(MemberAddDtoOut {
            awid: identity.awid().to_owned(),
            member: MemberDtoOut::from(member),
        })
    }

    async fn remove_member(
        &self,
        identity: &Identity,
        dto_in: MemberRemoveDtoIn,
    ) -> Result<MemberRemoveDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let user_id = require(dto_in.user_id, "userId")?;
        ensure_permission(identity, Permission::MemberManage)?;
        self.authorize_owner(identity, &shopping_list_id).await?;
        self.members
            .remove_member(&shopping_list_id, &user_id)
            .await
            .map_err(map_member_error)?;
        Ok(MemberRemoveDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            user_id,
        })
    }

    async fn leave(
        &self,
        identity: &Identity,
        dto_in: ShoppingListRefDtoIn,
    ) -> Result<MemberRemoveDtoOut, Failure> {
        let shopping_list_id = require(dto_in.shopping_list_id, "shoppingListId")?;
        let context = self.access_context(&shopping_list_id).await?;
        authorize(identity, require_member(Some(identity), &context.member_ids))?;
        self.members
            .remove_member(&shopping_list_id, identity.user_id())
            .await
            .map_err(map_member_error)?;
        Ok(MemberRemoveDtoOut {
            awid: identity.awid().to_owned(),
            shopping_list_id,
            user_id: identity.user_id().to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "shopping_list_service_tests.rs"]
mod tests;
