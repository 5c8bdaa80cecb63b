//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP scenario tests.
//! All state sits behind one mutex, so each port call is atomic with respect
//! to the others; the lock is never held across an await point.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::ports::{
    ItemRepository, ItemRepositoryError, MemberRepository, MemberRepositoryError,
    ShoppingListRepository, ShoppingListRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Item, Member, MemberRole, NewItem, ShoppingList, User, UserAccount};

const POISONED: &str = "in-memory store lock poisoned";

struct StoredList {
    list: ShoppingList,
    items: Vec<Item>,
}

#[derive(Default)]
struct StoreState {
    lists: BTreeMap<String, StoredList>,
    members: Vec<Member>,
    accounts: Vec<UserAccount>,
}

impl StoreState {
    fn is_member(&self, shopping_list_id: &str, user_id: &str) -> bool {
        self.members
            .iter()
            .any(|member| member.shopping_list_id == shopping_list_id && member.user_id == user_id)
    }
}

/// Mutex-guarded store for lists, items, members and accounts.
///
/// Construct one per application (or per test) and share it through `Arc`.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Empty store stamped with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Empty store stamped with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl ShoppingListRepository for InMemoryStore {
    async fn find_owner_id(&self, id: &str) -> Result<Option<String>, ShoppingListRepositoryError> {
        let state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        Ok(state.lists.get(id).map(|stored| stored.list.owner_id.clone()))
    }

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        Ok(state.lists.get(id).map(|stored| stored.list.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        archived: Option<bool>,
    ) -> Result<Vec<ShoppingList>, ShoppingListRepositoryError> {
        let state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let mut lists: Vec<ShoppingList> = state
            .lists
            .values()
            .map(|stored| &stored.list)
            .filter(|list| list.owner_id == user_id || state.is_member(&list.id, user_id))
            .filter(|list| archived.is_none_or(|wanted| list.archived == wanted))
            .cloned()
            .collect();
        lists.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(lists)
    }

    async fn create(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let now = self.clock.utc();
        let list = ShoppingList {
            id: fresh_id(),
            name: name.to_owned(),
            owner_id: owner_id.to_owned(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        state.lists.insert(
            list.id.clone(),
            StoredList {
                list: list.clone(),
                items: Vec::new(),
            },
        );
        Ok(list)
    }

    async fn rename(
        &self,
        id: &str,
        name: &str,
    ) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let stored = state
            .lists
            .get_mut(id)
            .ok_or_else(|| ShoppingListRepositoryError::not_found(id))?;
        name.clone_into(&mut stored.list.name);
        stored.list.updated_at = now;
        Ok(stored.list.clone())
    }

    async fn archive(&self, id: &str) -> Result<ShoppingList, ShoppingListRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        let stored = state
            .lists
            .get_mut(id)
            .ok_or_else(|| ShoppingListRepositoryError::not_found(id))?;
        stored.list.archived = true;
        stored.list.updated_at = now;
        Ok(stored.list.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ShoppingListRepositoryError> {
        let mut state = self.lock().map_err(ShoppingListRepositoryError::query)?;
        state
            .lists
            .remove(id)
            .ok_or_else(|| ShoppingListRepositoryError::not_found(id))?;
        state.members.retain(|member| member.shopping_list_id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn list_items(&self, shopping_list_id: &str) -> Result<Vec<Item>, ItemRepositoryError> {
        let state = self.lock().map_err(ItemRepositoryError::query)?;
        state
            .lists
            .get(shopping_list_id)
            .map(|stored| stored.items.clone())
            .ok_or_else(|| ItemRepositoryError::shopping_list_not_found(shopping_list_id))
    }

    async fn find_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<Item, ItemRepositoryError> {
        let state = self.lock().map_err(ItemRepositoryError::query)?;
        let stored = state
            .lists
            .get(shopping_list_id)
            .ok_or_else(|| ItemRepositoryError::shopping_list_not_found(shopping_list_id))?;
        stored
            .items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| ItemRepositoryError::item_not_found(item_id))
    }

    async fn add_item(
        &self,
        shopping_list_id: &str,
        item: &NewItem,
    ) -> Result<Item, ItemRepositoryError> {
        let now = self.clock.utc();
        let created = Item {
            id: fresh_id(),
            name: item.name.clone(),
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            fit: item.fit.clone(),
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
        };
        let mut state = self.lock().map_err(ItemRepositoryError::query)?;
        let stored = state
            .lists
            .get_mut(shopping_list_id)
            .ok_or_else(|| ItemRepositoryError::shopping_list_not_found(shopping_list_id))?;
        stored.items.push(created.clone());
        stored.list.updated_at = now;
        Ok(created)
    }

    async fn remove_item(
        &self,
        shopping_list_id: &str,
        item_id: &str,
    ) -> Result<(), ItemRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(ItemRepositoryError::query)?;
        let stored = state
            .lists
            .get_mut(shopping_list_id)
            .ok_or_else(|| ItemRepositoryError::shopping_list_not_found(shopping_list_id))?;
        let before = stored.items.len();
        stored.items.retain(|item| item.id != item_id);
        if stored.items.len() == before {
            return Err(ItemRepositoryError::item_not_found(item_id));
        }
        stored.list.updated_at = now;
        Ok(())
    }

    async fn set_completed(
        &self,
        shopping_list_id: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<Item, ItemRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(ItemRepositoryError::query)?;
        let stored = state
            .lists
            .get_mut(shopping_list_id)
            .ok_or_else(|| ItemRepositoryError::shopping_list_not_found(shopping_list_id))?;
        let item = stored
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ItemRepositoryError::item_not_found(item_id))?;
        item.completed = completed;
        item.updated_at = Some(now);
        let updated = item.clone();
        stored.list.updated_at = now;
        Ok(updated)
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn list_members(
        &self,
        shopping_list_id: &str,
    ) -> Result<Vec<Member>, MemberRepositoryError> {
        let state = self.lock().map_err(MemberRepositoryError::query)?;
        Ok(state
            .members
            .iter()
            .filter(|member| member.shopping_list_id == shopping_list_id)
            .cloned()
            .collect())
    }

    async fn member_ids(&self, shopping_list_id: &str) -> Result<Vec<String>, MemberRepositoryError> {
        let state = self.lock().map_err(MemberRepositoryError::query)?;
        Ok(state
            .members
            .iter()
            .filter(|member| member.shopping_list_id == shopping_list_id)
            .map(|member| member.user_id.clone())
            .collect())
    }

    async fn is_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<bool, MemberRepositoryError> {
        let state = self.lock().map_err(MemberRepositoryError::query)?;
        Ok(state.is_member(shopping_list_id, user_id))
    }

    async fn add_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Member, MemberRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(MemberRepositoryError::query)?;
        if !state.lists.contains_key(shopping_list_id) {
            return Err(MemberRepositoryError::query(format!(
                "shopping list {shopping_list_id} does not exist"
            )));
        }
        if state.is_member(shopping_list_id, user_id) {
            return Err(MemberRepositoryError::already_exists(shopping_list_id, user_id));
        }
        let member = Member {
            id: fresh_id(),
            user_id: user_id.to_owned(),
            shopping_list_id: shopping_list_id.to_owned(),
            role,
            joined_at: Some(now),
        };
        state.members.push(member.clone());
        Ok(member)
    }

    async fn remove_member(
        &self,
        shopping_list_id: &str,
        user_id: &str,
    ) -> Result<(), MemberRepositoryError> {
        let mut state = self.lock().map_err(MemberRepositoryError::query)?;
        let before = state.members.len();
        state
            .members
            .retain(|member| !(member.shopping_list_id == shopping_list_id && member.user_id == user_id));
        if state.members.len() == before {
            return Err(MemberRepositoryError::not_found(shopping_list_id, user_id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.user.id == id)
            .map(|account| account.user.clone()))
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if let Some(email) = account.user.email.as_deref() {
            let taken = state
                .accounts
                .iter()
                .any(|existing| existing.user.email.as_deref() == Some(email));
            if taken {
                return Err(UserRepositoryError::duplicate_email(email));
            }
        }
        state.accounts.push(account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
