//! Response payloads returned under `dtoOut`.
//!
//! Every payload echoes the caller's tenant as `awid`. Timestamps serialise
//! as RFC 3339 strings via chrono's serde support.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::shopping_list::{Item, ListState, Member, MemberRole, Quantity, ShoppingList};

/// Header fields shared by list-shaped payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub id: String,
    /// List name.
    pub name: String,
    /// `active` or `archived`.
    pub state: ListState,
    /// Owner's user id.
    pub owner_uu_identity: String,
}

impl ShoppingListDtoOut {
    /// Project a stored list for the caller's tenant.
    #[must_use]
    pub fn from_list(awid: &str, list: &ShoppingList) -> Self {
        Self {
            awid: awid.to_owned(),
            id: list.id.clone(),
            name: list.name.clone(),
            state: list.state(),
            owner_uu_identity: list.owner_id.clone(),
        }
    }
}

/// One row of `shoppingList/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListSummary {
    /// List id.
    pub id: String,
    /// List name.
    pub name: String,
    /// `active` or `archived`.
    pub state: ListState,
    /// Owner's user id.
    pub owner_uu_identity: String,
    /// Raw archived flag.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&ShoppingList> for ShoppingListSummary {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            state: list.state(),
            owner_uu_identity: list.owner_id.clone(),
            archived: list.archived,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

/// `shoppingList/list` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListListDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// Lists owned by or shared with the caller.
    pub items: Vec<ShoppingListSummary>,
}

/// Item as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDtoOut {
    /// Item id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Optional product reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Optional amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    /// Optional variant tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Item> for ItemDtoOut {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            product_id: item.product_id,
            quantity: item.quantity,
            fit: item.fit,
            completed: item.completed,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Membership as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDtoOut {
    /// Membership id.
    pub id: String,
    /// Member's user id.
    pub user_id: String,
    /// List id.
    pub shopping_list_id: String,
    /// Granted role.
    pub role: MemberRole,
    /// Join timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl From<Member> for MemberDtoOut {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            user_id: member.user_id,
            shopping_list_id: member.shopping_list_id,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

/// `shoppingList/get` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListGetDtoOut {
    /// List header fields.
    #[serde(flatten)]
    pub list: ShoppingListDtoOut,
    /// Embedded items.
    pub items: Vec<ItemDtoOut>,
    /// Members of the list.
    pub members: Vec<MemberDtoOut>,
}

/// `shoppingList/delete` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListDeleteDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// Deleted list id.
    pub id: String,
}

/// `shoppingList/item/list` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub shopping_list_id: String,
    /// Items in insertion order.
    pub items: Vec<ItemDtoOut>,
}

/// `shoppingList/item/add` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAddDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub shopping_list_id: String,
    /// The created item.
    #[serde(flatten)]
    pub item: ItemDtoOut,
}

/// `shoppingList/item/remove` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRemoveDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub shopping_list_id: String,
    /// Removed item id.
    pub item_id: String,
}

/// `shoppingList/item/complete` and `uncomplete` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCompletionDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub shopping_list_id: String,
    /// Updated item id.
    pub item_id: String,
    /// New completion flag.
    pub completed: bool,
    /// Refreshed modification timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `shoppingList/member/add` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAddDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// The created membership.
    #[serde(flatten)]
    pub member: MemberDtoOut,
}

/// `shoppingList/member/remove` and `leave` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRemoveDtoOut {
    /// Caller's tenant.
    pub awid: String,
    /// List id.
    pub shopping_list_id: String,
    /// User whose membership ended.
    pub user_id: String,
}
