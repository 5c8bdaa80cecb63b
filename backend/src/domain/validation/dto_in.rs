//! Per-operation input shapes and their validators.
//!
//! Validators accept an untyped JSON value and return a [`Validated`]
//! holding only the fields that passed their rules. Failed fields are left
//! as `None`, never defaulted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::{FieldReader, NumberRule, StringRule};
use super::Validated;
use crate::domain::error_map::ErrorEntry;
use crate::domain::shopping_list::{MemberRole, Quantity};

const NAME_RULE: StringRule = StringRule::required().with_length(1, 255);
const ID_RULE: StringRule = StringRule::required();
const OPTIONAL_TEXT: StringRule = StringRule::optional();

fn validate_with<T, F>(input: &Value, build: F) -> Validated<T>
where
    T: Default,
    F: FnOnce(&mut FieldReader<'_>) -> T,
{
    match FieldReader::new(input) {
        Ok(mut reader) => {
            let dto_in = build(&mut reader);
            Validated::from_parts(dto_in, reader.finish())
        }
        Err(errors) => Validated::from_parts(T::default(), errors),
    }
}

/// `shoppingList/list` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListListDtoIn {
    /// Restrict to archived (`true`) or active (`false`) lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// `shoppingList/get`, `shoppingList/delete` and `shoppingList/archive` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListIdDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// `shoppingList/create` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListCreateDtoIn {
    /// Name of the new list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `shoppingList/rename` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRenameDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `shoppingList/item/list` and `shoppingList/member/leave` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRefDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<String>,
}

/// `shoppingList/item/add` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAddDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<String>,
    /// Item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional product reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Optional amount, at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    /// Optional variant tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
}

/// `shoppingList/item/remove`, `complete` and `uncomplete` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRefDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<String>,
    /// Target item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// `shoppingList/member/add` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAddDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<String>,
    /// User to add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Role to grant; `Member` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

/// `shoppingList/member/remove` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRemoveDtoIn {
    /// Target list id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list_id: Option<String>,
    /// User to remove.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Validate `shoppingList/list` input.
#[must_use]
pub fn validate_shopping_list_list(input: &Value) -> Validated<ShoppingListListDtoIn> {
    validate_with(input, |reader| ShoppingListListDtoIn {
        archived: reader.boolean("archived", false),
    })
}

fn validate_list_id(input: &Value) -> Validated<ShoppingListIdDtoIn> {
    validate_with(input, |reader| ShoppingListIdDtoIn {
        id: reader.string("id", ID_RULE),
    })
}

/// Validate `shoppingList/get` input.
#[must_use]
pub fn validate_shopping_list_get(input: &Value) -> Validated<ShoppingListIdDtoIn> {
    validate_list_id(input)
}

/// Validate `shoppingList/create` input.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use shopping_list::domain::validation::validate_shopping_list_create;
///
/// let validated = validate_shopping_list_create(&json!({"name": "Groceries"}));
/// assert!(validated.is_valid());
/// assert_eq!(validated.dto_in().name.as_deref(), Some("Groceries"));
/// ```
#[must_use]
pub fn validate_shopping_list_create(input: &Value) -> Validated<ShoppingListCreateDtoIn> {
    validate_with(input, |reader| ShoppingListCreateDtoIn {
        name: reader.string("name", NAME_RULE),
    })
}

/// Validate `shoppingList/delete` input.
#[must_use]
pub fn validate_shopping_list_delete(input: &Value) -> Validated<ShoppingListIdDtoIn> {
    validate_list_id(input)
}

/// Validate `shoppingList/rename` input.
#[must_use]
pub fn validate_shopping_list_rename(input: &Value) -> Validated<ShoppingListRenameDtoIn> {
    validate_with(input, |reader| ShoppingListRenameDtoIn {
        id: reader.string("id", ID_RULE),
        name: reader.string("name", NAME_RULE),
    })
}

/// Validate `shoppingList/archive` input.
#[must_use]
pub fn validate_shopping_list_archive(input: &Value) -> Validated<ShoppingListIdDtoIn> {
    validate_list_id(input)
}

fn validate_list_ref(input: &Value) -> Validated<ShoppingListRefDtoIn> {
    validate_with(input, |reader| ShoppingListRefDtoIn {
        shopping_list_id: reader.string("shoppingListId", ID_RULE),
    })
}

/// Validate `shoppingList/item/list` input.
#[must_use]
pub fn validate_item_list(input: &Value) -> Validated<ShoppingListRefDtoIn> {
    validate_list_ref(input)
}

/// Validate `shoppingList/item/add` input.
#[must_use]
pub fn validate_item_add(input: &Value) -> Validated<ItemAddDtoIn> {
    validate_with(input, |reader| ItemAddDtoIn {
        shopping_list_id: reader.string("shoppingListId", ID_RULE),
        name: reader.string("name", NAME_RULE),
        product_id: reader.string("productId", OPTIONAL_TEXT),
        quantity: reader
            .number("quantity", NumberRule::optional().with_min(1.0))
            .map(Quantity::new),
        fit: reader.string("fit", OPTIONAL_TEXT),
    })
}

fn validate_item_ref(input: &Value) -> Validated<ItemRefDtoIn> {
    validate_with(input, |reader| ItemRefDtoIn {
        shopping_list_id: reader.string("shoppingListId", ID_RULE),
        item_id: reader.string("itemId", ID_RULE),
    })
}

/// Validate `shoppingList/item/remove` input.
#[must_use]
pub fn validate_item_remove(input: &Value) -> Validated<ItemRefDtoIn> {
    validate_item_ref(input)
}

/// Validate `shoppingList/item/complete` input.
#[must_use]
pub fn validate_item_complete(input: &Value) -> Validated<ItemRefDtoIn> {
    validate_item_ref(input)
}

/// Validate `shoppingList/item/uncomplete` input.
#[must_use]
pub fn validate_item_uncomplete(input: &Value) -> Validated<ItemRefDtoIn> {
    validate_item_ref(input)
}

/// Validate `shoppingList/member/add` input.
#[must_use]
pub fn validate_member_add(input: &Value) -> Validated<MemberAddDtoIn> {
    validate_with(input, |reader| {
        let shopping_list_id = reader.string("shoppingListId", ID_RULE);
        let user_id = reader.string("userId", ID_RULE);
        let role = reader
            .string("role", OPTIONAL_TEXT)
            .and_then(|raw| match raw.parse::<MemberRole>() {
                Ok(role) => Some(role),
                Err(_) => {
                    reader.reject(
                        "role",
                        ErrorEntry::invalid_field_value("role", "allowed values are Owner, Member"),
                    );
                    None
                }
            });
        MemberAddDtoIn {
            shopping_list_id,
            user_id,
            role,
        }
    })
}

/// Validate `shoppingList/member/remove` input.
#[must_use]
pub fn validate_member_remove(input: &Value) -> Validated<MemberRemoveDtoIn> {
    validate_with(input, |reader| MemberRemoveDtoIn {
        shopping_list_id: reader.string("shoppingListId", ID_RULE),
        user_id: reader.string("userId", ID_RULE),
    })
}

/// Validate `shoppingList/member/leave` input.
#[must_use]
pub fn validate_member_leave(input: &Value) -> Validated<ShoppingListRefDtoIn> {
    validate_list_ref(input)
}

#[cfg(test)]
#[path = "dto_in_tests.rs"]
mod tests;
