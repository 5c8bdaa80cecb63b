//! Keyed error maps returned in every response envelope.
//!
//! An [`ErrorMap`] associates a logical key (a field name such as `name`, or a
//! category such as `authentication`, `authorization`, `shoppingList`, `item`,
//! `member` and `database`) with exactly one [`ErrorEntry`]. Independent
//! failures coexist under distinct keys. Merging is explicit and ordered: when
//! two maps share a key the entry from the later map replaces the earlier one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key used for whole-payload input failures.
pub const DTO_IN_KEY: &str = "dtoIn";
/// Key used for identity failures.
pub const AUTHENTICATION_KEY: &str = "authentication";
/// Key used for role and permission failures.
pub const AUTHORIZATION_KEY: &str = "authorization";
/// Key used for shopping list lookups.
pub const SHOPPING_LIST_KEY: &str = "shoppingList";
/// Key used for item lookups.
pub const ITEM_KEY: &str = "item";
/// Key used for membership lookups and conflicts.
pub const MEMBER_KEY: &str = "member";
/// Key used for account lookups.
pub const USER_KEY: &str = "user";
/// Key used when the storage layer fails unexpectedly.
pub const DATABASE_KEY: &str = "database";

/// Stable machine-readable error codes.
///
/// Codes serialise to the `uu-shopping-list/<name>` strings clients match on.
///
/// # Examples
/// ```
/// use shopping_list::domain::AppErrorCode;
///
/// assert_eq!(AppErrorCode::NotOwner.as_str(), "uu-shopping-list/notOwner");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppErrorCode {
    /// The payload is missing or is not an object.
    #[serde(rename = "uu-shopping-list/invalidDtoIn")]
    InvalidDtoIn,
    /// A required field was absent or `null`.
    #[serde(rename = "uu-shopping-list/missingRequiredField")]
    MissingRequiredField,
    /// A field carried a value of the wrong JSON type.
    #[serde(rename = "uu-shopping-list/invalidFieldType")]
    InvalidFieldType,
    /// A field was well typed but outside its allowed range.
    #[serde(rename = "uu-shopping-list/invalidFieldValue")]
    InvalidFieldValue,
    /// No caller identity could be established.
    #[serde(rename = "uu-shopping-list/unauthorized")]
    Unauthorized,
    /// The caller's session is not valid.
    #[serde(rename = "uu-shopping-list/invalidSession")]
    InvalidSession,
    /// Generic access refusal.
    #[serde(rename = "uu-shopping-list/forbidden")]
    Forbidden,
    /// The caller's profile lacks the required permission.
    #[serde(rename = "uu-shopping-list/insufficientPermissions")]
    InsufficientPermissions,
    /// The caller does not own the shopping list.
    #[serde(rename = "uu-shopping-list/notOwner")]
    NotOwner,
    /// The caller is neither owner nor member of the shopping list.
    #[serde(rename = "uu-shopping-list/notMember")]
    NotMember,
    /// No shopping list exists with the requested id.
    #[serde(rename = "uu-shopping-list/shoppingListNotFound")]
    ShoppingListNotFound,
    /// No item exists with the requested id in the list.
    #[serde(rename = "uu-shopping-list/itemNotFound")]
    ItemNotFound,
    /// The user is not a member of the list.
    #[serde(rename = "uu-shopping-list/memberNotFound")]
    MemberNotFound,
    /// No user account matches the lookup.
    #[serde(rename = "uu-shopping-list/userNotFound")]
    UserNotFound,
    /// The list has already been archived.
    #[serde(rename = "uu-shopping-list/shoppingListAlreadyArchived")]
    ShoppingListAlreadyArchived,
    /// The list is still active.
    #[serde(rename = "uu-shopping-list/shoppingListNotArchived")]
    ShoppingListNotArchived,
    /// The (list, user) membership pair already exists.
    #[serde(rename = "uu-shopping-list/memberAlreadyExists")]
    MemberAlreadyExists,
    /// The item is already completed.
    #[serde(rename = "uu-shopping-list/itemAlreadyCompleted")]
    ItemAlreadyCompleted,
    /// The item is not completed.
    #[serde(rename = "uu-shopping-list/itemNotCompleted")]
    ItemNotCompleted,
}

impl AppErrorCode {
    /// Return the wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDtoIn => "uu-shopping-list/invalidDtoIn",
            Self::MissingRequiredField => "uu-shopping-list/missingRequiredField",
            Self::InvalidFieldType => "uu-shopping-list/invalidFieldType",
            Self::InvalidFieldValue => "uu-shopping-list/invalidFieldValue",
            Self::Unauthorized => "uu-shopping-list/unauthorized",
            Self::InvalidSession => "uu-shopping-list/invalidSession",
            Self::Forbidden => "uu-shopping-list/forbidden",
            Self::InsufficientPermissions => "uu-shopping-list/insufficientPermissions",
            Self::NotOwner => "uu-shopping-list/notOwner",
            Self::NotMember => "uu-shopping-list/notMember",
            Self::ShoppingListNotFound => "uu-shopping-list/shoppingListNotFound",
            Self::ItemNotFound => "uu-shopping-list/itemNotFound",
            Self::MemberNotFound => "uu-shopping-list/memberNotFound",
            Self::UserNotFound => "uu-shopping-list/userNotFound",
            Self::ShoppingListAlreadyArchived => "uu-shopping-list/shoppingListAlreadyArchived",
            Self::ShoppingListNotArchived => "uu-shopping-list/shoppingListNotArchived",
            Self::MemberAlreadyExists => "uu-shopping-list/memberAlreadyExists",
            Self::ItemAlreadyCompleted => "uu-shopping-list/itemAlreadyCompleted",
            Self::ItemNotCompleted => "uu-shopping-list/itemNotCompleted",
        }
    }
}

impl fmt::Display for AppErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failure: code, human message and optional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    code: AppErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    param_map: Option<Map<String, Value>>,
}

impl ErrorEntry {
    /// Build an entry without parameters.
    pub fn new(code: AppErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            param_map: None,
        }
    }

    /// Attach a parameter map to the entry.
    #[must_use]
    pub fn with_param_map(mut self, param_map: Map<String, Value>) -> Self {
        self.param_map = Some(param_map);
        self
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> AppErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional parameters supplied with the error.
    #[must_use]
    pub const fn param_map(&self) -> Option<&Map<String, Value>> {
        self.param_map.as_ref()
    }

    /// "Invalid input data".
    #[must_use]
    pub fn invalid_dto_in() -> Self {
        Self::new(AppErrorCode::InvalidDtoIn, "Invalid input data")
    }

    /// Required field absent or `null`.
    #[must_use]
    pub fn missing_required_field(field: &str) -> Self {
        Self::new(
            AppErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Field holds a value of the wrong JSON type.
    #[must_use]
    pub fn invalid_field_type(field: &str, expected: &str) -> Self {
        Self::new(
            AppErrorCode::InvalidFieldType,
            format!("Invalid type for field {field}, expected {expected}"),
        )
    }

    /// Field holds a value outside its constraints; `detail` names the bound.
    #[must_use]
    pub fn invalid_field_value(field: &str, detail: &str) -> Self {
        Self::new(
            AppErrorCode::InvalidFieldValue,
            format!("Invalid value for field {field}: {detail}"),
        )
    }

    /// "User is not authenticated".
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(AppErrorCode::Unauthorized, "User is not authenticated")
    }

    /// "Access denied".
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(AppErrorCode::Forbidden, "Access denied")
    }

    /// "Insufficient permissions".
    #[must_use]
    pub fn insufficient_permissions() -> Self {
        Self::new(
            AppErrorCode::InsufficientPermissions,
            "Insufficient permissions",
        )
    }

    /// "User is not the owner of this shopping list".
    #[must_use]
    pub fn not_owner() -> Self {
        Self::new(
            AppErrorCode::NotOwner,
            "User is not the owner of this shopping list",
        )
    }

    /// "User is not a member of this shopping list".
    #[must_use]
    pub fn not_member() -> Self {
        Self::new(
            AppErrorCode::NotMember,
            "User is not a member of this shopping list",
        )
    }

    /// "Shopping list not found".
    #[must_use]
    pub fn shopping_list_not_found() -> Self {
        Self::new(AppErrorCode::ShoppingListNotFound, "Shopping list not found")
    }

    /// "Item not found".
    #[must_use]
    pub fn item_not_found() -> Self {
        Self::new(AppErrorCode::ItemNotFound, "Item not found")
    }

    /// "Member not found".
    #[must_use]
    pub fn member_not_found() -> Self {
        Self::new(AppErrorCode::MemberNotFound, "Member not found")
    }

    /// "User not found".
    #[must_use]
    pub fn user_not_found() -> Self {
        Self::new(AppErrorCode::UserNotFound, "User not found")
    }

    /// "Member already exists in this shopping list".
    #[must_use]
    pub fn member_already_exists() -> Self {
        Self::new(
            AppErrorCode::MemberAlreadyExists,
            "Member already exists in this shopping list",
        )
    }

    /// Generic storage failure; internal detail never reaches the client.
    #[must_use]
    pub fn database() -> Self {
        Self::new(AppErrorCode::InvalidDtoIn, "Database error occurred")
    }
}

/// Mapping from logical key to one [`ErrorEntry`].
///
/// Serialises as a plain JSON object. Keys iterate in sorted order so the
/// wire form is deterministic.
///
/// # Examples
/// ```
/// use shopping_list::domain::{ErrorEntry, ErrorMap};
///
/// let map = ErrorMap::single("name", ErrorEntry::missing_required_field("name"));
/// assert_eq!(map.len(), 1);
/// assert!(map.contains_key("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, ErrorEntry>);

impl ErrorMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding one entry.
    pub fn single(key: impl Into<String>, entry: ErrorEntry) -> Self {
        let mut map = Self::new();
        map.insert(key, entry);
        map
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, entry: ErrorEntry) -> Option<ErrorEntry> {
        self.0.insert(key.into(), entry)
    }

    /// Look up the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.0.get(key)
    }

    /// Whether an entry exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.0.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Merge `other` into `self`; entries from `other` win on shared keys.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Consume `self`, merge `other` into it and return the result.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, ErrorEntry);
    type IntoIter = std::collections::btree_map::IntoIter<String, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, ErrorEntry)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (String, ErrorEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Merge maps left to right with last-write-wins semantics.
///
/// Entries under distinct keys are all preserved; when several maps carry
/// the same key, the entry from the map appearing last in `maps` is kept.
///
/// # Examples
/// ```
/// use shopping_list::domain::{merge_error_maps, AppErrorCode, ErrorEntry, ErrorMap};
///
/// let first = ErrorMap::single("name", ErrorEntry::missing_required_field("name"));
/// let second = ErrorMap::single("name", ErrorEntry::invalid_field_type("name", "string"));
/// let merged = merge_error_maps([first, second]);
/// assert_eq!(
///     merged.get("name").map(ErrorEntry::code),
///     Some(AppErrorCode::InvalidFieldType)
/// );
/// ```
pub fn merge_error_maps<I>(maps: I) -> ErrorMap
where
    I: IntoIterator<Item = ErrorMap>,
{
    maps.into_iter().fold(ErrorMap::new(), ErrorMap::merged_with)
}
