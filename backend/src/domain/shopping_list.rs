//! Shopping list aggregates: lists, their items and memberships.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Lifecycle state derived from the archived flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListState {
    /// Not archived.
    Active,
    /// Archived by the owner.
    Archived,
}

impl ListState {
    /// State for the given archived flag.
    #[must_use]
    pub const fn from_archived(archived: bool) -> Self {
        if archived { Self::Archived } else { Self::Active }
    }
}

/// A shopping list with exactly one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    /// Opaque list id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// User id of the owner.
    pub owner_id: String,
    /// Whether the owner archived the list.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Derived lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ListState {
        ListState::from_archived(self.archived)
    }
}

/// Non-negative amount attached to an item.
///
/// Integral values serialise as JSON integers so `2` stays `2` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Quantity(f64);

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Quantity {
    /// Wrap a raw amount.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw amount.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    fn as_exact_integer(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_exact_integer() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// Item stored inside one shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Item id, unique within its list.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional catalogue product reference.
    pub product_id: Option<String>,
    /// Optional amount.
    pub quantity: Option<Quantity>,
    /// Optional variant or fit tag.
    pub fit: Option<String>,
    /// Whether the item has been ticked off.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp; refreshed on completion toggles.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Optional catalogue product reference.
    pub product_id: Option<String>,
    /// Optional amount.
    pub quantity: Option<Quantity>,
    /// Optional variant or fit tag.
    pub fit: Option<String>,
}

/// Role held by a member of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberRole {
    /// Owner role.
    Owner,
    /// Regular member; the default when adding.
    #[default]
    Member,
}

impl MemberRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Member => "Member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown member role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for MemberRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(Self::Owner),
            "Member" => Ok(Self::Member),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Membership of a user in a list. The `(shopping_list_id, user_id)` pair is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Membership id.
    pub id: String,
    /// Member's user id.
    pub user_id: String,
    /// List the membership belongs to.
    pub shopping_list_id: String,
    /// Role held in the list.
    pub role: MemberRole,
    /// When the user joined.
    pub joined_at: Option<DateTime<Utc>>,
}
