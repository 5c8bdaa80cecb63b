//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; adapters convert them into
//! domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{shopping_list_items, shopping_list_members, shopping_lists, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub password_salt: String,
    pub password_hash: String,
}

/// Insertable struct for creating accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub password_salt: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Shopping list models
// ---------------------------------------------------------------------------

/// Row struct for reading from the shopping_lists table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListRow {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating lists; timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_lists)]
pub(crate) struct NewShoppingListRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub owner_id: &'a str,
}

// ---------------------------------------------------------------------------
// Item models
// ---------------------------------------------------------------------------

/// Row struct for reading from the shopping_list_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: String,
    pub name: String,
    pub product_id: Option<String>,
    pub quantity: Option<f64>,
    pub fit: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for appending items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_list_items)]
pub(crate) struct NewItemRow<'a> {
    pub id: &'a str,
    pub shopping_list_id: &'a str,
    pub name: &'a str,
    pub product_id: Option<&'a str>,
    pub quantity: Option<f64>,
    pub fit: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Member models
// ---------------------------------------------------------------------------

/// Row struct for reading from the shopping_list_members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_list_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: String,
    pub shopping_list_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Insertable struct for adding memberships.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_list_members)]
pub(crate) struct NewMemberRow<'a> {
    pub id: &'a str,
    pub shopping_list_id: &'a str,
    pub user_id: &'a str,
    pub role: &'a str,
}
