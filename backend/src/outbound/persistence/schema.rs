//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Text,
        name -> Text,
        /// Unique when present.
        email -> Nullable<Text>,
        /// Hex-encoded random salt.
        password_salt -> Text,
        /// Hex-encoded SHA-256 of salt and password.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shopping lists with a single owner.
    shopping_lists (id) {
        id -> Text,
        name -> Text,
        owner_id -> Text,
        archived -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Items embedded in a list; `position` preserves insertion order.
    shopping_list_items (id) {
        id -> Text,
        shopping_list_id -> Text,
        position -> Int8,
        name -> Text,
        product_id -> Nullable<Text>,
        quantity -> Nullable<Float8>,
        fit -> Nullable<Text>,
        completed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// List memberships, unique per `(shopping_list_id, user_id)`.
    shopping_list_members (id) {
        id -> Text,
        shopping_list_id -> Text,
        user_id -> Text,
        role -> Text,
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(shopping_list_items -> shopping_lists (shopping_list_id));
diesel::joinable!(shopping_list_members -> shopping_lists (shopping_list_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    shopping_lists,
    shopping_list_items,
    shopping_list_members,
);
