//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; these
//! wrappers mirror their wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorEntry)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorEntrySchema {
    /// Stable machine-readable code.
    #[schema(example = "uu-shopping-list/notOwner")]
    code: String,
    /// Human-readable message.
    #[schema(example = "User is not the owner of this shopping list")]
    message: String,
    /// Optional parameters describing the failure.
    param_map: Option<serde_json::Value>,
}

/// Response envelope returned by every shopping list endpoint.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::envelope::Envelope)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct EnvelopeSchema {
    /// Operation output; an empty object on failure.
    dto_out: serde_json::Value,
    /// Errors keyed by field or category.
    uu_app_error_map: std::collections::HashMap<String, ErrorEntrySchema>,
}

/// Body naming a list by `id`.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ShoppingListIdDtoIn)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ShoppingListIdSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
}

/// Body for creating a list.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ShoppingListCreateDtoIn)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ShoppingListCreateSchema {
    /// One to 255 characters.
    #[schema(example = "Groceries")]
    name: String,
}

/// Body for renaming a list.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ShoppingListRenameDtoIn)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ShoppingListRenameSchema {
    id: String,
    #[schema(example = "Weekend groceries")]
    name: String,
}

/// Body naming a list by `shoppingListId`.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ShoppingListRefDtoIn)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ShoppingListRefSchema {
    shopping_list_id: String,
}

/// Body for adding an item.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ItemAddDtoIn)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ItemAddSchema {
    shopping_list_id: String,
    #[schema(example = "Milk")]
    name: String,
    product_id: Option<String>,
    /// Non-negative amount.
    #[schema(example = 2)]
    quantity: Option<f64>,
    fit: Option<String>,
}

/// Body naming one item of a list.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::ItemRefDtoIn)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ItemRefSchema {
    shopping_list_id: String,
    item_id: String,
}

/// Body for adding a member.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::MemberAddDtoIn)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MemberAddSchema {
    shopping_list_id: String,
    user_id: String,
    /// `Owner` or `Member`; defaults to `Member`.
    role: Option<String>,
}

/// Body naming one member of a list.
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::MemberRemoveDtoIn)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MemberRemoveSchema {
    shopping_list_id: String,
    user_id: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(example = "user1")]
    id: String,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "john.doe@email.com")]
    email: Option<String>,
}
