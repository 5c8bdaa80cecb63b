//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the shopping list, item, member, auth and health endpoints
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that keep
//!   the domain types free of utoipa derives, plus the auth bodies
//! - **Security**: the `x-uu-identity` header carrying the caller's user id
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserResponse,
};
use crate::inbound::http::identity::IDENTITY_HEADER;
use crate::inbound::http::schemas::{
    EnvelopeSchema, ErrorEntrySchema, ItemAddSchema, ItemRefSchema, MemberAddSchema,
    MemberRemoveSchema, ShoppingListCreateSchema, ShoppingListIdSchema, ShoppingListRefSchema,
    ShoppingListRenameSchema, UserSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the identity header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "UuIdentity",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                IDENTITY_HEADER,
                "Id of the calling user. `x-uu-profile` and `x-awid` are optional companions.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shopping list API",
        description = "Collaborative shopping lists with owners, members and items."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("UuIdentity" = [])),
    paths(
        crate::inbound::http::shopping_lists::list_shopping_lists,
        crate::inbound::http::shopping_lists::get_shopping_list,
        crate::inbound::http::shopping_lists::create_shopping_list,
        crate::inbound::http::shopping_lists::delete_shopping_list,
        crate::inbound::http::shopping_lists::rename_shopping_list,
        crate::inbound::http::shopping_lists::archive_shopping_list,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::add_item,
        crate::inbound::http::items::remove_item,
        crate::inbound::http::items::complete_item,
        crate::inbound::http::items::uncomplete_item,
        crate::inbound::http::members::add_member,
        crate::inbound::http::members::remove_member,
        crate::inbound::http::members::leave_shopping_list,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        EnvelopeSchema,
        ErrorEntrySchema,
        ShoppingListIdSchema,
        ShoppingListCreateSchema,
        ShoppingListRenameSchema,
        ShoppingListRefSchema,
        ItemAddSchema,
        ItemRefSchema,
        MemberAddSchema,
        MemberRemoveSchema,
        UserSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        AuthResponse,
        MessageResponse,
    )),
    tags(
        (name = "shoppingList", description = "Create, read, rename, archive and delete lists"),
        (name = "items", description = "Items within a list"),
        (name = "members", description = "List membership"),
        (name = "auth", description = "Account registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
