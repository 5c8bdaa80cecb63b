//! Shopping list HTTP handlers.
//!
//! ```text
//! GET    /api/shoppingList/list
//! GET    /api/shoppingList/get
//! POST   /api/shoppingList/create
//! DELETE /api/shoppingList/delete
//! PUT    /api/shoppingList/rename
//! PUT    /api/shoppingList/archive
//! ```

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::validation::{
    validate_shopping_list_archive, validate_shopping_list_create, validate_shopping_list_delete,
    validate_shopping_list_get, validate_shopping_list_list, validate_shopping_list_rename,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::pipeline::{prepare, query_input};
use crate::inbound::http::schemas::{
    EnvelopeSchema, ShoppingListCreateSchema, ShoppingListIdSchema, ShoppingListRenameSchema,
};
use crate::inbound::http::state::HttpState;

/// Lists owned by or shared with the caller.
#[utoipa::path(
    get,
    path = "/api/shoppingList/list",
    params(("archived" = Option<bool>, Query, description = "Only archived (true) or active (false) lists")),
    responses(
        (status = 200, description = "Visible lists", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "listShoppingLists"
)]
#[get("/list")]
pub async fn list_shopping_lists(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> ApiResult<HttpResponse> {
    let input = query_input(query.into_inner());
    let (identity, dto_in) = prepare(&request, &state, &input, validate_shopping_list_list)?;
    let dto_out = state.shopping_lists.list(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// One list with its items and members.
#[utoipa::path(
    get,
    path = "/api/shoppingList/get",
    params(("id" = String, Query, description = "List id")),
    responses(
        (status = 200, description = "The list", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "getShoppingList"
)]
#[get("/get")]
pub async fn get_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> ApiResult<HttpResponse> {
    let input = query_input(query.into_inner());
    let (identity, dto_in) = prepare(&request, &state, &input, validate_shopping_list_get)?;
    let dto_out = state.shopping_lists.get(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Create a list owned by the caller.
#[utoipa::path(
    post,
    path = "/api/shoppingList/create",
    request_body = ShoppingListCreateSchema,
    responses(
        (status = 200, description = "Created list", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Profile lacks permission", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "createShoppingList"
)]
#[post("/create")]
pub async fn create_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_shopping_list_create)?;
    let dto_out = state.shopping_lists.create(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Delete a list together with its items and memberships.
#[utoipa::path(
    delete,
    path = "/api/shoppingList/delete",
    request_body = ShoppingListIdSchema,
    responses(
        (status = 200, description = "Deleted", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not the owner", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "deleteShoppingList"
)]
#[delete("/delete")]
pub async fn delete_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_shopping_list_delete)?;
    let dto_out = state.shopping_lists.delete(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Rename a list.
#[utoipa::path(
    put,
    path = "/api/shoppingList/rename",
    request_body = ShoppingListRenameSchema,
    responses(
        (status = 200, description = "Renamed list", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not the owner", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "renameShoppingList"
)]
#[put("/rename")]
pub async fn rename_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_shopping_list_rename)?;
    let dto_out = state.shopping_lists.rename(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Archive a list.
#[utoipa::path(
    put,
    path = "/api/shoppingList/archive",
    request_body = ShoppingListIdSchema,
    responses(
        (status = 200, description = "Archived list", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not the owner", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["shoppingList"],
    operation_id = "archiveShoppingList"
)]
#[put("/archive")]
pub async fn archive_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_shopping_list_archive)?;
    let dto_out = state.shopping_lists.archive(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

#[cfg(test)]
#[path = "shopping_lists_tests.rs"]
mod tests;
