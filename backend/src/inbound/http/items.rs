//! Item HTTP handlers.
//!
//! ```text
//! GET    /api/shoppingList/item/list
//! POST   /api/shoppingList/item/add
//! DELETE /api/shoppingList/item/remove
//! PUT    /api/shoppingList/item/complete
//! PUT    /api/shoppingList/item/uncomplete
//! ```

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::validation::{
    validate_item_add, validate_item_complete, validate_item_list, validate_item_remove,
    validate_item_uncomplete,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::pipeline::{prepare, query_input};
use crate::inbound::http::schemas::{EnvelopeSchema, ItemAddSchema, ItemRefSchema};
use crate::inbound::http::state::HttpState;

/// Items of a list in insertion order.
#[utoipa::path(
    get,
    path = "/api/shoppingList/item/list",
    params(("shoppingListId" = String, Query, description = "List id")),
    responses(
        (status = 200, description = "Items", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/item/list")]
pub async fn list_items(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<HashMap<String, String>>,
) -> ApiResult<HttpResponse> {
    let input = query_input(query.into_inner());
    let (identity, dto_in) = prepare(&request, &state, &input, validate_item_list)?;
    let dto_out = state.shopping_lists.list_items(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Append an item to a list.
#[utoipa::path(
    post,
    path = "/api/shoppingList/item/add",
    request_body = ItemAddSchema,
    responses(
        (status = 200, description = "Added item", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["items"],
    operation_id = "addItem"
)]
#[post("/item/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_item_add)?;
    let dto_out = state.shopping_lists.add_item(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Remove an item from a list.
#[utoipa::path(
    delete,
    path = "/api/shoppingList/item/remove",
    request_body = ItemRefSchema,
    responses(
        (status = 200, description = "Removed", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List or item not found", body = EnvelopeSchema)
    ),
    tags = ["items"],
    operation_id = "removeItem"
)]
#[delete("/item/remove")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_item_remove)?;
    let dto_out = state.shopping_lists.remove_item(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Tick an item off.
#[utoipa::path(
    put,
    path = "/api/shoppingList/item/complete",
    request_body = ItemRefSchema,
    responses(
        (status = 200, description = "Completed", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List or item not found", body = EnvelopeSchema)
    ),
    tags = ["items"],
    operation_id = "completeItem"
)]
#[put("/item/complete")]
pub async fn complete_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_item_complete)?;
    let dto_out = state
        .shopping_lists
        .set_item_completion(&identity, dto_in, true)
        .await?;
    Ok(respond(dto_out))
}

/// Clear an item's completed flag.
#[utoipa::path(
    put,
    path = "/api/shoppingList/item/uncomplete",
    request_body = ItemRefSchema,
    responses(
        (status = 200, description = "Uncompleted", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Neither owner nor member", body = EnvelopeSchema),
        (status = 404, description = "List or item not found", body = EnvelopeSchema)
    ),
    tags = ["items"],
    operation_id = "uncompleteItem"
)]
#[put("/item/uncomplete")]
pub async fn uncomplete_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_item_uncomplete)?;
    let dto_out = state
        .shopping_lists
        .set_item_completion(&identity, dto_in, false)
        .await?;
    Ok(respond(dto_out))
}
