//! Membership HTTP handlers.
//!
//! ```text
//! POST   /api/shoppingList/member/add
//! DELETE /api/shoppingList/member/remove
//! POST   /api/shoppingList/member/leave
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, post, web};
use serde_json::Value;

use crate::domain::validation::{validate_member_add, validate_member_leave, validate_member_remove};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::respond;
use crate::inbound::http::pipeline::prepare;
use crate::inbound::http::schemas::{
    EnvelopeSchema, MemberAddSchema, MemberRemoveSchema, ShoppingListRefSchema,
};
use crate::inbound::http::state::HttpState;

/// Share a list with another user. Owner only.
#[utoipa::path(
    post,
    path = "/api/shoppingList/member/add",
    request_body = MemberAddSchema,
    responses(
        (status = 200, description = "Added member", body = EnvelopeSchema),
        (status = 400, description = "Invalid input or already a member", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not the owner", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["members"],
    operation_id = "addMember"
)]
#[post("/member/add")]
pub async fn add_member(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_member_add)?;
    let dto_out = state.shopping_lists.add_member(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Revoke a user's membership. Owner only.
#[utoipa::path(
    delete,
    path = "/api/shoppingList/member/remove",
    request_body = MemberRemoveSchema,
    responses(
        (status = 200, description = "Removed member", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not the owner", body = EnvelopeSchema),
        (status = 404, description = "List or member not found", body = EnvelopeSchema)
    ),
    tags = ["members"],
    operation_id = "removeMember"
)]
#[delete("/member/remove")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_member_remove)?;
    let dto_out = state.shopping_lists.remove_member(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

/// Leave a list the caller is a member of.
#[utoipa::path(
    post,
    path = "/api/shoppingList/member/leave",
    request_body = ShoppingListRefSchema,
    responses(
        (status = 200, description = "Left the list", body = EnvelopeSchema),
        (status = 400, description = "Invalid input", body = EnvelopeSchema),
        (status = 401, description = "Missing identity", body = EnvelopeSchema),
        (status = 403, description = "Not a member", body = EnvelopeSchema),
        (status = 404, description = "List not found", body = EnvelopeSchema)
    ),
    tags = ["members"],
    operation_id = "leaveShoppingList"
)]
#[post("/member/leave")]
pub async fn leave_shopping_list(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (identity, dto_in) = prepare(&request, &state, &payload, validate_member_leave)?;
    let dto_out = state.shopping_lists.leave(&identity, dto_in).await?;
    Ok(respond(dto_out))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{as_user, memory_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn members_can_leave_but_owners_cannot() {
        let state = memory_state();
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let create = as_user(test::TestRequest::post().uri("/api/shoppingList/create"), "u1")
            .set_json(json!({"name": "Groceries"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, create).await;
        let id = body["dtoOut"]["id"].as_str().expect("list id").to_owned();

        let add = as_user(test::TestRequest::post().uri("/api/shoppingList/member/add"), "u1")
            .set_json(json!({"shoppingListId": id, "userId": "u2"}))
            .to_request();
        let added: serde_json::Value = test::call_and_read_body_json(&app, add).await;
        assert_eq!(added["dtoOut"]["role"], json!("Member"));

        let owner_leave = as_user(test::TestRequest::post().uri("/api/shoppingList/member/leave"), "u1")
            .set_json(json!({ "shoppingListId": id }))
            .to_request();
        let res = test::call_service(&app, owner_leave).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let member_leave =
            as_user(test::TestRequest::post().uri("/api/shoppingList/member/leave"), "u2")
                .set_json(json!({ "shoppingListId": id }))
                .to_request();
        let left: serde_json::Value = test::call_and_read_body_json(&app, member_leave).await;
        assert_eq!(left["dtoOut"]["userId"], json!("u2"));
    }

    #[rstest]
    #[actix_web::test]
    async fn removing_an_unknown_member_is_not_found() {
        let state = memory_state();
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let create = as_user(test::TestRequest::post().uri("/api/shoppingList/create"), "u1")
            .set_json(json!({"name": "Groceries"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, create).await;
        let id = body["dtoOut"]["id"].as_str().expect("list id").to_owned();

        let remove = as_user(test::TestRequest::delete().uri("/api/shoppingList/member/remove"), "u1")
            .set_json(json!({"shoppingListId": id, "userId": "u9"}))
            .to_request();
        let res = test::call_service(&app, remove).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            body["uuAppErrorMap"]["member"]["code"],
            json!("uu-shopping-list/memberNotFound")
        );
    }
}
