//! End-to-end scenarios across the shopping list HTTP surface, served
//! in-process against the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

use shopping_list::api::health::HealthState;
use shopping_list::domain::{PasswordAccountService, ShoppingListService};
use shopping_list::inbound::http::identity::{
    AWID_HEADER, HeaderIdentityExtractor, IDENTITY_HEADER,
};
use shopping_list::inbound::http::state::HttpState;
use shopping_list::outbound::memory::InMemoryStore;
use shopping_list::server::build_app;

/// Clock that moves one second forward every time it is read.
struct SteppingClock {
    ticks: AtomicI64,
}

impl SteppingClock {
    fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(1_780_000_000 + tick, 0)
            .single()
            .unwrap_or_default()
    }
}

fn states() -> (web::Data<HealthState>, web::Data<HttpState>) {
    let store = Arc::new(InMemoryStore::with_clock(Arc::new(SteppingClock::new())));
    let http_state = HttpState::new(
        Arc::new(ShoppingListService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        Arc::new(PasswordAccountService::new(store)),
        Arc::new(HeaderIdentityExtractor::new("default-awid")),
    );
    (
        web::Data::new(HealthState::new()),
        web::Data::new(http_state),
    )
}

fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request
        .insert_header((IDENTITY_HEADER, user_id.to_owned()))
        .insert_header((AWID_HEADER, "awid-scenario"))
}

async fn send<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

fn code(body: &Value, key: &str) -> Option<String> {
    body["uuAppErrorMap"][key]["code"]
        .as_str()
        .map(str::to_owned)
}

#[rstest]
#[actix_web::test]
async fn only_the_owner_archives_a_list() {
    let (health, http) = states();
    let app = test::init_service(build_app(health, http)).await;

    let (status, created) = send(
        &app,
        as_user(TestRequest::post().uri("/api/shoppingList/create"), "u1")
            .set_json(json!({"name": "Groceries"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["dtoOut"]["state"], json!("active"));
    assert_eq!(created["dtoOut"]["awid"], json!("awid-scenario"));
    let id = created["dtoOut"]["id"].as_str().expect("list id").to_owned();

    let (status, refused) = send(
        &app,
        as_user(TestRequest::put().uri("/api/shoppingList/archive"), "u2")
            .set_json(json!({ "id": id }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        code(&refused, "authorization").as_deref(),
        Some("uu-shopping-list/notOwner")
    );
    assert_eq!(refused["dtoOut"], json!({}));

    let (status, archived) = send(
        &app,
        as_user(TestRequest::put().uri("/api/shoppingList/archive"), "u1")
            .set_json(json!({ "id": id }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["dtoOut"]["state"], json!("archived"));
    assert_eq!(archived["uuAppErrorMap"], json!({}));
}

#[rstest]
#[actix_web::test]
async fn duplicate_members_are_rejected_until_removed() {
    let (health, http) = states();
    let app = test::init_service(build_app(health, http)).await;

    let (_, created) = send(
        &app,
        as_user(TestRequest::post().uri("/api/shoppingList/create"), "u1")
            .set_json(json!({"name": "Party"}))
            .to_request(),
    )
    .await;
    let id = created["dtoOut"]["id"].as_str().expect("list id").to_owned();
    let add = || {
        as_user(TestRequest::post().uri("/api/shoppingList/member/add"), "u1")
            .set_json(json!({"shoppingListId": id, "userId": "u2"}))
            .to_request()
    };

    let (status, added) = send(&app, add()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["dtoOut"]["role"], json!("Member"));

    let (status, duplicate) = send(&app, add()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        code(&duplicate, "member").as_deref(),
        Some("uu-shopping-list/memberAlreadyExists")
    );

    let (status, _) = send(
        &app,
        as_user(TestRequest::delete().uri("/api/shoppingList/member/remove"), "u1")
            .set_json(json!({"shoppingListId": id, "userId": "u2"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, add()).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn completing_an_item_refreshes_its_timestamp() {
    let (health, http) = states();
    let app = test::init_service(build_app(health, http)).await;

    let (_, created) = send(
        &app,
        as_user(TestRequest::post().uri("/api/shoppingList/create"), "u1")
            .set_json(json!({"name": "Groceries"}))
            .to_request(),
    )
    .await;
    let id = created["dtoOut"]["id"].as_str().expect("list id").to_owned();

    let (status, added) = send(
        &app,
        as_user(TestRequest::post().uri("/api/shoppingList/item/add"), "u1")
            .set_json(json!({"shoppingListId": id, "name": "Milk", "quantity": 2}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["dtoOut"]["completed"], json!(false));
    assert_eq!(added["dtoOut"]["quantity"], json!(2));
    let item_id = added["dtoOut"]["id"].as_str().expect("item id").to_owned();
    let added_at = added["dtoOut"]["updatedAt"]
        .as_str()
        .expect("updatedAt")
        .to_owned();

    let (status, completed) = send(
        &app,
        as_user(TestRequest::put().uri("/api/shoppingList/item/complete"), "u1")
            .set_json(json!({"shoppingListId": id, "itemId": item_id}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["dtoOut"]["completed"], json!(true));

    let (status, listed) = send(
        &app,
        as_user(
            TestRequest::get().uri(&format!("/api/shoppingList/item/list?shoppingListId={id}")),
            "u1",
        )
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let item = &listed["dtoOut"]["items"][0];
    assert_eq!(item["name"], json!("Milk"));
    assert_eq!(item["completed"], json!(true));
    let refreshed: DateTime<Utc> = item["updatedAt"]
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("refreshed timestamp");
    let original: DateTime<Utc> = added_at.parse().expect("original timestamp");
    assert!(refreshed > original);
}

#[rstest]
#[actix_web::test]
async fn requests_without_identity_are_unauthorized() {
    let (health, http) = states();
    let app = test::init_service(build_app(health, http)).await;

    let (status, body) = send(
        &app,
        TestRequest::get().uri("/api/shoppingList/list").to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        code(&body, "authentication").as_deref(),
        Some("uu-shopping-list/unauthorized")
    );
}

#[rstest]
#[actix_web::test]
async fn registered_accounts_can_log_in() {
    let (health, http) = states();
    let app = test::init_service(build_app(health, http)).await;

    let (status, registered) = send(
        &app,
        TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Ada", "email": "ada@email.com", "password": "s3cret"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = registered["user"]["id"].as_str().expect("user id").to_owned();

    let (status, logged_in) = send(
        &app,
        TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@email.com", "password": "s3cret"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["user"]["id"], json!(user_id));
}
