//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::test::TestRequest;
use actix_web::web;

use crate::domain::{PasswordAccountService, ShoppingListService};
use crate::outbound::memory::InMemoryStore;

use super::identity::{AWID_HEADER, HeaderIdentityExtractor, IDENTITY_HEADER};
use super::state::HttpState;

/// State wired to a fresh in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new());
    web::Data::new(HttpState::new(
        Arc::new(ShoppingListService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        Arc::new(PasswordAccountService::new(store)),
        Arc::new(HeaderIdentityExtractor::new("default-awid")),
    ))
}

/// Attach the identity headers for `user_id` in tenant `awid-test`.
pub fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request
        .insert_header((IDENTITY_HEADER, user_id.to_owned()))
        .insert_header((AWID_HEADER, "awid-test"))
}
