//! Builders wiring repositories into the HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::ports::{
    ItemRepository, MemberRepository, ShoppingListRepository, UserRepository,
};
use crate::domain::{PasswordAccountService, ShoppingListService};
use crate::inbound::http::identity::HeaderIdentityExtractor;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DieselItemRepository, DieselMemberRepository, DieselShoppingListRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Repositories backing one running server.
struct Repositories<L, I, M, U> {
    lists: Arc<L>,
    items: Arc<I>,
    members: Arc<M>,
    users: Arc<U>,
}

async fn assemble<L, I, M, U>(
    repos: Repositories<L, I, M, U>,
    config: &ServerConfig,
) -> io::Result<HttpState>
where
    L: ShoppingListRepository + 'static,
    I: ItemRepository + 'static,
    M: MemberRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        lists,
        items,
        members,
        users,
    } = repos;
    let accounts = PasswordAccountService::new(users);
    if config.seed_demo_users {
        accounts
            .seed_demo_users()
            .await
            .map_err(|err| io::Error::other(format!("demo account seeding failed: {err}")))?;
    }
    Ok(HttpState::new(
        Arc::new(ShoppingListService::new(lists, items, members)),
        Arc::new(accounts),
        Arc::new(HeaderIdentityExtractor::new(config.default_awid.clone())),
    ))
}

/// Build the HTTP state, using Diesel adapters when a pool is configured and
/// a fresh in-memory store otherwise.
///
/// # Errors
/// Returns [`io::Error`] when seeding the demo accounts fails.
pub(super) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            let repos = Repositories {
                lists: Arc::new(DieselShoppingListRepository::new(pool.clone())),
                items: Arc::new(DieselItemRepository::new(pool.clone())),
                members: Arc::new(DieselMemberRepository::new(pool.clone())),
                users: Arc::new(DieselUserRepository::new(pool.clone())),
            };
            assemble(repos, config).await?
        }
        None => {
            info!("using in-memory store");
            let store = Arc::new(InMemoryStore::new());
            let repos = Repositories {
                lists: store.clone(),
                items: store.clone(),
                members: store.clone(),
                users: store,
            };
            assemble(repos, config).await?
        }
    };
    Ok(web::Data::new(state))
}
