//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they stay testable against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{AccountService, ShoppingListOperations};

use super::identity::IdentityExtractor;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub shopping_lists: Arc<dyn ShoppingListOperations>,
    pub accounts: Arc<dyn AccountService>,
    pub identity: Arc<dyn IdentityExtractor>,
}

impl HttpState {
    /// Bundle the use-case ports with the identity extractor.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use shopping_list::domain::{PasswordAccountService, ShoppingListService};
    /// use shopping_list::inbound::http::identity::HeaderIdentityExtractor;
    /// use shopping_list::inbound::http::state::HttpState;
    /// use shopping_list::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::new(
    ///     Arc::new(ShoppingListService::new(store.clone(), store.clone(), store.clone())),
    ///     Arc::new(PasswordAccountService::new(store)),
    ///     Arc::new(HeaderIdentityExtractor::new("default-awid")),
    /// );
    /// let _lists = state.shopping_lists.clone();
    /// ```
    pub fn new(
        shopping_lists: Arc<dyn ShoppingListOperations>,
        accounts: Arc<dyn AccountService>,
        identity: Arc<dyn IdentityExtractor>,
    ) -> Self {
        Self {
            shopping_lists,
            accounts,
            identity,
        }
    }
}
