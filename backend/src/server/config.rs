//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::domain::DEFAULT_AWID;
use crate::outbound::persistence::DbPool;
use crate::settings::ServerSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) default_awid: String,
    pub(crate) seed_demo_users: bool,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` using the in-memory
    /// store and seeding the demo accounts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            default_awid: DEFAULT_AWID.to_owned(),
            seed_demo_users: true,
        }
    }

    /// Seed a configuration from loaded settings. The database pool is
    /// attached separately because building it is asynchronous.
    #[must_use]
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_addr())
            .with_default_awid(settings.default_awid())
            .with_demo_users(settings.seed_demo_users())
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the Diesel-backed repositories instead
    /// of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Tenant id applied to requests that omit the tenant header.
    #[must_use]
    pub fn with_default_awid(mut self, awid: impl Into<String>) -> Self {
        self.default_awid = awid.into();
        self
    }

    /// Toggle registration of the demo accounts at startup.
    #[must_use]
    pub fn with_demo_users(mut self, enabled: bool) -> Self {
        self.seed_demo_users = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
