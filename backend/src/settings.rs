//! Server settings loaded via OrthoConfig.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_AWID;

const DEFAULT_PORT: u16 = 8080;

fn default_bind_addr() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

/// Values controlling how the server binds, stores data and seeds accounts.
///
/// Every field can be set through `SHOPPING_LIST_*` environment variables,
/// a configuration file or the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHOPPING_LIST")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Tenant id applied when requests omit the tenant header.
    pub default_awid: Option<String>,
    /// Register the demo accounts at startup; on unless set to `false`.
    pub seed_demo_users: Option<bool>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the configured default tenant id.
    pub fn default_awid(&self) -> &str {
        self.default_awid.as_deref().unwrap_or(DEFAULT_AWID)
    }

    /// Return whether the demo accounts are seeded, defaulting to `true`.
    pub fn seed_demo_users(&self) -> bool {
        self.seed_demo_users.unwrap_or(true)
    }

    /// Return the database URL when one is set and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "SHOPPING_LIST_BIND_ADDR",
        "SHOPPING_LIST_DATABASE_URL",
        "SHOPPING_LIST_DEFAULT_AWID",
        "SHOPPING_LIST_SEED_DEMO_USERS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("shopping-list")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), default_bind_addr());
        assert_eq!(settings.default_awid(), DEFAULT_AWID);
        assert!(settings.database_url().is_none());
        assert!(settings.seed_demo_users());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SHOPPING_LIST_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "SHOPPING_LIST_DATABASE_URL",
                Some("postgres://localhost/shopping".to_owned()),
            ),
            ("SHOPPING_LIST_DEFAULT_AWID", Some("awid-prod".to_owned())),
            ("SHOPPING_LIST_SEED_DEMO_USERS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/shopping")
        );
        assert_eq!(settings.default_awid(), "awid-prod");
        assert!(!settings.seed_demo_users());
    }

    #[rstest]
    fn blank_database_url_selects_the_memory_store() {
        let _guard = lock_env([
            ("SHOPPING_LIST_BIND_ADDR", None::<String>),
            ("SHOPPING_LIST_DATABASE_URL", Some("   ".to_owned())),
            ("SHOPPING_LIST_DEFAULT_AWID", None),
            ("SHOPPING_LIST_SEED_DEMO_USERS", None),
        ]);

        assert!(load_from_empty_args().database_url().is_none());
    }
}
