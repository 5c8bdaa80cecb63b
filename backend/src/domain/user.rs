//! User data model.

use serde::{Deserialize, Serialize};

use super::auth::PasswordDigest;

/// Registered user as returned to clients.
///
/// The id is immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id, used as `x-uu-identity` by clients.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email; unique across accounts when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Construct a user.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email,
        }
    }
}

/// A user together with the stored password digest.
///
/// Never serialised; the digest stays inside the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public user record.
    pub user: User,
    /// Salted digest of the password.
    pub password: PasswordDigest,
}

/// A demo account registered at startup when seeding is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoUser {
    /// Fixed user id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Login email.
    pub email: &'static str,
}

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// Demo accounts available on a fresh store.
pub const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        id: "user1",
        name: "John Doe",
        email: "john.doe@email.com",
    },
    DemoUser {
        id: "user2",
        name: "Jane Smith",
        email: "jane.smith@email.com",
    },
    DemoUser {
        id: "user3",
        name: "Peter Jones",
        email: "peter.jones@email.com",
    },
];

impl DemoUser {
    /// Materialise the account with a freshly salted digest of [`DEMO_PASSWORD`].
    #[must_use]
    pub fn to_account(self) -> UserAccount {
        UserAccount {
            user: User::new(self.id, self.name, Some(self.email.to_owned())),
            password: PasswordDigest::generate(DEMO_PASSWORD),
        }
    }
}
