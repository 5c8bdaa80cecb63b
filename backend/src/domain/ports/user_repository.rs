//! Port abstraction for the account store and its errors.
use async_trait::async_trait;

use crate::domain::{User, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by login email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Store a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;
}
