//! Driving port for registration and login.
//!
//! Inbound adapters call this port with validated credentials and never see
//! password digests or the backing store.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, Registration, User};

use super::define_port_error;

define_port_error! {
    /// Failures surfaced to the auth endpoints. Messages are the wire text.
    pub enum AccountError {
        /// Unknown email or wrong password.
        InvalidCredentials => "Invalid email or password",
        /// The email is already registered.
        EmailTaken => "User with this email already exists",
        /// The account store failed.
        Unavailable { message: String } => "account store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and return its public record.
    async fn register(&self, registration: Registration) -> Result<User, AccountError>;

    /// Check credentials and return the matching user.
    async fn login(&self, credentials: LoginCredentials) -> Result<User, AccountError>;
}
