//! Account registration and login over a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use super::ports::{AccountError, AccountService, UserRepository, UserRepositoryError};
use super::{DEMO_USERS, LoginCredentials, PasswordDigest, Registration, User, UserAccount};

/// Account service storing salted password digests.
pub struct PasswordAccountService<R> {
    users: Arc<R>,
}

impl<R> Clone for PasswordAccountService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<R> PasswordAccountService<R> {
    /// Create a service over the given store.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserRepositoryError) -> AccountError {
    match error {
        UserRepositoryError::DuplicateEmail { .. } => AccountError::email_taken(),
        UserRepositoryError::Connection { message } | UserRepositoryError::Query { message } => {
            error!(%message, "account store failed");
            AccountError::unavailable(message)
        }
    }
}

impl<R: UserRepository> PasswordAccountService<R> {
    /// Register the demo accounts that are not present yet.
    ///
    /// # Errors
    /// Returns [`AccountError::Unavailable`] when the store fails.
    pub async fn seed_demo_users(&self) -> Result<usize, AccountError> {
        let mut inserted = 0;
        for demo in DEMO_USERS {
            let existing = self
                .users
                .find_by_email(demo.email)
                .await
                .map_err(map_user_error)?;
            if existing.is_some() {
                continue;
            }
            match self.users.insert(&demo.to_account()).await {
                Ok(()) => inserted += 1,
                Err(UserRepositoryError::DuplicateEmail { .. }) => {}
                Err(other) => return Err(map_user_error(other)),
            }
        }
        info!(inserted, "demo accounts seeded");
        Ok(inserted)
    }
}

#[async_trait]
impl<R: UserRepository> AccountService for PasswordAccountService<R> {
    async fn register(&self, registration: Registration) -> Result<User, AccountError> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(AccountError::email_taken());
        }

        let account = UserAccount {
            user: User::new(
                Uuid::new_v4().to_string(),
                registration.name(),
                Some(registration.email().to_owned()),
            ),
            password: PasswordDigest::generate(registration.password()),
        };
        self.users.insert(&account).await.map_err(map_user_error)?;
        Ok(account.user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<User, AccountError> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(AccountError::invalid_credentials)?;
        if account.password.verify(credentials.password()) {
            Ok(account.user)
        } else {
            Err(AccountError::invalid_credentials())
        }
    }
}
