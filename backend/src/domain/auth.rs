//! Authentication primitives: credentials, registrations and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const SALT_BYTES: usize = 16;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Login email or password missing.
    #[error("Email and password are required")]
    MissingLoginFields,
    /// Registration name, email or password missing.
    #[error("Name, email, and password are required")]
    MissingRegistrationFields,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use shopping_list::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" ada@example.com "), Some("pw"))
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw, possibly missing, inputs.
    ///
    /// # Errors
    /// Returns [`CredentialsValidationError::MissingLoginFields`] when either
    /// value is absent or empty.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        match (non_blank(email), non_empty(password)) {
            (Some(email), Some(password)) => Ok(Self {
                email: email.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(CredentialsValidationError::MissingLoginFields),
        }
    }

    /// Email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw, possibly missing, inputs.
    ///
    /// # Errors
    /// Returns [`CredentialsValidationError::MissingRegistrationFields`] when
    /// any value is absent or empty.
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        match (non_blank(name), non_blank(email), non_empty(password)) {
            (Some(name), Some(email), Some(password)) => Ok(Self {
                name: name.to_owned(),
                email: email.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(CredentialsValidationError::MissingRegistrationFields),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Salted SHA-256 digest of a password, both parts hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: String,
    hash: String,
}

impl PasswordDigest {
    /// Digest `password` under a fresh random salt.
    #[must_use]
    pub fn generate(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive(password, &hex::encode(salt))
    }

    /// Digest `password` under an existing hex salt.
    #[must_use]
    pub fn derive(password: &str, salt: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        Self {
            salt: salt.to_owned(),
            hash: hex::encode(hasher.finalize()),
        }
    }

    /// Rebuild a digest read from storage.
    pub fn from_stored(salt: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            hash: hash.into(),
        }
    }

    /// Whether `password` produces this digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        Self::derive(password, &self.salt).hash == self.hash
    }

    /// Hex salt.
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex digest.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}
