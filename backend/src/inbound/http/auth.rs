//! Registration and login HTTP handlers.
//!
//! ```text
//! POST /api/auth/register {"name","email","password"}
//! POST /api/auth/login    {"email","password"}
//! ```
//!
//! These endpoints answer with `{user}` or `{message}` bodies rather than the
//! shopping list envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::ports::AccountError;
use crate::domain::{CredentialsValidationError, LoginCredentials, Registration, User};
use crate::inbound::http::state::HttpState;

/// Registration payload. Every field is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialsValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
    }
}

/// Login payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

/// Public user record returned by both endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Body wrapping the authenticated or registered user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
}

impl From<User> for AuthResponse {
    fn from(user: User) -> Self {
        Self {
            user: UserResponse {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        }
    }
}

/// `{message}` error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Failure of an auth endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The payload lacks a required field.
    #[error(transparent)]
    Validation(#[from] CredentialsValidationError),
    /// The account service refused or failed.
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Account(AccountError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Account(AccountError::EmailTaken) => StatusCode::CONFLICT,
            Self::Account(AccountError::Unavailable { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Account(AccountError::Unavailable { message }) => {
                error!(%message, "account store unavailable");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(MessageResponse { message })
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered user", body = AuthResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> Result<web::Json<AuthResponse>, AuthError> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.accounts.register(registration).await?;
    debug!(user_id = user.id.as_str(), "account registered");
    Ok(web::Json(AuthResponse::from(user)))
}

/// Check credentials and return the user.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated user", body = AuthResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> Result<web::Json<AuthResponse>, AuthError> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.accounts.login(credentials).await?;
    Ok(web::Json(AuthResponse::from(user)))
}
