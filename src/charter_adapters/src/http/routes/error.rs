use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use charter_application::{
    ApproveUserError, ListPendingError, LoginError, LogoutError, RegisterError, RejectUserError,
    ResetPasswordError, VerifyEmailError,
};
use charter_core::{
    BannedTokenStoreError, SortKeyError, UserError, UserStoreError, VerificationTokenStoreError,
};

use crate::auth::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Token is invalid or has expired")]
    TokenInvalidOrExpired,

    #[error("Missing token")]
    MissingToken,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address has not been verified")]
    EmailNotVerified { email: String },

    #[error("Account is pending approval")]
    AccountPending,

    #[error("Administrator access required")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ApiError::InvalidInput(_) | ApiError::TokenInvalidOrExpired => StatusCode::BAD_REQUEST,

            ApiError::MissingToken
            | ApiError::AuthenticationError(_)
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,

            ApiError::EmailNotVerified { .. } | ApiError::AccountPending | ApiError::Forbidden => {
                StatusCode::FORBIDDEN
            }

            ApiError::UserNotFound => StatusCode::NOT_FOUND,

            ApiError::UserAlreadyExists => StatusCode::CONFLICT,

            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let email = match &self {
            ApiError::EmailNotVerified { email } => Some(email.clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
            email,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SortKeyError> for ApiError {
    fn from(error: SortKeyError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::UserAlreadyExists,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerificationTokenStoreError> for ApiError {
    fn from(error: VerificationTokenStoreError) -> Self {
        match error {
            VerificationTokenStoreError::InvalidOrExpired => ApiError::TokenInvalidOrExpired,
            VerificationTokenStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<BannedTokenStoreError> for ApiError {
    fn from(error: BannedTokenStoreError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::InvalidToken
            | TokenAuthError::TokenError(_)
            | TokenAuthError::TokenIsBanned => ApiError::AuthenticationError(error.to_string()),
            TokenAuthError::MissingToken => ApiError::MissingToken,
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::EmailNotVerified(email) => ApiError::EmailNotVerified {
                email: email.expose().to_string(),
            },
            LoginError::AccountPending => ApiError::AccountPending,
            LoginError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStoreError(e) => e.into(),
            RegisterError::TokenStoreError(e) => e.into(),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::TokenStoreError(e) => e.into(),
            // The bound user vanished between issue and consume. From the
            // browser's point of view the link simply no longer works.
            VerifyEmailError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::TokenInvalidOrExpired
            }
            VerifyEmailError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::TokenStoreError(e) => e.into(),
            ResetPasswordError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::TokenInvalidOrExpired
            }
            ResetPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::BannedTokenStoreError(e) => e.into(),
        }
    }
}

impl From<ListPendingError> for ApiError {
    fn from(error: ListPendingError) -> Self {
        match error {
            ListPendingError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ApproveUserError> for ApiError {
    fn from(error: ApproveUserError) -> Self {
        match error {
            ApproveUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<RejectUserError> for ApiError {
    fn from(error: RejectUserError) -> Self {
        match error {
            RejectUserError::UserStoreError(e) => e.into(),
        }
    }
}
