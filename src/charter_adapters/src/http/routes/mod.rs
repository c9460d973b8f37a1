pub mod error;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod resend_verification;
pub mod reset_password;
pub mod users;
pub mod verify_email;

pub use error::{ApiError, ErrorResponse};
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use login::{LoginRequest, SessionData, SessionResponse, login};
pub use logout::logout;
pub use me::me;
pub use register::{RegisterRequest, register};
pub use resend_verification::{ResendVerificationRequest, resend_verification};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use users::{ApprovalResponse, PendingListResponse, UpdateUserRequest, approve_user, list_pending, reject_user};
pub use verify_email::{VerifyEmailRequest, verify_email};

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use charter_core::{BannedTokenStore, Role};

use crate::auth::{Claims, extract_bearer_token, validate_auth_token};
use crate::config::PortalSetting;

/// Standard success envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiData<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiData<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate the bearer token and require the admin role.
pub(crate) async fn authorize_admin<B>(
    headers: &HeaderMap,
    banned_token_store: &B,
) -> Result<Claims, ApiError>
where
    B: BannedTokenStore,
{
    let token = extract_bearer_token(headers)?;
    let config = PortalSetting::load().auth.jwt.jwt_config();
    let claims = validate_auth_token(token, banned_token_store, &config).await?;

    if claims.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }

    Ok(claims)
}
