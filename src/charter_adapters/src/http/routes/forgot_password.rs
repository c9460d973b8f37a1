use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use charter_application::ForgotPasswordUseCase;
use charter_core::{Email, EmailClient, UserStore, VerificationTokenStore};

use crate::config::PortalSetting;

use super::error::ApiError;
use super::{ApiData, MessageData};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

const FORGOT_MESSAGE: &str =
    "If an account exists for that address, a password reset email has been sent.";

/// Same anti-enumeration contract as resend-verification: one message,
/// regardless of whether the address is registered.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, V, E>(
    State((user_store, token_store, email_client)): State<(U, V, E)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationTokenStore + 'static,
    E: EmailClient + 'static,
{
    if let Ok(email) = Email::try_from(request.email) {
        let setting = PortalSetting::load();
        let use_case = ForgotPasswordUseCase::new(
            &user_store,
            &token_store,
            &email_client,
            &setting.app.public_url,
        );

        if let Err(error) = use_case.execute(email).await {
            tracing::warn!("Failed to send password reset email: {error}");
        }
    }

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new(FORGOT_MESSAGE))),
    ))
}
