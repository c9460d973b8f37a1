use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use charter_application::ResendVerificationUseCase;
use charter_core::{Email, EmailClient, UserStore, VerificationTokenStore};

use crate::config::PortalSetting;

use super::error::ApiError;
use super::{ApiData, MessageData};

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Secret<String>,
}

const RESEND_MESSAGE: &str =
    "If an account exists for that address, a verification email has been sent.";

/// Always answers with the same message, whether or not the address is
/// known. Anything else would let callers probe which emails are registered.
#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<U, V, E>(
    State((user_store, token_store, email_client)): State<(U, V, E)>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationTokenStore + 'static,
    E: EmailClient + 'static,
{
    if let Ok(email) = Email::try_from(request.email) {
        let setting = PortalSetting::load();
        let use_case = ResendVerificationUseCase::new(
            &user_store,
            &token_store,
            &email_client,
            &setting.app.public_url,
        );

        if let Err(error) = use_case.execute(email).await {
            tracing::warn!("Failed to resend verification email: {error}");
        }
    }

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new(RESEND_MESSAGE))),
    ))
}
