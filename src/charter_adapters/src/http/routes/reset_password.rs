use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use charter_application::ResetPasswordUseCase;
use charter_core::{Password, UserStore, VerificationTokenStore};

use super::error::ApiError;
use super::{ApiData, MessageData};

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, V>(
    State((user_store, token_store)): State<(U, V)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationTokenStore + 'static,
{
    let token = request.token.trim();
    if token.is_empty() {
        return Err(ApiError::InvalidInput("Missing token".to_string()));
    }

    let password = Password::try_from(request.password)?;

    let use_case = ResetPasswordUseCase::new(&user_store, &token_store);
    use_case.execute(token, password).await?;

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new(
            "Password updated. You can now sign in with your new password.",
        ))),
    ))
}
