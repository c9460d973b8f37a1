use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use charter_application::VerifyEmailUseCase;
use charter_core::{UserStore, VerificationTokenStore};

use super::error::ApiError;
use super::{ApiData, MessageData};

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<U, V>(
    State((user_store, token_store)): State<(U, V)>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationTokenStore + 'static,
{
    let token = request.token.trim();
    if token.is_empty() {
        return Err(ApiError::InvalidInput("Missing token".to_string()));
    }

    let use_case = VerifyEmailUseCase::new(&user_store, &token_store);
    use_case.execute(token).await?;

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new(
            "Email verified. Your account is awaiting administrator approval.",
        ))),
    ))
}
