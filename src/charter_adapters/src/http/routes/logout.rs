use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use charter_application::LogoutUseCase;
use charter_core::BannedTokenStore;

use crate::auth::extract_bearer_token;

use super::error::ApiError;
use super::{ApiData, MessageData};

/// Revoke the presented session token. Signing out without a token, or with
/// one that was already revoked, still succeeds.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<B>(
    State(banned_token_store): State<B>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    B: BannedTokenStore + 'static,
{
    if let Ok(token) = extract_bearer_token(&headers) {
        let use_case = LogoutUseCase::new(&banned_token_store);
        use_case.execute(token.to_string()).await?;
    }

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new("Signed out"))),
    ))
}
