use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use charter_core::{BannedTokenStore, UserStore, UserStoreError};

use crate::auth::{extract_bearer_token, validate_auth_token};
use crate::config::PortalSetting;

use super::error::ApiError;
use super::ApiData;

/// Re-validate the session and return a fresh identity snapshot. A session
/// whose identity has disappeared or lost its approval since login is
/// rejected.
#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me<U, B>(
    State((user_store, banned_token_store)): State<(U, B)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    B: BannedTokenStore + 'static,
{
    let token = extract_bearer_token(&headers)?;
    let config = PortalSetting::load().auth.jwt.jwt_config();
    let claims = validate_auth_token(token, &banned_token_store, &config).await?;

    let identity = match user_store.get_user_by_id(claims.user_id()?).await {
        Ok(identity) => identity,
        Err(UserStoreError::UserNotFound) => {
            return Err(ApiError::AuthenticationError(
                "Unknown session user".to_string(),
            ));
        }
        Err(error) => return Err(error.into()),
    };

    // A token outlives neither its identity nor its approval.
    if !identity.is_active {
        return Err(ApiError::AuthenticationError(
            "Account is no longer active".to_string(),
        ));
    }

    Ok((StatusCode::OK, Json(ApiData::new(identity))))
}
