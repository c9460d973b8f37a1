use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use charter_application::LoginUseCase;
use charter_core::{Email, Identity, Password, UserStore};

use crate::auth::generate_auth_token;
use crate::config::PortalSetting;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub data: SessionData,
}

#[derive(Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: Identity,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U>(
    State(user_store): State<U>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::InvalidCredentials)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(&user_store);
    let identity = use_case.execute(email, password).await?;

    let config = PortalSetting::load().auth.jwt.jwt_config();
    let token = generate_auth_token(&identity, &config)?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            success: true,
            data: SessionData {
                token,
                user: identity,
            },
        }),
    ))
}
