use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use charter_application::RegisterUseCase;
use charter_core::{
    Email, EmailClient, Password, PersonName, Role, User, UserStore, VerificationTokenStore,
};

use crate::config::PortalSetting;

use super::error::ApiError;
use super::ApiData;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, V, E>(
    State((user_store, token_store, email_client)): State<(U, V, E)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    V: VerificationTokenStore + 'static,
    E: EmailClient + 'static,
{
    let name = PersonName::parse(request.first_name, request.last_name)?;
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    // Self-service registration always creates an owner. Other roles are
    // provisioned out of band.
    let user = User::new(name, email, password, Role::Owner, request.company)?;

    let setting = PortalSetting::load();
    let use_case = RegisterUseCase::new(
        &user_store,
        &token_store,
        &email_client,
        &setting.app.public_url,
    );
    let identity = use_case.execute(user).await?;

    Ok((StatusCode::CREATED, Json(ApiData::new(identity))))
}
