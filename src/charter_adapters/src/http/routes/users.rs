use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use charter_application::{ApproveUserUseCase, ListPendingUseCase, RejectUserUseCase};
use charter_core::{
    ActivationOutcome, BannedTokenStore, DEFAULT_PAGE_SIZE, Identity, PendingQuery, SortKey,
    UserStore,
};

use super::error::ApiError;
use super::{ApiData, MessageData, authorize_admin};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPendingParams {
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct PendingListResponse {
    pub success: bool,
    pub data: Vec<Identity>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalResponse {
    pub success: bool,
    pub data: ApprovalData,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalData {
    pub id: Uuid,
    pub is_active: bool,
    pub already_active: bool,
}

#[tracing::instrument(name = "List pending users", skip_all)]
pub async fn list_pending<U, B>(
    State((user_store, banned_token_store)): State<(U, B)>,
    headers: HeaderMap,
    Query(params): Query<ListPendingParams>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    B: BannedTokenStore + 'static,
{
    authorize_admin(&headers, &banned_token_store).await?;

    if params.is_active == Some(true) {
        return Err(ApiError::InvalidInput(
            "Only isActive=false listings are supported".to_string(),
        ));
    }

    let sort = match params.sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::default(),
    };

    let query = PendingQuery::new(
        params.page.unwrap_or(1),
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        sort,
        params.search,
    );

    let use_case = ListPendingUseCase::new(&user_store);
    let page = use_case.execute(query.clone()).await?;

    Ok((
        StatusCode::OK,
        Json(PendingListResponse {
            success: true,
            data: page.items,
            total: page.total,
            page: query.page(),
            limit: query.limit(),
        }),
    ))
}

#[tracing::instrument(name = "Approve user", skip_all, fields(user_id = %id))]
pub async fn approve_user<U, B>(
    State((user_store, banned_token_store)): State<(U, B)>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    B: BannedTokenStore + 'static,
{
    authorize_admin(&headers, &banned_token_store).await?;

    // Deactivation is not part of the approval workflow.
    if request.is_active != Some(true) {
        return Err(ApiError::InvalidInput(
            "Only activation is supported".to_string(),
        ));
    }

    let use_case = ApproveUserUseCase::new(&user_store);
    let outcome = use_case.execute(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApprovalResponse {
            success: true,
            data: ApprovalData {
                id,
                is_active: true,
                already_active: outcome == ActivationOutcome::AlreadyActive,
            },
        }),
    ))
}

#[tracing::instrument(name = "Reject user", skip_all, fields(user_id = %id))]
pub async fn reject_user<U, B>(
    State((user_store, banned_token_store)): State<(U, B)>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    B: BannedTokenStore + 'static,
{
    authorize_admin(&headers, &banned_token_store).await?;

    let use_case = RejectUserUseCase::new(&user_store);
    use_case.execute(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiData::new(MessageData::new("User removed"))),
    ))
}
