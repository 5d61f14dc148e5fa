use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{AddMemberRequest, UpdateMemberRoleRequest};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
    ApiJson(payload): ApiJson<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.project_service
        .add_member(&project_id, &session.user_id, &payload.email, payload.role.as_deref())
        .await?;

    info!("Member {} added to project {}", payload.email, project_id);
    Ok(Json(project))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path((project_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.project_service
        .remove_member(&project_id, &session.user_id, &member_id)
        .await?;

    info!("Member {} removed from project {}", member_id, project_id);
    Ok(Json(project))
}

pub async fn update_member_role(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path((project_id, member_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<UpdateMemberRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.project_service
        .update_member_role(&project_id, &session.user_id, &member_id, payload.role.as_deref())
        .await?;

    info!("Member {} in project {} role changed", member_id, project_id);
    Ok(Json(project))
}

