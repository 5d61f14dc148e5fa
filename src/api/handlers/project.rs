use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateProjectRequest, UpdateProjectRequest},
    responses::MessageResponse,
};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::services::project_service::ProjectChanges;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    ApiJson(payload): ApiJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.project_service
        .create(&session.user_id, &payload.name, payload.description)
        .await?;

    info!("Project created: {} by {}", project.id, session.user_id);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.project_service.list(&session.user_id).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.project_service.get(&project_id, &session.user_id).await?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changes = ProjectChanges {
        name: payload.name,
        description: payload.description,
        version: payload.version,
    };
    let project = state.project_service.update(&project_id, &session.user_id, changes).await?;

    info!("Project updated: {}", project_id);
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.project_service.delete(&project_id, &session.user_id).await?;

    info!("Project deleted: {} (issues removed with it)", project_id);
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.stats_service.get_stats(&project_id, &session.user_id).await?;
    Ok(Json(stats))
}
