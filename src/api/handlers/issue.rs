use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{AddCommentRequest, IssueRequest},
    responses::MessageResponse,
};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::services::issue_service::IssueInput;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

impl From<IssueRequest> for IssueInput {
    fn from(req: IssueRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            issue_type: req.issue_type,
            status: req.status,
            assignee_id: req.assignee_id,
            version: req.version,
        }
    }
}

pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
    ApiJson(payload): ApiJson<IssueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let issue = state.issue_service
        .create(&project_id, &session.user_id, payload.into())
        .await?;

    info!("Issue created: {} in project {}", issue.id, project_id);
    Ok((StatusCode::CREATED, Json(issue)))
}

pub async fn list_issues(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let issues = state.issue_service.list(&project_id, &session.user_id).await?;
    Ok(Json(issues))
}

pub async fn get_issue(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(issue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let issue = state.issue_service.get(&issue_id, &session.user_id).await?;
    Ok(Json(issue))
}

pub async fn update_issue(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(issue_id): Path<String>,
    ApiJson(payload): ApiJson<IssueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let issue = state.issue_service
        .update(&issue_id, &session.user_id, payload.into())
        .await?;

    info!("Issue updated: {}", issue_id);
    Ok(Json(issue))
}

pub async fn delete_issue(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(issue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.issue_service.delete(&issue_id, &session.user_id).await?;

    info!("Issue deleted: {}", issue_id);
    Ok(Json(MessageResponse::new("Issue deleted successfully")))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(issue_id): Path<String>,
    ApiJson(payload): ApiJson<AddCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let issue = state.issue_service
        .add_comment(&issue_id, &session.user_id, &payload.text)
        .await?;

    info!("Comment added to issue {} by {}", issue_id, session.user_id);
    Ok((StatusCode::CREATED, Json(issue)))
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
    Path(issue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comments = state.issue_service.list_comments(&issue_id, &session.user_id).await?;
    Ok(Json(comments))
}
