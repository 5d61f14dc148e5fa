use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{LoginRequest, RegisterRequest},
    responses::MessageResponse,
};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::auth::LoginResponse;
use std::sync::Arc;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    info!("User registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User registered successfully"))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = state.auth_service.login(&payload.email, &payload.password).await?;

    info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(session): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.profile(&session.user_id).await?;
    Ok(Json(user))
}
