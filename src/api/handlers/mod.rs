pub mod auth;
pub mod issue;
pub mod member;
pub mod project;

pub mod health {
    use axum::{response::IntoResponse, Json};
    use serde_json::json;

    pub async fn health_check() -> impl IntoResponse {
        Json(json!({ "status": "ok" }))
    }

    pub async fn root() -> impl IntoResponse {
        Json(json!({ "message": "Backend is running!" }))
    }
}
