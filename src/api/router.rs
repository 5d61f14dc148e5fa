use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, health, issue, member, project};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))

        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))

        // Projects
        .route("/projects", post(project::create_project).get(project::list_projects))
        .route("/projects/{id}", get(project::get_project).put(project::update_project).delete(project::delete_project))
        .route("/projects/{id}/stats", get(project::get_stats))

        // Membership
        .route("/projects/{id}/members", post(member::add_member))
        .route("/projects/{id}/members/{member_id}", put(member::update_member_role).delete(member::remove_member))

        // Issues. POST/GET on /issues/{id} take a project id, PUT/DELETE an issue id.
        .route("/issues/issue/{id}", get(issue::get_issue))
        .route("/issues/{id}", post(issue::create_issue).get(issue::list_issues).put(issue::update_issue).delete(issue::delete_issue))
        .route("/issues/{id}/comments", post(issue::add_comment).get(issue::list_comments))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin.map(str::parse::<HeaderValue>) {
        Some(Ok(value)) => layer.allow_origin(value),
        Some(Err(_)) => {
            warn!("CORS_ORIGIN is not a valid header value, allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
