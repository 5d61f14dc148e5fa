use tracker_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::{
        factory::run_sqlite_migrations,
        repositories::{
            sqlite_issue_repo::SqliteIssueRepo,
            sqlite_project_repo::SqliteProjectRepo,
            sqlite_user_repo::SqliteUserRepo,
        },
        token::jwt_token_service::JwtTokenService,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            cors_origin: None,
            log_dir: "./logs".to_string(),
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteProjectRepo::new(pool.clone())),
            Arc::new(SqliteIssueRepo::new(pool.clone())),
            Arc::new(JwtTokenService::new(TEST_JWT_SECRET)),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Sends one request and returns the status with the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn call(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        match serde_json::from_slice(&bytes) {
            Ok(v) => (status, v),
            Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes)),
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let (status, body) = self.call("POST", "/auth/register", None, Some(json!({
            "username": username,
            "email": email,
            "password": password
        }))).await;

        if status != StatusCode::CREATED {
            panic!("Register failed in test helper: status {}, body {:?}", status, body);
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self.call("POST", "/auth/login", None, Some(json!({
            "email": email,
            "password": password
        }))).await;

        if status != StatusCode::OK {
            panic!("Login failed in test helper: status {}, body {:?}", status, body);
        }
        body["token"].as_str().expect("No token in login body").to_string()
    }

    /// Registers and logs in a user named after the email's local part.
    /// Returns `(token, user_id)`.
    pub async fn sign_up(&self, email: &str) -> (String, String) {
        let username = email.split('@').next().unwrap_or(email);
        self.register(username, email, "password123").await;
        let token = self.login(email, "password123").await;

        let (_, profile) = self.call("GET", "/auth/profile", Some(&token), None).await;
        let user_id = profile["id"].as_str().expect("No id in profile").to_string();
        (token, user_id)
    }

    pub async fn create_project(&self, token: &str, name: &str) -> String {
        let (status, body) = self.call("POST", "/projects", Some(token), Some(json!({
            "name": name,
            "description": "Test project"
        }))).await;

        assert_eq!(status, StatusCode::CREATED, "create project failed: {:?}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_member(&self, token: &str, project_id: &str, email: &str, role: &str) -> (StatusCode, Value) {
        self.call("POST", &format!("/projects/{}/members", project_id), Some(token), Some(json!({
            "email": email,
            "role": role
        }))).await
    }

    pub async fn create_issue(&self, token: &str, project_id: &str, body: Value) -> (StatusCode, Value) {
        self.call("POST", &format!("/issues/{}", project_id), Some(token), Some(body)).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
