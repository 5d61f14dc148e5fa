use crate::domain::models::{issue::Issue, project::Project, user::User};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AppError>;
}

/// Writes are conditional on `version`: `update` only succeeds when the stored
/// version still equals the one on the passed entity, and returns the stored
/// document with the bumped version.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<Project, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Project>, AppError>;
    async fn update(&self, project: &Project) -> Result<Project, AppError>;
    /// Removes the project together with all of its issues.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn create(&self, issue: &Issue) -> Result<Issue, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Issue>, AppError>;
    async fn list_by_project(&self, project_id: &str) -> Result<Vec<Issue>, AppError>;
    async fn update(&self, issue: &Issue) -> Result<Issue, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: &str) -> Result<String, AppError>;
    /// Returns the user id carried by a valid, unexpired token.
    fn verify(&self, token: &str) -> Result<String, AppError>;
}
