use std::sync::Arc;
use crate::domain::ports::{IssueRepository, ProjectRepository, TokenService, UserRepository};
use crate::domain::services::{
    auth_service::AuthService, issue_service::IssueService,
    project_service::ProjectService, stats::StatsService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub issue_repo: Arc<dyn IssueRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub auth_service: Arc<AuthService>,
    pub project_service: Arc<ProjectService>,
    pub issue_service: Arc<IssueService>,
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    /// Wires the services over whichever storage backend was selected.
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        issue_repo: Arc<dyn IssueRepository>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_service.clone()));
        let project_service = Arc::new(ProjectService::new(project_repo.clone(), user_repo.clone()));
        let issue_service = Arc::new(IssueService::new(issue_repo.clone(), project_repo.clone(), user_repo.clone()));
        let stats_service = Arc::new(StatsService::new(project_repo.clone(), issue_repo.clone()));

        Self {
            config,
            user_repo,
            project_repo,
            issue_repo,
            token_service,
            auth_service,
            project_service,
            issue_service,
            stats_service,
        }
    }
}
