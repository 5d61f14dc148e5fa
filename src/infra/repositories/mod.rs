pub mod sqlite_user_repo;
pub mod sqlite_project_repo;
pub mod sqlite_issue_repo;

pub mod postgres_user_repo;
pub mod postgres_project_repo;
pub mod postgres_issue_repo;
