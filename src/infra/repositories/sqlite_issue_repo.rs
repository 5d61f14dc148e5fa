use crate::domain::{models::issue::Issue, ports::IssueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteIssueRepo {
    pool: SqlitePool,
}

impl SqliteIssueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueRepository for SqliteIssueRepo {
    async fn create(&self, issue: &Issue) -> Result<Issue, AppError> {
        sqlx::query_as::<_, Issue>(
            r#"INSERT INTO issues (
                id, project_id, title, description, status, issue_type, assignee_id,
                created_by, comments, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&issue.id)
            .bind(&issue.project_id)
            .bind(&issue.title)
            .bind(&issue.description)
            .bind(issue.status.as_str())
            .bind(issue.issue_type.as_str())
            .bind(&issue.assignee_id)
            .bind(&issue.created_by)
            .bind(&issue.comments)
            .bind(issue.version)
            .bind(issue.created_at)
            .bind(issue.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Issue>, AppError> {
        sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_project(&self, project_id: &str) -> Result<Vec<Issue>, AppError> {
        sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE project_id = ? ORDER BY created_at ASC")
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, issue: &Issue) -> Result<Issue, AppError> {
        sqlx::query_as::<_, Issue>(
            r#"UPDATE issues SET title = ?, description = ?, status = ?, issue_type = ?, assignee_id = ?,
                comments = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            RETURNING *"#
        )
            .bind(&issue.title)
            .bind(&issue.description)
            .bind(issue.status.as_str())
            .bind(issue.issue_type.as_str())
            .bind(&issue.assignee_id)
            .bind(&issue.comments)
            .bind(Utc::now())
            .bind(&issue.id)
            .bind(issue.version)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("Issue was modified concurrently, reload and retry".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Issue not found".into()));
        }
        Ok(())
    }
}
