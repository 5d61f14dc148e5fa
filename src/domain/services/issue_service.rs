use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    models::{
        issue::{Comment, CommentView, Issue, IssueStatus, IssueType, IssueView, NewIssueParams},
        project::Project,
        user::UserSummary,
    },
    ports::{IssueRepository, ProjectRepository, UserRepository},
    services::{
        access::{authorize, Action},
        directory::resolve_users,
    },
};
use crate::error::AppError;

/// Fields accepted on create and on partial update. Blank strings count as
/// absent, so they keep the stored value on update and the default on create.
#[derive(Default)]
pub struct IssueInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub issue_type: Option<String>,
    pub status: Option<String>,
    pub assignee_id: Option<String>,
    pub version: Option<i64>,
}

pub struct IssueService {
    issues: Arc<dyn IssueRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl IssueService {
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { issues, projects, users }
    }

    pub async fn create(&self, project_id: &str, user_id: &str, input: IssueInput) -> Result<IssueView, AppError> {
        let project = self.load_project(project_id).await?;
        authorize(&project, user_id, Action::WriteIssue)?;

        let title = present(input.title)
            .ok_or(AppError::Validation("Issue title is required".into()))?;
        let status = parse_or_default::<IssueStatus>(input.status)?;
        let issue_type = parse_or_default::<IssueType>(input.issue_type)?;

        let assignee_id = self.checked_assignee(input.assignee_id).await?;

        let issue = Issue::new(NewIssueParams {
            project_id: project.id,
            created_by: user_id.to_string(),
            title: title.trim().to_string(),
            description: input.description,
            status,
            issue_type,
            assignee_id,
        });
        let created = self.issues.create(&issue).await?;
        self.render(created).await
    }

    pub async fn list(&self, project_id: &str, user_id: &str) -> Result<Vec<IssueView>, AppError> {
        let project = self.load_project(project_id).await?;
        authorize(&project, user_id, Action::ViewProject)?;

        let issues = self.issues.list_by_project(&project.id).await?;
        let ids = issues.iter().flat_map(referenced_users).collect();
        let directory = resolve_users(self.users.as_ref(), ids).await?;

        Ok(issues.into_iter().map(|i| to_view(i, &directory)).collect())
    }

    pub async fn get(&self, issue_id: &str, user_id: &str) -> Result<IssueView, AppError> {
        let issue = self.load(issue_id, user_id, Action::ViewProject).await?;
        self.render(issue).await
    }

    pub async fn update(&self, issue_id: &str, user_id: &str, input: IssueInput) -> Result<IssueView, AppError> {
        let mut issue = self.load(issue_id, user_id, Action::WriteIssue).await?;

        if let Some(v) = input.version
            && v != issue.version
        {
            return Err(AppError::Conflict(format!(
                "Issue is at version {}, update was based on version {}", issue.version, v
            )));
        }

        if let Some(title) = present(input.title) {
            issue.title = title.trim().to_string();
        }
        if let Some(description) = present(input.description) {
            issue.description = Some(description);
        }
        if let Some(status) = present(input.status) {
            issue.status = status.parse()?;
        }
        if let Some(issue_type) = present(input.issue_type) {
            issue.issue_type = issue_type.parse()?;
        }
        if let Some(assignee_id) = self.checked_assignee(input.assignee_id).await? {
            issue.assignee_id = Some(assignee_id);
        }

        let updated = self.issues.update(&issue).await?;
        self.render(updated).await
    }

    pub async fn delete(&self, issue_id: &str, user_id: &str) -> Result<(), AppError> {
        let issue = self.load(issue_id, user_id, Action::WriteIssue).await?;
        self.issues.delete(&issue.id).await
    }

    pub async fn add_comment(&self, issue_id: &str, user_id: &str, text: &str) -> Result<IssueView, AppError> {
        let mut issue = self.load(issue_id, user_id, Action::AddComment).await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Comment text is required".into()));
        }
        issue.comments.push(Comment::new(user_id.to_string(), text.to_string()));

        let updated = self.issues.update(&issue).await?;
        self.render(updated).await
    }

    pub async fn list_comments(&self, issue_id: &str, user_id: &str) -> Result<Vec<CommentView>, AppError> {
        let issue = self.load(issue_id, user_id, Action::ViewProject).await?;
        Ok(self.render(issue).await?.comments)
    }

    async fn load_project(&self, project_id: &str) -> Result<Project, AppError> {
        self.projects.find_by_id(project_id).await?
            .ok_or(AppError::NotFound("Project not found".into()))
    }

    /// Loads the issue and checks the caller's role on its project. A caller
    /// without any role sees the issue as missing.
    async fn load(&self, issue_id: &str, user_id: &str, action: Action) -> Result<Issue, AppError> {
        let not_found = || AppError::NotFound("Issue not found".into());

        let issue = self.issues.find_by_id(issue_id).await?.ok_or_else(not_found)?;
        let project = self.projects.find_by_id(&issue.project_id).await?.ok_or_else(not_found)?;

        match authorize(&project, user_id, action) {
            Ok(_) => Ok(issue),
            Err(AppError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(e),
        }
    }

    async fn checked_assignee(&self, assignee_id: Option<String>) -> Result<Option<String>, AppError> {
        let Some(assignee_id) = present(assignee_id) else {
            return Ok(None);
        };
        if self.users.find_by_id(&assignee_id).await?.is_none() {
            return Err(AppError::Validation("Assignee does not exist".into()));
        }
        Ok(Some(assignee_id))
    }

    async fn render(&self, issue: Issue) -> Result<IssueView, AppError> {
        let directory = resolve_users(self.users.as_ref(), referenced_users(&issue)).await?;
        Ok(to_view(issue, &directory))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or_default<T>(value: Option<String>) -> Result<T, AppError>
where
    T: std::str::FromStr<Err = AppError> + Default,
{
    match present(value) {
        Some(v) => v.parse(),
        None => Ok(T::default()),
    }
}

fn referenced_users(issue: &Issue) -> Vec<String> {
    issue.assignee_id.iter().cloned()
        .chain(issue.comments.iter().map(|c| c.author_id.clone()))
        .collect()
}

fn to_view(issue: Issue, directory: &HashMap<String, UserSummary>) -> IssueView {
    let comments = issue.comments.0.into_iter()
        .map(|c| CommentView {
            author: directory.get(&c.author_id).cloned(),
            id: c.id,
            text: c.text,
            author_id: c.author_id,
            created_at: c.created_at,
        })
        .collect();

    IssueView {
        assignee: issue.assignee_id.as_ref().and_then(|id| directory.get(id).cloned()),
        id: issue.id,
        project_id: issue.project_id,
        title: issue.title,
        description: issue.description,
        status: issue.status,
        issue_type: issue.issue_type,
        assignee_id: issue.assignee_id,
        created_by: issue.created_by,
        comments,
        version: issue.version,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
    }
}
