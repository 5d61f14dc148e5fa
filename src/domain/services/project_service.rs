use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    models::{
        project::{MemberView, Project, ProjectMember, ProjectView, Role},
        user::UserSummary,
    },
    ports::{ProjectRepository, UserRepository},
    services::{
        access::{authorize, Action},
        directory::resolve_users,
    },
};
use crate::error::AppError;

pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<i64>,
}

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { projects, users }
    }

    pub async fn create(&self, owner_id: &str, name: &str, description: Option<String>) -> Result<ProjectView, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Project name is required".into()));
        }

        let project = Project::new(owner_id.to_string(), name.to_string(), description);
        let created = self.projects.create(&project).await?;
        self.render(created).await
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<ProjectView>, AppError> {
        let projects = self.projects.list_for_user(user_id).await?;
        let ids = projects.iter().flat_map(Project::user_ids).collect();
        let directory = resolve_users(self.users.as_ref(), ids).await?;

        Ok(projects.into_iter().map(|p| to_view(p, &directory)).collect())
    }

    pub async fn get(&self, project_id: &str, user_id: &str) -> Result<ProjectView, AppError> {
        let project = self.load(project_id, user_id, Action::ViewProject).await?;
        self.render(project).await
    }

    /// A blank name keeps the stored one. The description is always replaced,
    /// so callers send the full text they want kept.
    pub async fn update(&self, project_id: &str, user_id: &str, changes: ProjectChanges) -> Result<ProjectView, AppError> {
        let mut project = self.load(project_id, user_id, Action::EditProject).await?;
        check_version(&project, changes.version)?;

        if let Some(name) = changes.name.filter(|n| !n.trim().is_empty()) {
            project.name = name.trim().to_string();
        }
        project.description = changes.description;

        let updated = self.projects.update(&project).await?;
        self.render(updated).await
    }

    pub async fn delete(&self, project_id: &str, user_id: &str) -> Result<(), AppError> {
        let project = self.load(project_id, user_id, Action::DeleteProject).await?;
        self.projects.delete(&project.id).await
    }

    /// `role` defaults to Contributor when absent or blank.
    pub async fn add_member(&self, project_id: &str, user_id: &str, email: &str, role: Option<&str>) -> Result<ProjectView, AppError> {
        let mut project = self.load(project_id, user_id, Action::ManageMembers).await?;

        let role = assignable_role(parse_role(role)?.unwrap_or(Role::Contributor))?;
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::Validation("Member email is required".into()));
        }

        let user = self.users.find_by_email(&email).await?
            .ok_or(AppError::NotFound("User not found".into()))?;

        if user.id == project.owner_id || project.member(&user.id).is_some() {
            return Err(AppError::Conflict("User is already a member of this project".into()));
        }

        project.members.push(ProjectMember { user_id: user.id, role });
        let updated = self.projects.update(&project).await?;
        self.render(updated).await
    }

    /// Removing a user who is not a member leaves the project untouched.
    pub async fn remove_member(&self, project_id: &str, user_id: &str, member_id: &str) -> Result<ProjectView, AppError> {
        let mut project = self.load(project_id, user_id, Action::ManageMembers).await?;

        let before = project.members.len();
        project.members.retain(|m| m.user_id != member_id);
        if project.members.len() == before {
            return self.render(project).await;
        }

        let updated = self.projects.update(&project).await?;
        self.render(updated).await
    }

    pub async fn update_member_role(&self, project_id: &str, user_id: &str, member_id: &str, role: Option<&str>) -> Result<ProjectView, AppError> {
        let mut project = self.load(project_id, user_id, Action::ManageMembers).await?;
        let role = parse_role(role)?
            .ok_or(AppError::Validation("Role is required".into()))?;
        let role = assignable_role(role)?;

        let member = project.members.iter_mut()
            .find(|m| m.user_id == member_id)
            .ok_or(AppError::NotFound("Member not found".into()))?;
        member.role = role;

        let updated = self.projects.update(&project).await?;
        self.render(updated).await
    }

    async fn load(&self, project_id: &str, user_id: &str, action: Action) -> Result<Project, AppError> {
        let project = self.projects.find_by_id(project_id).await?
            .ok_or(AppError::NotFound("Project not found".into()))?;
        authorize(&project, user_id, action)?;
        Ok(project)
    }

    async fn render(&self, project: Project) -> Result<ProjectView, AppError> {
        let directory = resolve_users(self.users.as_ref(), project.user_ids()).await?;
        Ok(to_view(project, &directory))
    }
}

fn check_version(project: &Project, expected: Option<i64>) -> Result<(), AppError> {
    match expected {
        Some(v) if v != project.version => Err(AppError::Conflict(format!(
            "Project is at version {}, update was based on version {}", project.version, v
        ))),
        _ => Ok(()),
    }
}

fn parse_role(role: Option<&str>) -> Result<Option<Role>, AppError> {
    role.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::parse)
        .transpose()
}

fn assignable_role(role: Role) -> Result<Role, AppError> {
    if role == Role::Owner {
        return Err(AppError::Validation("Ownership cannot be granted through membership".into()));
    }
    Ok(role)
}

fn to_view(project: Project, directory: &HashMap<String, UserSummary>) -> ProjectView {
    let members = project.members.0.into_iter()
        .map(|m| MemberView {
            user: directory.get(&m.user_id).cloned(),
            user_id: m.user_id,
            role: m.role,
        })
        .collect();

    ProjectView {
        owner: directory.get(&project.owner_id).cloned(),
        id: project.id,
        name: project.name,
        description: project.description,
        owner_id: project.owner_id,
        members,
        version: project.version,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }
}
