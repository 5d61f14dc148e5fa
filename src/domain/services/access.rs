//! Project role resolution and the action permission table.
//!
//! Every project or issue operation goes through [`authorize`] against the
//! project document it just loaded, so the role is never taken from the client
//! and never cached across requests.

use crate::domain::models::project::{Project, Role};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewProject,
    EditProject,
    DeleteProject,
    ManageMembers,
    WriteIssue,
    AddComment,
}

impl Action {
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::ViewProject => &[Role::Owner, Role::Admin, Role::Contributor, Role::Viewer],
            Action::EditProject => &[Role::Owner, Role::Admin],
            Action::DeleteProject => &[Role::Owner],
            Action::ManageMembers => &[Role::Owner, Role::Admin],
            Action::WriteIssue => &[Role::Owner, Role::Admin, Role::Contributor],
            Action::AddComment => &[Role::Owner, Role::Admin, Role::Contributor],
        }
    }

    fn denied_message(self) -> &'static str {
        match self {
            Action::ViewProject => "You do not have access to this project",
            Action::EditProject => "Only the owner or an admin can edit this project",
            Action::DeleteProject => "Only the owner can delete this project",
            Action::ManageMembers => "Only the owner or an admin can manage members",
            Action::WriteIssue => "Viewers cannot modify issues",
            Action::AddComment => "Viewers cannot comment on issues",
        }
    }
}

pub fn effective_role(project: &Project, user_id: &str) -> Option<Role> {
    if project.owner_id == user_id {
        return Some(Role::Owner);
    }
    project.member(user_id).map(|m| m.role)
}

pub fn is_authorized(role: Role, action: Action) -> bool {
    action.allowed_roles().contains(&role)
}

/// Callers without any role get `NotFound`, the same answer as for a missing
/// project. Callers whose role is too weak get `Forbidden`.
pub fn authorize(project: &Project, user_id: &str, action: Action) -> Result<Role, AppError> {
    let role = effective_role(project, user_id)
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    if !is_authorized(role, action) {
        return Err(AppError::Forbidden(action.denied_message().into()));
    }
    Ok(role)
}
