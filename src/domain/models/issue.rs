use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;

use crate::domain::models::user::UserSummary;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IssueStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To Do",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Done => "Done",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(IssueStatus::ToDo),
            "In Progress" => Ok(IssueStatus::InProgress),
            "Done" => Ok(IssueStatus::Done),
            other => Err(AppError::Validation(format!("Unknown issue status '{}'", other))),
        }
    }
}

impl TryFrom<String> for IssueStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Story,
    Epic,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Task => "Task",
            IssueType::Bug => "Bug",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        }
    }
}

impl FromStr for IssueType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Task" => Ok(IssueType::Task),
            "Bug" => Ok(IssueType::Bug),
            "Story" => Ok(IssueType::Story),
            "Epic" => Ok(IssueType::Epic),
            other => Err(AppError::Validation(format!("Unknown issue type '{}'", other))),
        }
    }
}

impl TryFrom<String> for IssueType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            author_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Issue {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: IssueStatus,
    #[sqlx(try_from = "String")]
    pub issue_type: IssueType,
    pub assignee_id: Option<String>,
    pub created_by: String,
    pub comments: Json<Vec<Comment>>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewIssueParams {
    pub project_id: String,
    pub created_by: String,
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub issue_type: IssueType,
    pub assignee_id: Option<String>,
}

impl Issue {
    pub fn new(params: NewIssueParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: params.project_id,
            title: params.title,
            description: params.description,
            status: params.status,
            issue_type: params.issue_type,
            assignee_id: params.assignee_id,
            created_by: params.created_by,
            comments: Json(Vec::new()),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub author: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueView {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub assignee_id: Option<String>,
    pub assignee: Option<UserSummary>,
    pub created_by: String,
    pub comments: Vec<CommentView>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
