use std::sync::Arc;

use crate::domain::{
    models::{issue::Issue, stats::IssueStats},
    ports::{IssueRepository, ProjectRepository},
    services::access::{authorize, Action},
};
use crate::error::AppError;

pub struct StatsService {
    projects: Arc<dyn ProjectRepository>,
    issues: Arc<dyn IssueRepository>,
}

impl StatsService {
    pub fn new(projects: Arc<dyn ProjectRepository>, issues: Arc<dyn IssueRepository>) -> Self {
        Self { projects, issues }
    }

    pub async fn get_stats(&self, project_id: &str, user_id: &str) -> Result<IssueStats, AppError> {
        let project = self.projects.find_by_id(project_id).await?
            .ok_or(AppError::NotFound("Project not found".into()))?;
        authorize(&project, user_id, Action::ViewProject)?;

        let issues = self.issues.list_by_project(&project.id).await?;
        Ok(aggregate(&issues))
    }
}

/// Only types and statuses that occur at least once get a key.
pub fn aggregate(issues: &[Issue]) -> IssueStats {
    let mut stats = IssueStats {
        total_issues: issues.len(),
        ..Default::default()
    };

    for issue in issues {
        *stats.issues_by_category.entry(issue.issue_type).or_default() += 1;
        *stats.issues_by_status.entry(issue.status).or_default() += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::issue::{IssueStatus, IssueType, NewIssueParams};

    fn issue(issue_type: IssueType, status: IssueStatus) -> Issue {
        Issue::new(NewIssueParams {
            project_id: "p".into(),
            created_by: "u".into(),
            title: "t".into(),
            description: None,
            status,
            issue_type,
            assignee_id: None,
        })
    }

    #[test]
    fn test_aggregate_counts_by_type_and_status() {
        let issues = vec![
            issue(IssueType::Bug, IssueStatus::ToDo),
            issue(IssueType::Bug, IssueStatus::Done),
            issue(IssueType::Task, IssueStatus::ToDo),
        ];

        let stats = aggregate(&issues);
        assert_eq!(stats.total_issues, 3);
        assert_eq!(stats.issues_by_category.get(&IssueType::Bug), Some(&2));
        assert_eq!(stats.issues_by_category.get(&IssueType::Task), Some(&1));
        assert_eq!(stats.issues_by_category.get(&IssueType::Epic), None);
        assert_eq!(stats.issues_by_status.get(&IssueStatus::ToDo), Some(&2));
        assert_eq!(stats.issues_by_status.get(&IssueStatus::Done), Some(&1));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json, serde_json::json!({
            "totalIssues": 3,
            "issuesByCategory": { "Task": 1, "Bug": 2 },
            "issuesByStatus": { "To Do": 2, "Done": 1 }
        }));
    }

    #[test]
    fn test_aggregate_empty_project() {
        let stats = aggregate(&[]);
        assert_eq!(stats, IssueStats::default());
    }
}
