use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::models::issue::{IssueStatus, IssueType};

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total_issues: usize,
    pub issues_by_category: BTreeMap<IssueType, usize>,
    pub issues_by_status: BTreeMap<IssueStatus, usize>,
}
