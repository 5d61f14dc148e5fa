mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_stats_count_by_type_and_status() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let (viewer, _) = app.sign_up("viewer@example.com").await;
    let project_id = app.create_project(&owner, "Apollo").await;
    app.add_member(&owner, &project_id, "viewer@example.com", "Viewer").await;

    for (issue_type, status) in [("Bug", "To Do"), ("Bug", "Done"), ("Task", "To Do")] {
        let (code, _) = app.create_issue(&owner, &project_id, json!({
            "title": format!("{} {}", issue_type, status),
            "type": issue_type,
            "status": status
        })).await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, stats) = app.call("GET", &format!("/projects/{}/stats", project_id), Some(&viewer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({
        "totalIssues": 3,
        "issuesByCategory": { "Bug": 2, "Task": 1 },
        "issuesByStatus": { "To Do": 2, "Done": 1 }
    }));
}

#[tokio::test]
async fn test_stats_follow_issue_changes() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let project_id = app.create_project(&owner, "Apollo").await;
    let uri = format!("/projects/{}/stats", project_id);

    let (_, stats) = app.call("GET", &uri, Some(&owner), None).await;
    assert_eq!(stats["totalIssues"], 0);
    assert_eq!(stats["issuesByCategory"], json!({}));

    let (_, issue) = app.create_issue(&owner, &project_id, json!({ "title": "Epic work", "type": "Epic" })).await;
    app.call("PUT", &format!("/issues/{}", issue["id"].as_str().unwrap()), Some(&owner), Some(json!({ "status": "In Progress" }))).await;

    let (_, stats) = app.call("GET", &uri, Some(&owner), None).await;
    assert_eq!(stats["totalIssues"], 1);
    assert_eq!(stats["issuesByCategory"]["Epic"], 1);
    assert_eq!(stats["issuesByStatus"], json!({ "In Progress": 1 }));
}

#[tokio::test]
async fn test_stats_hidden_from_strangers() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let (stranger, _) = app.sign_up("stranger@example.com").await;
    let project_id = app.create_project(&owner, "Apollo").await;

    let (status, _) = app.call("GET", &format!("/projects/{}/stats", project_id), Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("GET", "/projects/missing/stats", Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
