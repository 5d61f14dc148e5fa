mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use tracker_backend::{
    domain::models::{issue::Comment, user::User},
    error::AppError,
};

#[tokio::test]
async fn test_stale_project_write_is_rejected_by_store() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    let project_id = app.create_project(&owner, "Apollo").await;

    let repo = &app.state.project_repo;
    let mut first = repo.find_by_id(&project_id).await.unwrap().unwrap();
    let mut second = first.clone();

    first.name = "First writer".to_string();
    let saved = repo.update(&first).await.unwrap();
    assert_eq!(saved.version, 2);

    // Second copy was loaded at version 1
    second.name = "Second writer".to_string();
    let result = repo.update(&second).await;
    assert!(matches!(result, Err(AppError::Conflict(_))), "expected conflict, got {:?}", result);

    let stored = repo.find_by_id(&project_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "First writer");
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_stale_issue_write_is_rejected_by_store() {
    let app = TestApp::new().await;
    let (owner, owner_id) = app.sign_up("owner@example.com").await;
    let project_id = app.create_project(&owner, "Apollo").await;
    let (_, issue) = app.create_issue(&owner, &project_id, json!({ "title": "Shared" })).await;
    let issue_id = issue["id"].as_str().unwrap();

    let repo = &app.state.issue_repo;
    let mut first = repo.find_by_id(issue_id).await.unwrap().unwrap();
    let mut second = first.clone();

    first.comments.push(Comment::new(owner_id.clone(), "kept".to_string()));
    repo.update(&first).await.unwrap();

    second.comments.push(Comment::new(owner_id.clone(), "lost".to_string()));
    second.title = "Overwritten".to_string();
    let result = repo.update(&second).await;
    assert!(matches!(result, Err(AppError::Conflict(_))), "expected conflict, got {:?}", result);

    let stored = repo.find_by_id(issue_id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Shared");
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "kept");
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_duplicate_email_insert_is_a_conflict() {
    let app = TestApp::new().await;
    let repo = &app.state.user_repo;

    let user = User::new("alice".to_string(), "alice@example.com".to_string(), "hash".to_string());
    repo.create(&user).await.unwrap();

    // Same email, fresh id: the unique index rejects it
    let twin = User::new("alice2".to_string(), "alice@example.com".to_string(), "hash".to_string());
    match repo.create(&twin).await {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "User already exists"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_add_member_loses_no_update() {
    let app = TestApp::new().await;
    let (owner, _) = app.sign_up("owner@example.com").await;
    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        app.sign_up(email).await;
    }
    let project_id = app.create_project(&owner, "Apollo").await;

    let (a, b, c) = tokio::join!(
        app.add_member(&owner, &project_id, "a@example.com", "Viewer"),
        app.add_member(&owner, &project_id, "b@example.com", "Viewer"),
        app.add_member(&owner, &project_id, "c@example.com", "Viewer"),
    );

    let statuses = [a.0, b.0, c.0];
    for status in statuses {
        assert!(status == StatusCode::OK || status == StatusCode::CONFLICT, "unexpected status {}", status);
    }
    let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert!(accepted >= 1);

    // Every accepted add is visible, none was silently overwritten
    let (_, project) = app.call("GET", &format!("/projects/{}", project_id), Some(&owner), None).await;
    assert_eq!(project["members"].as_array().unwrap().len(), accepted);
}
