pub mod access;
pub mod auth_service;
pub mod directory;
pub mod issue_service;
pub mod project_service;
pub mod stats;
