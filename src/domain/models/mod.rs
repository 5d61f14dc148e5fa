pub mod auth;
pub mod issue;
pub mod project;
pub mod stats;
pub mod user;
