use std::collections::HashMap;

use crate::domain::{models::user::UserSummary, ports::UserRepository};
use crate::error::AppError;

/// Looks up display fields for a set of user ids in one query. Ids without a
/// user record are simply absent from the map.
pub async fn resolve_users(
    repo: &dyn UserRepository,
    mut ids: Vec<String>,
) -> Result<HashMap<String, UserSummary>, AppError> {
    ids.sort();
    ids.dedup();

    let users = repo.find_by_ids(&ids).await?;
    Ok(users
        .iter()
        .map(|u| (u.id.clone(), UserSummary::from(u)))
        .collect())
}
