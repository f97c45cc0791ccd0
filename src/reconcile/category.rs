//! Category reconciliation
//!
//! Every field of a category is part of its key, so an existing category
//! never needs an update.

use super::{Outcome, State};
use crate::snipeit::categories::{create_category, delete_category, find_category, CategoryType};
use crate::snipeit::{SnipeClient, SnipeResult};

/// Desired state of a category
#[derive(Debug, Clone)]
pub struct CategorySpec {
    pub name: String,
    pub category_type: CategoryType,
    pub state: State,
}

pub async fn reconcile_category(
    client: &SnipeClient,
    spec: &CategorySpec,
    dry_run: bool,
) -> SnipeResult<Outcome> {
    let existing = find_category(client, &spec.name, spec.category_type).await?;

    match (spec.state, existing) {
        (State::Present, Some(category)) => {
            tracing::debug!("Category '{}' already exists as {}", spec.name, category.id);
            Ok(Outcome::unchanged(Some(category.id)))
        }
        (State::Present, None) if dry_run => Ok(Outcome::created(None)),
        (State::Present, None) => {
            let id = match create_category(client, &spec.name, spec.category_type).await? {
                Some(id) => Some(id),
                None => find_category(client, &spec.name, spec.category_type)
                    .await?
                    .map(|c| c.id),
            };
            Ok(Outcome::created(id))
        }
        (State::Absent, None) => Ok(Outcome::unchanged(None)),
        (State::Absent, Some(category)) => {
            if !dry_run {
                delete_category(client, category.id).await?;
            }
            Ok(Outcome::deleted(category.id))
        }
    }
}
