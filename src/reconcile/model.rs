//! Model reconciliation

use super::{Outcome, State};
use crate::snipeit::categories::{find_category, CategoryType};
use crate::snipeit::envelope::Model;
use crate::snipeit::models::{create_model, delete_model, find_model, update_model, ModelPatch, NewModel};
use crate::snipeit::{SnipeClient, SnipeError, SnipeResult};

/// Desired state of a model
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub name: String,
    /// Name of an `asset` category; required when `state` is present
    pub category: Option<String>,
    /// Left untouched on existing models when unset
    pub manufacturer_id: Option<u64>,
    pub state: State,
}

impl ModelSpec {
    pub fn validate(&self) -> SnipeResult<()> {
        if self.name.trim().is_empty() {
            return Err(SnipeError::InvalidArgument("name must not be empty".into()));
        }
        if self.state == State::Present && self.category.as_deref().map_or(true, str::is_empty) {
            return Err(SnipeError::InvalidArgument(
                "category is required when state is present".into(),
            ));
        }
        Ok(())
    }
}

pub async fn reconcile_model(
    client: &SnipeClient,
    spec: &ModelSpec,
    dry_run: bool,
) -> SnipeResult<Outcome> {
    spec.validate()?;
    let existing = find_model(client, &spec.name).await?;

    if spec.state == State::Absent {
        return match existing {
            None => Ok(Outcome::unchanged(None)),
            Some(model) => {
                if !dry_run {
                    delete_model(client, model.id).await?;
                }
                Ok(Outcome::deleted(model.id))
            }
        };
    }

    let category_name = spec.category.as_deref().unwrap_or_default();
    let category = find_category(client, category_name, CategoryType::Asset)
        .await?
        .ok_or_else(|| SnipeError::MissingDependency(format!("Category {} not found", category_name)))?;

    let Some(model) = existing else {
        if dry_run {
            return Ok(Outcome::created(None));
        }
        let new_model = NewModel {
            name: &spec.name,
            category_id: category.id,
            manufacturer_id: spec.manufacturer_id,
        };
        let id = match create_model(client, &new_model).await? {
            Some(id) => Some(id),
            None => find_model(client, &spec.name).await?.map(|m| m.id),
        };
        return Ok(Outcome::created(id));
    };

    let patch = diff_model(&model, category.id, spec.manufacturer_id);
    if patch.is_empty() {
        return Ok(Outcome::unchanged(Some(model.id)));
    }
    if !dry_run {
        update_model(client, model.id, &patch).await?;
    }
    Ok(Outcome::updated(model.id))
}

/// Fields of `existing` that differ from the desired values
fn diff_model(existing: &Model, category_id: u64, manufacturer_id: Option<u64>) -> ModelPatch {
    ModelPatch {
        category_id: (existing.category_id() != Some(category_id)).then_some(category_id),
        manufacturer_id: manufacturer_id.filter(|m| existing.manufacturer_id() != Some(*m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snipeit::envelope::NamedRef;

    fn model(category: Option<u64>, manufacturer: Option<u64>) -> Model {
        Model {
            id: 1,
            name: "R640".into(),
            category: category.map(|id| NamedRef { id, name: "Servers".into() }),
            manufacturer: manufacturer.map(|id| NamedRef { id, name: "Dell".into() }),
        }
    }

    #[test]
    fn test_validate_requires_category_when_present() {
        let mut spec = ModelSpec {
            name: "R640".into(),
            category: None,
            manufacturer_id: None,
            state: State::Present,
        };
        assert_eq!(
            spec.validate().unwrap_err().to_string(),
            "category is required when state is present"
        );
        spec.state = State::Absent;
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_diff_model_same() {
        assert!(diff_model(&model(Some(2), Some(3)), 2, Some(3)).is_empty());
    }

    #[test]
    fn test_diff_model_ignores_unset_manufacturer() {
        assert!(diff_model(&model(Some(2), Some(3)), 2, None).is_empty());
    }

    #[test]
    fn test_diff_model_changed_fields() {
        let patch = diff_model(&model(Some(2), None), 5, Some(3));
        assert_eq!(
            patch,
            ModelPatch {
                category_id: Some(5),
                manufacturer_id: Some(3),
            }
        );
    }
}
