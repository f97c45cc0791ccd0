//! Snipe-IT Models
//!
//! Functions for looking up and changing asset models. A model is keyed by
//! its name.

use super::client::SnipeClient;
use super::envelope::{check_status, names_match, parse, to_body, ListEnvelope, Model, StatusEnvelope};
use super::error::SnipeResult;
use serde::Serialize;

/// Body of a model creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewModel<'a> {
    pub name: &'a str,
    pub category_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<u64>,
}

/// Fields to change on an existing model; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<u64>,
}

impl ModelPatch {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.manufacturer_id.is_none()
    }
}

/// Look up a model by name
pub async fn find_model(client: &SnipeClient, name: &str) -> SnipeResult<Option<Model>> {
    let url = client.api_url("models");
    let response = client.get(&url, &[("name", name)]).await?;
    let response = check_status("retrieving model", response)?;
    let list: ListEnvelope<Model> = parse("model list", response)?;

    if list.total == 0 {
        return Ok(None);
    }

    Ok(list.rows.into_iter().find(|m| names_match(&m.name, name)))
}

pub async fn create_model(client: &SnipeClient, model: &NewModel<'_>) -> SnipeResult<Option<u64>> {
    let url = client.api_url("models");
    let body = to_body("model", model)?;

    let response = client.post(&url, &body).await?;
    let response = check_status("creating model", response)?;
    let envelope: StatusEnvelope = parse("create model response", response)?;
    tracing::info!("Created model '{}'", model.name);
    Ok(envelope.payload_id())
}

pub async fn update_model(client: &SnipeClient, id: u64, patch: &ModelPatch) -> SnipeResult<()> {
    let url = client.item_url("models", id);
    let response = client.patch(&url, &to_body("model patch", patch)?).await?;
    check_status("updating model", response)?;
    tracing::info!("Updated model {}: {:?}", id, patch);
    Ok(())
}

pub async fn delete_model(client: &SnipeClient, id: u64) -> SnipeResult<()> {
    let url = client.item_url("models", id);
    let response = client.delete(&url).await?;
    check_status("deleting model", response)?;
    tracing::info!("Deleted model {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_model_omits_missing_manufacturer() {
        let body = to_body(
            "model",
            &NewModel {
                name: "ThinkPad T14",
                category_id: 2,
                manufacturer_id: None,
            },
        )
        .unwrap();
        assert_eq!(body, json!({"name": "ThinkPad T14", "category_id": 2}));
    }

    #[test]
    fn test_patch_only_carries_changed_fields() {
        let patch = ModelPatch {
            category_id: None,
            manufacturer_id: Some(9),
        };
        assert!(!patch.is_empty());
        assert_eq!(to_body("model patch", &patch).unwrap(), json!({"manufacturer_id": 9}));
        assert!(ModelPatch::default().is_empty());
    }
}
