//! Hardware entry reconciliation

use super::{Outcome, State};
use crate::snipeit::envelope::Asset;
use crate::snipeit::hardware::{create_asset, delete_asset, find_asset, update_asset, AssetPatch, NewAsset};
use crate::snipeit::models::find_model;
use crate::snipeit::{SnipeClient, SnipeError, SnipeResult};

/// Desired state of a hardware entry
#[derive(Debug, Clone)]
pub struct EntrySpec {
    pub asset_tag: String,
    /// Required when `state` is present
    pub model_name: Option<String>,
    pub status_id: u64,
    pub state: State,
}

impl EntrySpec {
    /// Checks the argument combinations the types cannot express
    pub fn validate(&self) -> SnipeResult<()> {
        if self.asset_tag.trim().is_empty() {
            return Err(SnipeError::InvalidArgument("asset_tag must not be empty".into()));
        }
        // URL normalisation would drop these path segments, even percent-encoded
        if matches!(self.asset_tag.as_str(), "." | "..") {
            return Err(SnipeError::InvalidArgument(format!(
                "asset_tag '{}' cannot be looked up by tag",
                self.asset_tag
            )));
        }
        if self.state == State::Present && self.model_name.as_deref().map_or(true, str::is_empty) {
            return Err(SnipeError::InvalidArgument(
                "model_name is required when state is present".into(),
            ));
        }
        Ok(())
    }
}

pub async fn reconcile_entry(
    client: &SnipeClient,
    spec: &EntrySpec,
    dry_run: bool,
) -> SnipeResult<Outcome> {
    spec.validate()?;

    if spec.state == State::Absent {
        return match find_asset(client, &spec.asset_tag).await? {
            None => Ok(Outcome::unchanged(None)),
            Some(asset) => {
                if !dry_run {
                    delete_asset(client, asset.id).await?;
                }
                Ok(Outcome::deleted(asset.id))
            }
        };
    }

    let model_name = spec.model_name.as_deref().unwrap_or_default();
    let model = find_model(client, model_name)
        .await?
        .ok_or_else(|| SnipeError::MissingDependency(format!("Model {} does not exist", model_name)))?;

    let Some(asset) = find_asset(client, &spec.asset_tag).await? else {
        if dry_run {
            return Ok(Outcome::created(None));
        }
        let new_asset = NewAsset {
            asset_tag: &spec.asset_tag,
            status_id: spec.status_id,
            model_id: model.id,
        };
        let id = match create_asset(client, &new_asset).await? {
            Some(id) => Some(id),
            None => find_asset(client, &spec.asset_tag).await?.map(|a| a.id),
        };
        return Ok(Outcome::created(id));
    };

    let patch = diff_asset(&asset, model.id, spec.status_id);
    if patch.is_empty() {
        return Ok(Outcome::unchanged(Some(asset.id)));
    }
    if !dry_run {
        update_asset(client, asset.id, &patch).await?;
    }
    Ok(Outcome::updated(asset.id))
}

fn diff_asset(existing: &Asset, model_id: u64, status_id: u64) -> AssetPatch {
    AssetPatch {
        model_id: (existing.model_id() != Some(model_id)).then_some(model_id),
        status_id: (existing.status_id() != Some(status_id)).then_some(status_id),
    }
}
