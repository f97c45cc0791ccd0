//! Snipe-IT Hardware
//!
//! Hardware entries are looked up by asset tag through the `bytag` endpoint,
//! which reports a missing tag as an error envelope rather than an empty list.

use super::client::SnipeClient;
use super::envelope::{check_status, parse, to_body, Asset, StatusEnvelope};
use super::error::{SnipeError, SnipeResult};
use super::http::sanitize_for_log;
use serde::Serialize;
use serde_json::Value;

/// Message the service uses for an unknown asset tag
pub const ASSET_NOT_FOUND: &str = "Asset does not exist.";

/// Status label id of "Ready to Deploy" on a fresh instance
pub const DEFAULT_STATUS_ID: u64 = 2;

/// Body of an asset creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewAsset<'a> {
    pub asset_tag: &'a str,
    pub status_id: u64,
    pub model_id: u64,
}

/// Fields to change on an existing asset; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
}

impl AssetPatch {
    pub fn is_empty(&self) -> bool {
        self.model_id.is_none() && self.status_id.is_none()
    }
}

/// Look up an asset by tag
pub async fn find_asset(client: &SnipeClient, asset_tag: &str) -> SnipeResult<Option<Asset>> {
    let url = client.api_url(&format!("hardware/bytag/{}", urlencoding::encode(asset_tag)));
    let response = client.get(&url, &[]).await?;
    classify_lookup(response)
}

/// Decide whether a `bytag` body is a record, an absence, or a failure
fn classify_lookup(response: Value) -> SnipeResult<Option<Asset>> {
    if response.get("asset_tag").is_some() {
        return parse("asset", response).map(Some);
    }

    if response.get("status").is_some() {
        let envelope: StatusEnvelope = parse("asset lookup response", response)?;
        if envelope.is_error() {
            let message = envelope.message_text();
            if message == ASSET_NOT_FOUND {
                return Ok(None);
            }
            return Err(SnipeError::api("retrieving entry", message));
        }
        return Err(SnipeError::InvalidResponse(format!(
            "asset lookup returned status '{}' without a record",
            envelope.status
        )));
    }

    Err(SnipeError::InvalidResponse(sanitize_for_log(&response.to_string())))
}

pub async fn create_asset(client: &SnipeClient, asset: &NewAsset<'_>) -> SnipeResult<Option<u64>> {
    let url = client.api_url("hardware");
    let body = to_body("entry", asset)?;

    let response = client.post(&url, &body).await?;
    let response = check_status("creating entry", response)?;
    let envelope: StatusEnvelope = parse("create entry response", response)?;
    tracing::info!("Created entry '{}'", asset.asset_tag);
    Ok(envelope.payload_id())
}

pub async fn update_asset(client: &SnipeClient, id: u64, patch: &AssetPatch) -> SnipeResult<()> {
    let url = client.item_url("hardware", id);
    let body = to_body("entry patch", patch)?;
    let response = client.patch(&url, &body).await?;
    check_status("updating entry", response)?;
    tracing::info!("Updated entry {}: {:?}", id, patch);
    Ok(())
}

pub async fn delete_asset(client: &SnipeClient, id: u64) -> SnipeResult<()> {
    let url = client.item_url("hardware", id);
    let response = client.delete(&url).await?;
    check_status("deleting entry", response)?;
    tracing::info!("Deleted entry {}", id);
    Ok(())
}
