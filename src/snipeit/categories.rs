//! Snipe-IT Categories
//!
//! Categories are keyed by `(name, category_type)`: the same name may exist
//! once per type.

use super::client::SnipeClient;
use super::envelope::{check_status, names_match, parse, Category, ListEnvelope, StatusEnvelope};
use super::error::{SnipeError, SnipeResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// What kind of item a category groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Asset,
    Accessory,
    Consumable,
    Component,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Asset => "asset",
            CategoryType::Accessory => "accessory",
            CategoryType::Consumable => "consumable",
            CategoryType::Component => "component",
        }
    }

    /// The API echoes the type capitalised ("Asset")
    pub fn matches(&self, raw: &str) -> bool {
        raw.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = SnipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asset" => Ok(CategoryType::Asset),
            "accessory" => Ok(CategoryType::Accessory),
            "consumable" => Ok(CategoryType::Consumable),
            "component" => Ok(CategoryType::Component),
            other => Err(SnipeError::InvalidArgument(format!(
                "Unknown category type '{}', expected one of asset, accessory, consumable, component",
                other
            ))),
        }
    }
}

/// Look up a category by its natural key
pub async fn find_category(
    client: &SnipeClient,
    name: &str,
    category_type: CategoryType,
) -> SnipeResult<Option<Category>> {
    let url = client.api_url("categories");
    let response = client
        .get(&url, &[("name", name), ("category_type", category_type.as_str())])
        .await?;
    let response = check_status("retrieving category", response)?;
    let list: ListEnvelope<Category> = parse("category list", response)?;

    if list.total == 0 {
        return Ok(None);
    }

    Ok(list
        .rows
        .into_iter()
        .find(|c| names_match(&c.name, name) && category_type.matches(&c.category_type)))
}

/// Create a category, returning its id when the service reports one
pub async fn create_category(
    client: &SnipeClient,
    name: &str,
    category_type: CategoryType,
) -> SnipeResult<Option<u64>> {
    let url = client.api_url("categories");
    let body = json!({
        "name": name,
        "category_type": category_type.as_str(),
    });

    let response = client.post(&url, &body).await?;
    let response = check_status("creating category", response)?;
    let envelope: StatusEnvelope = parse("create category response", response)?;
    tracing::info!("Created category '{}' ({})", name, category_type);
    Ok(envelope.payload_id())
}

pub async fn delete_category(client: &SnipeClient, id: u64) -> SnipeResult<()> {
    let url = client.item_url("categories", id);
    let response = client.delete(&url).await?;
    check_status("deleting category", response)?;
    tracing::info!("Deleted category {}", id);
    Ok(())
}
