//! Idempotent reconciliation
//!
//! Each operation reads the current record by its natural key, compares it
//! with the desired state and only then creates, updates or deletes:
//!
//! - NOT_FOUND, present → create
//! - FOUND and different → update
//! - FOUND and same → nothing
//! - FOUND, absent → delete
//!
//! With `dry_run` set the same decision is made and reported, but no
//! mutating request is sent.

pub mod category;
pub mod entry;
pub mod model;

pub use category::{reconcile_category, CategorySpec};
pub use entry::{reconcile_entry, EntrySpec};
pub use model::{reconcile_model, ModelSpec};

use serde::{Deserialize, Serialize};

/// Desired existence of a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Present,
    Absent,
}

/// What a reconciliation did (or would do in dry-run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Deleted,
    Unchanged,
}

/// Result of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub changed: bool,
    pub action: Action,
    /// Internal id of the record; unknown for a dry-run create
    pub id: Option<u64>,
}

impl Outcome {
    pub fn created(id: Option<u64>) -> Self {
        Self {
            changed: true,
            action: Action::Created,
            id,
        }
    }

    pub fn updated(id: u64) -> Self {
        Self {
            changed: true,
            action: Action::Updated,
            id: Some(id),
        }
    }

    pub fn deleted(id: u64) -> Self {
        Self {
            changed: true,
            action: Action::Deleted,
            id: Some(id),
        }
    }

    pub fn unchanged(id: Option<u64>) -> Self {
        Self {
            changed: false,
            action: Action::Unchanged,
            id,
        }
    }
}
