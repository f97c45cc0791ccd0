//! Idempotent management of Snipe-IT inventory records.
//!
//! [`snipeit`] is the REST binding; [`reconcile`] holds the
//! read-compare-write operations built on it.

pub mod config;
pub mod reconcile;
pub mod snipeit;

/// Version injected at compile time via SNIPEIT_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("SNIPEIT_VERSION") {
    Some(v) => v,
    None => "dev",
};
