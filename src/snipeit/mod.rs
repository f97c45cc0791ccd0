//! Snipe-IT API interaction module
//!
//! This module provides a thin, typed binding to the parts of the Snipe-IT
//! REST API needed to manage categories, models and hardware entries.
//!
//! # Module Structure
//!
//! - [`client`] - Main client holding base URL and API key
//! - [`http`] - HTTP utilities for REST API calls
//! - [`envelope`] - Wire types for list, status and record bodies
//! - [`error`] - Error kinds surfaced to callers
//! - [`categories`], [`models`], [`hardware`] - Per-resource calls
//!
//! # Example
//!
//! ```ignore
//! use snipeit_inventory::snipeit::categories::{self, CategoryType};
//! use snipeit_inventory::snipeit::client::{SnipeClient, DEFAULT_TIMEOUT};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = SnipeClient::new("https://snipeit.example.com", "API_KEY", DEFAULT_TIMEOUT)?;
//!     let laptops = categories::find_category(&client, "Laptops", CategoryType::Asset).await?;
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod client;
pub mod envelope;
pub mod error;
pub mod hardware;
pub mod http;
pub mod models;

pub use client::SnipeClient;
pub use error::{SnipeError, SnipeResult};
