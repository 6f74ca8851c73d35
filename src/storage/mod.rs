//! Content Store
//!
//! Listing, lookup and upsert of sector pages in the headless CMS.

mod sanity;

pub use sanity::SanityStore;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::types::{Result, SectorDocument};

/// Shared store handle for async contexts.
pub type SharedStore = Arc<dyn ContentStore>;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Slugs of every published sector page, in listing order.
    ///
    /// Pages without a slug are skipped.
    async fn list_slugs(&self) -> Result<Vec<String>>;

    /// The stored page for `slug`, system fields included, or `None`
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<Value>>;

    /// Create the document, or replace it wholesale when its id exists
    async fn upsert(&self, document: &SectorDocument) -> Result<()>;
}
