//! CLI Common Utilities
//!
//! Shared setup for the commands that talk to the model and the store.

use std::sync::Arc;

use crate::ai::provider::create_provider;
use crate::config::{Config, ConfigLoader};
use crate::pipeline::SectorPipeline;
use crate::storage::{SanityStore, SharedStore};
use crate::types::{Result, SectorPayload};

/// Command execution context
pub struct CommandContext {
    pub pipeline: SectorPipeline,
}

impl CommandContext {
    /// Load configuration and connect the pipeline to its collaborators.
    ///
    /// Fails before any work is done when a credential is missing.
    pub fn load() -> Result<Self> {
        Self::from_config(&ConfigLoader::load()?)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_credentials()?;

        let provider = create_provider(&config.llm)?;
        let store: SharedStore = Arc::new(SanityStore::new(&config.store)?);
        let pipeline = SectorPipeline::new(provider, store, config)?;

        Ok(Self { pipeline })
    }

    /// Publish `payload` and print its URL, or print the payload itself
    pub async fn deliver(&self, payload: SectorPayload, no_publish: bool) -> Result<()> {
        if no_publish {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        let outcome = self.pipeline.publish(payload).await?;
        println!("Published: {}", outcome.url);
        Ok(())
    }
}
