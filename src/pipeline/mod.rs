//! Sector Page Pipeline
//!
//! Ingestion → prompt → generation → normalization → reconciliation → upsert.
//! Every stage runs once per invocation and any failure ends the run.

pub mod normalize;
pub mod pricing;
pub mod reconcile;
pub mod slug;

pub use normalize::{finalize, inject_keys, prepare_existing, strip_keys};
pub use pricing::{ServiceOffering, apply_price_guardrails};
pub use reconcile::{page_index_for, reconcile};
pub use slug::{resolve_slug, slugify};

use tracing::info;

use crate::ai::prompt::{PromptPair, render_create, render_edit, summarize_sources};
use crate::ai::provider::SharedProvider;
use crate::config::{Config, IngestConfig, SiteConfig};
use crate::ingest::SourceIngestor;
use crate::storage::SharedStore;
use crate::types::{
    EditRequest, GenerationRequest, Result, SectorError, SectorPayload, Source,
};

/// Where a published page ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub url: String,
    pub document_id: String,
    pub page_index: String,
}

pub struct SectorPipeline {
    provider: SharedProvider,
    store: SharedStore,
    ingestor: SourceIngestor,
    ingest: IngestConfig,
    site: SiteConfig,
}

impl SectorPipeline {
    pub fn new(provider: SharedProvider, store: SharedStore, config: &Config) -> Result<Self> {
        Ok(Self {
            provider,
            store,
            ingestor: SourceIngestor::new(&config.ingest)?,
            ingest: config.ingest.clone(),
            site: config.site.clone(),
        })
    }

    /// Generate a new page, ready to publish
    pub async fn generate(&self, request: &GenerationRequest) -> Result<SectorPayload> {
        let sources = self.ingestor.gather(&request.files, &request.links).await?;
        let slug = resolve_slug(request.slug.as_deref(), &request.company_name);
        info!(
            "Generating page '{}' for {} ({})",
            slug, request.company_name, request.sector_label
        );

        let prompt = render_create(request, &slug, &self.summarize(&sources));
        let payload = self.complete(&prompt).await?;
        Ok(finalize(payload, &slug))
    }

    /// Regenerate an existing page with edits applied, ready to publish.
    ///
    /// Fails with `EditTargetNotFound` before any ingestion or model call
    /// when nothing is stored under the slug.
    pub async fn generate_update(&self, request: &EditRequest) -> Result<SectorPayload> {
        let stored = self
            .store
            .fetch_by_slug(&request.slug)
            .await?
            .ok_or_else(|| SectorError::EditTargetNotFound {
                slug: request.slug.clone(),
            })?;
        let existing = prepare_existing(stored, &request.slug)?;
        info!("Editing page '{}'", request.slug);

        let sources = self.ingestor.gather(&request.files, &request.links).await?;
        let existing_json = serde_json::to_string_pretty(&existing)?;
        let prompt = render_edit(request, &existing_json, &self.summarize(&sources));

        let payload = self.complete(&prompt).await?;
        Ok(finalize(payload, &request.slug))
    }

    /// Upsert `payload` under its slug and return the public page URL
    pub async fn publish(&self, payload: SectorPayload) -> Result<PublishOutcome> {
        let published = self.store.list_slugs().await?;
        let document = reconcile(payload, &published)?;
        self.store.upsert(&document).await?;

        info!("Published {} as page {}", document.id, document.page_index);
        Ok(PublishOutcome {
            url: self.site.page_url(document.slug()),
            document_id: document.id,
            page_index: document.page_index,
        })
    }

    fn summarize(&self, sources: &[Source]) -> String {
        summarize_sources(sources, self.ingest.summary_snippet_chars)
    }

    async fn complete(&self, prompt: &PromptPair) -> Result<SectorPayload> {
        let response = self.provider.generate(&prompt.system, &prompt.user).await?;
        info!(
            "{} ({}) answered in {}ms, {} tokens{}",
            self.provider.name(),
            self.provider.model(),
            response.timing.total_ms,
            response.usage.total(),
            if response.recovered { ", JSON recovered from surrounding text" } else { "" }
        );

        let payload = SectorPayload::from_value(response.content)?;
        payload.warn_on_cardinality_drift();
        Ok(payload)
    }
}
