//! Source Ingestion
//!
//! Reads documents and web pages into plain-text [`Source`] records, files
//! first and then links, each in the order given. Every source is truncated
//! to the configured character budget.

mod document;
mod link;

pub use document::read_document;
pub use link::{LinkReader, visible_text};

use futures::future::try_join_all;
use std::path::PathBuf;
use tracing::info;

use crate::config::IngestConfig;
use crate::types::{Result, Source, SourceKind};

#[derive(Debug, Clone)]
pub struct SourceIngestor {
    links: LinkReader,
    max_source_chars: usize,
}

impl SourceIngestor {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Ok(Self {
            links: LinkReader::new(config.link_timeout_secs)?,
            max_source_chars: config.max_source_chars,
        })
    }

    /// Read every file and link. The first failure aborts the whole batch.
    pub async fn gather(&self, files: &[PathBuf], links: &[String]) -> Result<Vec<Source>> {
        if files.is_empty() && links.is_empty() {
            return Ok(Vec::new());
        }

        let mut sources = Vec::with_capacity(files.len() + links.len());
        for path in files {
            let content = read_document(path)?;
            sources.push(Source::new(path.display().to_string(), SourceKind::File, content));
        }

        let pages = try_join_all(links.iter().map(|link| self.links.read(link))).await?;
        sources.extend(
            links
                .iter()
                .zip(pages)
                .map(|(link, content)| Source::new(link.as_str(), SourceKind::Link, content)),
        );

        info!(
            "Ingested {} file(s) and {} link(s)",
            files.len(),
            links.len()
        );
        Ok(sources
            .iter()
            .map(|source| source.truncated(self.max_source_chars))
            .collect())
    }
}
