//! Web page reader

use scraper::Html;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::constants::ingest::INVISIBLE_ELEMENTS;
use crate::types::{Result, ResultExt, SectorError};

#[derive(Debug, Clone)]
pub struct LinkReader {
    client: reqwest::Client,
}

impl LinkReader {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SectorError::transport("link reader", e))?;
        Ok(Self { client })
    }

    /// Fetch `link` and return its visible text
    pub async fn read(&self, link: &str) -> Result<String> {
        let url = Url::parse(link).for_source(link)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.for_source(link)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SectorError::ingest(link, format!("HTTP {}", status)));
        }

        let body = response.text().await.for_source(link)?;
        Ok(visible_text(&body))
    }
}

/// Text of an HTML page outside script, style and noscript elements, with
/// every whitespace run collapsed to a single space
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let chunks: Vec<&str> = document
        .root_element()
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
            })
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect();

    chunks.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}
