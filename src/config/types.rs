//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Secrets are accepted on input but never serialized back out.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::{Result, SectorError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Model endpoint settings
    pub llm: LlmConfig,

    /// Content store settings
    pub store: StoreConfig,

    /// Public site settings
    pub site: SiteConfig,

    /// Source ingestion limits
    pub ingest: IngestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            store: StoreConfig::default(),
            site: SiteConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `SectorError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(SectorError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 || self.store.timeout_secs == 0 {
            return Err(SectorError::Config(
                "llm.timeout_secs and store.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_output_tokens == 0 {
            return Err(SectorError::Config(
                "llm.max_output_tokens must be greater than 0".to_string(),
            ));
        }

        if self.ingest.max_source_chars == 0 || self.ingest.link_timeout_secs == 0 {
            return Err(SectorError::Config(
                "ingest.max_source_chars and ingest.link_timeout_secs must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Fail unless every credential needed for a full run is present
    pub fn require_credentials(&self) -> Result<()> {
        if is_blank(&self.llm.api_key) {
            return Err(SectorError::Config("OPENAI_API_KEY is required".to_string()));
        }

        if is_blank(&self.store.project_id)
            || is_blank(&self.store.dataset)
            || is_blank(&self.store.token)
        {
            return Err(SectorError::Config(
                "Sanity project, dataset, and token are required".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Never serialized to output
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: constants::llm::DEFAULT_MODEL.to_string(),
            temperature: constants::llm::DEFAULT_TEMPERATURE,
            max_output_tokens: constants::llm::DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: constants::llm::DEFAULT_TIMEOUT_SECS,
            api_base: None,
            api_key: None,
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub project_id: Option<String>,

    pub dataset: Option<String>,

    /// Dated API version, without the leading `v`
    pub api_version: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Overrides `https://<project_id>.api.sanity.io`
    pub api_host: Option<String>,

    /// Never serialized to output
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_host", &self.api_host)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: None,
            api_version: constants::store::DEFAULT_API_VERSION.to_string(),
            timeout_secs: constants::store::DEFAULT_TIMEOUT_SECS,
            api_host: None,
            token: None,
        }
    }
}

// =============================================================================
// Site Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the public site
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: constants::site::DEFAULT_URL.to_string(),
        }
    }
}

impl SiteConfig {
    /// Public URL of the page published under `slug`
    pub fn page_url(&self, slug: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url.trim_end_matches('/'),
            constants::page::SITE_SECTION,
            slug
        )
    }
}

// =============================================================================
// Ingestion Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Characters kept per source after extraction
    pub max_source_chars: usize,

    /// Characters per source included in the prompt digest
    pub summary_snippet_chars: usize,

    /// Link fetch timeout in seconds
    pub link_timeout_secs: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_source_chars: constants::ingest::DEFAULT_MAX_SOURCE_CHARS,
            summary_snippet_chars: constants::ingest::DEFAULT_SUMMARY_SNIPPET_CHARS,
            link_timeout_secs: constants::ingest::DEFAULT_LINK_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
