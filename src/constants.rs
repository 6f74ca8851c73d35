//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Model endpoint constants
pub mod llm {
    /// Default OpenAI-compatible API base
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    pub const DEFAULT_TEMPERATURE: f32 = 0.4;

    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1800;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Characters of unparseable output echoed back in errors
    pub const ERROR_PREVIEW_CHARS: usize = 200;
}

/// Content store constants
pub mod store {
    pub const DEFAULT_API_VERSION: &str = "2023-08-01";

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Document type of every sector page
    pub const DOCUMENT_TYPE: &str = "sector";

    /// Store document ids are this prefix followed by the slug
    pub const DOCUMENT_ID_PREFIX: &str = "sector-";

    /// Slugs of all sector pages, oldest first
    pub const SLUG_LISTING_QUERY: &str =
        r#"*[_type == "sector"]|order(_createdAt asc){ "slug": slug.current }"#;

    /// Full sector page for the `$slug` parameter
    pub const DOCUMENT_BY_SLUG_QUERY: &str = r#"*[_type == "sector" && slug.current == $slug][0]"#;

    /// Store-managed fields removed before a page is handed back to the model
    pub const SYSTEM_FIELDS: [&str; 5] = ["_id", "_type", "_rev", "_createdAt", "_updatedAt"];
}

/// Source ingestion constants
pub mod ingest {
    /// Characters kept from each source after extraction
    pub const DEFAULT_MAX_SOURCE_CHARS: usize = 5000;

    /// Characters of each source included in the prompt digest
    pub const DEFAULT_SUMMARY_SNIPPET_CHARS: usize = 1200;

    /// Link fetch timeout (seconds)
    pub const DEFAULT_LINK_TIMEOUT_SECS: u64 = 15;

    /// Elements whose text never counts as visible page content
    pub const INVISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];
}

/// Prompt rendering constants
pub mod prompt {
    pub const NO_SOURCES: &str = "(no additional sources)";

    pub const NO_CONTEXT: &str = "(no additional context)";
}

/// Slug and pricing constants
pub mod page {
    /// Slug used when a company name has no usable characters
    pub const FALLBACK_SLUG: &str = "sector";

    /// Price shown for unrecognised services that came back without one
    pub const PLACEHOLDER_PRICE: &str = "$XX-XXK";

    /// Public path segment under which sector pages are served
    pub const SITE_SECTION: &str = "sectors";
}

/// Site constants
pub mod site {
    pub const DEFAULT_URL: &str = "http://localhost:3000";
}
