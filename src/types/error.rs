//! Unified Error Type System
//!
//! Centralized error type for the whole generate → normalize → publish flow.
//!
//! ## Design Principles
//!
//! - Single error type (SectorError) for the entire application
//! - Structured variants carrying the context needed to diagnose a failed run
//! - Nothing is retried: every variant is fatal for the invocation that raised it

use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum SectorError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Startup
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Generation
    // -------------------------------------------------------------------------
    /// The model answered but no recognised response shape carried any text
    #[error("{provider} response had no text content")]
    EmptyResponse { provider: String },

    /// Text was present but could not be parsed, even after brace extraction
    #[error("Model returned malformed JSON: {message}. Content preview: {preview}")]
    MalformedJson { message: String, preview: String },

    // -------------------------------------------------------------------------
    // Domain
    // -------------------------------------------------------------------------
    #[error("Schema violation at '{path}': {message}")]
    SchemaViolation { path: String, message: String },

    #[error("No sector page exists with slug '{slug}'")]
    EditTargetNotFound { slug: String },

    #[error("Failed to read source {source_id}: {message}")]
    Ingest { source_id: String, message: String },

    // -------------------------------------------------------------------------
    // Remote Calls
    // -------------------------------------------------------------------------
    /// Non-success HTTP status from the model endpoint or the content store
    #[error("{service} request failed: {status} {body}")]
    RemoteCall {
        service: String,
        status: u16,
        body: String,
    },

    /// The request never produced a status (connect error, timeout, bad body)
    #[error("{service} transport error: {message}")]
    Transport { service: String, message: String },
}

pub type Result<T> = std::result::Result<T, SectorError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl SectorError {
    /// Create a schema violation naming the offending path
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a schema violation for an absent required field
    pub fn missing(path: impl Into<String>) -> Self {
        Self::schema(path, "required field is missing")
    }

    pub fn remote(service: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::RemoteCall {
            service: service.into(),
            status,
            body: body.into(),
        }
    }

    pub fn transport(service: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            service: service.into(),
            message: err.to_string(),
        }
    }

    pub fn ingest(source_id: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Ingest {
            source_id: source_id.into(),
            message: err.to_string(),
        }
    }

    /// Path named by a schema violation, if this is one
    pub fn schema_path(&self) -> Option<&str> {
        match self {
            Self::SchemaViolation { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Context extension trait for turning foreign errors into ingestion errors
pub trait ResultExt<T> {
    /// Attribute a failure to the source it was reading
    fn for_source(self, source_id: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn for_source(self, source_id: &str) -> Result<T> {
        self.map_err(|e| SectorError::ingest(source_id, e))
    }
}

// =============================================================================
// Tests
// =============================================================================
