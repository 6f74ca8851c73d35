//! Pipeline requests
//!
//! The two ways into the pipeline: creating a new page from a company brief,
//! or editing an already-published page in place.

use std::path::PathBuf;

/// Create a new sector page
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub company_name: String,
    pub sector_label: String,
    /// Explicit slug; derived from `company_name` when absent
    pub slug: Option<String>,
    pub context: String,
    pub files: Vec<PathBuf>,
    pub links: Vec<String>,
}

/// Rewrite an existing sector page
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    /// Must identify a page that already exists in the store
    pub slug: String,
    pub sector_label: String,
    pub instructions: String,
    pub context: String,
    pub files: Vec<PathBuf>,
    pub links: Vec<String>,
}

impl EditRequest {
    /// Instructions shown to the model, falling back to the context text
    pub fn effective_instructions(&self) -> &str {
        if self.instructions.trim().is_empty() {
            &self.context
        } else {
            &self.instructions
        }
    }
}
