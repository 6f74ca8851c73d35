//! Edit Command
//!
//! Rewrite an already-published sector page.
//!
//! Usage:
//!   sectorgen edit --slug <SLUG> [--sector <LABEL>] [--instructions <TEXT>]
//!                  [--context <TEXT>] [--doc <PATH>]... [--link <URL>]...
//!                  [--no-publish]

use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::types::{EditRequest, Result};

#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub slug: String,
    pub sector: Option<String>,
    pub instructions: String,
    pub context: String,
    pub docs: Vec<PathBuf>,
    pub links: Vec<String>,
    pub no_publish: bool,
}

impl EditOptions {
    fn into_request(self) -> (EditRequest, bool) {
        let request = EditRequest {
            slug: self.slug,
            sector_label: self.sector.unwrap_or_default(),
            instructions: self.instructions,
            context: self.context,
            files: self.docs,
            links: self.links,
        };
        (request, self.no_publish)
    }
}

pub async fn run(options: EditOptions) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (request, no_publish) = options.into_request();

    let payload = ctx.pipeline.generate_update(&request).await?;
    ctx.deliver(payload, no_publish).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_stands_in_for_missing_instructions() {
        let (request, no_publish) = EditOptions {
            slug: "acme".to_string(),
            context: "Lean into grocery".to_string(),
            ..Default::default()
        }
        .into_request();

        assert_eq!(request.sector_label, "");
        assert_eq!(request.effective_instructions(), "Lean into grocery");
        assert!(!no_publish);
    }
}
