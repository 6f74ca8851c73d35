//! Create Command
//!
//! Generate a new sector page from a company brief.
//!
//! Usage:
//!   sectorgen create --company <NAME> --sector <LABEL> [--slug <SLUG>]
//!                    [--context <TEXT>] [--doc <PATH>]... [--link <URL>]...
//!                    [--no-publish]

use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::types::{GenerationRequest, Result};

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub company: String,
    pub sector: String,
    pub slug: Option<String>,
    pub context: String,
    pub docs: Vec<PathBuf>,
    pub links: Vec<String>,
    pub no_publish: bool,
}

impl CreateOptions {
    fn into_request(self) -> (GenerationRequest, bool) {
        let request = GenerationRequest {
            company_name: self.company,
            sector_label: self.sector,
            slug: self.slug,
            context: self.context,
            files: self.docs,
            links: self.links,
        };
        (request, self.no_publish)
    }
}

pub async fn run(options: CreateOptions) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (request, no_publish) = options.into_request();

    let payload = ctx.pipeline.generate(&request).await?;
    ctx.deliver(payload, no_publish).await
}
