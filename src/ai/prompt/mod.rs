//! Prompt Assembly
//!
//! Renders the fixed system instruction and one of two user instructions
//! (create or edit) from a request and a digest of its sources. Pure string
//! work: no I/O, no network.

mod templates;

pub use templates::{CREATE_TEMPLATE, EDIT_TEMPLATE, SECTOR_SCHEMA, SYSTEM_PROMPT};

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::constants::prompt::{NO_CONTEXT, NO_SOURCES};
use crate::types::{EditRequest, GenerationRequest, Source, take_chars};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Substitute `{name}` placeholders in one pass.
///
/// Substituted values are never rescanned, so user text containing braces is
/// inserted verbatim. Unknown placeholders are left as they are.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            vars.iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| (*value).to_string())
        })
        .into_owned()
}

/// A rendered system + user instruction pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Digest of all sources: a tagged header plus the first `snippet_chars`
/// characters of each, separated by blank lines.
///
/// Never empty: with no sources an explicit placeholder is returned.
pub fn summarize_sources(sources: &[Source], snippet_chars: usize) -> String {
    if sources.is_empty() {
        return NO_SOURCES.to_string();
    }

    sources
        .iter()
        .map(|source| {
            format!(
                "[{}] {}\n{}",
                source.source_kind,
                source.source_id,
                take_chars(&source.content, snippet_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn context_or_placeholder(context: &str) -> &str {
    if context.trim().is_empty() {
        NO_CONTEXT
    } else {
        context
    }
}

/// Prompt asking for a brand new page under `slug`
pub fn render_create(request: &GenerationRequest, slug: &str, sources_summary: &str) -> PromptPair {
    let user = fill(
        CREATE_TEMPLATE,
        &[
            ("company_name", request.company_name.as_str()),
            ("sector_label", request.sector_label.as_str()),
            ("slug", slug),
            ("company_context", context_or_placeholder(&request.context)),
            ("sources_summary", sources_summary),
            ("schema", SECTOR_SCHEMA),
        ],
    );

    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Prompt asking the model to return `existing_json` with edits applied
pub fn render_edit(request: &EditRequest, existing_json: &str, sources_summary: &str) -> PromptPair {
    let user = fill(
        EDIT_TEMPLATE,
        &[
            ("slug", request.slug.as_str()),
            ("sector_label", request.sector_label.as_str()),
            ("instructions", context_or_placeholder(request.effective_instructions())),
            ("company_context", context_or_placeholder(&request.context)),
            ("sources_summary", sources_summary),
            ("existing_json", existing_json),
        ],
    );

    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
