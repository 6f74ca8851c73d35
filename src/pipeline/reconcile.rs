//! Publish Reconciliation
//!
//! Page indices are 1-based positions in the store's ordered slug listing.
//! A slug that is already published keeps its position; a new slug goes to
//! the end.
//!
//! Listing and upsert are two separate calls. Two publishes of new slugs
//! running at the same time can read the same listing and both claim the
//! next index; the store has no transaction to prevent that.

use tracing::debug;

use crate::types::{PageIndex, Result, SectorDocument, SectorError, SectorPayload};

/// Index of `slug` among the `published` slugs, or the next free one
pub fn page_index_for(slug: &str, published: &[String]) -> PageIndex {
    let position = published
        .iter()
        .position(|existing| existing == slug)
        .unwrap_or(published.len());
    PageIndex::from_position(position + 1)
}

/// Assign the page index and assemble the document to upsert
pub fn reconcile(payload: SectorPayload, published: &[String]) -> Result<SectorDocument> {
    if payload.slug.is_empty() {
        return Err(SectorError::missing("slug"));
    }

    let page_index = page_index_for(&payload.slug, published);
    debug!(
        "Slug '{}' gets page index {} ({} published)",
        payload.slug,
        page_index,
        published.len()
    );
    Ok(SectorDocument::assemble(payload, page_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::validation::fixtures::sector_json;

    fn slugs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn payload(slug: &str) -> SectorPayload {
        SectorPayload::from_value(sector_json(slug)).unwrap()
    }

    #[test]
    fn test_existing_slug_keeps_its_position() {
        assert_eq!(page_index_for("b", &slugs(&["a", "b", "c"])).to_string(), "002");
        assert_eq!(page_index_for("a", &slugs(&["a", "b", "a"])).to_string(), "001");
    }

    #[test]
    fn test_new_slug_is_appended() {
        assert_eq!(page_index_for("d", &slugs(&["a", "b", "c"])).to_string(), "004");
        assert_eq!(page_index_for("first", &[]).to_string(), "001");
    }

    #[test]
    fn test_document_identity_follows_slug() {
        let doc = reconcile(payload("retail"), &slugs(&["acme", "retail"])).unwrap();
        assert_eq!(doc.id, "sector-retail");
        assert_eq!(doc.slug(), "retail");
        assert_eq!(doc.page_index, "002");
    }

    #[test]
    fn test_republish_is_stable() {
        let listing = slugs(&["acme", "retail"]);
        let first = reconcile(payload("acme"), &listing).unwrap();
        let second = reconcile(payload("acme"), &listing).unwrap();
        assert_eq!(first.page_index, second.page_index);
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let err = reconcile(payload(""), &[]).unwrap_err();
        assert_eq!(err.schema_path(), Some("slug"));
    }
}
