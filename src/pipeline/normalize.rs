//! Payload Normalization
//!
//! Turns a schema-valid payload into one that is ready to publish (fixed
//! slug, guarded prices, fresh identity keys), and turns a stored page back
//! into a key-less payload the model can edit.

use serde_json::Value;
use tracing::debug;

use super::pricing::apply_price_guardrails;
use crate::constants::store::SYSTEM_FIELDS;
use crate::types::{ItemKey, Result, SectorError, SectorPayload};

/// Give every list item a fresh identity key, replacing any it had
pub fn inject_keys(payload: SectorPayload) -> SectorPayload {
    payload.map_item_keys(|_| Some(ItemKey::generate()))
}

/// Remove every list item's identity key
pub fn strip_keys(payload: SectorPayload) -> SectorPayload {
    payload.map_item_keys(|_| None)
}

/// Prepare a generated payload for publishing.
///
/// The slug is overwritten with `slug` before the price guardrails run, and
/// keys are injected last so every item leaves with a brand new key.
pub fn finalize(mut payload: SectorPayload, slug: &str) -> SectorPayload {
    payload.slug = slug.to_string();
    let payload = inject_keys(apply_price_guardrails(payload));
    debug!(
        "Normalized '{}': {} keyed items",
        payload.slug,
        payload.item_total()
    );
    payload
}

/// Convert a stored page into an editable payload.
///
/// Store-managed fields are dropped, `slug.current` is flattened to a plain
/// string (falling back to `requested_slug` when absent), and identity keys
/// are stripped so the model never sees them.
pub fn prepare_existing(stored: Value, requested_slug: &str) -> Result<SectorPayload> {
    let Value::Object(mut fields) = stored else {
        return Err(SectorError::schema("$", "stored page is not a JSON object"));
    };

    for name in SYSTEM_FIELDS {
        fields.remove(name);
    }

    let slug = match fields.remove("slug") {
        Some(Value::Object(slug_ref)) => slug_ref
            .get("current")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Some(Value::String(slug)) if !slug.is_empty() => Some(slug),
        _ => None,
    }
    .unwrap_or_else(|| requested_slug.to_string());
    fields.insert("slug".to_string(), Value::String(slug));

    SectorPayload::from_value(Value::Object(fields)).map(strip_keys)
}
