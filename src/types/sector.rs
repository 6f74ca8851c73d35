//! Sector Page Schema
//!
//! Strongly-typed shape of a sector page as the model produces it and as the
//! content store persists it. Field names on the wire are camelCase; list
//! items carry an optional `_key` that only exists once a payload has been
//! prepared for publishing.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::constants::store::{DOCUMENT_ID_PREFIX, DOCUMENT_TYPE};

/// Render a JSON scalar as text; `null` means no value
fn scalar_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) => Err(E::custom("expected text, found an array")),
        Value::Object(_) => Err(E::custom("expected text, found an object")),
    }
}

/// Text field that also accepts `null` (as empty) and numbers or booleans
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text::<D::Error>(Value::deserialize(deserializer)?)?.unwrap_or_default())
}

/// Optional text field; `null` stays absent
fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)
}

/// Paragraph list that also accepts a single paragraph
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| scalar_text(item).transpose())
            .collect(),
        single => Ok(scalar_text::<D::Error>(single)?.into_iter().collect()),
    }
}

// =============================================================================
// Identity Keys
// =============================================================================

/// Opaque identifier the content store uses to address array items.
///
/// 128 random bits rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// List items that can carry an identity key
pub trait Keyed {
    fn key(&self) -> Option<&ItemKey>;
    fn key_slot(&mut self) -> &mut Option<ItemKey>;
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> Option<&ItemKey> {
                    self.key.as_ref()
                }

                fn key_slot(&mut self) -> &mut Option<ItemKey> {
                    &mut self.key
                }
            }
        )*
    };
}

impl_keyed!(ContentCard, NumberedItem, ServiceCard, FaqItem);

// =============================================================================
// Page Index
// =============================================================================

/// 1-based position of a page in store creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    /// Build from a 1-based position; zero is clamped to the first page
    pub fn from_position(position: usize) -> Self {
        Self(position.max(1))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cta_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cta_href: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub explore_label: String,
}

/// Card used by the consulting and engagement sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentCard {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: String,
}

/// Numbered entry used by the whyUs and methodology sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberedItem {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceCard {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    pub title: String,
    /// Absent or blank until price guardrails run
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ItemKey>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Consulting {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub description: Vec<String>,
    pub cards: Vec<ContentCard>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhyUs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    pub items: Vec<NumberedItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Services {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub intro: String,
    pub cards: Vec<ServiceCard>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Methodology {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    pub steps: Vec<NumberedItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub intro: String,
    pub cards: Vec<ContentCard>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub button_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub button_href: String,
}

// =============================================================================
// Payload
// =============================================================================

/// Expected item count per keyed list, in [`SectorPayload::item_counts`] order
pub const SECTION_CARDINALITIES: [(&str, usize); 6] = [
    ("consulting.cards", 3),
    ("whyUs.items", 6),
    ("services.cards", 5),
    ("methodology.steps", 6),
    ("engagement.cards", 3),
    ("faq.items", 6),
];

/// The canonical content document for one sector page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub page_index: String,
    pub page_tag: String,
    pub hero: Hero,
    pub consulting: Consulting,
    pub why_us: WhyUs,
    pub services: Services,
    pub methodology: Methodology,
    pub engagement: Engagement,
    pub faq: Faq,
    pub cta: Cta,
}

impl SectorPayload {
    /// Item count of each keyed list, paired with its wire path
    pub fn item_counts(&self) -> [(&'static str, usize); 6] {
        [
            ("consulting.cards", self.consulting.cards.len()),
            ("whyUs.items", self.why_us.items.len()),
            ("services.cards", self.services.cards.len()),
            ("methodology.steps", self.methodology.steps.len()),
            ("engagement.cards", self.engagement.cards.len()),
            ("faq.items", self.faq.items.len()),
        ]
    }

    /// Every key present across the six keyed lists, in document order.
    /// Items without a key are skipped.
    pub fn item_keys(&self) -> Vec<&ItemKey> {
        fn collect<'a, T: Keyed>(items: &'a [T], out: &mut Vec<&'a ItemKey>) {
            out.extend(items.iter().filter_map(Keyed::key));
        }

        let mut keys = Vec::new();
        collect(&self.consulting.cards, &mut keys);
        collect(&self.why_us.items, &mut keys);
        collect(&self.services.cards, &mut keys);
        collect(&self.methodology.steps, &mut keys);
        collect(&self.engagement.cards, &mut keys);
        collect(&self.faq.items, &mut keys);
        keys
    }

    /// Total number of items across the six keyed lists
    pub fn item_total(&self) -> usize {
        self.item_counts().iter().map(|(_, n)| n).sum()
    }

    /// Rewrite the key of every item in the six keyed lists
    pub fn map_item_keys<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(Option<ItemKey>) -> Option<ItemKey>,
    {
        fn rekey<T: Keyed>(items: &mut [T], f: &mut dyn FnMut(Option<ItemKey>) -> Option<ItemKey>) {
            for item in items {
                let slot = item.key_slot();
                *slot = f(slot.take());
            }
        }

        rekey(&mut self.consulting.cards, &mut f);
        rekey(&mut self.why_us.items, &mut f);
        rekey(&mut self.services.cards, &mut f);
        rekey(&mut self.methodology.steps, &mut f);
        rekey(&mut self.engagement.cards, &mut f);
        rekey(&mut self.faq.items, &mut f);
        self
    }
}

// =============================================================================
// Store Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRef {
    pub current: String,
}

/// Final document written to the content store.
///
/// Only the fields listed here are persisted; anything else on the payload
/// is dropped during assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    pub title: String,
    pub slug: SlugRef,
    pub page_index: String,
    pub page_tag: String,
    pub hero: Hero,
    pub consulting: Consulting,
    pub why_us: WhyUs,
    pub services: Services,
    pub methodology: Methodology,
    pub engagement: Engagement,
    pub faq: Faq,
    pub cta: Cta,
}

impl SectorDocument {
    /// Store identifier derived from a slug
    pub fn id_for(slug: &str) -> String {
        format!("{}{}", DOCUMENT_ID_PREFIX, slug)
    }

    pub fn assemble(payload: SectorPayload, page_index: PageIndex) -> Self {
        Self {
            id: Self::id_for(&payload.slug),
            doc_type: DOCUMENT_TYPE.to_string(),
            title: payload.title,
            slug: SlugRef {
                current: payload.slug,
            },
            page_index: page_index.to_string(),
            page_tag: payload.page_tag,
            hero: payload.hero,
            consulting: payload.consulting,
            why_us: payload.why_us,
            services: payload.services,
            methodology: payload.methodology,
            engagement: payload.engagement,
            faq: payload.faq,
            cta: payload.cta,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_index_is_zero_padded() {
        assert_eq!(PageIndex::from_position(1).to_string(), "001");
        assert_eq!(PageIndex::from_position(42).to_string(), "042");
        assert_eq!(PageIndex::from_position(1000).to_string(), "1000");
        assert_eq!(PageIndex::from_position(0).get(), 1);
    }

    #[test]
    fn test_item_key_is_128_bit_hex() {
        let key = ItemKey::generate();
        assert_eq!(key.as_str().len(), 32);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, ItemKey::generate());
    }

    #[test]
    fn test_card_without_key_omits_key_on_wire() {
        let card = ContentCard {
            key: None,
            id: "/001".to_string(),
            title: "Audit".to_string(),
            body: "Map the stack".to_string(),
        };
        let value = serde_json::to_value(&card).unwrap();
        assert!(value.get("_key").is_none());

        let keyed = ContentCard {
            key: Some(ItemKey::from("abc")),
            ..card
        };
        let value = serde_json::to_value(&keyed).unwrap();
        assert_eq!(value["_key"], "abc");
    }

    #[test]
    fn test_null_text_fields_become_empty() {
        let item: FaqItem = serde_json::from_value(json!({
            "question": "Why?",
            "answer": null
        }))
        .unwrap();
        assert_eq!(item.answer, "");
        assert!(item.key.is_none());
    }

    #[test]
    fn test_scalar_text_fields_are_stringified() {
        let item: NumberedItem = serde_json::from_value(json!({
            "id": 1,
            "title": "Fast",
            "description": true
        }))
        .unwrap();
        assert_eq!(item.id, "1");
        assert_eq!(item.description, "true");

        let card: ServiceCard = serde_json::from_value(json!({
            "title": "Executive Advisory",
            "price": 5000
        }))
        .unwrap();
        assert_eq!(card.price.as_deref(), Some("5000"));

        let card: ServiceCard =
            serde_json::from_value(json!({"title": "Audit", "price": null})).unwrap();
        assert!(card.price.is_none());
    }

    #[test]
    fn test_structured_text_field_is_rejected() {
        let err = serde_json::from_value::<FaqItem>(json!({
            "question": {"text": "Why?"},
            "answer": "Because"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("expected text, found an object"));
    }

    #[test]
    fn test_description_accepts_single_paragraph() {
        let consulting: Consulting = serde_json::from_value(json!({
            "description": "One paragraph",
            "cards": []
        }))
        .unwrap();
        assert_eq!(consulting.description, ["One paragraph"]);

        let consulting: Consulting = serde_json::from_value(json!({
            "description": ["First", null, 2],
            "cards": []
        }))
        .unwrap();
        assert_eq!(consulting.description, ["First", "2"]);

        let consulting: Consulting =
            serde_json::from_value(json!({"description": null, "cards": []})).unwrap();
        assert!(consulting.description.is_empty());
    }

    #[test]
    fn test_document_id_uses_slug() {
        assert_eq!(SectorDocument::id_for("acme"), "sector-acme");
    }
}
