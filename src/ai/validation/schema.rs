//! Sector Schema Validation
//!
//! Structural check of a raw JSON document before it is converted into a
//! [`SectorPayload`]. The first violation found is reported with its path
//! (`services.cards[2].title`), so a broken model answer fails at the
//! generation boundary instead of somewhere inside normalization.

use serde_json::Value;
use tracing::warn;

use crate::types::{Result, SECTION_CARDINALITIES, SectorError, SectorPayload};

/// Top-level text fields every page must carry
const REQUIRED_SCALARS: [&str; 2] = ["title", "pageTag"];

/// Top-level text fields a page may omit
const OPTIONAL_SCALARS: [&str; 2] = ["slug", "pageIndex"];

/// Top-level sections every page must carry
pub const REQUIRED_SECTIONS: [&str; 8] = [
    "hero",
    "consulting",
    "whyUs",
    "services",
    "methodology",
    "engagement",
    "faq",
    "cta",
];

/// Plain text fields of each section, outside its keyed list
const SECTION_TEXT: [(&str, &[&str]); 8] = [
    ("hero", &["title", "subtitle", "ctaLabel", "ctaHref", "exploreLabel"]),
    ("consulting", &["label", "title"]),
    ("whyUs", &["label", "title"]),
    ("services", &["label", "title", "intro"]),
    ("methodology", &["label", "title"]),
    ("engagement", &["label", "title", "intro"]),
    ("faq", &["label", "title"]),
    ("cta", &["label", "title", "buttonLabel", "buttonHref"]),
];

/// A list of items that receives identity keys
struct KeyedList {
    section: &'static str,
    field: &'static str,
    /// Text fields each item must carry
    required: &'static [&'static str],
    /// Text fields each item may carry
    text: &'static [&'static str],
}

const CARD_TEXT: &[&str] = &["id", "title", "body"];
const NUMBERED_TEXT: &[&str] = &["id", "title", "description"];

const KEYED_LISTS: [KeyedList; 6] = [
    KeyedList {
        section: "consulting",
        field: "cards",
        required: &[],
        text: CARD_TEXT,
    },
    KeyedList {
        section: "whyUs",
        field: "items",
        required: &[],
        text: NUMBERED_TEXT,
    },
    KeyedList {
        section: "services",
        field: "cards",
        required: &["title"],
        text: &["id", "price", "body"],
    },
    KeyedList {
        section: "methodology",
        field: "steps",
        required: &[],
        text: NUMBERED_TEXT,
    },
    KeyedList {
        section: "engagement",
        field: "cards",
        required: &[],
        text: CARD_TEXT,
    },
    KeyedList {
        section: "faq",
        field: "items",
        required: &[],
        text: &["question", "answer"],
    },
];

/// Text fields accept any scalar; numbers and booleans are stringified later
fn check_text(value: Option<&Value>, path: impl FnOnce() -> String) -> Result<()> {
    match value {
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            Err(SectorError::schema(path(), "expected text"))
        }
        _ => Ok(()),
    }
}

/// Check that `value` has every section, list and field normalization needs
pub fn check_document(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| SectorError::schema("$", "expected a JSON object"))?;

    for name in REQUIRED_SCALARS {
        match root.get(name) {
            None | Some(Value::Null) => return Err(SectorError::missing(name)),
            Some(Value::String(_)) => {}
            Some(_) => return Err(SectorError::schema(name, "expected a string")),
        }
    }

    for name in OPTIONAL_SCALARS {
        check_text(root.get(name), || name.to_string())?;
    }

    for name in REQUIRED_SECTIONS {
        match root.get(name) {
            None | Some(Value::Null) => return Err(SectorError::missing(name)),
            Some(Value::Object(_)) => {}
            Some(_) => return Err(SectorError::schema(name, "expected an object")),
        }
    }

    for (section, fields) in SECTION_TEXT {
        for field in fields {
            check_text(root[section].get(*field), || format!("{}.{}", section, field))?;
        }
    }

    match root["consulting"].get("description") {
        Some(Value::Array(paragraphs)) => {
            for (idx, paragraph) in paragraphs.iter().enumerate() {
                check_text(Some(paragraph), || {
                    format!("consulting.description[{}]", idx)
                })?;
            }
        }
        other => check_text(other, || "consulting.description".to_string())?,
    }

    for list in &KEYED_LISTS {
        let path = format!("{}.{}", list.section, list.field);
        let items = match root[list.section].get(list.field) {
            None | Some(Value::Null) => return Err(SectorError::missing(path)),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(SectorError::schema(path, "expected an array")),
        };

        for (idx, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, idx);
            let fields = item
                .as_object()
                .ok_or_else(|| SectorError::schema(&item_path, "expected an object"))?;

            for field in list.required {
                match fields.get(*field) {
                    Some(Value::String(_)) => {}
                    None | Some(Value::Null) => {
                        return Err(SectorError::missing(format!("{}.{}", item_path, field)));
                    }
                    Some(_) => {
                        return Err(SectorError::schema(
                            format!("{}.{}", item_path, field),
                            "expected a string",
                        ));
                    }
                }
            }

            match fields.get("_key") {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(SectorError::schema(
                        format!("{}._key", item_path),
                        "expected a string",
                    ));
                }
            }

            for field in list.text {
                check_text(fields.get(*field), || format!("{}.{}", item_path, field))?;
            }
        }
    }

    Ok(())
}

impl SectorPayload {
    /// Validate a raw document and convert it into a typed payload
    pub fn from_value(value: Value) -> Result<Self> {
        check_document(&value)?;
        // Every field the payload reads has been checked above
        serde_json::from_value(value).map_err(|e| SectorError::schema("$", e.to_string()))
    }

    /// Log every keyed list whose length differs from what the prompt asks for
    pub fn warn_on_cardinality_drift(&self) {
        for ((path, actual), (_, expected)) in self.item_counts().into_iter().zip(SECTION_CARDINALITIES)
        {
            if actual != expected {
                warn!(
                    "Section {} has {} items, expected {}",
                    path, actual, expected
                );
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sector_json;
    use super::*;

    #[test]
    fn test_valid_document_converts() {
        let payload = SectorPayload::from_value(sector_json("placeholder")).unwrap();
        assert_eq!(payload.slug, "placeholder");
        assert_eq!(payload.services.cards.len(), 5);
        assert_eq!(payload.faq.items.len(), 6);
        assert!(payload.item_keys().is_empty());
    }

    #[test]
    fn test_each_missing_section_is_named() {
        for section in REQUIRED_SECTIONS {
            let mut doc = sector_json("acme");
            doc.as_object_mut().unwrap().remove(section);
            let err = SectorPayload::from_value(doc).unwrap_err();
            assert_eq!(err.schema_path(), Some(section), "section {section}");
        }
    }

    #[test]
    fn test_missing_list_is_named() {
        let mut doc = sector_json("acme");
        doc["methodology"].as_object_mut().unwrap().remove("steps");
        let err = check_document(&doc).unwrap_err();
        assert_eq!(err.schema_path(), Some("methodology.steps"));
    }

    #[test]
    fn test_missing_service_title_is_named() {
        let mut doc = sector_json("acme");
        doc["services"]["cards"][2]
            .as_object_mut()
            .unwrap()
            .remove("title");
        let err = check_document(&doc).unwrap_err();
        assert_eq!(err.schema_path(), Some("services.cards[2].title"));
    }

    #[test]
    fn test_wrong_types_are_reported() {
        let mut doc = sector_json("acme");
        doc["faq"]["items"] = serde_json::json!("six questions");
        assert_eq!(
            check_document(&doc).unwrap_err().schema_path(),
            Some("faq.items")
        );

        let mut doc = sector_json("acme");
        doc["title"] = serde_json::json!(42);
        assert_eq!(check_document(&doc).unwrap_err().schema_path(), Some("title"));

        let mut doc = sector_json("acme");
        doc["whyUs"]["items"][0] = serde_json::json!("not an item");
        assert_eq!(
            check_document(&doc).unwrap_err().schema_path(),
            Some("whyUs.items[0]")
        );
    }

    #[test]
    fn test_nested_structured_text_is_named() {
        let mut doc = sector_json("acme");
        doc["services"]["cards"][1]["body"] = serde_json::json!({"text": "Teach"});
        assert_eq!(
            SectorPayload::from_value(doc).unwrap_err().schema_path(),
            Some("services.cards[1].body")
        );

        let mut doc = sector_json("acme");
        doc["hero"]["subtitle"] = serde_json::json!(["Working", "pipelines"]);
        assert_eq!(
            SectorPayload::from_value(doc).unwrap_err().schema_path(),
            Some("hero.subtitle")
        );

        let mut doc = sector_json("acme");
        doc["consulting"]["description"][1] = serde_json::json!({"p": "Delivery"});
        assert_eq!(
            SectorPayload::from_value(doc).unwrap_err().schema_path(),
            Some("consulting.description[1]")
        );

        let mut doc = sector_json("acme");
        doc["faq"]["items"][3]["_key"] = serde_json::json!(7);
        assert_eq!(
            SectorPayload::from_value(doc).unwrap_err().schema_path(),
            Some("faq.items[3]._key")
        );
    }

    #[test]
    fn test_numeric_price_is_accepted_and_guarded() {
        let mut doc = sector_json("acme");
        doc["services"]["cards"][0]["price"] = serde_json::json!(5000);
        doc["services"]["cards"][4]["price"] = serde_json::json!(30000);
        let payload = SectorPayload::from_value(doc).unwrap();
        assert_eq!(payload.services.cards[0].price.as_deref(), Some("5000"));
        assert_eq!(payload.services.cards[4].price.as_deref(), Some("30000"));

        let guarded = crate::pipeline::pricing::apply_price_guardrails(payload);
        assert_eq!(guarded.services.cards[0].price.as_deref(), Some("$5-15K"));
        assert_eq!(guarded.services.cards[4].price.as_deref(), Some("30000"));
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let mut doc = sector_json("acme");
        doc["whyUs"]["items"][0]["id"] = serde_json::json!(1);
        let payload = SectorPayload::from_value(doc).unwrap();
        assert_eq!(payload.why_us.items[0].id, "1");
    }

    #[test]
    fn test_single_description_paragraph_is_accepted() {
        let mut doc = sector_json("acme");
        doc["consulting"]["description"] = serde_json::json!("One paragraph");
        let payload = SectorPayload::from_value(doc).unwrap();
        assert_eq!(payload.consulting.description, ["One paragraph"]);
    }

    #[test]
    fn test_missing_page_tag_is_named() {
        let mut doc = sector_json("acme");
        doc.as_object_mut().unwrap().remove("pageTag");
        assert_eq!(
            check_document(&doc).unwrap_err().schema_path(),
            Some("pageTag")
        );
    }

    #[test]
    fn test_slug_and_page_index_are_optional() {
        let mut doc = sector_json("acme");
        let root = doc.as_object_mut().unwrap();
        root.remove("slug");
        root.remove("pageIndex");
        let payload = SectorPayload::from_value(doc).unwrap();
        assert_eq!(payload.slug, "");
        assert_eq!(payload.page_index, "");
    }
}
