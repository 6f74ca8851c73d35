//! Slug derivation

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::page::FALLBACK_SLUG;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("slug filter pattern is valid"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("slug separator pattern is valid"));

/// URL-safe slug for a company name.
///
/// Total and deterministic: the result is always non-empty, made of
/// `[a-z0-9-]` with no leading or trailing hyphen, and falls back to
/// `"sector"` when nothing usable is left.
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(&filtered, "-");
    let slug = joined.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Explicit slug verbatim when one was given, otherwise derived from the name
pub fn resolve_slug(explicit: Option<&str>, company_name: &str) -> String {
    match explicit {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(company_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("  Acme Retail Group  "), "acme-retail-group");
        assert_eq!(slugify("Ben & Jerry's"), "ben-jerrys");
        assert_eq!(slugify("foo -- bar__baz"), "foo-barbaz");
        assert_eq!(slugify("--Edge--"), "edge");
        assert_eq!(slugify("Café Nørd 2024"), "caf-nrd-2024");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(slugify(""), "sector");
        assert_eq!(slugify("!!!"), "sector");
        assert_eq!(slugify(" - _ - "), "sector");
    }

    #[test]
    fn test_resolve_prefers_explicit_slug() {
        assert_eq!(resolve_slug(Some("Custom_Slug"), "Acme"), "Custom_Slug");
        assert_eq!(resolve_slug(Some(""), "Acme"), "acme");
        assert_eq!(resolve_slug(None, "Acme"), "acme");
    }

    proptest! {
        #[test]
        fn prop_slug_shape(input in any::<String>()) {
            let slug = slugify(&input);
            prop_assert!(!slug.is_empty());
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_slug_deterministic_and_stable(input in "\\PC{0,40}") {
            let slug = slugify(&input);
            prop_assert_eq!(&slug, &slugify(&input));
            prop_assert_eq!(&slugify(&slug), &slug);
        }
    }
}
