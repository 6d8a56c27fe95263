//! Pure stages of the listing engine.
//!
//! Extraction and partial matching are plain functions over strings and
//! JSON values; all filesystem access lives in `archive.rs`.

use regex::Regex;
use serde_json::{Map, Value};

use crate::options::CaptureMap;

/// Extract the named capture groups of `pattern` from `haystack`.
///
/// Returns `None` when the pattern does not match at all; unnamed groups are
/// ignored. A matching pattern with no named groups yields an empty map,
/// which is valid.
pub(crate) fn capture_groups(pattern: &Regex, haystack: &str) -> Option<CaptureMap> {
    let caps = pattern.captures(haystack)?;
    let mut groups = CaptureMap::new();
    for name in pattern.capture_names().flatten() {
        if let Some(m) = caps.name(name) {
            groups.insert(name.to_string(), m.as_str().to_string());
        }
    }
    Some(groups)
}

/// True when `record` carries a `Value`-equal entry for every matcher key.
///
/// Exact equality per field, logical AND across fields; a non-object record
/// can never satisfy a non-empty matcher.
pub(crate) fn matches_partial(record: &Value, matcher: &Map<String, Value>) -> bool {
    matcher
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_ENTRY_PATTERN;
    use serde_json::json;

    #[test]
    fn default_pattern_extracts_id_name_date() {
        let groups =
            capture_groups(&DEFAULT_ENTRY_PATTERN, "/archive/bills/(42) electricity [03-2023].json")
                .unwrap();
        assert_eq!(groups["id"], "42");
        assert_eq!(groups["name"], "electricity");
        assert_eq!(groups["date"], "03-2023");
        // the extension group is unnamed and must not appear
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn non_matching_path_yields_none() {
        assert!(capture_groups(&DEFAULT_ENTRY_PATTERN, "/archive/bills/notes.txt").is_none());
    }

    #[test]
    fn pattern_without_named_groups_yields_empty_map() {
        let pattern = Regex::new(r"\.json$").unwrap();
        let groups = capture_groups(&pattern, "/archive/bills/anything.json").unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn full_path_pattern_captures_parent_directory() {
        let pattern =
            Regex::new(r"/(?<address>[^/]+)/Internet/\[(?<month>.*?)\] (?<company>.*?)\.json$")
                .unwrap();
        let groups = capture_groups(
            &pattern,
            "/tmp/arc/123 Made Up Lane/Internet/[03-2023] provider.json",
        )
        .unwrap();
        assert_eq!(groups["address"], "123 Made Up Lane");
        assert_eq!(groups["month"], "03-2023");
        assert_eq!(groups["company"], "provider");
    }

    #[test]
    fn partial_match_is_exact_equality() {
        let record = json!({ "company": "provider", "amount": 180 });

        let matcher = json!({ "company": "provider" });
        assert!(matches_partial(&record, matcher.as_object().unwrap()));

        // no type coercion
        let matcher = json!({ "amount": "180" });
        assert!(!matches_partial(&record, matcher.as_object().unwrap()));

        // all keys must hold
        let matcher = json!({ "company": "provider", "amount": 200 });
        assert!(!matches_partial(&record, matcher.as_object().unwrap()));

        // absent matcher key constrains nothing
        let matcher = json!({});
        assert!(matches_partial(&record, matcher.as_object().unwrap()));
    }

    #[test]
    fn non_object_record_never_matches_non_empty_matcher() {
        let matcher = json!({ "company": "provider" });
        assert!(!matches_partial(&json!(42), matcher.as_object().unwrap()));
    }
}
