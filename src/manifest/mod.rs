//! Manifest parsing and capability normalization.
//!
//! `parse` reads a manifest document; `normalize` is a pure transform from
//! the parsed document to a [`CapabilityRecord`], the schema-independent
//! representation every downstream component consumes. Manifest v2 and v3
//! differences (notably `host_permissions`) are absorbed here.

pub mod localization;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Universal match patterns granting access to every URL.
const ALL_URLS_PATTERNS: [&str; 2] = ["<all_urls>", "*://*/*"];

/// Synthetic permission token standing in for all-URLs host access.
pub const ALL_URLS_TOKEN: &str = "all_urls";

/// Normalized capabilities declared by one installed extension.
///
/// Immutable once built; every field is present, with defaults substituted
/// for absent manifest fields and message-catalog references replaced by
/// fixed placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// Installation identifier, unique within a store.
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Declared API permissions, duplicates collapsed, first-seen order.
    pub permissions: Vec<String>,
    /// Declared host match patterns, duplicates collapsed.
    pub host_permissions: Vec<String>,
    /// Match patterns across all content-script declarations, in declaration
    /// order. Informational only; not scored.
    pub content_script_matches: Vec<String>,
    pub manifest_version: u32,
}

/// Read and decode a manifest document.
///
/// Returns `None` on I/O, encoding, or decode failure: a malformed manifest
/// means this extension cannot be audited, not that the scan failed.
pub fn parse(manifest_path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(manifest_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %manifest_path.display(), error = %e, "manifest unreadable");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(path = %manifest_path.display(), error = %e, "manifest not valid JSON");
            None
        }
    }
}

/// Extract a [`CapabilityRecord`] from a parsed manifest document.
pub fn normalize(document: &Value, extension_id: &str) -> CapabilityRecord {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unknown Extension");
    let description = document
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("No description available");
    let version = document
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");

    let mut permissions = string_entries(document.get("permissions"));
    let host_permissions = string_entries(document.get("host_permissions"));

    // Manifest v3 expresses broad access through host permissions rather
    // than a legacy API-permission token; both forms must score identically.
    // Skip the synthetic token when an equivalent is already declared so a
    // permission contributes at most one finding.
    let grants_all_urls = host_permissions
        .iter()
        .any(|p| ALL_URLS_PATTERNS.contains(&p.as_str()));
    let already_declared = permissions
        .iter()
        .any(|p| p == ALL_URLS_TOKEN || ALL_URLS_PATTERNS.contains(&p.as_str()));
    if grants_all_urls && !already_declared {
        permissions.push(ALL_URLS_TOKEN.to_string());
    }

    let content_script_matches = document
        .get("content_scripts")
        .and_then(Value::as_array)
        .map(|scripts| {
            scripts
                .iter()
                .flat_map(|script| script.get("matches").and_then(Value::as_array))
                .flatten()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let manifest_version = document
        .get("manifest_version")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(2);

    CapabilityRecord {
        id: extension_id.to_string(),
        name: localization::resolve(name, "Localized Extension"),
        version: version.to_string(),
        description: localization::resolve(description, "Localized description"),
        permissions,
        host_permissions,
        content_script_matches,
        manifest_version,
    }
}

/// String entries of a JSON array, deduplicated, first-seen order preserved.
/// Non-string entries (object-form permissions in older manifests) are
/// ignored.
fn string_entries(value: Option<&Value>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| seen.insert(s.to_string()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn defaults_for_empty_document() {
        let record = normalize(&json!({}), "abc");
        assert_eq!(
            record,
            CapabilityRecord {
                id: "abc".into(),
                name: "Unknown Extension".into(),
                version: "Unknown".into(),
                description: "No description available".into(),
                permissions: vec![],
                host_permissions: vec![],
                content_script_matches: vec![],
                manifest_version: 2,
            }
        );
    }

    #[test]
    fn localized_fields_replaced_with_placeholders() {
        let doc = json!({
            "name": "__MSG_appName__",
            "description": "__MSG_appDesc__",
        });
        let record = normalize(&doc, "abc");
        assert_eq!(record.name, "Localized Extension");
        assert_eq!(record.description, "Localized description");
    }

    #[test]
    fn permissions_deduplicated_in_first_seen_order() {
        let doc = json!({ "permissions": ["tabs", "storage", "tabs", "cookies"] });
        let record = normalize(&doc, "abc");
        assert_eq!(record.permissions, vec!["tabs", "storage", "cookies"]);
    }

    #[test]
    fn non_string_permission_entries_ignored() {
        let doc = json!({ "permissions": ["tabs", {"usbDevices": []}, 42] });
        let record = normalize(&doc, "abc");
        assert_eq!(record.permissions, vec!["tabs"]);
    }

    #[test]
    fn all_urls_host_permission_synthesizes_token() {
        for pattern in ["<all_urls>", "*://*/*"] {
            let doc = json!({ "host_permissions": [pattern] });
            let record = normalize(&doc, "abc");
            assert_eq!(record.permissions, vec![ALL_URLS_TOKEN]);
            assert_eq!(record.host_permissions, vec![pattern]);
        }
    }

    #[test]
    fn synthesis_skipped_when_equivalent_already_declared() {
        let doc = json!({
            "permissions": ["<all_urls>"],
            "host_permissions": ["<all_urls>"],
        });
        let record = normalize(&doc, "abc");
        assert_eq!(record.permissions, vec!["<all_urls>"]);

        let doc = json!({
            "permissions": ["all_urls"],
            "host_permissions": ["*://*/*"],
        });
        let record = normalize(&doc, "abc");
        assert_eq!(record.permissions, vec!["all_urls"]);
    }

    #[test]
    fn narrow_host_permissions_do_not_synthesize() {
        let doc = json!({ "host_permissions": ["https://example.com/*"] });
        let record = normalize(&doc, "abc");
        assert!(record.permissions.is_empty());
    }

    #[test]
    fn content_script_matches_concatenated_in_order() {
        let doc = json!({
            "content_scripts": [
                { "matches": ["https://a.example/*", "https://b.example/*"] },
                { "js": ["inject.js"] },
                { "matches": ["https://a.example/*"] },
            ]
        });
        let record = normalize(&doc, "abc");
        // Concatenated across declarations, order preserved, not deduplicated
        assert_eq!(
            record.content_script_matches,
            vec![
                "https://a.example/*",
                "https://b.example/*",
                "https://a.example/*"
            ]
        );
    }

    #[test]
    fn manifest_version_extracted() {
        let record = normalize(&json!({ "manifest_version": 3 }), "abc");
        assert_eq!(record.manifest_version, 3);
    }

    #[test]
    fn parse_rejects_invalid_json_and_missing_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bad = tmp.path().join("manifest.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(parse(&bad).is_none());
        assert!(parse(&tmp.path().join("missing.json")).is_none());

        let good = tmp.path().join("good.json");
        std::fs::write(&good, r#"{"name": "Ok"}"#).unwrap();
        assert!(parse(&good).is_some());
    }

    #[test]
    fn parse_rejects_non_utf8_manifest() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("manifest.json");
        std::fs::write(&path, [0xff, 0xfe, 0x7b, 0x7d]).unwrap();
        assert!(parse(&path).is_none());
    }
}
