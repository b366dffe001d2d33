//! Seam for the external narrative-explanation collaborator.
//!
//! The core only builds a structured request from a capability record and
//! accepts opaque text back. Transport, prompt wording, and caching live
//! entirely on the collaborator's side, and a collaborator failure can never
//! affect scores or findings; it surfaces as text in its own output slot.

use serde::Serialize;

use crate::manifest::CapabilityRecord;

/// Request payload handed to a narrative collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub host_permissions: Vec<String>,
}

impl AnalysisRequest {
    pub fn from_record(record: &CapabilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            permissions: record.permissions.clone(),
            host_permissions: record.host_permissions.clone(),
        }
    }
}

/// A collaborator that renders a human-readable narrative for a request.
///
/// `Err` carries an explanation of the failure (misconfiguration, remote
/// error) as plain text.
pub trait Explainer {
    fn explain(&self, request: &AnalysisRequest) -> std::result::Result<String, String>;
}

/// Narrative text for the record's output slot.
///
/// Folds an absent or failed collaborator into explanatory text so callers
/// always have something to show; the numeric report is unaffected either
/// way.
pub fn narrative_or_notice(
    explainer: Option<&dyn Explainer>,
    record: &CapabilityRecord,
) -> String {
    let Some(explainer) = explainer else {
        return "Narrative analysis unavailable: no collaborator configured.".to_string();
    };
    let request = AnalysisRequest::from_record(record);
    match explainer.explain(&request) {
        Ok(text) => text,
        Err(reason) => {
            tracing::warn!(extension = %record.id, %reason, "narrative collaborator failed");
            format!("Narrative analysis unavailable: {reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CapabilityRecord {
        CapabilityRecord {
            id: "abc".into(),
            name: "Tab Helper".into(),
            version: "1.0".into(),
            description: "Manages tabs".into(),
            permissions: vec!["tabs".into()],
            host_permissions: vec!["https://example.com/*".into()],
            content_script_matches: vec![],
            manifest_version: 3,
        }
    }

    struct Fixed(std::result::Result<String, String>);

    impl Explainer for Fixed {
        fn explain(&self, _request: &AnalysisRequest) -> std::result::Result<String, String> {
            self.0.clone()
        }
    }

    #[test]
    fn request_mirrors_record_fields() {
        let request = AnalysisRequest::from_record(&record());
        assert_eq!(request.name, "Tab Helper");
        assert_eq!(request.permissions, vec!["tabs"]);
        assert_eq!(request.host_permissions, vec!["https://example.com/*"]);
    }

    #[test]
    fn collaborator_text_passes_through() {
        let explainer = Fixed(Ok("This extension can read your tabs.".into()));
        let text = narrative_or_notice(Some(&explainer), &record());
        assert_eq!(text, "This extension can read your tabs.");
    }

    #[test]
    fn collaborator_failure_becomes_notice() {
        let explainer = Fixed(Err("API key missing".into()));
        let text = narrative_or_notice(Some(&explainer), &record());
        assert!(text.contains("API key missing"));
    }

    #[test]
    fn absent_collaborator_becomes_notice() {
        let text = narrative_or_notice(None, &record());
        assert!(text.contains("no collaborator configured"));
    }
}
