//! Permission risk classification and score computation.
//!
//! Scoring is additive with saturation: each distinct permission contributes
//! its tier's weight exactly once and the total is capped at 100, keeping the
//! scale bounded and interpretable regardless of how many permissions an
//! extension declares.

pub mod finding;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::manifest::CapabilityRecord;

pub use finding::{RiskFinding, RiskTier};

/// Maximum total score.
pub const MAX_SCORE: u8 = 100;

/// Classification of known permission tokens.
///
/// Tokens absent from this table default to [`RiskTier::Low`]: browser
/// permission vocabularies evolve, and an unknown token should read as
/// low-risk rather than be rejected.
static PERMISSION_TIERS: Lazy<HashMap<&'static str, RiskTier>> = Lazy::new(|| {
    use RiskTier::*;
    HashMap::from([
        // Can completely compromise privacy/security
        ("all_urls", Critical),
        ("<all_urls>", Critical),
        ("webRequestBlocking", Critical),
        ("debugger", Critical),
        ("proxy", Critical),
        ("background", Critical),
        // Significant data access
        ("history", High),
        ("bookmarks", High),
        ("cookies", High),
        ("storage", High),
        ("unlimitedStorage", High),
        ("downloads", High),
        ("tabs", High),
        ("activeTab", High),
        ("webNavigation", High),
        ("webRequest", High),
        ("management", High),
        ("privacy", High),
        // Moderate access
        ("notifications", Medium),
        ("contextMenus", Medium),
        ("clipboardRead", Medium),
        ("clipboardWrite", Medium),
        ("geolocation", Medium),
        ("identity", Medium),
        ("identity.email", Medium),
        ("desktopCapture", Medium),
        ("pageCapture", Medium),
        ("system.cpu", Medium),
        ("system.memory", Medium),
        ("system.storage", Medium),
        // Basic functionality
        ("alarms", Low),
        ("idle", Low),
        ("power", Low),
        ("printerProvider", Low),
        ("printing", Low),
        ("printingMetrics", Low),
        ("scripting", Low),
        ("sidePanel", Low),
        ("storage.sync", Low),
        ("topSites", Low),
        ("tts", Low),
        ("ttsEngine", Low),
        ("nativeMessaging", Low),
    ])
});

/// Risk tier of a permission token, defaulting to [`RiskTier::Low`].
pub fn classify(permission: &str) -> RiskTier {
    PERMISSION_TIERS
        .get(permission)
        .copied()
        .unwrap_or(RiskTier::Low)
}

/// Known tokens and their tiers, sorted by descending tier then token, for
/// `list-permissions` output.
pub fn classification_table() -> Vec<(&'static str, RiskTier)> {
    let mut table: Vec<_> = PERMISSION_TIERS.iter().map(|(&t, &tier)| (t, tier)).collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    table
}

/// Compute the total risk score and ordered findings for a record.
///
/// One finding per distinct permission; findings are sorted by descending
/// tier, ties keeping the order permissions were first encountered. Total
/// over any well-formed record; scoring the same record twice yields
/// identical output.
pub fn score(record: &CapabilityRecord) -> (u8, Vec<RiskFinding>) {
    let mut total: u32 = 0;
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    for permission in &record.permissions {
        if !seen.insert(permission.as_str()) {
            continue;
        }
        let risk_level = classify(permission);
        let points = risk_level.weight();
        total = (total + points).min(MAX_SCORE as u32);
        findings.push(RiskFinding {
            permission: permission.clone(),
            risk_level,
            points,
        });
    }

    // Stable sort: first-seen order survives within a tier.
    findings.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

    (total as u8, findings)
}

/// Presentation band derived from the total score. Part of the scoring
/// contract: presentation performs no independent risk logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    High,
    Medium,
    LowMedium,
    Low,
}

impl RiskBand {
    /// Band for a total score. Boundary values belong to the higher band.
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::High,
            40..=69 => Self::Medium,
            20..=39 => Self::LowMedium,
            _ => Self::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH RISK",
            Self::Medium => "MEDIUM RISK",
            Self::LowMedium => "LOW-MEDIUM RISK",
            Self::Low => "LOW RISK",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            Self::High => "#ff4444",
            Self::Medium => "#ffaa00",
            Self::LowMedium => "#ffcc00",
            Self::Low => "#44cc44",
        }
    }
}
