//! ManifestGuard — local browser extension privacy auditor.
//!
//! Discovers locally installed extensions, normalizes their manifests, and
//! computes a deterministic 0–100 privacy-risk score per extension with an
//! ordered list of contributing findings. Offline: the scan is a read-only
//! filesystem traversal with no network access.
//!
//! # Quick Start
//!
//! ```no_run
//! use manifestguard::{scan, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan(&options).unwrap();
//! for result in &report.results {
//!     println!("{}: {}/100", result.record.name, result.score);
//! }
//! ```

pub mod config;
pub mod error;
pub mod explain;
pub mod manifest;
pub mod output;
pub mod platform;
pub mod scoring;
pub mod store;

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use config::Config;
use error::{GuardError, Result};
use manifest::CapabilityRecord;
use output::OutputFormat;
use platform::Platform;
use scoring::RiskFinding;
use store::VersionPolicy;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.manifestguard.toml` in the working
    /// directory).
    pub config_path: Option<PathBuf>,
    /// Explicit store path, bypassing config and platform detection.
    pub store_override: Option<PathBuf>,
    /// CLI override for the version selection policy.
    pub version_policy_override: Option<VersionPolicy>,
    /// CLI override for the fail-score threshold.
    pub fail_score_override: Option<u8>,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            store_override: None,
            version_policy_override: None,
            fail_score_override: None,
            format: OutputFormat::Console,
        }
    }
}

/// One audited extension: its capability record, total score, and findings
/// sorted by descending severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    #[serde(flatten)]
    pub record: CapabilityRecord,
    pub score: u8,
    pub findings: Vec<RiskFinding>,
    /// Manifest the record was built from.
    pub manifest_path: PathBuf,
    /// SHA-256 of the manifest bytes. Lets callers detect that a cached
    /// narrative explanation is stale relative to a rescan.
    pub manifest_sha256: String,
}

/// Complete scan report: the located store and results sorted by descending
/// score (ties keep discovery order).
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub store_path: PathBuf,
    pub results: Vec<ScanResult>,
    /// Effective fail threshold, if one is configured.
    pub fail_score: Option<u8>,
}

impl ScanReport {
    /// Whether every extension scored below the fail threshold. Always true
    /// when no threshold is configured.
    pub fn passes(&self) -> bool {
        match self.fail_score {
            Some(threshold) => self.results.iter().all(|r| r.score < threshold),
            None => true,
        }
    }
}

/// Run a complete scan: locate store, enumerate extensions, normalize, score.
pub fn scan(options: &ScanOptions) -> Result<ScanReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".manifestguard.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(store) = &options.store_override {
        config.scan.store_path = Some(store.clone());
    }
    if let Some(policy) = options.version_policy_override {
        config.scan.version_policy = policy;
    }
    if let Some(threshold) = options.fail_score_override {
        config.report.fail_score = Some(threshold);
    }

    let candidates = match &config.scan.store_path {
        Some(explicit) => vec![explicit.clone()],
        None => platform::candidate_store_paths(Platform::current()),
    };
    let store_path = store::locate_store(&candidates).ok_or(GuardError::StoreNotFound {
        checked: candidates.len(),
    })?;

    let results = scan_store(&store_path, config.scan.version_policy)?;

    Ok(ScanReport {
        store_path,
        results,
        fail_score: config.report.fail_score,
    })
}

/// Audit every extension under a located store.
///
/// Extensions whose manifest cannot be resolved or parsed are skipped;
/// an empty result list is a valid outcome.
pub fn scan_store(store_path: &Path, policy: VersionPolicy) -> Result<Vec<ScanResult>> {
    let ids = store::list_extension_ids(store_path)?;

    let mut results: Vec<ScanResult> = ids
        .iter()
        .filter_map(|id| audit_extension(store_path, id, policy))
        .collect();

    // Stable sort keeps discovery order among equal scores.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(results)
}

/// Per-extension pipeline: resolve → parse → normalize → score.
///
/// Each step returning `None` skips this extension only; one extension's
/// failure never affects another's.
fn audit_extension(store_path: &Path, extension_id: &str, policy: VersionPolicy) -> Option<ScanResult> {
    let manifest_path = store::resolve_manifest(store_path, extension_id, policy)?;
    let document = manifest::parse(&manifest_path)?;
    let record = manifest::normalize(&document, extension_id);
    let (score, findings) = scoring::score(&record);
    let manifest_sha256 = manifest_digest(&manifest_path)?;

    Some(ScanResult {
        record,
        score,
        findings,
        manifest_path,
        manifest_sha256,
    })
}

fn manifest_digest(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    Some(format!("{:x}", Sha256::digest(&bytes)))
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
