use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::scoring::RiskBand;
use crate::{ScanReport, ScanResult};

/// JSON envelope around a scan report. Run metadata (id, timestamp) lives
/// here rather than on `ScanReport` so the scan itself stays deterministic.
#[derive(Serialize)]
struct JsonReport<'a> {
    scan_id: String,
    generated_at: DateTime<Utc>,
    store_path: &'a std::path::Path,
    extension_count: usize,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    risk_label: &'static str,
    risk_color: &'static str,
}

/// Render a scan report as pretty-printed JSON.
pub fn render(report: &ScanReport) -> Result<String> {
    let results = report
        .results
        .iter()
        .map(|result| {
            let band = RiskBand::from_score(result.score);
            JsonResult {
                result,
                risk_label: band.label(),
                risk_color: band.color_hex(),
            }
        })
        .collect();

    let envelope = JsonReport {
        scan_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        store_path: &report.store_path,
        extension_count: report.results.len(),
        results,
    };

    let json = serde_json::to_string_pretty(&envelope)?;
    Ok(json)
}
