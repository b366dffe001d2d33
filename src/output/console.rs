use crate::scoring::{RiskBand, RiskTier};
use crate::ScanReport;

const HOST_PERMISSION_DISPLAY_LIMIT: usize = 10;
const MATCH_DISPLAY_LIMIT: usize = 5;

/// Render a scan report as plain text, one block per extension in score
/// order.
pub fn render(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n  Scanned {}: {} extension(s) audited\n\n",
        report.store_path.display(),
        report.results.len(),
    ));

    if report.results.is_empty() {
        output.push_str("  No auditable extensions found.\n\n");
        return output;
    }

    for result in &report.results {
        let band = RiskBand::from_score(result.score);
        output.push_str(&format!(
            "  {} v{} [{}]\n",
            result.record.name, result.record.version, result.record.id
        ));
        output.push_str(&format!(
            "    Score: {}/100 ({})\n",
            result.score,
            band.label()
        ));

        if result.findings.is_empty() {
            output.push_str("    No special permissions requested\n");
        } else {
            for finding in &result.findings {
                let tier_tag = match finding.risk_level {
                    RiskTier::Critical => "[CRITICAL]",
                    RiskTier::High => "[HIGH]    ",
                    RiskTier::Medium => "[MEDIUM]  ",
                    RiskTier::Low => "[LOW]     ",
                };
                output.push_str(&format!(
                    "    {} {} ({} pts)\n",
                    tier_tag, finding.permission, finding.points
                ));
            }
        }

        append_capped(
            &mut output,
            "Host permissions",
            &result.record.host_permissions,
            HOST_PERMISSION_DISPLAY_LIMIT,
        );
        append_capped(
            &mut output,
            "Content script matches",
            &result.record.content_script_matches,
            MATCH_DISPLAY_LIMIT,
        );

        output.push('\n');
    }

    output
}

fn append_capped(output: &mut String, label: &str, values: &[String], limit: usize) {
    if values.is_empty() {
        return;
    }
    output.push_str(&format!("    {}: {}\n", label, values[..values.len().min(limit)].join(", ")));
    if values.len() > limit {
        output.push_str(&format!("      ... and {} more\n", values.len() - limit));
    }
}
