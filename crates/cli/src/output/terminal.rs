//! Terminal output formatting

use colored::Colorize;
use vdr_badge_core::{Severity, ViolationMetrics, VulnerabilityMetrics};

use super::json::JsonSummary;

pub fn format_vulnerabilities(metrics: &VulnerabilityMetrics) -> String {
    let counts = match metrics.counts() {
        None => return "no metrics".dimmed().to_string(),
        Some(counts) if counts.total() == 0 => return "no vulns".green().to_string(),
        Some(counts) => counts,
    };

    Severity::ALL
        .iter()
        .map(|severity| {
            let count = counts.get(*severity);
            let label = format!("{} {}", severity, count);
            match (severity, count) {
                (_, 0) => label.dimmed().to_string(),
                (Severity::Critical, _) => label.red().bold().to_string(),
                (Severity::High, _) => label.red().to_string(),
                (Severity::Medium, _) => label.yellow().to_string(),
                (Severity::Low, _) => label.blue().to_string(),
                (Severity::Unassigned, _) => label.normal().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn format_violations(metrics: &ViolationMetrics) -> String {
    let counts = match metrics.counts() {
        None => return "no metrics".dimmed().to_string(),
        Some(counts) if counts.total() == 0 => return "no violations".green().to_string(),
        Some(counts) => counts,
    };

    [
        format!("fail {}", counts.fail).red().to_string(),
        format!("warn {}", counts.warn).yellow().to_string(),
        format!("info {}", counts.info).blue().to_string(),
    ]
    .join("  ")
}

pub fn format_summary(summary: &JsonSummary) -> String {
    let mut lines = vec![
        format!("  {}", summary.source.bold()),
        format!(
            "  {:<14}{}",
            "dependencies",
            format_vulnerabilities(&summary.vulnerabilities)
        ),
        format!(
            "  {:<14}{}",
            "policies",
            format_violations(&summary.policy_violations)
        ),
    ];
    if let Some(href) = &summary.href {
        lines.push(format!("  {:<14}{}", "link", href.underline()));
    }
    lines.join("\n")
}
