//! JSON output formatting

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vdr_badge_core::{
    summarize_violations, summarize_vulnerabilities, ViolationMetrics, VulnerabilityMetrics,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub source: String,
    pub vulnerabilities: VulnerabilityMetrics,
    pub policy_violations: ViolationMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

pub fn build_summary(source: &str, vdr: &Value, href: Option<String>) -> JsonSummary {
    JsonSummary {
        source: source.to_string(),
        vulnerabilities: summarize_vulnerabilities(vdr),
        policy_violations: summarize_violations(vdr),
        href,
    }
}
