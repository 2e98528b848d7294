//! Vulnerability severity classification

use crate::vdr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a vulnerability, ordered from least to most severe.
///
/// The derived `Ord` is what picks the worst of several ratings, so the
/// variant order matters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Unassigned,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first (badge segment order).
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Unassigned,
    ];

    /// Map a free-form severity label onto the fixed scale.
    ///
    /// Case and surrounding whitespace are ignored. `moderate` is an alias of
    /// medium; anything unrecognized is `Unassigned`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" | "moderate" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unassigned,
        }
    }

    fn from_text(label: Option<String>) -> Self {
        label.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// Classify one entry of a VDR `vulnerabilities` array.
///
/// - a non-empty `ratings` array yields the most severe rating
/// - otherwise the top-level `severity` field is used
/// - anything else is `Unassigned`
pub fn classify(vulnerability: &Value) -> Severity {
    if vulnerability.is_null() {
        return Severity::Unassigned;
    }

    if let Some(ratings) = vulnerability.get("ratings").and_then(Value::as_array) {
        if !ratings.is_empty() {
            return ratings
                .iter()
                .map(rating_severity)
                .max()
                .unwrap_or_default();
        }
    }

    Severity::from_text(vdr::field_text(vulnerability, "severity"))
}

/// A rating is either a bare label or an object with a `severity` field.
fn rating_severity(rating: &Value) -> Severity {
    match rating {
        Value::String(label) => Severity::parse(label),
        other => Severity::from_text(vdr::field_text(other, "severity")),
    }
}
