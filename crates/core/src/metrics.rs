//! Metrics aggregation over a VDR document
//!
//! Both summaries distinguish "no data" from "zero findings":
//!
//! - `Unavailable`: the document carries nothing to count
//! - `Available` with a zero total: counted, nothing found
//! - `Available` with a non-zero total: counted, findings present

use crate::severity::{self, Severity};
use crate::vdr;
use crate::violation::{self, ViolationLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Vulnerability counts per severity bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub unassigned: u32,
}

impl VulnerabilityCounts {
    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low + self.unassigned
    }

    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unassigned => self.unassigned,
        }
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Unassigned => self.unassigned += 1,
        }
    }
}

/// Policy violation counts per level. `None` levels are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub fail: u32,
    pub warn: u32,
    pub info: u32,
}

impl ViolationCounts {
    pub fn total(&self) -> u32 {
        self.fail + self.warn + self.info
    }

    pub fn record(&mut self, level: ViolationLevel) {
        match level {
            ViolationLevel::Fail => self.fail += 1,
            ViolationLevel::Warn => self.warn += 1,
            ViolationLevel::Info => self.info += 1,
            ViolationLevel::None => {}
        }
    }
}

/// Severity summary of a VDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VulnerabilityMetrics {
    /// The document has no `vulnerabilities` array
    Unavailable,
    Available(VulnerabilityCounts),
}

impl VulnerabilityMetrics {
    pub fn counts(&self) -> Option<&VulnerabilityCounts> {
        match self {
            VulnerabilityMetrics::Available(counts) => Some(counts),
            VulnerabilityMetrics::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.counts().is_some()
    }
}

/// Policy violation summary of a VDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViolationMetrics {
    /// No vulnerability carried a policy violation indicator
    Unavailable,
    Available(ViolationCounts),
}

impl ViolationMetrics {
    pub fn counts(&self) -> Option<&ViolationCounts> {
        match self {
            ViolationMetrics::Available(counts) => Some(counts),
            ViolationMetrics::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.counts().is_some()
    }
}

/// Count the vulnerabilities of a VDR by severity.
pub fn summarize_vulnerabilities(vdr: &Value) -> VulnerabilityMetrics {
    let Some(vulnerabilities) = vdr::vulnerabilities(vdr) else {
        debug!("VDR has no vulnerabilities array, vulnerability metrics unavailable");
        return VulnerabilityMetrics::Unavailable;
    };

    let mut counts = VulnerabilityCounts::default();
    for vulnerability in vulnerabilities {
        counts.record(severity::classify(vulnerability));
    }

    debug!(
        critical = counts.critical,
        high = counts.high,
        medium = counts.medium,
        low = counts.low,
        unassigned = counts.unassigned,
        "Summarized vulnerabilities"
    );
    VulnerabilityMetrics::Available(counts)
}

/// Count the policy violations of a VDR by level.
///
/// The result is `Unavailable` unless at least one vulnerability carries a
/// locatable indicator, even one whose level is `None`.
pub fn summarize_violations(vdr: &Value) -> ViolationMetrics {
    let Some(vulnerabilities) = vdr::vulnerabilities(vdr) else {
        debug!("VDR has no vulnerabilities array, violation metrics unavailable");
        return ViolationMetrics::Unavailable;
    };

    let mut counts = ViolationCounts::default();
    let mut seen = 0usize;
    for level in vulnerabilities.iter().filter_map(violation::classify) {
        seen += 1;
        counts.record(level);
    }

    if seen == 0 {
        debug!(
            vulnerabilities = vulnerabilities.len(),
            "No policy violation indicator found, violation metrics unavailable"
        );
        return ViolationMetrics::Unavailable;
    }

    debug!(
        indicators = seen,
        fail = counts.fail,
        warn = counts.warn,
        info = counts.info,
        "Summarized policy violations"
    );
    ViolationMetrics::Available(counts)
}
