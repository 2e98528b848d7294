//! Policy violation indicators attached to VDR vulnerabilities
//!
//! Producers disagree on where the policy outcome lives. Some emit a direct
//! field such as `policyViolationLevel`, others a CycloneDX property named
//! `policy:violation`, `Policy_Violation`, etc. Lookup tries the direct field
//! spellings first and then the property bag, comparing normalized names.

use crate::vdr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Direct field names, checked case-sensitively in this order.
pub const DIRECT_FIELDS: [&str; 6] = [
    "policyViolation",
    "policyViolationLevel",
    "policyViolationSeverity",
    "policyViolationStatus",
    "policyViolationState",
    "policyViolationType",
];

/// Property names after [`normalize_name`].
const PROPERTY_KEYS: [&str; 6] = [
    "policyviolation",
    "policyviolationlevel",
    "policyviolationseverity",
    "policyviolationstatus",
    "policyviolationstate",
    "policyviolationtype",
];

/// Outcome of a policy evaluation.
///
/// `None` means an indicator was present but non-violating (`pass`, `ok`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationLevel {
    #[default]
    None,
    Info,
    Warn,
    Fail,
}

impl ViolationLevel {
    /// Map a raw indicator value onto a level. Unknown values are `None`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "fail" | "failed" | "failure" | "error" | "deny" | "denied" => ViolationLevel::Fail,
            "warn" | "warning" => ViolationLevel::Warn,
            "info" | "informational" => ViolationLevel::Info,
            _ => ViolationLevel::None,
        }
    }
}

impl std::fmt::Display for ViolationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationLevel::Fail => write!(f, "fail"),
            ViolationLevel::Warn => write!(f, "warn"),
            ViolationLevel::Info => write!(f, "info"),
            ViolationLevel::None => write!(f, "none"),
        }
    }
}

/// Locate the raw policy violation value of a vulnerability entry.
///
/// Returns `None` when no indicator is present. A present indicator with a
/// blank or non-violating value is still returned.
pub fn find_indicator(vulnerability: &Value) -> Option<String> {
    let entry = vulnerability.as_object()?;

    if let Some(value) = DIRECT_FIELDS
        .iter()
        .filter_map(|field| entry.get(*field))
        .find(|value| !value.is_null())
    {
        return vdr::text(value);
    }

    match entry.get("properties")? {
        Value::Array(properties) => properties
            .iter()
            .find(|property| {
                vdr::field_text(property, "name").is_some_and(|name| is_violation_key(&name))
            })
            .and_then(|property| vdr::field_text(property, "value")),
        Value::Object(properties) => properties
            .iter()
            .find(|(name, _)| is_violation_key(name))
            .and_then(|(_, value)| vdr::text(value)),
        _ => None,
    }
}

/// Locate and classify in one step.
pub fn classify(vulnerability: &Value) -> Option<ViolationLevel> {
    find_indicator(vulnerability).map(|raw| ViolationLevel::parse(&raw))
}

/// Lowercase and strip everything that is not alphanumeric.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn is_violation_key(name: &str) -> bool {
    let normalized = normalize_name(name);
    PROPERTY_KEYS.contains(&normalized.as_str())
}
