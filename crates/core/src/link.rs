//! Badge link resolution

use crate::vdr;
use serde_json::Value;

/// Pick the link a badge should point to.
///
/// An explicit, non-blank href always wins. Otherwise, when a base URL is
/// configured and the VDR names its component, the link is
/// `{base}/{name}/{version}` with both segments percent-encoded.
pub fn resolve_href(vdr: &Value, explicit: Option<&str>, base_url: Option<&str>) -> Option<String> {
    if let Some(href) = explicit.filter(|h| !h.trim().is_empty()) {
        return Some(href.to_string());
    }

    let base = base_url.map(str::trim).filter(|b| !b.is_empty())?;
    let name = vdr::component_field(vdr, "name")?;
    let version = vdr::component_field(vdr, "version")?;

    Some(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        encode_path_segment(&name),
        encode_path_segment(&version)
    ))
}

/// Form-style percent encoding with spaces as `%20`.
///
/// ASCII alphanumerics and `.-*_` pass through; every other byte of the
/// UTF-8 encoding becomes `%XX`.
pub fn encode_path_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'*' | b'_' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
