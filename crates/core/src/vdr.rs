//! Read-only accessors over a CycloneDX VDR held as a `serde_json::Value`
//!
//! VDR payloads come from many producers and are frequently partial, so
//! nothing here fails: absent or mistyped fields simply read as `None`.

use serde_json::Value;

/// The `vulnerabilities` array of a VDR document.
///
/// Returns `None` when the document is not an object or the field is absent
/// or not an array. An empty array is `Some(&[])`.
pub fn vulnerabilities(vdr: &Value) -> Option<&[Value]> {
    vdr.as_object()?
        .get("vulnerabilities")?
        .as_array()
        .map(Vec::as_slice)
}

/// Text view of a JSON node.
///
/// Strings are returned as-is, numbers and booleans as their literal text,
/// objects and arrays as an empty string. `null` has no text.
pub fn text(node: &Value) -> Option<String> {
    match node {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(String::new()),
    }
}

/// Text view of `node[field]`, `None` if `node` is not an object or the
/// field is absent or null.
pub fn field_text(node: &Value, field: &str) -> Option<String> {
    node.as_object()?.get(field).and_then(text)
}

/// Text view of `metadata.component.<field>`, skipping blank values.
pub fn component_field(vdr: &Value, field: &str) -> Option<String> {
    let component = vdr.get("metadata")?.get("component")?;
    field_text(component, field).filter(|value| !value.trim().is_empty())
}
