//! Reading VDR documents from files or stdin

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read and parse a VDR. `None` or `-` reads stdin.
///
/// Only syntactically invalid JSON is an error; a document of the wrong
/// shape is returned as-is and degrades to unavailable metrics later.
pub fn read_vdr(path: Option<&Path>) -> Result<Value> {
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read VDR {}", path.display()))?;
            debug!(path = %path.display(), bytes = text.len(), "Read VDR");
            parse_vdr(&text).with_context(|| format!("invalid VDR JSON in {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read VDR from stdin")?;
            debug!(bytes = text.len(), "Read VDR from stdin");
            parse_vdr(&text).context("invalid VDR JSON on stdin")
        }
    }
}

/// Parse VDR text
pub fn parse_vdr(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Human-readable name of an input, `stdin` for `None` or `-`
pub fn source_name(path: Option<&Path>) -> String {
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}
