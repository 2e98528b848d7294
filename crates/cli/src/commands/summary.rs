//! Print the metrics extracted from a VDR

use anyhow::Result;
use std::path::Path;

use super::Settings;
use crate::output::{json, terminal};
use crate::{input, output, OutputFormat};

pub fn run(
    file: Option<&Path>,
    format: OutputFormat,
    settings: &Settings,
    output_path: Option<&Path>,
) -> Result<()> {
    let vdr = input::read_vdr(file)?;
    let source = input::source_name(file);
    let summary = json::build_summary(&source, &vdr, settings.style_for(&vdr).href);

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        OutputFormat::Terminal => terminal::format_summary(&summary),
    };

    output::write_text(&text, output_path)
}
