//! Single badge rendering: `vulns`, `violations` and `combined`

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;
use vdr_badge_core::{
    summarize_violations, summarize_vulnerabilities, BadgeComposer, BadgeError, TemplateRenderer,
};

use super::Settings;
use crate::{input, output, BadgeKind};

/// Render one badge of the given kind for a parsed VDR.
pub fn render<R: TemplateRenderer>(
    composer: &BadgeComposer<R>,
    kind: BadgeKind,
    vdr: &Value,
    stacked: Option<bool>,
    settings: &Settings,
) -> Result<String, BadgeError> {
    let style = settings.style_for(vdr);
    match kind {
        BadgeKind::Vulns => composer.render_vulnerabilities(&summarize_vulnerabilities(vdr), &style),
        BadgeKind::Violations => composer.render_violations(&summarize_violations(vdr), &style),
        BadgeKind::Combined => composer.render_combined(
            &summarize_vulnerabilities(vdr),
            &summarize_violations(vdr),
            &style,
            settings.layout(stacked),
        ),
    }
}

pub fn run(
    kind: BadgeKind,
    file: Option<&Path>,
    stacked: Option<bool>,
    settings: &Settings,
    output_path: Option<&Path>,
) -> Result<()> {
    let vdr = input::read_vdr(file)?;
    let svg = render(&BadgeComposer::new(), kind, &vdr, stacked, settings)
        .context("Failed to render SVG badge")?;

    output::write_text(&svg, output_path)?;
    info!(
        ?kind,
        source = %input::source_name(file),
        bytes = svg.len(),
        "Rendered badge"
    );
    Ok(())
}
