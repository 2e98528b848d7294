//! SVG badge rendering and composition
//!
//! Each metrics summary maps to one of three templates (no metrics, no
//! findings, counts). The combined badge renders both summaries separately
//! and merges the two SVG fragments into one document, see [`compose`].

pub mod compose;
pub mod template;

pub use compose::{Dimensions, Layout};
pub use template::{EmbeddedTemplates, TemplateId, TemplateRenderer, TemplateVars};

use crate::metrics::{ViolationMetrics, VulnerabilityMetrics};
use thiserror::Error;
use tracing::debug;

/// Corner radius used when none is requested
pub const DEFAULT_ROUNDED_PIXELS: u32 = 3;

/// Id prefix applied to the vulnerability half of a combined badge
pub const VULN_ID_PREFIX: &str = "vuln-";

/// Id prefix applied to the policy half of a combined badge
pub const POLICY_ID_PREFIX: &str = "policy-";

/// Errors raised while rendering or composing badges.
///
/// These indicate broken template output, never bad VDR input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BadgeError {
    #[error("SVG fragment has no <svg> root element")]
    MissingRoot,

    #[error("SVG root element is not terminated")]
    MalformedRoot,

    #[error("Missing {0} in SVG root")]
    MissingDimension(&'static str),

    #[error("Invalid {attribute} in SVG root: {value}")]
    InvalidDimension {
        attribute: &'static str,
        value: String,
    },

    #[error("Combined badge {attribute} overflows: {first} + {second}")]
    CanvasOverflow {
        attribute: &'static str,
        first: u32,
        second: u32,
    },

    #[error("Failed to render template {template}: {message}")]
    Template {
        template: TemplateId,
        message: String,
    },
}

/// Presentation options shared by every badge kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    /// Link target; blank values are ignored
    pub href: Option<String>,

    /// Corner radius in pixels
    pub rounded_pixels: u32,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            href: None,
            rounded_pixels: DEFAULT_ROUNDED_PIXELS,
        }
    }
}

impl BadgeStyle {
    pub fn new(href: Option<String>, rounded_pixels: u32) -> Self {
        Self {
            href,
            rounded_pixels,
        }
    }

    fn base_vars(&self) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.insert("roundedPixels".to_string(), self.rounded_pixels.to_string());
        if let Some(href) = self.href.as_deref().filter(|h| !h.trim().is_empty()) {
            vars.insert("href".to_string(), href.to_string());
        }
        vars
    }
}

/// Renders metrics summaries into SVG badges.
///
/// Holds no per-request state, so one composer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct BadgeComposer<R = EmbeddedTemplates> {
    templates: R,
}

impl BadgeComposer<EmbeddedTemplates> {
    /// Composer backed by the built-in templates
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: TemplateRenderer> BadgeComposer<R> {
    /// Composer backed by a custom template service
    pub fn with_templates(templates: R) -> Self {
        Self { templates }
    }

    /// Render the vulnerability badge.
    pub fn render_vulnerabilities(
        &self,
        metrics: &VulnerabilityMetrics,
        style: &BadgeStyle,
    ) -> Result<String, BadgeError> {
        let mut vars = style.base_vars();

        let template = match metrics.counts() {
            None => TemplateId::VulnNoMetrics,
            Some(counts) if counts.total() == 0 => TemplateId::VulnNone,
            Some(counts) => {
                vars.insert("critical".to_string(), counts.critical.to_string());
                vars.insert("high".to_string(), counts.high.to_string());
                vars.insert("medium".to_string(), counts.medium.to_string());
                vars.insert("low".to_string(), counts.low.to_string());
                vars.insert("unassigned".to_string(), counts.unassigned.to_string());
                TemplateId::VulnCounts
            }
        };

        debug!(%template, "Rendering vulnerability badge");
        self.templates.render(template, &vars)
    }

    /// Render the policy violation badge.
    pub fn render_violations(
        &self,
        metrics: &ViolationMetrics,
        style: &BadgeStyle,
    ) -> Result<String, BadgeError> {
        let mut vars = style.base_vars();

        let template = match metrics.counts() {
            None => TemplateId::ViolationNoMetrics,
            Some(counts) if counts.total() == 0 => TemplateId::ViolationNone,
            Some(counts) => {
                vars.insert("fail".to_string(), counts.fail.to_string());
                vars.insert("warn".to_string(), counts.warn.to_string());
                vars.insert("info".to_string(), counts.info.to_string());
                TemplateId::ViolationCounts
            }
        };

        debug!(%template, "Rendering policy violation badge");
        self.templates.render(template, &vars)
    }

    /// Render both badges and merge them into a single SVG document.
    ///
    /// The vulnerability badge is always placed first (top or left).
    pub fn render_combined(
        &self,
        vulnerabilities: &VulnerabilityMetrics,
        violations: &ViolationMetrics,
        style: &BadgeStyle,
        layout: Layout,
    ) -> Result<String, BadgeError> {
        let vuln_svg = self.render_vulnerabilities(vulnerabilities, style)?;
        let policy_svg = self.render_violations(violations, style)?;

        let first = compose::uniquify_ids(&vuln_svg, VULN_ID_PREFIX);
        let second = compose::uniquify_ids(&policy_svg, POLICY_ID_PREFIX);

        compose::merge(&first, &second, layout)
    }
}
