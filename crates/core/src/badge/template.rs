//! Badge templates and the placeholder renderer
//!
//! Template grammar:
//! - `{{name}}` is replaced by the XML-escaped value of `name` (empty if unset)
//! - `{{#name}}...{{/name}}` is kept only when `name` is set and non-empty;
//!   sections may nest as long as the names differ

use super::BadgeError;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static SECTION_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{#([A-Za-z0-9_]+)\}\}").unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap());

/// String-keyed, string-valued template context
pub type TemplateVars = BTreeMap<String, String>;

/// The six badge templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    VulnCounts,
    VulnNone,
    VulnNoMetrics,
    ViolationCounts,
    ViolationNone,
    ViolationNoMetrics,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::VulnCounts,
        TemplateId::VulnNone,
        TemplateId::VulnNoMetrics,
        TemplateId::ViolationCounts,
        TemplateId::ViolationNone,
        TemplateId::ViolationNoMetrics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::VulnCounts => "project-vulns",
            TemplateId::VulnNone => "project-vulns-none",
            TemplateId::VulnNoMetrics => "project-vulns-nometrics",
            TemplateId::ViolationCounts => "project-violations",
            TemplateId::ViolationNone => "project-violations-none",
            TemplateId::ViolationNoMetrics => "project-violations-nometrics",
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Template service used by the badge composer
///
/// Implementations must be stateless per call; the composer may be shared
/// across threads.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `vars` substituted
    fn render(&self, template: TemplateId, vars: &TemplateVars) -> Result<String, BadgeError>;
}

impl<T: TemplateRenderer + ?Sized> TemplateRenderer for &T {
    fn render(&self, template: TemplateId, vars: &TemplateVars) -> Result<String, BadgeError> {
        (**self).render(template, vars)
    }
}

/// Dependency-Track style templates compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Raw template source
    pub fn source(template: TemplateId) -> &'static str {
        match template {
            TemplateId::VulnCounts => include_str!("../../templates/badge/project-vulns.svg"),
            TemplateId::VulnNone => include_str!("../../templates/badge/project-vulns-none.svg"),
            TemplateId::VulnNoMetrics => {
                include_str!("../../templates/badge/project-vulns-nometrics.svg")
            }
            TemplateId::ViolationCounts => {
                include_str!("../../templates/badge/project-violations.svg")
            }
            TemplateId::ViolationNone => {
                include_str!("../../templates/badge/project-violations-none.svg")
            }
            TemplateId::ViolationNoMetrics => {
                include_str!("../../templates/badge/project-violations-nometrics.svg")
            }
        }
    }
}

impl TemplateRenderer for EmbeddedTemplates {
    fn render(&self, template: TemplateId, vars: &TemplateVars) -> Result<String, BadgeError> {
        render_source(Self::source(template), vars).map_err(|message| BadgeError::Template {
            template,
            message,
        })
    }
}

/// Expand sections, then placeholders.
pub fn render_source(source: &str, vars: &TemplateVars) -> Result<String, String> {
    let expanded = expand_sections(source, vars)?;
    let rendered = PLACEHOLDER_RE.replace_all(&expanded, |caps: &Captures<'_>| {
        vars.get(&caps[1])
            .map(|value| escape_xml(value))
            .unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

fn expand_sections(source: &str, vars: &TemplateVars) -> Result<String, String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(caps) = SECTION_OPEN_RE.captures(rest) {
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let close = format!("{{{{/{}}}}}", name.as_str());
        let body_start = open.end();
        let body_len = rest[body_start..]
            .find(&close)
            .ok_or_else(|| format!("unterminated section `{}`", name.as_str()))?;

        out.push_str(&rest[..open.start()]);
        let enabled = vars
            .get(name.as_str())
            .is_some_and(|value| !value.trim().is_empty());
        if enabled {
            out.push_str(&expand_sections(&rest[body_start..body_start + body_len], vars)?);
        }
        rest = &rest[body_start + body_len + close.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
