//! Text-level SVG fragment composition
//!
//! Fragments come from our own templates, so a narrow attribute grammar is
//! enough: ids are declared as `id="…"` and referenced as `url(#…)`,
//! `href="#…"` or `xlink:href="#…"`.

use super::BadgeError;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

static ROOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg[\s>/]").unwrap());

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\sid="([^"]+)""#).unwrap());

// Three alternatives, each captured as (opening, id, closing).
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(\sid=")([^"]+)(")|(url\(#)([^)]+)(\))|(\s(?:xlink:)?href="#)([^"]+)(")"##)
        .unwrap()
});

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\swidth="([^"]*)""#).unwrap());

static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sheight="([^"]*)""#).unwrap());

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// How the two halves of a combined badge are arranged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Second badge to the right of the first
    #[default]
    SideBySide,
    /// Second badge below the first
    Stacked,
}

impl Layout {
    pub fn from_stacked(stacked: bool) -> Self {
        if stacked {
            Layout::Stacked
        } else {
            Layout::SideBySide
        }
    }

    /// Canvas size holding both fragments
    pub fn canvas(self, first: Dimensions, second: Dimensions) -> Result<Dimensions, BadgeError> {
        match self {
            Layout::SideBySide => Ok(Dimensions {
                width: extend("width", first.width, second.width)?,
                height: first.height.max(second.height),
            }),
            Layout::Stacked => Ok(Dimensions {
                width: first.width.max(second.width),
                height: extend("height", first.height, second.height)?,
            }),
        }
    }

    /// Offset of the second fragment; the first always sits at the origin
    pub fn second_offset(self, first: Dimensions) -> (u32, u32) {
        match self {
            Layout::SideBySide => (first.width, 0),
            Layout::Stacked => (0, first.height),
        }
    }
}

fn extend(attribute: &'static str, first: u32, second: u32) -> Result<u32, BadgeError> {
    first
        .checked_add(second)
        .ok_or(BadgeError::CanvasOverflow {
            attribute,
            first,
            second,
        })
}

/// Declared size of an SVG root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Ids declared anywhere in the fragment
pub fn defined_ids(svg: &str) -> HashSet<&str> {
    ID_RE
        .captures_iter(svg)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Prefix every id declared in `svg`, together with the references to it.
///
/// Runs as a single pass, so each occurrence is renamed at most once. Ids not
/// declared in this fragment are left untouched.
pub fn uniquify_ids(svg: &str, prefix: &str) -> String {
    let ids = defined_ids(svg);
    if ids.is_empty() {
        return svg.to_string();
    }
    trace!(count = ids.len(), prefix, "Rewriting fragment ids");

    REFERENCE_RE
        .replace_all(svg, |caps: &Captures<'_>| {
            for group in [1, 4, 7] {
                if let (Some(open), Some(id), Some(close)) =
                    (caps.get(group), caps.get(group + 1), caps.get(group + 2))
                {
                    if ids.contains(id.as_str()) {
                        return format!("{}{}{}{}", open.as_str(), prefix, id.as_str(), close.as_str());
                    }
                    break;
                }
            }
            caps[0].to_string()
        })
        .into_owned()
}

/// Byte offset of the root `<svg` tag
fn root_start(svg: &str) -> Result<usize, BadgeError> {
    ROOT_RE
        .find(svg)
        .map(|m| m.start())
        .ok_or(BadgeError::MissingRoot)
}

/// The opening tag of the root element, `<svg ... >` inclusive
pub fn root_tag(svg: &str) -> Result<&str, BadgeError> {
    let start = root_start(svg)?;
    let end = svg[start..]
        .find('>')
        .ok_or(BadgeError::MalformedRoot)?;
    Ok(&svg[start..=start + end])
}

/// Read `width` and `height` from the root element only.
pub fn dimensions(svg: &str) -> Result<Dimensions, BadgeError> {
    let tag = root_tag(svg)?;
    Ok(Dimensions {
        width: dimension(tag, &WIDTH_RE, "width")?,
        height: dimension(tag, &HEIGHT_RE, "height")?,
    })
}

fn dimension(tag: &str, re: &Regex, attribute: &'static str) -> Result<u32, BadgeError> {
    let value = re
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .ok_or(BadgeError::MissingDimension(attribute))?
        .as_str();

    value.parse().map_err(|_| BadgeError::InvalidDimension {
        attribute,
        value: value.to_string(),
    })
}

/// Add `x`/`y` right after the root tag name.
///
/// Anything before the root element (an XML declaration, whitespace) is
/// dropped since the fragment ends up nested in another document.
pub fn inject_position(svg: &str, x: u32, y: u32) -> Result<String, BadgeError> {
    let start = root_start(svg)?;
    let insert_at = start + "<svg".len();
    Ok(format!(
        "{} x=\"{}\" y=\"{}\"{}",
        &svg[start..insert_at],
        x,
        y,
        svg[insert_at..].trim_end()
    ))
}

/// Place two fragments on one canvas and wrap them in an outer `<svg>`.
///
/// Ids must already be disjoint, see [`uniquify_ids`].
pub fn merge(first: &str, second: &str, layout: Layout) -> Result<String, BadgeError> {
    let first_size = dimensions(first)?;
    let second_size = dimensions(second)?;

    let canvas = layout.canvas(first_size, second_size)?;
    let (x, y) = layout.second_offset(first_size);

    let positioned_first = inject_position(first, 0, 0)?;
    let positioned_second = inject_position(second, x, y)?;

    trace!(
        width = canvas.width,
        height = canvas.height,
        ?layout,
        "Merged badge fragments"
    );

    Ok(format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"{SVG_NS}\" xmlns:xlink=\"{XLINK_NS}\">{positioned_first}{positioned_second}</svg>",
        w = canvas.width,
        h = canvas.height,
    ))
}
