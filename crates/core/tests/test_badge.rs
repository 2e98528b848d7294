//! Tests for badge rendering and combined badge composition

use regex::Regex;
use std::collections::HashSet;
use std::sync::Mutex;
use vdr_badge_core::badge::compose;
use vdr_badge_core::{
    BadgeComposer, BadgeError, BadgeStyle, Layout, TemplateId, TemplateRenderer, TemplateVars,
    ViolationCounts, ViolationMetrics, VulnerabilityCounts, VulnerabilityMetrics,
};

/// Template service returning fixed 76x20 fragments and recording each call
#[derive(Default)]
struct RecordingTemplates {
    calls: Mutex<Vec<(TemplateId, TemplateVars)>>,
}

impl RecordingTemplates {
    fn calls(&self) -> Vec<(TemplateId, TemplateVars)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TemplateRenderer for RecordingTemplates {
    fn render(&self, template: TemplateId, vars: &TemplateVars) -> Result<String, BadgeError> {
        self.calls.lock().unwrap().push((template, vars.clone()));
        Ok(format!(
            r##"<svg width="76" height="20" xmlns="http://www.w3.org/2000/svg"><linearGradient id="smooth"/><clipPath id="round"><rect width="76" height="20"/></clipPath><g clip-path="url(#round)"><rect fill="url(#smooth)"/><use xlink:href="#smooth"/></g><text>{}</text></svg>"##,
            template
        ))
    }
}

/// Template service returning a canned fragment
struct FixedTemplates(&'static str);

impl TemplateRenderer for FixedTemplates {
    fn render(&self, _template: TemplateId, _vars: &TemplateVars) -> Result<String, BadgeError> {
        Ok(self.0.to_string())
    }
}

fn counts() -> VulnerabilityMetrics {
    VulnerabilityMetrics::Available(VulnerabilityCounts {
        critical: 1,
        high: 2,
        medium: 3,
        low: 4,
        unassigned: 5,
    })
}

fn root_dimension(svg: &str, attribute: &str) -> u32 {
    let re = Regex::new(&format!(r#"^\s*<svg[^>]*\s{attribute}="(\d+)""#)).unwrap();
    re.captures(svg).unwrap()[1].parse().unwrap()
}

#[test]
fn test_vulnerability_template_selection() {
    let templates = RecordingTemplates::default();
    let composer = BadgeComposer::with_templates(&templates);
    let style = BadgeStyle::default();

    composer
        .render_vulnerabilities(&VulnerabilityMetrics::Unavailable, &style)
        .unwrap();
    composer
        .render_vulnerabilities(
            &VulnerabilityMetrics::Available(VulnerabilityCounts::default()),
            &style,
        )
        .unwrap();
    composer.render_vulnerabilities(&counts(), &style).unwrap();

    let selected: Vec<TemplateId> = templates.calls().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        selected,
        vec![
            TemplateId::VulnNoMetrics,
            TemplateId::VulnNone,
            TemplateId::VulnCounts
        ]
    );
}

#[test]
fn test_violation_template_selection() {
    let templates = RecordingTemplates::default();
    let composer = BadgeComposer::with_templates(&templates);
    let style = BadgeStyle::default();

    composer
        .render_violations(&ViolationMetrics::Unavailable, &style)
        .unwrap();
    composer
        .render_violations(
            &ViolationMetrics::Available(ViolationCounts::default()),
            &style,
        )
        .unwrap();
    composer
        .render_violations(
            &ViolationMetrics::Available(ViolationCounts {
                fail: 0,
                warn: 0,
                info: 1,
            }),
            &style,
        )
        .unwrap();

    let selected: Vec<TemplateId> = templates.calls().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        selected,
        vec![
            TemplateId::ViolationNoMetrics,
            TemplateId::ViolationNone,
            TemplateId::ViolationCounts
        ]
    );
}

#[test]
fn test_count_variables() {
    let templates = RecordingTemplates::default();
    let composer = BadgeComposer::with_templates(&templates);
    composer
        .render_vulnerabilities(&counts(), &BadgeStyle::new(None, 5))
        .unwrap();

    let (_, vars) = &templates.calls()[0];
    assert_eq!(vars["critical"], "1");
    assert_eq!(vars["high"], "2");
    assert_eq!(vars["medium"], "3");
    assert_eq!(vars["low"], "4");
    assert_eq!(vars["unassigned"], "5");
    assert_eq!(vars["roundedPixels"], "5");
    assert!(!vars.contains_key("href"));
}

#[test]
fn test_no_metrics_template_gets_no_counts() {
    let templates = RecordingTemplates::default();
    let composer = BadgeComposer::with_templates(&templates);
    composer
        .render_violations(&ViolationMetrics::Unavailable, &BadgeStyle::default())
        .unwrap();

    let (_, vars) = &templates.calls()[0];
    assert_eq!(vars.len(), 1);
    assert_eq!(vars["roundedPixels"], "3");
}

#[test]
fn test_href_passed_only_when_not_blank() {
    let templates = RecordingTemplates::default();
    let composer = BadgeComposer::with_templates(&templates);

    composer
        .render_vulnerabilities(
            &VulnerabilityMetrics::Unavailable,
            &BadgeStyle::new(Some("https://dt.example/p/1".to_string()), 3),
        )
        .unwrap();
    composer
        .render_vulnerabilities(
            &VulnerabilityMetrics::Unavailable,
            &BadgeStyle::new(Some("   ".to_string()), 3),
        )
        .unwrap();

    let calls = templates.calls();
    assert_eq!(calls[0].1["href"], "https://dt.example/p/1");
    assert!(!calls[1].1.contains_key("href"));
}

#[test]
fn test_combined_side_by_side_geometry() {
    let composer = BadgeComposer::with_templates(RecordingTemplates::default());
    let svg = composer
        .render_combined(
            &counts(),
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::SideBySide,
        )
        .unwrap();

    assert_eq!(root_dimension(&svg, "width"), 152);
    assert_eq!(root_dimension(&svg, "height"), 20);
    assert!(svg.contains(r#"viewBox="0 0 152 20""#));
    assert!(svg.contains(r#"<svg x="0" y="0" width="76""#));
    assert!(svg.contains(r#"<svg x="76" y="0" width="76""#));
}

#[test]
fn test_combined_stacked_geometry() {
    let composer = BadgeComposer::with_templates(RecordingTemplates::default());
    let svg = composer
        .render_combined(
            &counts(),
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::Stacked,
        )
        .unwrap();

    assert_eq!(root_dimension(&svg, "width"), 76);
    assert_eq!(root_dimension(&svg, "height"), 40);
    assert!(svg.contains(r#"viewBox="0 0 76 40""#));
    assert!(svg.contains(r#"<svg x="0" y="20" width="76""#));
}

#[test]
fn test_combined_declares_namespaces() {
    let composer = BadgeComposer::with_templates(RecordingTemplates::default());
    let svg = composer
        .render_combined(
            &VulnerabilityMetrics::Unavailable,
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::SideBySide,
        )
        .unwrap();

    assert!(svg.starts_with("<svg width="));
    assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    assert!(svg.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(svg.ends_with("</svg></svg>"));
}

#[test]
fn test_combined_ids_do_not_collide() {
    let composer = BadgeComposer::with_templates(RecordingTemplates::default());
    let svg = composer
        .render_combined(
            &counts(),
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::SideBySide,
        )
        .unwrap();

    let ids: Vec<&str> = Regex::new(r#"\sid="([^"]+)""#)
        .unwrap()
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 4);
    assert_eq!(unique.len(), 4);
    for expected in ["vuln-smooth", "vuln-round", "policy-smooth", "policy-round"] {
        assert!(unique.contains(expected), "missing {expected}");
    }

    assert!(svg.contains("url(#vuln-round)"));
    assert!(svg.contains("url(#policy-smooth)"));
    assert!(svg.contains(r##"xlink:href="#vuln-smooth""##));
    assert!(svg.contains(r##"xlink:href="#policy-smooth""##));
    assert!(!svg.contains("url(#round)"));
    assert!(!svg.contains("url(#smooth)"));
}

#[test]
fn test_uniquify_leaves_other_text_alone() {
    let svg = r##"<svg width="1" height="1"><g id="a"><text>id="a" url(#b)</text><a href="#a">a</a><a href="https://x/#a">x</a></g></svg>"##;
    let out = compose::uniquify_ids(svg, "p-");
    assert_eq!(
        out,
        r##"<svg width="1" height="1"><g id="p-a"><text>id="a" url(#b)</text><a href="#p-a">a</a><a href="https://x/#a">x</a></g></svg>"##
    );
}

#[test]
fn test_uniquify_renames_each_id_once() {
    // "vuln-a" is already prefixed-looking; it must not be prefixed twice
    let svg = r##"<svg width="1" height="1"><g id="a"/><g id="vuln-a"/><use href="#a"/><use href="#vuln-a"/></svg>"##;
    let out = compose::uniquify_ids(svg, "vuln-");
    assert!(out.contains(r#"id="vuln-a""#));
    assert!(out.contains(r#"id="vuln-vuln-a""#));
    assert!(out.contains(r##"href="#vuln-a""##));
    assert!(out.contains(r##"href="#vuln-vuln-a""##));
    assert!(!out.contains("vuln-vuln-vuln-"));
}

#[test]
fn test_missing_root_is_fatal() {
    let composer = BadgeComposer::with_templates(FixedTemplates("<g width=\"1\" height=\"1\"/>"));
    let err = composer
        .render_combined(
            &VulnerabilityMetrics::Unavailable,
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::SideBySide,
        )
        .unwrap_err();
    assert_eq!(err, BadgeError::MissingRoot);
}

#[test]
fn test_missing_dimension_is_fatal() {
    let composer = BadgeComposer::with_templates(FixedTemplates(
        r#"<svg width="76" xmlns="http://www.w3.org/2000/svg"><rect height="20"/></svg>"#,
    ));
    let err = composer
        .render_combined(
            &VulnerabilityMetrics::Unavailable,
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::Stacked,
        )
        .unwrap_err();
    assert_eq!(err, BadgeError::MissingDimension("height"));
    assert_eq!(err.to_string(), "Missing height in SVG root");
}

#[test]
fn test_non_integer_dimension_is_fatal() {
    let composer = BadgeComposer::with_templates(FixedTemplates(
        r#"<svg width="76.5" height="20"></svg>"#,
    ));
    let err = composer
        .render_combined(
            &VulnerabilityMetrics::Unavailable,
            &ViolationMetrics::Unavailable,
            &BadgeStyle::default(),
            Layout::SideBySide,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BadgeError::InvalidDimension {
            attribute: "width",
            ..
        }
    ));
}

#[test]
fn test_oversized_fragments_are_rejected() {
    let composer = BadgeComposer::with_templates(FixedTemplates(
        r#"<svg width="4294967295" height="4294967295"></svg>"#,
    ));
    for (layout, attribute) in [(Layout::SideBySide, "width"), (Layout::Stacked, "height")] {
        let err = composer
            .render_combined(
                &VulnerabilityMetrics::Unavailable,
                &ViolationMetrics::Unavailable,
                &BadgeStyle::default(),
                layout,
            )
            .unwrap_err();
        assert_eq!(
            err,
            BadgeError::CanvasOverflow {
                attribute,
                first: u32::MAX,
                second: u32::MAX,
            }
        );
    }
}

#[test]
fn test_layout_math_with_unequal_fragments() {
    let first = compose::Dimensions {
        width: 200,
        height: 20,
    };
    let second = compose::Dimensions {
        width: 128,
        height: 30,
    };

    let side = Layout::SideBySide.canvas(first, second).unwrap();
    assert_eq!((side.width, side.height), (328, 30));
    assert_eq!(Layout::SideBySide.second_offset(first), (200, 0));

    let stacked = Layout::Stacked.canvas(first, second).unwrap();
    assert_eq!((stacked.width, stacked.height), (200, 50));
    assert_eq!(Layout::Stacked.second_offset(first), (0, 20));

    assert_eq!(Layout::from_stacked(true), Layout::Stacked);
    assert_eq!(Layout::default(), Layout::SideBySide);
}
