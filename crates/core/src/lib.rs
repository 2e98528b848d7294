//! VDR Badge Core - metrics extraction and SVG badge composition
//!
//! This crate turns a CycloneDX Vulnerability Disclosure Report into
//! Dependency-Track style SVG badges:
//! - Severity and policy violation classification of vulnerability entries
//! - Aggregation into metrics summaries that keep "no data" apart from "zero"
//! - Template-based badge rendering and merging of two badges into one SVG

pub mod badge;
pub mod config;
pub mod link;
pub mod metrics;
pub mod severity;
pub mod vdr;
pub mod violation;

pub use badge::{
    BadgeComposer, BadgeError, BadgeStyle, Dimensions, EmbeddedTemplates, Layout, TemplateId,
    TemplateRenderer, TemplateVars, DEFAULT_ROUNDED_PIXELS,
};
pub use config::BadgeConfig;
pub use link::resolve_href;
pub use metrics::{
    summarize_violations, summarize_vulnerabilities, ViolationCounts, ViolationMetrics,
    VulnerabilityCounts, VulnerabilityMetrics,
};
pub use severity::Severity;
pub use violation::ViolationLevel;

/// VDR Badge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
