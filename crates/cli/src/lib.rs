//! VDR Badge CLI library: exposed for integration tests

pub mod commands;
pub mod input;
pub mod logging;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::Settings;

#[derive(Parser)]
#[command(name = "vdr-badge")]
#[command(about = "SVG badges from CycloneDX vulnerability disclosure reports", long_about = None)]
#[command(version = vdr_badge_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// URL the badge links to (overrides the configured base URL)
    #[arg(long, global = true)]
    pub href: Option<String>,

    /// Corner radius in pixels (default: 3)
    #[arg(long, global = true)]
    pub rounded_pixels: Option<u32>,

    /// Base URL for links built from the VDR component name and version
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: nearest .vdr-badge.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the vulnerabilities badge
    Vulns {
        /// VDR JSON file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Render the policy violations badge
    Violations {
        /// VDR JSON file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Render both badges merged into one SVG
    Combined {
        /// VDR JSON file (default: stdin)
        file: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the metrics extracted from a VDR
    Summary {
        /// VDR JSON file (default: stdin)
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Render badges for many VDR files in parallel
    Batch {
        /// Files or glob patterns (e.g. "reports/**/*.vdr.json")
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Directory receiving one <name>.svg per input
        #[arg(long)]
        out_dir: PathBuf,

        /// Badge to render for each file
        #[arg(long, value_enum, default_value = "combined")]
        kind: BadgeKind,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Initialize .vdr-badge.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

/// Layout of combined badges; without either flag the config decides
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutArgs {
    /// Stack the badges vertically
    #[arg(long, conflicts_with = "side_by_side")]
    pub stacked: bool,

    /// Place the badges next to each other, even if the config stacks them
    #[arg(long)]
    pub side_by_side: bool,
}

impl LayoutArgs {
    pub fn stacked_override(self) -> Option<bool> {
        match (self.stacked, self.side_by_side) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BadgeKind {
    Vulns,
    Violations,
    Combined,
}
