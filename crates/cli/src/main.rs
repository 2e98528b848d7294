//! VDR Badge CLI - SVG badges from CycloneDX VDRs

use anyhow::Result;
use clap::Parser;
use vdr_badge_cli::{commands, logging, BadgeKind, Cli, Commands, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `init` must work even when an existing config file is broken
    let settings = match &cli.command {
        Commands::Init { .. } => Settings::default(),
        _ => Settings::resolve(&cli)?,
    };
    logging::init(cli.verbose, &settings.log_filter);

    let output = cli.output.as_deref();
    match &cli.command {
        Commands::Vulns { file } => {
            commands::badge::run(BadgeKind::Vulns, file.as_deref(), None, &settings, output)?;
        }
        Commands::Violations { file } => {
            commands::badge::run(BadgeKind::Violations, file.as_deref(), None, &settings, output)?;
        }
        Commands::Combined { file, layout } => {
            commands::badge::run(
                BadgeKind::Combined,
                file.as_deref(),
                layout.stacked_override(),
                &settings,
                output,
            )?;
        }
        Commands::Summary { file, format } => {
            commands::summary::run(file.as_deref(), *format, &settings, output)?;
        }
        Commands::Batch {
            patterns,
            out_dir,
            kind,
            layout,
        } => {
            commands::batch::run(patterns, out_dir, *kind, layout.stacked_override(), &settings)?;
        }
        Commands::Init { path } => {
            commands::init::run(path.as_deref())?;
        }
    }

    Ok(())
}
