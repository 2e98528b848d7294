//! Batch rendering: one badge per VDR file, rendered in parallel

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use vdr_badge_core::BadgeComposer;

use super::{badge, Settings};
use crate::{input, BadgeKind};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No VDR files matched {0:?}")]
    NoInputs(Vec<String>),

    #[error("{failed} of {total} badge(s) failed")]
    Failed { failed: usize, total: usize },
}

/// Result of rendering one input file
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    /// Written SVG path, or the error message
    pub result: Result<PathBuf, String>,
}

/// Expand glob patterns into a sorted, de-duplicated list of files.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| BatchError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        files.extend(paths.filter_map(Result::ok).filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output path for an input: `<out_dir>/<file stem>.svg`
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.svg", file_stem(input)))
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "badge".to_string())
}

/// Assign one output per input.
///
/// Inputs sharing a file stem are told apart by their parent directory,
/// `<out_dir>/<parent>-<stem>.svg`. Targets that still collide are errors
/// for every input involved, so no badge silently overwrites another.
pub fn output_paths(files: &[PathBuf], out_dir: &Path) -> Vec<Result<PathBuf, String>> {
    let mut stems: HashMap<String, usize> = HashMap::new();
    for file in files {
        *stems.entry(file_stem(file)).or_default() += 1;
    }

    let targets: Vec<PathBuf> = files
        .iter()
        .map(|file| {
            let stem = file_stem(file);
            if stems[&stem] == 1 {
                return output_path(file, out_dir);
            }
            let parent = file
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "root".to_string());
            out_dir.join(format!("{parent}-{stem}.svg"))
        })
        .collect();

    let mut claims: HashMap<&Path, usize> = HashMap::new();
    for target in &targets {
        *claims.entry(target.as_path()).or_default() += 1;
    }

    targets
        .iter()
        .map(|target| match claims[target.as_path()] {
            1 => Ok(target.clone()),
            n => Err(format!(
                "output {} would be written by {n} inputs",
                target.display()
            )),
        })
        .collect()
}

/// Render every file; failures are collected, never abort the batch.
pub fn render_all(
    files: &[PathBuf],
    out_dir: &Path,
    kind: BadgeKind,
    stacked: Option<bool>,
    settings: &Settings,
) -> Vec<BatchOutcome> {
    let composer = BadgeComposer::new();
    let targets = output_paths(files, out_dir);

    files
        .par_iter()
        .zip(targets.into_par_iter())
        .map(|(file, target)| BatchOutcome {
            input: file.clone(),
            result: target.and_then(|target| {
                render_one(&composer, file, &target, kind, stacked, settings)
                    .map(|()| target)
                    .map_err(|e| format!("{e:#}"))
            }),
        })
        .collect()
}

fn render_one(
    composer: &BadgeComposer,
    file: &Path,
    target: &Path,
    kind: BadgeKind,
    stacked: Option<bool>,
    settings: &Settings,
) -> Result<()> {
    let vdr = input::read_vdr(Some(file))?;
    let svg = badge::render(composer, kind, &vdr, stacked, settings)?;
    std::fs::write(target, svg)?;
    Ok(())
}

pub fn run(
    patterns: &[String],
    out_dir: &Path,
    kind: BadgeKind,
    stacked: Option<bool>,
    settings: &Settings,
) -> Result<()> {
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        return Err(BatchError::NoInputs(patterns.to_vec()).into());
    }

    std::fs::create_dir_all(out_dir)?;
    info!(files = files.len(), ?kind, "Rendering badges");

    let outcomes = render_all(&files, out_dir, kind, stacked, settings);
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(target) => println!(
                "  {} {} → {}",
                "✓".green(),
                outcome.input.display(),
                target.display()
            ),
            Err(message) => {
                failed += 1;
                warn!(input = %outcome.input.display(), error = %message, "Badge failed");
                println!(
                    "  {} {}: {}",
                    "✗".red(),
                    outcome.input.display(),
                    message
                );
            }
        }
    }

    if failed > 0 {
        return Err(BatchError::Failed {
            failed,
            total: outcomes.len(),
        }
        .into());
    }
    Ok(())
}
