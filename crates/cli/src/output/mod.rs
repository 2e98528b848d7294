//! Output formatting and writing

pub mod json;
pub mod terminal;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write `text` to `path`, or to stdout when no path is given.
pub fn write_text(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("write output {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
