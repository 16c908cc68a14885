use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where a rendered fragment goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `None` and `-` mean stdout.
    #[must_use]
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => Self::Stdout,
            Some(path) if path == Path::new("-") => Self::Stdout,
            Some(path) => Self::File(path.to_owned()),
        }
    }

    /// Writes `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout or the target file cannot be written.
    pub fn emit(&self, text: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{text}").context("failed to write to stdout")
            }
            Self::File(path) => write_fragment(path, text),
        }
    }
}

/// Removes and recreates the output directory for a clean build.
///
/// # Errors
///
/// Returns an error if removal or creation fails.
pub fn clean_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to clean output directory {}", path.display()))?;
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create output directory {}", path.display()))
}

/// Writes an HTML fragment plus a trailing newline, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_fragment(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, format!("{html}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}
