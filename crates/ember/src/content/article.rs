use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::excerpt::excerpt;

/// A markdown article loaded from the content directory.
#[derive(Debug)]
pub struct Article {
    pub raw_content: String,
    pub source_path: PathBuf,
}

impl Article {
    #[must_use]
    pub fn new(raw_content: String, source_path: PathBuf) -> Self {
        Self {
            raw_content,
            source_path,
        }
    }

    /// Plain-text preview of the article body.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        excerpt(&self.raw_content, max_chars)
    }

    /// Computes the output path relative to the build output directory.
    ///
    /// Mirrors the source layout with an `.html` extension:
    /// `content/notes/rust.md` → `notes/rust.html`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source path is not under the given content directory.
    pub fn output_path(&self, content_dir: &Path) -> Result<PathBuf> {
        let relative = self
            .source_path
            .strip_prefix(content_dir)
            .with_context(|| {
                format!(
                    "{} is not under {}",
                    self.source_path.display(),
                    content_dir.display()
                )
            })?;
        Ok(relative.with_extension("html"))
    }
}
