use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::content::article::Article;

/// All articles discovered from the content directory.
#[derive(Debug)]
pub struct ContentSet {
    pub articles: Vec<Article>,
    pub content_dir: PathBuf,
}

/// Walks the content directory, loading all markdown articles.
///
/// Excludes:
/// - Files and directories whose names start with `_`
/// - Non-markdown files
/// - Files that are not valid UTF-8 (logged and skipped)
///
/// # Errors
///
/// Returns an error if the content directory or one of its files cannot be
/// read.
pub fn discover_content(content_dir: &Path) -> Result<ContentSet> {
    let content_dir = content_dir.to_owned();
    if !content_dir.is_dir() {
        debug!(dir = %content_dir.display(), "content directory missing");
        return Ok(ContentSet {
            articles: Vec::new(),
            content_dir,
        });
    }

    let mut articles = Vec::new();

    for entry in WalkDir::new(&content_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
    {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", content_dir.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            match String::from_utf8(bytes) {
                Ok(raw_content) => articles.push(Article::new(raw_content, path.to_owned())),
                Err(e) => warn!(path = %path.display(), "skipping non-UTF-8 article: {e}"),
            }
        }
    }

    // Sort by source path for deterministic output across platforms.
    articles.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    Ok(ContentSet {
        articles,
        content_dir,
    })
}

/// Returns `true` for entries whose file name starts with `_`.
fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('_'))
}
