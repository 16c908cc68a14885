use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::excerpt::DEFAULT_EXCERPT_LENGTH;
use crate::render::markdown::Options;

/// Project configuration loaded from `config.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,

    #[serde(default)]
    pub markdown: Options,
}

impl Config {
    /// Load configuration from `config.toml` in the given project root.
    ///
    /// Falls back to defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("config.toml");
        if path.exists() {
            let contents = fs::read_to_string(&path).context("failed to read config.toml")?;
            toml::from_str(&contents).context("failed to parse config.toml")
        } else {
            toml::from_str("").context("failed to construct default config")
        }
    }
}

fn default_content_dir() -> String {
    String::from("content")
}

fn default_output_dir() -> String {
    String::from("public")
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}
