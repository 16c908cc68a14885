use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::content::article::Article;
use crate::content::discovery::discover_content;
use crate::output::{clean_output_dir, write_fragment};
use crate::render::markdown::MarkdownConverter;

/// Shared build state, created once per build invocation.
struct BuildContext {
    config: Config,
    converter: MarkdownConverter,
}

/// Converts every article under the configured content directory into an
/// HTML fragment under the output directory.
///
/// Returns the number of articles written.
///
/// # Errors
///
/// Returns an error if configuration loading, content discovery, or output
/// writing fails.
pub fn build(root: &Path) -> Result<usize> {
    let config = Config::load(root).context("failed to load config")?;
    let converter = MarkdownConverter::new(config.markdown);
    let ctx = BuildContext { config, converter };

    let content = discover_content(&root.join(&ctx.config.content_dir))?;
    if content.articles.is_empty() {
        info!("no articles found");
        return Ok(0);
    }

    let output_dir = root.join(&ctx.config.output_dir);
    clean_output_dir(&output_dir)?;

    for article in &content.articles {
        build_article(&ctx, article, &content.content_dir, &output_dir)?;
    }

    info!(
        articles = content.articles.len(),
        output = %output_dir.display(),
        "build complete"
    );
    Ok(content.articles.len())
}

/// Converts a single article and writes it to the output directory.
fn build_article(
    ctx: &BuildContext,
    article: &Article,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<()> {
    let html = ctx.converter.convert(&article.raw_content);
    let output_path = article.output_path(content_dir).with_context(|| {
        format!(
            "failed to compute output path for {}",
            article.source_path.display()
        )
    })?;

    debug!(
        source = %article.source_path.display(),
        excerpt = %article.excerpt(ctx.config.excerpt_length),
        "converted article"
    );

    let dest = output_dir.join(&output_path);
    write_fragment(&dest, &html).with_context(|| format!("failed to write {}", dest.display()))
}
