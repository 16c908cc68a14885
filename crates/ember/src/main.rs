use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ember::config::Config;
use ember::input::read_source;
use ember::output::Destination;
use ember::{MarkdownConverter, excerpt};

#[derive(Parser)]
#[command(name = "ember", about = "A small Markdown-to-HTML converter")]
struct Cli {
    /// Project root holding `config.toml` (defaults to current directory).
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one Markdown file to an HTML fragment.
    Render {
        /// Source file; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Output file; stdout when omitted or `-`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Escape inline code content regardless of `config.toml`.
        #[arg(long)]
        escape_inline_code: bool,
    },
    /// Print how each block of a Markdown file is classified.
    Blocks {
        /// Source file; stdin when omitted or `-`.
        input: Option<PathBuf>,
    },
    /// Print a plain-text excerpt of a Markdown file.
    Excerpt {
        /// Source file; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Maximum characters kept (defaults to `excerpt_length`).
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Convert every article under the content directory.
    Build,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            input,
            output,
            escape_inline_code,
        } => {
            let mut options = Config::load(&cli.root)?.markdown;
            options.escape_inline_code |= escape_inline_code;
            let source = read_source(input.as_deref())?;
            let html = MarkdownConverter::new(options).convert(&source);
            Destination::from_arg(output.as_deref()).emit(&html)?;
        }
        Command::Blocks { input } => {
            let source = read_source(input.as_deref())?;
            for block in MarkdownConverter::blocks(&source) {
                println!("{block}");
            }
        }
        Command::Excerpt { input, length } => {
            let length = match length {
                Some(length) => length,
                None => Config::load(&cli.root)?.excerpt_length,
            };
            let source = read_source(input.as_deref())?;
            println!("{}", excerpt(&source, length));
        }
        Command::Build => {
            let count = ember::build(&resolve_root(&cli.root)?)?;
            println!("Build complete: {count} article(s).");
        }
    }

    Ok(())
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    root.canonicalize()
        .with_context(|| format!("failed to resolve project root {}", root.display()))
}

/// Logs go to stderr so rendered HTML on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
