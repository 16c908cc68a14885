use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use strum::{AsRefStr, Display};
use tracing::debug;

use crate::markdown::{detect_opening_code_fence, is_closing_code_fence};

/// `#` to `###`, one space, then the heading text.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").expect("heading pattern is valid"));

/// `-`, `*` or `+` followed by one space or tab.
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+][ \t](.*)$").expect("list item pattern is valid"));

/// Heading levels recognized by the converter. Four or more `#` is plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps a run of `#` characters to a level.
    #[must_use]
    pub fn from_hashes(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }
}

/// A classified, line-aligned span of source text.
///
/// `CodeFence` is opaque: its content is final and never receives inline
/// formatting. `Heading`, `List`, `Paragraph` and `Html` text is raw Markdown
/// that still goes through the inline pass; `Html` only skips the `<p>`
/// wrapper.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Block<'a> {
    CodeFence {
        /// Info string after the opening backticks. Kept, never rendered.
        language: Option<&'a str>,
        /// Inner lines with surrounding blank lines removed.
        content: String,
        /// `false` when the fence ran to the end of the document.
        terminated: bool,
    },
    Heading {
        level: HeadingLevel,
        text: &'a str,
    },
    /// A run of consecutive list-item lines, markers stripped.
    List { items: Vec<&'a str> },
    Paragraph(&'a str),
    /// A source line that already starts with `<`, emitted without a `<p>`.
    Html(&'a str),
    /// One or more consecutive blank lines.
    Blank,
}

impl Block<'_> {
    /// Returns `true` for blocks whose text is eligible for inline formatting.
    #[must_use]
    pub fn allows_inline(&self) -> bool {
        matches!(
            self,
            Self::Heading { .. } | Self::List { .. } | Self::Paragraph(_) | Self::Html(_)
        )
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind: &str = self.as_ref();
        match self {
            Self::CodeFence {
                language,
                content,
                terminated,
            } => {
                write!(f, "{kind} ({}", language.unwrap_or("plain"))?;
                write!(f, ", {} line(s)", content.lines().count())?;
                if !terminated {
                    f.write_str(", unterminated")?;
                }
                f.write_str(")")
            }
            Self::Heading { level, text } => write!(f, "{kind} {level}: {text}"),
            Self::List { items } => write!(f, "{kind} ({} item(s))", items.len()),
            Self::Paragraph(line) | Self::Html(line) => write!(f, "{kind}: {line}"),
            Self::Blank => f.write_str(kind),
        }
    }
}

/// Splits `source` into lines and classifies them into blocks, in order.
///
/// Precedence per line: an open fence swallows everything up to its closing
/// line (or the end of input), then headings, list items, blank lines,
/// `<`-prefixed passthrough lines, and finally paragraphs.
#[must_use]
pub fn classify_blocks(source: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut lines = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    while let Some(line) = lines.next() {
        if let Some(language) = detect_opening_code_fence(line) {
            let mut body = Vec::new();
            let mut terminated = false;
            for inner in lines.by_ref() {
                if is_closing_code_fence(inner) {
                    terminated = true;
                    break;
                }
                body.push(inner);
            }
            if !terminated {
                debug!(
                    lines = body.len(),
                    "unterminated code fence runs to end of input"
                );
            }
            blocks.push(Block::CodeFence {
                language,
                content: fence_content(&body),
                terminated,
            });
            continue;
        }

        if let Some(item) = list_item(line) {
            match blocks.last_mut() {
                Some(Block::List { items }) => items.push(item),
                _ => blocks.push(Block::List { items: vec![item] }),
            }
            continue;
        }

        let block = classify_line(line);
        if block == Block::Blank && blocks.last() == Some(&Block::Blank) {
            continue;
        }
        blocks.push(block);
    }

    blocks
}

/// Classifies a single line outside of any fence or list item.
fn classify_line(line: &str) -> Block<'_> {
    if line.trim().is_empty() {
        return Block::Blank;
    }

    if let Some(caps) = HEADING.captures(line)
        && let Some(level) = HeadingLevel::from_hashes(caps[1].len())
    {
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        return Block::Heading { level, text };
    }

    if line.starts_with('<') {
        Block::Html(line)
    } else {
        Block::Paragraph(line)
    }
}

/// Returns the item text if `line` is a list item.
fn list_item(line: &str) -> Option<&str> {
    LIST_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Joins fence body lines, dropping leading and trailing blank lines and any
/// trailing whitespace on the last line.
fn fence_content(lines: &[&str]) -> String {
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    lines[start..end].join("\n").trim_end().to_owned()
}
