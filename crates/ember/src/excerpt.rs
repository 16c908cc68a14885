/// Explicit summary separator. Text before it is the excerpt.
pub const SUMMARY_SEPARATOR: &str = "<!--more-->";

/// Length used when no `excerpt_length` is configured.
pub const DEFAULT_EXCERPT_LENGTH: usize = 100;

const ELLIPSIS: &str = "...";

/// Builds a short plain-text preview of an article body.
///
/// When the body contains [`SUMMARY_SEPARATOR`], the text before it is used
/// as-is (never truncated). Otherwise the first `max_chars` characters are
/// kept and `...` is appended if anything was cut. Whitespace runs, line
/// breaks included, collapse to a single space.
///
/// Markdown syntax is not stripped; the result is a preview of the source,
/// not of the rendered HTML.
#[must_use]
pub fn excerpt(source: &str, max_chars: usize) -> String {
    if let Some(summary) = explicit_summary(source) {
        return collapse_whitespace(summary);
    }

    let flattened = collapse_whitespace(source);
    match flattened.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", flattened[..cut].trim_end()),
        None => flattened,
    }
}

/// Returns the text before `<!--more-->`, if present and non-blank.
fn explicit_summary(source: &str) -> Option<&str> {
    let idx = source.find(SUMMARY_SEPARATOR)?;
    let summary = source[..idx].trim();
    (!summary.is_empty()).then_some(summary)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
