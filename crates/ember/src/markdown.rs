const FENCE: &str = "```";

/// Detects an opening code fence: three backticks, optionally followed by a
/// single-word language tag.
///
/// Returns the trimmed language tag, or `Some(None)` when the fence has none.
/// Any other trailing text (a backtick, or more than one word) means the line
/// is not a fence.
#[must_use]
pub(crate) fn detect_opening_code_fence(line: &str) -> Option<Option<&str>> {
    let info = line.strip_prefix(FENCE)?.trim();
    if info.is_empty() {
        return Some(None);
    }
    is_language_tag(info).then_some(Some(info))
}

fn is_language_tag(info: &str) -> bool {
    !info.contains(|c: char| c == '`' || c.is_whitespace())
}

/// Checks whether `line` closes a code fence: exactly three backticks,
/// optionally followed by trailing whitespace.
#[must_use]
pub(crate) fn is_closing_code_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}
