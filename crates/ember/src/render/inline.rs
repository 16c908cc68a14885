use super::push_escaped;

const CODE_DELIMITER: char = '`';
const BOLD_MARKER: &str = "**";

/// An inline run within a single line of a heading, list item, or paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    Text(&'a str),
    /// Inner text of a backtick span. Never scanned for other markers.
    Code(&'a str),
    /// Children are only `Text` and `Code`; bold does not nest.
    Bold(Vec<Inline<'a>>),
}

/// Parses one line of text into inline runs.
///
/// Code spans are resolved first and become opaque, then `**` pairs are
/// matched left to right across the remaining text. Unmatched delimiters stay
/// literal.
#[must_use]
pub fn parse_inline(text: &str) -> Vec<Inline<'_>> {
    apply_bold(split_code_spans(text))
}

/// Renders inline runs to HTML, appending to `out`.
///
/// Plain text is emitted as-is. Code span content is escaped only when
/// `escape_code` is set.
pub fn render_inline(nodes: &[Inline<'_>], escape_code: bool, out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Code(code) => {
                out.push_str("<code>");
                if escape_code {
                    push_escaped(out, code);
                } else {
                    out.push_str(code);
                }
                out.push_str("</code>");
            }
            Inline::Bold(children) => {
                out.push_str("<strong>");
                render_inline(children, escape_code, out);
                out.push_str("</strong>");
            }
        }
    }
}

/// Splits text into `Text` and `Code` runs.
///
/// A code span needs at least one character between its backticks. For an
/// empty pair (` `` `) the second backtick is retried as an opener.
fn split_code_spans(text: &str) -> Vec<Inline<'_>> {
    let mut runs = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(CODE_DELIMITER) {
        let open = cursor + rel;
        let body_start = open + CODE_DELIMITER.len_utf8();
        match text[body_start..].find(CODE_DELIMITER) {
            Some(0) => cursor = body_start,
            Some(len) => {
                if open > plain_start {
                    runs.push(Inline::Text(&text[plain_start..open]));
                }
                runs.push(Inline::Code(&text[body_start..body_start + len]));
                cursor = body_start + len + CODE_DELIMITER.len_utf8();
                plain_start = cursor;
            }
            None => break,
        }
    }

    if plain_start < text.len() {
        runs.push(Inline::Text(&text[plain_start..]));
    }
    runs
}

/// Wraps text between paired `**` markers in `Bold` runs.
///
/// Markers are found left to right without overlap and paired in order, so
/// `***a***` yields `<strong>*a</strong>*`. A trailing unpaired marker is
/// left as text. Code runs can sit inside a bold run but never contain a
/// marker.
fn apply_bold(runs: Vec<Inline<'_>>) -> Vec<Inline<'_>> {
    let mut markers: Vec<(usize, usize)> = runs
        .iter()
        .enumerate()
        .filter_map(|(i, run)| match run {
            Inline::Text(text) => Some((i, *text)),
            _ => None,
        })
        .flat_map(|(i, text)| {
            text.match_indices(BOLD_MARKER)
                .map(move |(offset, _)| (i, offset))
        })
        .collect();
    if markers.len() < 2 {
        return runs;
    }
    markers.truncate(markers.len() - markers.len() % 2);

    let mut markers = markers.into_iter().peekable();
    let mut out = Vec::with_capacity(runs.len());
    let mut bold: Option<Vec<Inline<'_>>> = None;

    for (i, run) in runs.into_iter().enumerate() {
        let text = match run {
            Inline::Text(text) => text,
            other => {
                push_run(&mut out, &mut bold, other);
                continue;
            }
        };

        let mut start = 0;
        while let Some((_, offset)) = markers.next_if(|&(idx, _)| idx == i) {
            if offset > start {
                push_run(&mut out, &mut bold, Inline::Text(&text[start..offset]));
            }
            match bold.take() {
                Some(children) => out.push(Inline::Bold(children)),
                None => bold = Some(Vec::new()),
            }
            start = offset + BOLD_MARKER.len();
        }
        if start < text.len() {
            push_run(&mut out, &mut bold, Inline::Text(&text[start..]));
        }
    }

    out
}

fn push_run<'a>(out: &mut Vec<Inline<'a>>, bold: &mut Option<Vec<Inline<'a>>>, run: Inline<'a>) {
    match bold {
        Some(children) => children.push(run),
        None => out.push(run),
    }
}
