pub mod block;
pub mod inline;
pub mod markdown;

/// Escapes characters that are special in HTML.
///
/// Escapes `&`, `<`, `>`, `"`, `'`, each exactly once.
/// Safe for use in both element content and attribute values.
#[must_use]
pub(crate) fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    push_escaped(&mut output, input);
    output
}

/// Appends the HTML-escaped form of `input` to `output`.
pub(crate) fn push_escaped(output: &mut String, input: &str) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(ch),
        }
    }
}
