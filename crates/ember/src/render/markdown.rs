use serde::Deserialize;

use super::block::{Block, classify_blocks};
use super::escape_html;
use super::inline::{parse_inline, render_inline};

/// Rendering options, read from the `[markdown]` table of `config.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// HTML-escape the content of inline code spans. Off by default, in which
    /// case `` `<img onerror=..>` `` reaches the output as live markup.
    pub escape_inline_code: bool,
}

/// Converts a Markdown subset to an HTML fragment.
///
/// Supported: `#` to `###` headings, fenced code blocks, `-`/`*`/`+` lists,
/// inline code, bold, and one paragraph per non-blank line. Source lines that
/// start with `<` get inline formatting but no `<p>` wrapper. Blocks are
/// joined with `\n`.
///
/// The converter holds no mutable state and may be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownConverter {
    options: Options,
}

impl MarkdownConverter {
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Classifies `source` into blocks without rendering them.
    #[must_use]
    pub fn blocks(source: &str) -> Vec<Block<'_>> {
        classify_blocks(source)
    }

    /// Converts `source` to HTML. Total over all inputs; `""` yields `""`.
    #[must_use]
    pub fn convert(&self, source: &str) -> String {
        let mut html = String::with_capacity(source.len() + source.len() / 2);
        for block in classify_blocks(source) {
            if block == Block::Blank {
                continue;
            }
            if !html.is_empty() {
                html.push('\n');
            }
            self.render_block(&block, &mut html);
        }
        html
    }

    fn render_block(&self, block: &Block<'_>, html: &mut String) {
        match block {
            Block::CodeFence { content, .. } => {
                html.push_str("<pre><code>");
                html.push_str(&escape_html(content));
                html.push_str("</code></pre>");
            }
            Block::Heading { level, text } => {
                html.push_str(&format!("<{level}>"));
                self.render_text(text, html);
                html.push_str(&format!("</{level}>"));
            }
            Block::List { items } => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str("<li>");
                    self.render_text(item, html);
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
            }
            Block::Paragraph(line) => {
                html.push_str("<p>");
                self.render_text(line, html);
                html.push_str("</p>");
            }
            Block::Html(line) => self.render_text(line, html),
            Block::Blank => {}
        }
    }

    fn render_text(&self, text: &str, html: &mut String) {
        render_inline(&parse_inline(text), self.options.escape_inline_code, html);
    }
}

/// Converts `source` to HTML with default options.
#[must_use]
pub fn convert(source: &str) -> String {
    MarkdownConverter::default().convert(source)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn escaping() -> MarkdownConverter {
        MarkdownConverter::new(Options {
            escape_inline_code: true,
        })
    }

    // -- convert: blocks --

    #[test]
    fn convert_empty() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn convert_blank_only() {
        assert_eq!(convert("\n  \n\t\n"), "");
    }

    #[test]
    fn convert_h1() {
        assert_eq!(convert("# Title"), "<h1>Title</h1>");
    }

    #[test]
    fn convert_h2() {
        assert_eq!(convert("## Sub"), "<h2>Sub</h2>");
    }

    #[test]
    fn convert_h3() {
        assert_eq!(convert("### Deeper"), "<h3>Deeper</h3>");
    }

    #[test]
    fn convert_four_hashes_is_paragraph() {
        assert_eq!(convert("#### Four"), "<p>#### Four</p>");
    }

    #[test]
    fn convert_heading_with_inline_formatting() {
        assert_eq!(
            convert("## The `main` **entry**"),
            "<h2>The <code>main</code> <strong>entry</strong></h2>"
        );
    }

    #[test]
    fn convert_bold() {
        assert_eq!(convert("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn convert_inline_code() {
        assert_eq!(convert("`x`"), "<p><code>x</code></p>");
    }

    #[test]
    fn convert_list() {
        assert_eq!(convert("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn convert_single_item_list() {
        assert_eq!(convert("* only"), "<ul><li>only</li></ul>");
    }

    #[test]
    fn convert_list_items_get_inline_formatting() {
        assert_eq!(
            convert("+ **a**\n+ `b`"),
            "<ul><li><strong>a</strong></li><li><code>b</code></li></ul>"
        );
    }

    #[test]
    fn convert_lines_are_separate_paragraphs() {
        assert_eq!(convert("line1\nline2"), "<p>line1</p>\n<p>line2</p>");
    }

    #[test]
    fn convert_blank_lines_are_dropped() {
        assert_eq!(convert("a\n\n\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn convert_html_line_not_wrapped() {
        assert_eq!(convert("<hr>"), "<hr>");
        assert_eq!(
            convert("<pre><code>x</code></pre>"),
            "<pre><code>x</code></pre>"
        );
    }

    #[test]
    fn convert_html_line_gets_inline_formatting() {
        assert_eq!(
            convert("<span>see `x` and **y**</span>"),
            "<span>see <code>x</code> and <strong>y</strong></span>"
        );
    }

    #[test]
    fn convert_line_starting_with_bold_is_wrapped() {
        assert_eq!(
            convert("**Note:** read this"),
            "<p><strong>Note:</strong> read this</p>"
        );
    }

    // -- convert: code fences --

    #[test]
    fn convert_fence_escapes_script() {
        let html = convert("```\n<script>alert(1)</script>\n```");
        assert_eq!(
            html,
            "<pre><code>&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"
        );
        assert!(!html.contains("<script>"), "html:\n{html}");
    }

    #[test]
    fn convert_fence_escapes_quotes_and_ampersands() {
        assert_eq!(
            convert("```\na && \"b\" || 'c'\n```"),
            "<pre><code>a &amp;&amp; &quot;b&quot; || &#039;c&#039;</code></pre>"
        );
    }

    #[test]
    fn convert_fence_language_is_not_rendered() {
        assert_eq!(
            convert("```rust\nlet x = 1;\n```"),
            "<pre><code>let x = 1;</code></pre>"
        );
    }

    #[test]
    fn convert_fence_content_is_not_formatted() {
        let input = indoc! {"
            ```
            # heading
            - item
            **bold** `code`
            ```
        "};
        assert_eq!(
            convert(input),
            "<pre><code># heading\n- item\n**bold** `code`</code></pre>"
        );
    }

    #[test]
    fn convert_unterminated_fence_runs_to_end() {
        assert_eq!(
            convert("text\n```\n<b>\n\n# x"),
            "<p>text</p>\n<pre><code>&lt;b&gt;\n\n# x</code></pre>"
        );
    }

    #[test]
    fn convert_backtick_led_line_with_trailing_text_is_not_a_fence() {
        assert_eq!(
            convert("```ls``` here\n# Next"),
            "<p>``<code>ls</code>`` here</p>\n<h1>Next</h1>"
        );
    }

    #[test]
    fn convert_fence_with_punctuated_language() {
        assert_eq!(
            convert("```c++\nint x;\n```\n- item"),
            "<pre><code>int x;</code></pre>\n<ul><li>item</li></ul>"
        );
    }

    #[test]
    fn convert_empty_fence() {
        assert_eq!(convert("```\n```"), "<pre><code></code></pre>");
    }

    // -- convert: malformed markers --

    #[test]
    fn convert_unmatched_markers_are_literal() {
        assert_eq!(convert("a ` b ** c"), "<p>a ` b ** c</p>");
    }

    // -- convert: inline code escaping --

    #[test]
    fn convert_inline_code_not_escaped_by_default() {
        assert_eq!(
            convert("`<img src=x onerror=alert(1)>`"),
            "<p><code><img src=x onerror=alert(1)></code></p>"
        );
    }

    #[test]
    fn convert_inline_code_escaped_when_enabled() {
        assert_eq!(
            escaping().convert("`<img src=x onerror=alert(1)>`"),
            "<p><code>&lt;img src=x onerror=alert(1)&gt;</code></p>"
        );
    }

    // -- convert: documents --

    #[test]
    fn convert_article() {
        let input = indoc! {"
            # Django REST tips

            Some **practical** notes on `serializers`.

            ## Checklist
            - validate input
            - paginate **everything**

            ```python
            class A(Serializer):
                x = Field()
            ```
            <hr>
            Done.
        "};
        let expected = indoc! {"
            <h1>Django REST tips</h1>
            <p>Some <strong>practical</strong> notes on <code>serializers</code>.</p>
            <h2>Checklist</h2>
            <ul><li>validate input</li><li>paginate <strong>everything</strong></li></ul>
            <pre><code>class A(Serializer):
                x = Field()</code></pre>
            <hr>
            <p>Done.</p>"};
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn convert_crlf_input() {
        assert_eq!(
            convert("# A\r\n- b\r\n\r\nc\r\n"),
            "<h1>A</h1>\n<ul><li>b</li></ul>\n<p>c</p>"
        );
    }

    #[test]
    fn convert_is_deterministic() {
        let input = "# a\n- `b`\n**c**\n```\nd\n";
        assert_eq!(convert(input), convert(input));
    }

    #[test]
    fn convert_output_lines_pass_through_again() {
        let once = convert("# T\n**b**\n- i");
        assert_eq!(convert(&once), once);
    }

    // -- MarkdownConverter --

    #[test]
    fn default_options_do_not_escape_inline_code() {
        assert!(!MarkdownConverter::default().options().escape_inline_code);
    }

    #[test]
    fn blocks_exposes_classification() {
        let blocks = MarkdownConverter::blocks("# A\ntext");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], Block::Paragraph("text"));
    }

    #[test]
    fn converter_is_shareable_across_threads() {
        let converter = escaping();
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || converter.convert(&format!("# {i}"))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("<h1>{i}</h1>"));
        }
    }
}
