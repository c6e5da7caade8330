//! Redundancy filter for the explanation HTML.
//!
//! The explanation is rendered server-side from Markdown by the same service
//! that produces the optimized code, so it is filtered for duplicated content
//! only. Full code listings belong in the optimized-code panel, so large or
//! untagged code blocks are dropped, along with the "optimized code" headings
//! that used to introduce them. Everything else is kept as-is.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Code blocks with more lines than this are treated as full listings.
pub const MAX_EXPLANATION_CODE_LINES: usize = 5;

/// Class Markdown renderers put on fenced blocks with no language.
const UNTAGGED_CODE_CLASS: &str = "language-none";

/// Lowercased heading fragments that mark a misplaced code section.
const OPTIMIZED_CODE_HEADINGS: &[&str] = &[
    "optimized code",
    "código otimizado",
    "codigo otimizado",
    "código optimizado",
];

static CODE_BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre code").expect("code block selector must parse"));

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector must parse")
});

/// Strip full code listings and "optimized code" headings from an explanation
/// fragment, returning the re-serialized fragment.
pub fn sanitize_explanation(html: &str) -> String {
    let mut fragment = Html::parse_fragment(html);
    let mut doomed = Vec::new();

    for code in fragment.select(&CODE_BLOCK_SELECTOR) {
        if !is_listing(&code) {
            continue;
        }
        let pre = code
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "pre");
        if let Some(pre) = pre {
            if !doomed.contains(&pre.id()) {
                doomed.push(pre.id());
            }
        }
    }

    for heading in fragment.select(&HEADING_SELECTOR) {
        if is_optimized_code_heading(&heading) {
            doomed.push(heading.id());
        }
    }

    for id in doomed {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    fragment.root_element().inner_html()
}

/// Number of lines in a code block's text, ignoring one trailing newline.
pub fn code_line_count(text: &str) -> usize {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n').count()
}

fn is_listing(code: &ElementRef<'_>) -> bool {
    if code.value().classes().any(|c| c == UNTAGGED_CODE_CLASS) {
        return true;
    }
    let text: String = code.text().collect();
    code_line_count(&text) > MAX_EXPLANATION_CODE_LINES
}

fn is_optimized_code_heading(heading: &ElementRef<'_>) -> bool {
    let text = heading.text().collect::<String>().to_lowercase();
    OPTIMIZED_CODE_HEADINGS
        .iter()
        .any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_block(lines: usize) -> String {
        let body: Vec<String> = (1..=lines).map(|i| format!("line_{}()", i)).collect();
        format!(
            "<pre><code class=\"language-python\">{}</code></pre>",
            body.join("\n")
        )
    }

    #[test]
    fn test_six_line_block_is_removed() {
        let html = format!("<p>Intro</p>{}<p>Outro</p>", code_block(6));
        let out = sanitize_explanation(&html);
        assert!(!out.contains("<pre>"), "block should be gone: {}", out);
        assert!(!out.contains("line_6"));
        assert!(out.contains("<p>Intro</p>"));
        assert!(out.contains("<p>Outro</p>"));
    }

    #[test]
    fn test_five_line_block_is_kept() {
        let html = format!("<p>Intro</p>{}", code_block(5));
        let out = sanitize_explanation(&html);
        assert!(out.contains("<pre>"), "block should stay: {}", out);
        assert!(out.contains("line_5()"));
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_line() {
        assert_eq!(code_line_count("a\nb\nc\nd\ne\n"), 5);
        assert_eq!(code_line_count("a\nb\nc\nd\ne\nf"), 6);
        assert_eq!(code_line_count(""), 1);
    }

    #[test]
    fn test_untagged_block_is_removed_even_when_short() {
        let html = "<p>See:</p><pre><code class=\"language-none\">x = 1</code></pre>";
        let out = sanitize_explanation(html);
        assert!(!out.contains("x = 1"), "{}", out);
        assert!(out.contains("<p>See:</p>"));
    }

    #[test]
    fn test_inline_code_is_untouched() {
        let html = "<p>Use <code>sum(xs)</code> instead.</p>";
        assert_eq!(sanitize_explanation(html), html);
    }

    #[test]
    fn test_optimized_code_headings_are_removed() {
        let html = "<h2>Optimized Code</h2><h3>CÓDIGO OTIMIZADO</h3><h3>Why it is faster</h3><p>Because.</p>";
        let out = sanitize_explanation(html);
        assert!(!out.to_lowercase().contains("optimized code"), "{}", out);
        assert!(!out.to_lowercase().contains("código otimizado"), "{}", out);
        assert!(out.contains("<h3>Why it is faster</h3>"));
        assert!(out.contains("<p>Because.</p>"));
    }

    #[test]
    fn test_other_markup_passes_through() {
        let html = "<p>Read <a href=\"https://docs.python.org\">the docs</a> and <strong>measure</strong>.</p><ul><li>one</li></ul>";
        assert_eq!(sanitize_explanation(html), html);
    }
}
