use tracing::warn;

use crate::language::LanguageSelection;

/// Strings the service sends when it declined to produce optimized code.
pub const PLACEHOLDER_SENTINELS: &[&str] = &[
    "// Código otimizado aqui (se aplicável)",
    "// Código otimizado disponível abaixo",
    "// Código otimizado abaixo",
    "// Código otimizado",
    "// Optimized code here (if applicable)",
    "// Optimized code below",
    "// Optimized code",
];

/// Optimized code as it will be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedCodeView {
    /// Plain text with `\n` line endings. Never interpreted as markup.
    pub text: String,
    /// Prism grammar name, e.g. `python`.
    pub grammar: &'static str,
    /// True when the service produced nothing and the submitted code is shown.
    pub from_original: bool,
}

impl OptimizedCodeView {
    pub fn build(
        optimized: Option<&str>,
        original: &str,
        language: LanguageSelection,
    ) -> Self {
        let (text, from_original) = match optimized {
            Some(code) if !is_placeholder(code) => (code, false),
            _ => {
                warn!("Service returned no optimized code, showing the submitted code");
                (original, true)
            }
        };

        Self {
            text: normalize_line_endings(text),
            grammar: language.highlight_grammar(),
            from_original,
        }
    }

    pub fn css_class(&self) -> String {
        format!("language-{}", self.grammar)
    }
}

pub fn is_placeholder(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.is_empty() || PLACEHOLDER_SENTINELS.contains(&trimmed)
}

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageTag;

    const PY: LanguageSelection = LanguageSelection::Tag(LanguageTag::Python);

    #[test]
    fn test_placeholder_falls_back_to_original() {
        let view = OptimizedCodeView::build(
            Some("  // Código otimizado aqui (se aplicável)\n"),
            "total = sum(xs)",
            PY,
        );
        assert_eq!(view.text, "total = sum(xs)");
        assert!(view.from_original);
    }

    #[test]
    fn test_missing_code_falls_back_to_original() {
        let view = OptimizedCodeView::build(None, "x = 1", PY);
        assert_eq!(view.text, "x = 1");
        assert!(view.from_original);
    }

    #[test]
    fn test_real_code_is_kept_verbatim() {
        let code = "<div>{items.map(i => <Item key={i} />)}</div>";
        let view = OptimizedCodeView::build(
            Some(code),
            "",
            LanguageSelection::Tag(LanguageTag::React),
        );
        assert_eq!(view.text, code);
        assert!(!view.from_original);
        assert_eq!(view.css_class(), "language-jsx");
    }

    #[test]
    fn test_line_endings_are_normalized() {
        let view = OptimizedCodeView::build(Some("a\r\nb\rc\n"), "", PY);
        assert_eq!(view.text, "a\nb\nc\n");
    }

    #[test]
    fn test_auto_language_uses_generic_grammar() {
        let view = OptimizedCodeView::build(Some("x"), "", LanguageSelection::Auto);
        assert_eq!(view.grammar, "clike");
    }
}
