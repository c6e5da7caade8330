//! Language tags understood by the analysis service and the editor widgets.

use serde::{Deserialize, Serialize, Serializer};

/// A concrete language the service knows how to review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Python,
    Javascript,
    Typescript,
    Java,
    Csharp,
    Sql,
    Nosql,
    React,
    Delphi,
}

impl LanguageTag {
    /// Every tag, in picker order.
    pub const ALL: [LanguageTag; 9] = [
        LanguageTag::Python,
        LanguageTag::Javascript,
        LanguageTag::Typescript,
        LanguageTag::Java,
        LanguageTag::Csharp,
        LanguageTag::Sql,
        LanguageTag::Nosql,
        LanguageTag::React,
        LanguageTag::Delphi,
    ];

    /// Wire name sent in `POST /analyze`.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::Javascript => "javascript",
            LanguageTag::Typescript => "typescript",
            LanguageTag::Java => "java",
            LanguageTag::Csharp => "csharp",
            LanguageTag::Sql => "sql",
            LanguageTag::Nosql => "nosql",
            LanguageTag::React => "react",
            LanguageTag::Delphi => "delphi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == value)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LanguageTag::Python => "Python",
            LanguageTag::Javascript => "JavaScript",
            LanguageTag::Typescript => "TypeScript",
            LanguageTag::Java => "Java",
            LanguageTag::Csharp => "C#",
            LanguageTag::Sql => "SQL",
            LanguageTag::Nosql => "NoSQL/MongoDB",
            LanguageTag::React => "React/ReactJS",
            LanguageTag::Delphi => "Delphi",
        }
    }

    /// CodeMirror 5 MIME mode for the editor.
    pub fn editor_mode(self) -> &'static str {
        match self {
            LanguageTag::Python => "text/x-python",
            LanguageTag::Javascript => "text/javascript",
            LanguageTag::Typescript => "text/typescript",
            LanguageTag::Java => "text/x-java",
            LanguageTag::Csharp => "text/x-csharp",
            LanguageTag::Sql => "text/x-sql",
            // MongoDB shell queries are JavaScript
            LanguageTag::Nosql => "text/javascript",
            LanguageTag::React => "text/jsx",
            LanguageTag::Delphi => "text/x-pascal",
        }
    }

    /// Prism grammar used to colorize the optimized code.
    pub fn highlight_grammar(self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::Javascript => "javascript",
            LanguageTag::Typescript => "typescript",
            LanguageTag::Java => "java",
            LanguageTag::Csharp => "csharp",
            LanguageTag::Sql => "sql",
            LanguageTag::Nosql => "javascript",
            LanguageTag::React => "jsx",
            LanguageTag::Delphi => "pascal",
        }
    }
}

/// Editor mode when no language is known.
pub const PLAIN_EDITOR_MODE: &str = "text/plain";

/// Prism grammar for unknown languages.
pub const GENERIC_GRAMMAR: &str = "clike";

/// What the user picked: a fixed language, or auto-detection.
///
/// Serializes to the tag's wire name, or `"auto"` to let the service decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageSelection {
    #[default]
    Auto,
    Tag(LanguageTag),
}

impl LanguageSelection {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageSelection::Auto => "auto",
            LanguageSelection::Tag(tag) => tag.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == "auto" {
            Some(LanguageSelection::Auto)
        } else {
            LanguageTag::parse(value).map(LanguageSelection::Tag)
        }
    }

    pub fn tag(self) -> Option<LanguageTag> {
        match self {
            LanguageSelection::Auto => None,
            LanguageSelection::Tag(tag) => Some(tag),
        }
    }

    pub fn highlight_grammar(self) -> &'static str {
        self.tag()
            .map(LanguageTag::highlight_grammar)
            .unwrap_or(GENERIC_GRAMMAR)
    }
}

impl Serialize for LanguageSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_parse() {
        for tag in LanguageTag::ALL {
            assert_eq!(LanguageTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(LanguageTag::parse("cobol"), None);
    }

    #[test]
    fn test_serde_name_matches_wire_name() {
        for tag in LanguageTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn test_selection_serializes_auto_sentinel() {
        assert_eq!(
            serde_json::to_string(&LanguageSelection::Auto).unwrap(),
            "\"auto\""
        );
        assert_eq!(
            serde_json::to_string(&LanguageSelection::Tag(LanguageTag::Csharp)).unwrap(),
            "\"csharp\""
        );
    }

    #[test]
    fn test_unknown_language_uses_generic_grammar() {
        assert_eq!(LanguageSelection::Auto.highlight_grammar(), GENERIC_GRAMMAR);
        assert_eq!(
            LanguageSelection::Tag(LanguageTag::Delphi).highlight_grammar(),
            "pascal"
        );
    }
}
