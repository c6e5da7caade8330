//! Regex-based language sniffing for pasted code.
//!
//! Each candidate language has a fixed list of signals. A language scores one
//! point per distinct signal that matches anywhere in the sample; repeated
//! matches of the same signal do not add up. The best score wins if it reaches
//! [`CONFIDENCE_FLOOR`]. Ties go to the language listed first in
//! [`CANDIDATE_ORDER`].

use regex::RegexSet;
use std::sync::LazyLock;

use crate::language::LanguageTag;

/// Minimum score for a detection to be trusted.
pub const CONFIDENCE_FLOOR: usize = 2;

/// Trimmed samples at or below this many characters are not auto-detected
/// while typing.
pub const MIN_DETECT_CHARS: usize = 30;

/// Evaluation order. The first language holding the top score wins a tie.
pub const CANDIDATE_ORDER: [LanguageTag; 9] = [
    LanguageTag::Python,
    LanguageTag::Javascript,
    LanguageTag::Typescript,
    LanguageTag::Java,
    LanguageTag::Csharp,
    LanguageTag::Sql,
    LanguageTag::React,
    LanguageTag::Delphi,
    LanguageTag::Nosql,
];

fn signals_for(tag: LanguageTag) -> &'static [&'static str] {
    match tag {
        LanguageTag::Python => &[
            r"(?m)^\s*def\s+\w+\s*\(",
            r"(?m)^\s*class\s+\w+(?u:.*):",
            r"(?m)^\s*import\s+\w+",
            r"(?m)^\s*from\s+\w+\s+import",
            r"(?m)^\s*@\w+",
            r"\bprint\s*\(",
            r"\belif\b",
            // block opener: colon at end of line
            r"(?m):\s*$",
        ],
        LanguageTag::Javascript => &[
            r"(?m)^\s*function\s+\w+\s*\(",
            r"(?m)^\s*const\s+\w+\s*=",
            r"(?m)^\s*let\s+\w+\s*=",
            r"(?m)^\s*var\s+\w+\s*=",
            r"console\.log\(",
            r"=>\s*\{",
            r"\brequire\s*\(",
            r"\bexport\s+(default|const|function)",
        ],
        LanguageTag::Typescript => &[
            r":\s*(string|number|boolean|any)\s*[;=)]",
            r"(?m)^\s*interface\s+\w+",
            r"(?m)^\s*type\s+\w+\s*=",
            r"<\w+>",
            r"as\s+(string|number|boolean)",
            r":\s*\w+\[\]",
        ],
        LanguageTag::Java => &[
            r"(?m)^\s*public\s+class\s+\w+",
            r"(?m)^\s*private\s+(static\s+)?\w+\s+\w+",
            r"(?m)^\s*protected\s+",
            r"System\.out\.println",
            r"(?m)^\s*import\s+java\.",
            r"\bnew\s+\w+\s*\(",
            r"\bpublic\s+static\s+void\s+main",
        ],
        LanguageTag::Csharp => &[
            r"(?m)^\s*public\s+class\s+\w+",
            r"(?m)^\s*private\s+\w+\s+\w+",
            r"(?m)^\s*using\s+System",
            r"Console\.WriteLine",
            r"\bstring\[\]\s+args\b",
            r"\bnamespace\s+\w+",
            r"\bvar\s+\w+\s*=\s*new\b",
        ],
        LanguageTag::Sql => &[
            r"(?im)^\s*SELECT\s+",
            r"(?im)^\s*INSERT\s+INTO",
            r"(?im)^\s*UPDATE\s+\w+\s+SET",
            r"(?im)^\s*DELETE\s+FROM",
            r"(?im)^\s*CREATE\s+TABLE",
            r"(?i)\bJOIN\b",
            r"(?i)\bWHERE\b",
            r"(?i)\bGROUP\s+BY\b",
        ],
        LanguageTag::React => &[
            r"(?m)^\s*import\s+React",
            r#"from\s+['"]react['"]"#,
            r"useState\s*\(",
            r"useEffect\s*\(",
            r"</\w+>",
            r"className=",
            r"\bJSX\b",
            r"return\s*\(",
        ],
        LanguageTag::Delphi => &[
            r"(?im)^\s*procedure\s+\w+",
            r"(?im)^\s*function\s+\w+(?u:.*):\s*\w+",
            r"(?im)^\s*begin\b",
            r"(?im)^\s*end\s*;",
            r"(?i)\bvar\s+\w+\s*:\s*\w+",
            r"(?i)\bunit\s+\w+",
        ],
        LanguageTag::Nosql => &[
            r"db\.\w+\.find\(",
            r"db\.\w+\.insert",
            r"db\.\w+\.update",
            r"\$match\s*:",
            r"\$group\s*:",
            r"\$project\s*:",
            r"\$lookup\s*:",
        ],
    }
}

// --- Signal sets (compiled once) ---

static SIGNAL_SETS: LazyLock<Vec<(LanguageTag, RegexSet)>> = LazyLock::new(|| {
    CANDIDATE_ORDER
        .iter()
        .map(|&tag| {
            // ASCII classes: `\w`, `\s` and `\b` ignore non-Latin letters
            let patterns = signals_for(tag).iter().map(|p| format!("(?-u){}", p));
            let set = RegexSet::new(patterns).expect("language signals must compile");
            (tag, set)
        })
        .collect()
});

/// Per-language signal counts, in [`CANDIDATE_ORDER`].
pub fn scores(sample: &str) -> Vec<(LanguageTag, usize)> {
    SIGNAL_SETS
        .iter()
        .map(|(tag, set)| (*tag, set.matches(sample).iter().count()))
        .collect()
}

/// Best-guess language for `sample`, or `None` when no language reaches the
/// confidence floor.
pub fn detect(sample: &str) -> Option<LanguageTag> {
    let mut best: Option<(LanguageTag, usize)> = None;
    for (tag, score) in scores(sample) {
        // strict comparison keeps the earlier candidate on a tie
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((tag, score));
        }
    }

    best.filter(|(_, score)| *score >= CONFIDENCE_FLOOR)
        .map(|(tag, _)| tag)
}

/// Whether a sample is long enough to be sniffed while the user types.
pub fn is_detectable(sample: &str) -> bool {
    sample.trim().chars().count() > MIN_DETECT_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(sample: &str, tag: LanguageTag) -> usize {
        scores(sample)
            .into_iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, s)| s)
            .unwrap()
    }

    #[test]
    fn test_identifier_classes_are_ascii() {
        // `\w+` stops at the accented letter, so only the trailing colon counts
        assert_eq!(score_of("def função(x):\n    return x", LanguageTag::Python), 1);
        assert_eq!(score_of("def funcao(x):\n    return x", LanguageTag::Python), 2);
        // `.` still spans multibyte text
        assert_eq!(score_of("class Relatório:\n    pass", LanguageTag::Python), 2);
    }

    #[test]
    fn test_python_def_and_elif() {
        let sample = "def sign(x):\n    if x > 0:\n        return 1\n    elif x < 0:\n        return -1\n    return 0\n";
        assert_eq!(detect(sample), Some(LanguageTag::Python));
    }

    #[test]
    fn test_single_signal_is_unknown() {
        assert_eq!(score_of("print(1)", LanguageTag::Python), 1);
        assert_eq!(detect("print(1)"), None);
    }

    #[test]
    fn test_repeated_signal_counts_once() {
        let sample = "print(1)\nprint(2)\nprint(3)\nprint(4)";
        assert_eq!(score_of(sample, LanguageTag::Python), 1);
        assert_eq!(detect(sample), None);
    }

    #[test]
    fn test_plain_prose_is_unknown() {
        assert_eq!(detect("the quick brown fox jumps over the lazy dog"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_sql_is_case_insensitive() {
        let sample = "select u.name, count(p.id)\nfrom users u\njoin orders p on u.id = p.user_id\nwhere p.total > 10\ngroup by u.name";
        assert_eq!(detect(sample), Some(LanguageTag::Sql));
    }

    #[test]
    fn test_javascript_function() {
        let sample = "function process(items) {\n  const out = [];\n  items.forEach(i => { out.push(i); });\n  console.log(out);\n}";
        assert_eq!(detect(sample), Some(LanguageTag::Javascript));
    }

    #[test]
    fn test_mongo_pipeline() {
        let sample = "db.orders.aggregate([\n  { $match: { status: 'A' } },\n  { $group: { _id: '$cust' } }\n])";
        assert_eq!(detect(sample), Some(LanguageTag::Nosql));
    }

    #[test]
    fn test_tie_goes_to_earlier_candidate() {
        let sample = "public class Foo {\n  private int count;\n}";
        assert_eq!(score_of(sample, LanguageTag::Java), 2);
        assert_eq!(score_of(sample, LanguageTag::Csharp), 2);
        assert_eq!(detect(sample), Some(LanguageTag::Java));
    }

    #[test]
    fn test_csharp_beats_java_with_extra_signals() {
        let sample = "using System;\nnamespace Demo {\n  public class Program {\n    static void Main(string[] args) {\n      Console.WriteLine(\"hi\");\n    }\n  }\n}";
        assert_eq!(detect(sample), Some(LanguageTag::Csharp));
    }

    #[test]
    fn test_detect_is_deterministic() {
        let sample = "import React, { useState } from 'react';\nexport default function App() {\n  const [n, setN] = useState(0);\n  return (<div className=\"x\">{n}</div>);\n}";
        let first = detect(sample);
        for _ in 0..10 {
            assert_eq!(detect(sample), first);
        }
    }

    #[test]
    fn test_short_samples_are_not_detectable() {
        assert!(!is_detectable("def f(x):\n    elif x: pass"));
        assert!(!is_detectable(&format!("   {}   ", "a".repeat(30))));
        assert!(is_detectable(&"a".repeat(31)));
    }
}
