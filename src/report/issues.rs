use crate::api::IssuePayload;

/// Issue severity reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// One issue, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueView {
    /// Raw severity string, used for the CSS class.
    pub severity: String,
    pub severity_label: String,
    pub category: Option<String>,
    pub title: String,
    pub description: String,
    pub impact: String,
    /// HTML-escaped snippet, safe to set as inner HTML.
    pub original_code_html: Option<String>,
}

impl IssueView {
    pub fn from_payload(issue: &IssuePayload) -> Self {
        let severity_label = Severity::parse(&issue.severity)
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| issue.severity.clone());

        Self {
            severity: issue.severity.clone(),
            severity_label,
            category: issue.category.as_deref().map(category_label),
            title: issue.title.clone(),
            description: issue.description.clone(),
            impact: issue.impact.clone(),
            original_code_html: issue
                .original_code
                .as_deref()
                .filter(|code| !code.is_empty())
                .map(escape_html),
        }
    }

    pub fn css_class(&self) -> String {
        format!("issue-item severity-{}", self.severity)
    }
}

/// Issues to show, or `None` when the section stays hidden.
pub fn issue_views(has_issues: bool, issues: &[IssuePayload]) -> Option<Vec<IssueView>> {
    if !has_issues || issues.is_empty() {
        return None;
    }
    Some(issues.iter().map(IssueView::from_payload).collect())
}

fn category_label(category: &str) -> String {
    match category {
        "complexity" => "Complexity".to_string(),
        "memory" => "Memory".to_string(),
        "idiom" => "Idiom".to_string(),
        "green_it" => "Green IT".to_string(),
        _ => category.replace('_', " "),
    }
}

/// Escape text so it renders literally inside HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: &str, original_code: Option<&str>) -> IssuePayload {
        IssuePayload {
            severity: severity.to_string(),
            category: Some("green_it".to_string()),
            title: "Loop concatenation".to_string(),
            description: "Strings are rebuilt on every iteration".to_string(),
            impact: "O(n²) allocations".to_string(),
            original_code: original_code.map(str::to_string),
        }
    }

    #[test]
    fn test_script_in_original_code_is_escaped() {
        let view = IssueView::from_payload(&issue(
            "high",
            Some("<script>alert('x')</script>"),
        ));
        let html = view.original_code_html.unwrap();
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert!(!html.contains('<'));
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(IssueView::from_payload(&issue("critical", None)).severity_label, "Critical");
        assert_eq!(IssueView::from_payload(&issue("high", None)).severity_label, "High");
        assert_eq!(IssueView::from_payload(&issue("medium", None)).severity_label, "Medium");
        assert_eq!(IssueView::from_payload(&issue("low", None)).severity_label, "Low");
        assert_eq!(IssueView::from_payload(&issue("info", None)).severity_label, "info");
    }

    #[test]
    fn test_missing_or_empty_snippet_is_omitted() {
        assert_eq!(IssueView::from_payload(&issue("low", None)).original_code_html, None);
        assert_eq!(IssueView::from_payload(&issue("low", Some(""))).original_code_html, None);
    }

    #[test]
    fn test_section_hidden_without_issues() {
        assert_eq!(issue_views(false, &[issue("low", None)]), None);
        assert_eq!(issue_views(true, &[]), None);
        assert_eq!(issue_views(true, &[issue("low", None)]).map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_category_label() {
        let view = IssueView::from_payload(&issue("low", None));
        assert_eq!(view.category.as_deref(), Some("Green IT"));
        assert_eq!(view.css_class(), "issue-item severity-low");
    }
}
