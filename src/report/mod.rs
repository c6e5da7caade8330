//! View-model for an analysis report.
//!
//! Everything here is a pure transformation from the service payload to what
//! the page shows: score band, metric strings, the filtered explanation,
//! escaped issue snippets and the optimized-code fallback. Components in
//! `crate::components` only write these values to the DOM.

pub mod code;
pub mod issues;
pub mod sanitize;
pub mod score;

pub use code::OptimizedCodeView;
pub use issues::{IssueView, Severity};
pub use sanitize::sanitize_explanation;
pub use score::{ScoreBand, ScoreView};

use serde_json::Value;

use crate::api::{AnalysisSuccess, Metrics};
use crate::state::Submission;

/// Shown for a metric the service did not report.
pub const MISSING_METRIC: &str = "N/A";

const NO_EXPLANATION: &str = "<p>No explanation available.</p>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsView {
    pub complexity_reduction: String,
    pub memory_impact: String,
    pub estimated_speedup: String,
    pub energy_savings: String,
}

impl MetricsView {
    pub fn from_payload(metrics: &Metrics) -> Self {
        Self {
            complexity_reduction: metric_text(metrics.complexity_reduction.as_ref()),
            memory_impact: metric_text(metrics.memory_impact.as_ref()),
            estimated_speedup: metric_text(metrics.estimated_speedup.as_ref()),
            energy_savings: metric_text(metrics.energy_savings.as_ref()),
        }
    }

    /// (label, value) pairs in display order.
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Complexity reduction", &self.complexity_reduction),
            ("Memory impact", &self.memory_impact),
            ("Estimated speedup", &self.estimated_speedup),
            ("Energy savings", &self.energy_savings),
        ]
    }
}

fn metric_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_METRIC.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING_METRIC.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Everything one render pass needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub score: ScoreView,
    pub metrics: MetricsView,
    /// Uppercased model name, when the service reported one.
    pub model: Option<String>,
    /// Filtered explanation HTML.
    pub explanation_html: String,
    /// `None` hides the issues section.
    pub issues: Option<Vec<IssueView>>,
    pub optimized_code: OptimizedCodeView,
    pub tokens: u64,
}

impl ReportView {
    pub fn build(success: AnalysisSuccess, submission: &Submission) -> Self {
        let data = success.data;

        let explanation = [data.explanation_html.as_deref(), data.explanation.as_deref()]
            .into_iter()
            .flatten()
            .find(|e| !e.trim().is_empty())
            .map(sanitize_explanation)
            .unwrap_or_else(|| NO_EXPLANATION.to_string());

        Self {
            score: ScoreView::from_raw(data.quality_score),
            metrics: MetricsView::from_payload(&data.metrics),
            model: success.model.map(|m| m.to_uppercase()),
            explanation_html: explanation,
            issues: issues::issue_views(data.has_issues, &data.issues),
            optimized_code: OptimizedCodeView::build(
                data.optimized_code.as_deref(),
                &submission.code,
                submission.language,
            ),
            tokens: success.tokens,
        }
    }
}
