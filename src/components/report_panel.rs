//! Analysis report display.
//!
//! Writes a prepared [`ReportView`] to the page. Text fields go in as text
//! nodes; only the sanitized explanation and the escaped issue snippets are
//! set as inner HTML. Prism colorizes code blocks once they are mounted.

use leptos::html;
use leptos::prelude::*;
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::bindings::{copy_to_clipboard, highlight_element};
use crate::components::toast::{use_toasts, ToastKind};
use crate::report::{IssueView, MetricsView, OptimizedCodeView, ReportView, ScoreView};
use crate::state::ReviewState;

#[component]
pub fn ReportPanel(report: ReportView) -> impl IntoView {
    let ReportView {
        score,
        metrics,
        model,
        explanation_html,
        issues,
        optimized_code,
        ..
    } = report;

    view! {
        <div class="report-panel">
            <div class="report-header">
                <ScoreGauge score=score />
                {model.map(|m| view! { <span class="model-badge">{m}</span> })}
            </div>

            <MetricsGrid metrics=metrics />

            <ExplanationSection html=explanation_html />

            {issues.map(|issues| view! { <IssueList issues=issues /> })}

            <OptimizedCode code=optimized_code />
        </div>
    }
}

#[component]
fn ScoreGauge(score: ScoreView) -> impl IntoView {
    // class replaced wholesale so only one band class is ever present
    let class = format!("score-circle {}", score.band.color_class());

    view! {
        <div class="score-section">
            <div class=class>
                <span class="score-value">{score.value}</span>
            </div>
            <p class="score-label">{score.band.label()}</p>
        </div>
    }
}

#[component]
fn MetricsGrid(metrics: MetricsView) -> impl IntoView {
    let rows = metrics
        .rows()
        .into_iter()
        .map(|(label, value)| {
            let value = value.to_string();
            view! {
                <div class="metric-card">
                    <span class="metric-label">{label}</span>
                    <span class="metric-value">{value}</span>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! { <div class="metrics-grid">{rows}</div> }
}

#[component]
fn ExplanationSection(html: String) -> impl IntoView {
    let container = NodeRef::<html::Div>::new();

    Effect::new(move |_| {
        let Some(div) = container.get() else {
            error!("Explanation container missing, skipping highlight");
            return;
        };
        let blocks = match div.query_selector_all("pre code") {
            Ok(blocks) => blocks,
            Err(e) => {
                error!("Failed to query explanation code blocks: {:?}", e);
                return;
            }
        };
        for i in 0..blocks.length() {
            let Some(el) = blocks.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            if let Err(e) = highlight_element(&el) {
                warn!("Prism failed on explanation block: {}", e);
            }
        }
    });

    view! {
        <section class="explanation-section">
            <h3>"Analysis"</h3>
            <div class="explanation-content" node_ref=container inner_html=html></div>
        </section>
    }
}

#[component]
fn IssueList(issues: Vec<IssueView>) -> impl IntoView {
    let count = issues.len();
    let items = issues
        .into_iter()
        .map(|issue| view! { <IssueItem issue=issue /> })
        .collect::<Vec<_>>();

    view! {
        <section class="issues-section">
            <h3>"Issues found " <span class="issue-count">{count}</span></h3>
            <div class="issues-list">{items}</div>
        </section>
    }
}

#[component]
fn IssueItem(issue: IssueView) -> impl IntoView {
    let class = issue.css_class();
    let badge_class = format!("severity-badge severity-{}", issue.severity);

    view! {
        <div class=class>
            <div class="issue-header">
                <span class="issue-title">{issue.title}</span>
                <span class=badge_class>{issue.severity_label}</span>
                {issue.category.map(|c| view! { <span class="issue-category">{c}</span> })}
            </div>
            <p class="issue-description">{issue.description}</p>
            <p class="issue-impact">
                <strong>"Impact: "</strong>
                {issue.impact}
            </p>
            {issue.original_code_html.map(|code| view! {
                <pre class="issue-code"><code inner_html=code></code></pre>
            })}
        </div>
    }
}

#[component]
fn OptimizedCode(code: OptimizedCodeView) -> impl IntoView {
    let toasts = use_toasts();
    let code_el = NodeRef::<html::Code>::new();
    let class = code.css_class();
    let pre_class = class.clone();
    let text = StoredValue::new(code.text.clone());

    Effect::new(move |_| match code_el.get() {
        Some(el) => {
            if let Err(e) = highlight_element(&el) {
                warn!("Prism failed on optimized code: {}", e);
            }
        }
        None => error!("Optimized code element missing, skipping highlight"),
    });

    let copy = move |_| {
        let text = text.get_value();
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => {
                    debug!("Copied {} bytes", text.len());
                    toasts.show("Code copied to clipboard!", ToastKind::Success);
                }
                Err(e) => {
                    error!("Clipboard write failed: {}", e);
                    toasts.show(
                        "Could not copy the code. Try selecting it manually.",
                        ToastKind::Danger,
                    );
                }
            }
        });
    };

    view! {
        <section class="optimized-section">
            <div class="optimized-header">
                <h3>"Optimized code"</h3>
                <button type="button" class="btn btn-outline-secondary btn-copy" on:click=copy>
                    "Copy"
                </button>
            </div>
            {code.from_original.then(|| view! {
                <p class="optimized-note">"No optimized version was produced; showing the submitted code."</p>
            })}
            <pre class=pre_class><code node_ref=code_el class=class>{code.text}</code></pre>
        </section>
    }
}

/// Token usage of the last analysis, shown in the page footer.
#[component]
pub fn UsageIndicator() -> impl IntoView {
    let review = expect_context::<RwSignal<ReviewState>>();

    move || {
        review
            .with(|state| state.report().map(|r| r.tokens))
            .map(|tokens| {
                view! {
                    <span class="usage-indicator">
                        {format!("Analysis via AI | Tokens: {}", tokens)}
                    </span>
                }
            })
    }
}
