use std::time::Duration;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use tracing::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpAnalysisService;
use crate::components::language_picker::LanguagePicker;
use crate::components::report_panel::ReportPanel;
use crate::components::toast::{use_toasts, ToastKind};
use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::editor::Editor;
use crate::language::LanguageSelection;
use crate::review::run_analysis;
use crate::sniffer;
use crate::state::{AnalysisPhase, DetectionFeedback, Resolution, ReviewState, SubmitRejected};

const SHORT_TOAST: Duration = Duration::from_secs(2);

#[component]
pub fn ReviewerPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let review = expect_context::<RwSignal<ReviewState>>();
    let toasts = use_toasts();

    let api_base = StoredValue::new(config.api_base_url.clone());
    let detect_delay = config.detect_debounce;

    let textarea = NodeRef::<html::Textarea>::new();
    let editor = StoredValue::new_local(None::<Editor>);
    let debouncer = StoredValue::new(Debouncer::<TimeoutHandle>::new());

    let current_sample = move || {
        editor
            .with_value(|e| e.as_ref().map(Editor::value))
            .unwrap_or_default()
    };

    let run_detection = move |sample: String| {
        let detected = sniffer::detect(sample.trim());
        let mut applied = false;
        review.update(|state| applied = state.record_detection(detected));
        if applied {
            debug!("Live detection: {:?}", detected);
            editor.with_value(|e| {
                if let Some(e) = e {
                    e.set_language(detected);
                }
            });
        }
    };

    // Every edit restarts the quiet period; only the last timer fires
    let on_input = move |sample: String| {
        if !review.with_untracked(|state| state.should_auto_detect(&sample)) {
            debouncer.update_value(|d| d.cancel());
            return;
        }
        let timer = set_timeout_with_handle(
            move || {
                debouncer.update_value(|d| d.settle());
                run_detection(sample);
            },
            detect_delay,
        );
        match timer {
            Ok(handle) => debouncer.update_value(|d| d.schedule(handle)),
            Err(e) => warn!("Failed to schedule detection: {:?}", e),
        }
    };

    Effect::new(move |_| {
        let Some(el) = textarea.get() else {
            return;
        };
        if editor.with_value(Option::is_some) {
            return;
        }
        editor.set_value(Some(Editor::attach(el, on_input)));
    });

    let on_select = Callback::new(move |choice: LanguageSelection| {
        debouncer.update_value(|d| d.cancel());
        review.update(|state| state.select(choice));
        editor.with_value(|e| {
            if let Some(e) = e {
                e.set_language(choice.tag());
            }
        });

        match choice {
            LanguageSelection::Auto => {
                toasts.show_for("Auto-detect mode enabled", ToastKind::Info, SHORT_TOAST);
                let sample = current_sample();
                if review.with_untracked(|state| state.should_auto_detect(&sample)) {
                    run_detection(sample);
                }
            }
            LanguageSelection::Tag(tag) => toasts.show_for(
                format!("Language selected: {}", tag.display_name()),
                ToastKind::Success,
                SHORT_TOAST,
            ),
        }
    });

    let analyze = move || {
        let sample = current_sample();
        let Some(outcome) = review.try_update(|state| state.begin_submission(&sample)) else {
            return;
        };

        let (submission, resolution) = match outcome {
            Ok(started) => started,
            Err(SubmitRejected::EmptySample) => {
                toasts.show("Please enter some code to analyze.", ToastKind::Warning);
                return;
            }
            Err(SubmitRejected::InFlight) => {
                debug!("Analysis already running, ignoring submit");
                return;
            }
        };

        match resolution {
            Resolution::Manual => {}
            Resolution::Detected(tag) => toasts.show(
                format!("Language detected: {}", tag.display_name()),
                ToastKind::Info,
            ),
            Resolution::Unresolved => toasts.show(
                "Language not identified locally. The AI will try to detect it.",
                ToastKind::Warning,
            ),
        }

        let service = HttpAnalysisService::new(api_base.get_value());
        spawn_local(async move {
            let result = run_analysis(&service, &submission).await;
            let finished = review
                .try_update(|state| state.finish_submission(submission.id, result))
                .unwrap_or(Ok(()));

            match finished {
                Ok(()) => {
                    if review.with_untracked(|state| state.report().is_some()) {
                        toasts.show("Analysis complete!", ToastKind::Success);
                    }
                }
                Err(e) => toasts.show(
                    format!("Error analyzing code: {}", e),
                    ToastKind::Danger,
                ),
            }
        });
    };

    let on_keydown = move |e: ev::KeyboardEvent| {
        if (e.ctrl_key() || e.meta_key()) && e.key() == "Enter" {
            e.prevent_default();
            analyze();
        }
    };

    let clear = move |_| {
        debouncer.update_value(|d| d.cancel());
        editor.with_value(|e| {
            if let Some(e) = e {
                e.set_value("");
                e.set_language(None);
            }
        });
        review.update(ReviewState::clear);
        info!("Reviewer reset");
        toasts.show_for("Interface reset", ToastKind::Info, SHORT_TOAST);
    };

    let detection = move || match review.with(|state| state.detection()) {
        DetectionFeedback::None => None,
        DetectionFeedback::Detected(tag) => Some(
            view! {
                <span class="detection-feedback detected">
                    {format!("Detected: {}", tag.display_name())}
                </span>
            }
            .into_any(),
        ),
        DetectionFeedback::Unidentified => Some(
            view! {
                <span class="detection-feedback unidentified">"Language not identified"</span>
            }
            .into_any(),
        ),
    };

    let is_loading = move || review.with(|state| state.is_loading());

    // Only phase changes rebuild the results pane
    let phase = Memo::new(move |_| review.with(|state| state.phase().clone()));

    let results = move || match phase.get() {
        AnalysisPhase::Empty => view! {
            <div class="empty-state">
                <h3>"Ready to review"</h3>
                <p>"Paste your code, pick a language or let it be detected, and press Analyze."</p>
            </div>
        }
        .into_any(),
        AnalysisPhase::Loading => view! {
            <div class="loading-state">
                <div class="spinner-border" role="status"></div>
                <p>"Analyzing your code..."</p>
            </div>
        }
        .into_any(),
        AnalysisPhase::Results(report) => view! { <ReportPanel report=*report /> }.into_any(),
    };

    view! {
        <div class="page reviewer-page">
            <section class="input-panel" on:keydown=on_keydown>
                <LanguagePicker on_select=on_select />

                <div class="editor-wrapper">
                    <textarea
                        id="code-input"
                        node_ref=textarea
                        placeholder="Paste your code here..."
                        spellcheck="false"
                        on:input=move |e| on_input(event_target_value(&e))
                    ></textarea>
                </div>
                <div class="detection-row">{detection}</div>

                <div class="action-row">
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=is_loading
                        on:click=move |_| analyze()
                    >
                        {move || if is_loading() { "Analyzing..." } else { "Analyze" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn-outline-secondary"
                        disabled=is_loading
                        on:click=clear
                    >
                        "Clear"
                    </button>
                    <span class="shortcut-hint">"Ctrl+Enter"</span>
                </div>
            </section>

            <section class="results-panel">{results}</section>
        </div>
    }
}
