use leptos::prelude::*;

use crate::state::ReviewState;

#[component]
pub fn Navbar() -> impl IntoView {
    let review = expect_context::<RwSignal<ReviewState>>();

    // Mirrors the gauge of the last successful analysis
    let mini_score = move || {
        review.with(|state| state.report().map(|report| report.score)).map(|score| {
            view! {
                <span
                    class=format!("mini-score {}", score.band.color_class())
                    title=score.band.label()
                >
                    {score.value}
                </span>
            }
        })
    };

    view! {
        <nav class="navbar">
            <div class="navbar-brand">
                <h1 class="navbar-title">"Eco-Code Reviewer"</h1>
                <p class="navbar-subtitle">"Energy-aware code review"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Reviewer"</a>
                </li>
                <li class="nav-item">
                    <a href="/health" class="nav-link">"Service Health"</a>
                </li>
            </ul>
            {mini_score}
        </nav>
    }
}
