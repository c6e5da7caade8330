use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::{AnalysisService, HttpAnalysisService};
use crate::components::navbar::Navbar;
use crate::components::report_panel::UsageIndicator;
use crate::components::toast::{ToastHost, ToastKind, Toasts};
use crate::config::AppConfig;
use crate::pages::health::HealthPage;
use crate::pages::reviewer::ReviewerPage;
use crate::state::ReviewState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let toasts = Toasts::new(config.toast_duration);
    provide_context(toasts);
    provide_context(RwSignal::new(ReviewState::new()));

    let api_base = config.api_base_url.clone();
    provide_context(config);

    // One health probe at load; only a missing API key is worth a toast
    Effect::new(move |_| {
        let service = HttpAnalysisService::new(api_base.clone());
        spawn_local(async move {
            match service.health().await {
                Ok(health) => {
                    info!(
                        "Service connected: version={}, engine={}, model={}, api_status={}",
                        health.version, health.engine, health.model, health.api_status
                    );
                    if !health.is_configured() {
                        warn!("Analysis service has no API key configured");
                        toasts.show(
                            "The analysis service has no API key configured.",
                            ToastKind::Warning,
                        );
                    }
                }
                Err(e) => warn!("Service did not answer the health check: {}", e),
            }
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=ReviewerPage />
                        <Route path=path!("/health") view=HealthPage />
                    </Routes>
                </main>
                <footer class="app-footer">
                    <span class="footer-brand">"Eco-Code Reviewer"</span>
                    <UsageIndicator />
                </footer>
                <ToastHost />
            </div>
        </Router>
    }
}
