use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{AnalysisService, HealthInfo, HttpAnalysisService, ServiceConfig};
use crate::components::status_badge::{CheckStatus, StatusBadge};
use crate::config::AppConfig;

#[component]
pub fn HealthPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let api_base = StoredValue::new(config.api_base_url.clone());

    let (checking, set_checking) = signal(false);
    let (health, set_health) = signal::<Option<HealthInfo>>(None);
    let (service_config, set_service_config) = signal::<Option<ServiceConfig>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let do_health_check = move || {
        set_checking.set(true);
        set_error.set(None);
        spawn_local(async move {
            let service = HttpAnalysisService::new(api_base.get_value());
            match service.health().await {
                Ok(info) => set_health.set(Some(info)),
                Err(e) => {
                    set_health.set(None);
                    set_error.set(Some(format!("Service unreachable: {}", e)));
                }
            }
            // /config is optional detail; a failure only hides that block
            set_service_config.set(service.config().await.ok());
            set_checking.set(false);
        });
    };

    // Auto-run on mount
    Effect::new(move |_| {
        do_health_check();
    });

    view! {
        <div class="page health-page">
            <h2>"Service Health"</h2>
            <p class="page-description">
                "Analysis service at " <code>{api_base.get_value()}</code>
            </p>

            <button
                class="btn btn-primary"
                on:click=move |_| do_health_check()
                disabled=move || checking.get()
            >
                {move || if checking.get() { "Checking..." } else { "Check again" }}
            </button>

            {move || {
                error.get().map(|e| {
                    view! {
                        <div class="health-error">
                            <StatusBadge label="Service" status=CheckStatus::Down detail=e />
                        </div>
                    }
                })
            }}

            {move || health.get().map(|h| {
                let key_status = if h.is_configured() { CheckStatus::Ok } else { CheckStatus::Warn };
                let service_status = match h.status.as_deref() {
                    Some("healthy") | Some("ok") | None => CheckStatus::Ok,
                    Some(_) => CheckStatus::Warn,
                };
                let service_detail = match (&h.service, &h.status) {
                    (Some(name), Some(status)) => format!("{} ({})", name, status),
                    (Some(name), None) => name.clone(),
                    (None, Some(status)) => status.clone(),
                    (None, None) => "Reachable".to_string(),
                };

                view! {
                    <div class="health-results">
                        <StatusBadge label="Service" status=service_status detail=service_detail />
                        <StatusBadge label="Version" status=CheckStatus::Ok detail=h.version.clone() />
                        <StatusBadge label="Engine" status=CheckStatus::Ok detail=h.engine.clone() />
                        <StatusBadge label="Model" status=CheckStatus::Ok detail=h.model.clone() />
                        <StatusBadge label="API key" status=key_status detail=h.api_status.clone() />
                    </div>
                }
            })}

            {move || service_config.get().map(|c| {
                let temperature = c.temperature.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string());
                let max_tokens = c.max_tokens.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string());
                let languages = c.supported_languages.join(", ");

                view! {
                    <div class="service-config">
                        <h3>"Service configuration"</h3>
                        <dl class="config-list">
                            <dt>"Model"</dt><dd>{c.model.clone()}</dd>
                            <dt>"Temperature"</dt><dd>{temperature}</dd>
                            <dt>"Max tokens"</dt><dd>{max_tokens}</dd>
                            <dt>"API configured"</dt>
                            <dd>{if c.api_configured { "Yes" } else { "No" }}</dd>
                            <dt>"Supported languages"</dt><dd>{languages}</dd>
                        </dl>
                    </div>
                }
            })}
        </div>
    }
}
