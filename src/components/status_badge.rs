use leptos::prelude::*;

/// Outcome of one service check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Down,
}

impl CheckStatus {
    fn icon_and_class(self) -> (&'static str, &'static str) {
        match self {
            CheckStatus::Ok => ("\u{2713}", "status-badge status-ok"),
            CheckStatus::Warn => ("!", "status-badge status-warn"),
            CheckStatus::Down => ("\u{2717}", "status-badge status-down"),
        }
    }
}

/// One row of the service health list.
#[component]
pub fn StatusBadge(
    /// What was checked, e.g. "API key"
    #[prop(into)]
    label: String,
    status: CheckStatus,
    /// Value shown next to the label
    #[prop(optional, into)]
    detail: Option<String>,
) -> impl IntoView {
    let (icon, class) = status.icon_and_class();

    view! {
        <div class="health-item">
            <span class=class>{icon}</span>
            <span class="health-name">{label}</span>
            <span class="health-detail">{detail.unwrap_or_default()}</span>
        </div>
    }
}
