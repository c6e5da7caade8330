//! Transient notifications. One toast is visible at a time; a new one
//! replaces the old.

use leptos::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Danger,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "alert alert-info custom-toast",
            ToastKind::Success => "alert alert-success custom-toast",
            ToastKind::Warning => "alert alert-warning custom-toast",
            ToastKind::Danger => "alert alert-danger custom-toast",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// Toast controller, shared through context.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Toast>>,
    next_id: StoredValue<u64>,
    default_duration: StoredValue<Duration>,
}

impl Toasts {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
            default_duration: StoredValue::new(default_duration),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        self.show_for(message, kind, self.default_duration.get_value());
    }

    pub fn show_for(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Toast {
            id,
            kind,
            message: message.into(),
        }));

        let current = self.current;
        set_timeout(
            move || {
                // a newer toast may have replaced this one
                if current.with_untracked(|t| t.as_ref().map(|t| t.id)) == Some(id) {
                    current.set(None);
                }
            },
            duration,
        );
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    move || {
        toasts.current.get().map(|toast| {
            view! {
                <div class=toast.kind.class() role="alert">
                    <span class="toast-message">{toast.message}</span>
                    <button
                        type="button"
                        class="btn-close"
                        aria-label="Close"
                        on:click=move |_| toasts.dismiss()
                    ></button>
                </div>
            }
        })
    }
}
