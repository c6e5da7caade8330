//! Browser front-end for the Eco-Code Reviewer analysis service.
//!
//! The page sniffs the language of pasted code, submits it to the service,
//! and renders the returned report. Everything below `report`, `sniffer` and
//! `state` is pure and tested natively; the rest talks to the DOM.

pub mod api;
pub mod app;
pub mod bindings;
pub mod components;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod language;
pub mod logging;
pub mod pages;
pub mod report;
pub mod review;
pub mod sniffer;
pub mod state;

use leptos::prelude::*;

use app::App;
use config::AppConfig;

pub fn run() {
    let config = AppConfig::load();
    logging::init(&config.log_level);
    tracing::info!("Eco-Code Reviewer starting, service at {}", config.api_base_url);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
