pub mod language_picker;
pub mod navbar;
pub mod report_panel;
pub mod status_badge;
pub mod toast;
