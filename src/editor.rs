//! Code editor surface.
//!
//! The page always renders a `<textarea>`. When CodeMirror is available it
//! takes over that textarea; otherwise the plain textarea stays in place.

use serde::Serialize;
use tracing::{error, info};
use wasm_bindgen::prelude::*;

use crate::bindings::CodeMirror;
use crate::language::{LanguageTag, PLAIN_EDITOR_MODE};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorOptions {
    mode: &'static str,
    theme: &'static str,
    line_numbers: bool,
    line_wrapping: bool,
    indent_unit: u8,
    tab_size: u8,
    indent_with_tabs: bool,
    match_brackets: bool,
    auto_close_brackets: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            mode: PLAIN_EDITOR_MODE,
            theme: "material-darker",
            line_numbers: true,
            line_wrapping: true,
            indent_unit: 4,
            tab_size: 4,
            indent_with_tabs: false,
            match_brackets: true,
            auto_close_brackets: true,
        }
    }
}

/// The active editor: CodeMirror, or the bare textarea it failed to enhance.
#[derive(Debug, Clone)]
pub enum Editor {
    Rich(CodeMirror),
    Plain(web_sys::HtmlTextAreaElement),
}

impl Editor {
    /// Enhance `textarea` with CodeMirror. `on_change` receives the full text
    /// after every edit made through CodeMirror; the plain fallback reports
    /// through the textarea's own input event.
    pub fn attach(
        textarea: web_sys::HtmlTextAreaElement,
        on_change: impl Fn(String) + 'static,
    ) -> Self {
        let options = match serde_wasm_bindgen::to_value(&EditorOptions::default()) {
            Ok(options) => options,
            Err(e) => {
                error!("Failed to build editor options: {}", e);
                return Editor::Plain(textarea);
            }
        };

        match CodeMirror::from_text_area(&textarea, &options) {
            Ok(cm) => {
                let handler = Closure::<dyn Fn(CodeMirror)>::new(move |cm: CodeMirror| {
                    on_change(cm.get_value());
                });
                cm.on("change", handler.as_ref().unchecked_ref());
                // lives as long as the page
                handler.forget();
                cm.refresh();
                info!("CodeMirror editor initialized");
                Editor::Rich(cm)
            }
            Err(e) => {
                error!("CodeMirror unavailable, using plain textarea: {:?}", e);
                Editor::Plain(textarea)
            }
        }
    }

    pub fn value(&self) -> String {
        match self {
            Editor::Rich(cm) => cm.get_value(),
            Editor::Plain(textarea) => textarea.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            Editor::Rich(cm) => cm.set_value(value),
            Editor::Plain(textarea) => textarea.set_value(value),
        }
    }

    /// Switch syntax mode; `None` means plain text.
    pub fn set_language(&self, language: Option<LanguageTag>) {
        if let Editor::Rich(cm) = self {
            let mode = language.map_or(PLAIN_EDITOR_MODE, LanguageTag::editor_mode);
            cm.set_option("mode", &JsValue::from_str(mode));
        }
    }
}
