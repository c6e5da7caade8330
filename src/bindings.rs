//! JavaScript globals the host page loads: CodeMirror 5, Prism and the
//! async clipboard.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// A CodeMirror 5 editor instance.
    #[derive(Debug, Clone)]
    pub type CodeMirror;

    #[wasm_bindgen(catch, static_method_of = CodeMirror, js_name = fromTextArea)]
    pub fn from_text_area(
        textarea: &web_sys::HtmlTextAreaElement,
        options: &JsValue,
    ) -> Result<CodeMirror, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    pub fn get_value(this: &CodeMirror) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    pub fn set_value(this: &CodeMirror, value: &str);

    #[wasm_bindgen(method, js_name = setOption)]
    pub fn set_option(this: &CodeMirror, option: &str, value: &JsValue);

    #[wasm_bindgen(method)]
    pub fn refresh(this: &CodeMirror);

    #[wasm_bindgen(method)]
    pub fn on(this: &CodeMirror, event: &str, handler: &js_sys::Function);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Prism, js_name = highlightElement)]
    fn prism_highlight_element(element: &web_sys::Element) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    async fn clipboard_write_text(text: &str) -> Result<JsValue, JsValue>;
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

/// Colorize an element that already holds plain text.
pub fn highlight_element(element: &web_sys::Element) -> Result<(), String> {
    prism_highlight_element(element).map_err(|e| describe(&e))
}

pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    clipboard_write_text(text)
        .await
        .map(|_| ())
        .map_err(|e| describe(&e))
}
