//! Page Configuration
//!
//! The hosting page injects the editor configuration either as
//! `window.NEXUSGRID_LAYOUT` or as a JSON `<script id="layout-config">`.

use layout_core::EditorConfig;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "NEXUSGRID_LAYOUT";
const CONFIG_ELEMENT_ID: &str = "layout-config";

/// Read the injected configuration; Ok(None) when the page provides none
pub fn read_config() -> Result<Option<EditorConfig>, String> {
    let window = web_sys::window().ok_or("no window")?;

    let injected = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| format!("{:?}", e))?;
    if !injected.is_undefined() && !injected.is_null() {
        let config: EditorConfig =
            serde_wasm_bindgen::from_value(injected).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        return Ok(Some(config));
    }

    let text = window
        .document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match text {
        Some(json) if !json.trim().is_empty() => EditorConfig::from_json(&json)
            .map(Some)
            .map_err(|e| e.to_string()),
        _ => Ok(None),
    }
}
