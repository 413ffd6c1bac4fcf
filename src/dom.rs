//! Browser Access
//!
//! Small wrappers over the page: CSRF sources, origin, navigation.

use layout_core::CsrfSources;
use tracing::warn;
use wasm_bindgen::JsCast;

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|win| win.document())
}

/// Collect every place the page may carry a CSRF token
pub fn csrf_sources() -> CsrfSources {
    let Some(doc) = document() else {
        return CsrfSources::default();
    };
    let cookie_header = doc
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|html| html.cookie().ok());
    let form_field = doc
        .query_selector("input[name=csrfmiddlewaretoken]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value());
    let meta_tag = doc
        .query_selector("meta[name=csrf-token]")
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"));
    CsrfSources {
        cookie_header,
        form_field,
        meta_tag,
    }
}

/// Page origin, e.g. `https://grid.example`
pub fn origin() -> String {
    web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .unwrap_or_default()
}

pub fn navigate(href: &str) {
    let Some(win) = web_sys::window() else {
        return;
    };
    if let Err(e) = win.location().set_href(href) {
        warn!(href, error = ?e, "navigation failed");
    }
}
