//! NexusGrid Layout Editor Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod dom;
mod store;

use app::App;
use layout_core::EditorConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match config::read_config() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (EditorConfig::default(), Some(e)),
    };
    if let Err(e) = console_logger::init_logger("NexusGrid Layout", &config.log_level) {
        web_sys::console::error_1(&e.to_string().into());
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring invalid page configuration");
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
