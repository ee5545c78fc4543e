//! Venture Dashboard Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod store;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(error) = dashboard_logger::init_logger("venture-dashboard", "info") {
        web_sys::console::warn_1(&JsValue::from_str(&error.to_string()));
    }
    mount_to_body(App);
}
