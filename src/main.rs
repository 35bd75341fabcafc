//! YouKanBan Frontend Entry Point

mod config;
mod session_storage;
mod routes;
mod store;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger(config::APP_NAME, config::LOG_CAPACITY) {
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&e));
    }
    let _ = rolling_logger::info(&format!("{} started", config::APP_NAME));
    mount_to_body(App);
}
