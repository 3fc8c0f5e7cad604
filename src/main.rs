mod api;
mod app;
mod charts;
mod components;
mod config;
mod controller;
mod form;
mod logging;
mod models;
mod notify;
mod pages;
mod render;
mod state;

use app::App;
use config::ApiConfig;
use leptos::prelude::*;

fn main() {
    let loaded = ApiConfig::load();
    let filter = loaded
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.to_string());
    logging::init(&filter);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default configuration");
        ApiConfig::default()
    });
    tracing::info!(base_url = %config.base_url, "starting dashboard");

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
