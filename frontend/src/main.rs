use crate::app::{App, AppProps};
use crate::config::AppConfig;

mod api;
mod app;
mod components;
mod config;
mod fixtures;
mod logger;
mod tops_sheet;

fn main() {
    let config = AppConfig::from_env();
    logger::init(config.log_level);
    log::info!("alumni admin starting against {}", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
