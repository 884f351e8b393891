//! Time Planner
//!
//! A desktop planner for laying out timed training sessions on a
//! proportional, drag-to-reorder timeline.

mod app;
mod components;
mod constants;
mod core;
mod hotkeys;
mod state;
mod utils;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("starting Time Planner {}", env!("CARGO_PKG_VERSION"));

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Time Planner")
                .with_inner_size(LogicalSize::new(1400.0, 640.0))
                .with_min_inner_size(LogicalSize::new(
                    constants::BAR_WIDGET_BASE_WIDTH * constants::ZOOM_MIN + 80.0,
                    constants::BAR_WIDGET_BASE_HEIGHT + 200.0,
                ))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
