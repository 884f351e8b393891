use dioxus::prelude::*;
use crate::constants::*;

/// Last thing worth telling the user.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Warning(text) => text,
        }
    }
}

#[component]
pub fn StatusBar(status: Signal<StatusMessage>, segment_count: usize, zoom: f64) -> Element {
    let message = status();
    let color = match message {
        StatusMessage::Info(_) => TEXT_MUTED,
        StatusMessage::Warning(_) => TEXT_DANGER,
    };
    let text = message.text().to_string();
    let zoom_percent = (zoom * 100.0).round() as i64;
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 24px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_MUTED};",
            span { style: "color: {color}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;", "{text}" }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "# {segment_count}" }
                span { "{zoom_percent}%" }
            }
        }
    }
}
