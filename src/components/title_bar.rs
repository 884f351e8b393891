use dioxus::prelude::*;
use std::sync::Arc;

use crate::constants::*;
use crate::core::i18n::{language_display_name, Translator};

#[component]
pub fn TitleBar(
    plan_name: String,
    labels: Signal<Arc<Translator>>,
    on_new_plan: EventHandler<MouseEvent>,
    on_language: EventHandler<String>,
) -> Element {
    let (app_title, new_plan_label, language_label, current, languages) = {
        let labels = labels.read();
        (
            labels.tr("app_title"),
            labels.tr("btn_new_plan"),
            labels.tr("field_language"),
            labels.language().to_string(),
            labels.available_languages(),
        )
    };

    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_TITLE};", "{app_title}" }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_new_plan.call(e),
                    "{new_plan_label}"
                }
            }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "{plan_name}" }
            div {
                style: "display: flex; align-items: center; gap: 6px; min-width: 220px; justify-content: flex-end;",
                span {
                    style: "font-size: 10px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.6px;",
                    "{language_label}"
                }
                select {
                    style: "
                        background: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};
                        color: {TEXT_PRIMARY}; font-size: 11px; padding: 3px 8px; border-radius: 999px;
                    ",
                    value: "{current}",
                    onchange: move |e| on_language.call(e.value()),
                    for code in languages {
                        option {
                            value: "{code}",
                            selected: code == current,
                            "{language_display_name(&code)}"
                        }
                    }
                }
            }
        }
    }
}
