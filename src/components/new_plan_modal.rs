use dioxus::prelude::*;
use std::sync::Arc;

use crate::components::common::{input_style, FieldLabel};
use crate::constants::*;
use crate::core::i18n::Translator;
use crate::utils::parse_bounded_input;

/// Name and total duration for a fresh plan.
///
/// Without a plan open the modal cannot be dismissed.
#[component]
pub fn NewPlanModal(
    labels: Signal<Arc<Translator>>,
    can_cancel: bool,
    on_create: EventHandler<(String, u32)>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(|| labels.peek().tr("default_plan_name"));
    let mut total_text = use_signal(|| DEFAULT_TOTAL_MINUTES.to_string());
    let mut error = use_signal(|| None::<String>);

    let tr = |key: &str| labels.read().tr(key);
    let title = tr("new_plan_title");
    let name_label = tr("field_plan_name");
    let total_label = tr("field_total_minutes");
    let total_hint = labels.read().tr_with(
        "field_total_hint",
        &[
            ("min", MIN_TOTAL_MINUTES.to_string()),
            ("max", MAX_TOTAL_MINUTES.to_string()),
        ],
    );
    let cancel_label = tr("btn_cancel");
    let create_label = tr("btn_create");
    let field_style = input_style();

    let mut create = move || {
        let entered = name();
        let plan_name = if entered.trim().is_empty() {
            labels.peek().tr("default_plan_name")
        } else {
            entered.trim().to_string()
        };
        let Some(total) = parse_bounded_input(&total_text(), MIN_TOTAL_MINUTES, MAX_TOTAL_MINUTES) else {
            error.set(Some(labels.peek().tr_with(
                "error_out_of_range",
                &[
                    ("min", MIN_TOTAL_MINUTES.to_string()),
                    ("max", MAX_TOTAL_MINUTES.to_string()),
                ],
            )));
            return;
        };
        on_create.call((plan_name, total));
    };

    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.35);
                display: flex; align-items: center; justify-content: center;
                z-index: 2000;
            ",
            onclick: move |_| {
                if can_cancel {
                    on_cancel.call(());
                }
            },
            div {
                style: "
                    width: 380px; background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.2);
                    display: flex; flex-direction: column; gap: 14px;
                ",
                onclick: move |e| e.stop_propagation(),
                onkeydown: move |e: KeyboardEvent| {
                    e.stop_propagation();
                    match e.key() {
                        Key::Enter => create(),
                        Key::Escape if can_cancel => on_cancel.call(()),
                        _ => {}
                    }
                },

                h3 { style: "margin: 0; font-size: 16px; color: {TEXT_TITLE};", "{title}" }
                div {
                    FieldLabel { text: name_label }
                    input {
                        r#type: "text",
                        autofocus: true,
                        value: "{name}",
                        style: "{field_style}",
                        oninput: move |e| name.set(e.value()),
                    }
                }
                div {
                    FieldLabel { text: total_label, hint: total_hint }
                    input {
                        r#type: "number",
                        min: "{MIN_TOTAL_MINUTES}",
                        max: "{MAX_TOTAL_MINUTES}",
                        step: "5",
                        value: "{total_text}",
                        style: "{field_style}",
                        oninput: move |e| total_text.set(e.value()),
                    }
                }
                if let Some(message) = error() {
                    div { style: "font-size: 12px; color: {TEXT_DANGER};", "{message}" }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    if can_cancel {
                        button {
                            style: "padding: 6px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; cursor: pointer;",
                            onclick: move |_| on_cancel.call(()),
                            "{cancel_label}"
                        }
                    }
                    button {
                        style: "padding: 6px 14px; background: {ACCENT_PRIMARY}; border: none; border-radius: 4px; color: white; cursor: pointer;",
                        onclick: move |_| create(),
                        "{create_label}"
                    }
                }
            }
        }
    }
}
