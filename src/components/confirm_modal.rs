use dioxus::prelude::*;

use crate::constants::*;

/// Yes/cancel prompt for destructive actions.
#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    confirm_label: String,
    cancel_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.35);
                display: flex; align-items: center; justify-content: center;
                z-index: 2100;
            ",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "
                    width: 360px; background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.2);
                ",
                onclick: move |e| e.stop_propagation(),
                h3 { style: "margin: 0 0 10px 0; font-size: 16px; color: {TEXT_TITLE};", "{title}" }
                p { style: "margin: 0 0 20px 0; font-size: 13px; color: {TEXT_SECONDARY};", "{message}" }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "padding: 6px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "{cancel_label}"
                    }
                    button {
                        style: "padding: 6px 14px; background: {TEXT_DANGER}; border: none; border-radius: 4px; color: white; cursor: pointer;",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
