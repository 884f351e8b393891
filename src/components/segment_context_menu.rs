use dioxus::prelude::*;
use std::sync::Arc;

use crate::constants::*;
use crate::core::i18n::Translator;
use crate::state::EditorSession;

/// Edit/delete menu for the segment under a right-click.
#[component]
pub fn SegmentContextMenu(
    context_menu: Signal<Option<(f64, f64, usize)>>,
    session: Signal<Option<EditorSession>>,
    labels: Signal<Arc<Translator>>,
    on_edit: EventHandler<usize>,
    on_delete: EventHandler<usize>,
) -> Element {
    let Some((x, y, index)) = context_menu() else {
        return rsx! {};
    };
    let segment_name = session
        .read()
        .as_ref()
        .and_then(|s| s.timeline.get(index).map(|segment| segment.name.clone()));
    let Some(segment_name) = segment_name else {
        return rsx! {};
    };
    let edit_label = labels.read().tr("menu_edit");
    let delete_label = labels.read().tr("menu_delete");

    rsx! {
        // Backdrop to catch clicks outside menu
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                z-index: 999;
            ",
            onclick: move |_| context_menu.set(None),
            oncontextmenu: move |e| {
                e.prevent_default();
                context_menu.set(None);
            },
        }
        div {
            style: "
                position: fixed;
                left: min({x}px, calc(100vw - 180px));
                top: min({y}px, calc(100vh - 100px));
                background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};
                border-radius: 6px; padding: 4px 0; min-width: 160px;
                box-shadow: 0 4px 12px rgba(0,0,0,0.15);
                z-index: 1000; font-size: 12px;
            ",
            div {
                style: "
                    padding: 4px 12px 6px; color: {TEXT_MUTED}; font-size: 11px;
                    white-space: nowrap; overflow: hidden; text-overflow: ellipsis; max-width: 220px;
                ",
                "{segment_name}"
            }
            div {
                class: "menu-item",
                style: "padding: 6px 12px; color: {TEXT_PRIMARY}; cursor: pointer;",
                onclick: move |_| {
                    context_menu.set(None);
                    on_edit.call(index);
                },
                "✎ {edit_label}"
            }
            div {
                style: "height: 1px; background-color: {BORDER_SUBTLE}; margin: 2px 0;",
            }
            div {
                class: "menu-item",
                style: "padding: 6px 12px; color: {TEXT_DANGER}; cursor: pointer;",
                onclick: move |_| {
                    context_menu.set(None);
                    on_delete.call(index);
                },
                "🗑 {delete_label}"
            }
        }
    }
}
