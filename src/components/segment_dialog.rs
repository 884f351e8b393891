use dioxus::prelude::*;
use std::sync::Arc;

use crate::components::common::{input_style, FieldLabel};
use crate::constants::*;
use crate::core::i18n::Translator;
use crate::state::{EditorSession, Organisation, SegmentDraft};
use crate::utils::parse_bounded_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentDialogMode {
    Add,
    Edit(usize),
}

/// Add/edit form for one segment. Mounted fresh every time it opens.
#[component]
pub fn SegmentDialog(
    mode: SegmentDialogMode,
    session: Signal<Option<EditorSession>>,
    labels: Signal<Arc<Translator>>,
    on_close: EventHandler<()>,
) -> Element {
    // Prefill and cap are fixed for the lifetime of the dialog.
    let (initial, max_duration) = use_hook(|| {
        let guard = session.peek();
        let Some(current) = guard.as_ref() else {
            return (SegmentDraft::default(), 0);
        };
        match mode {
            SegmentDialogMode::Add => (
                SegmentDraft::new("", current.default_new_duration()),
                current.timeline.remaining_minutes(),
            ),
            SegmentDialogMode::Edit(index) => {
                let draft = current
                    .timeline
                    .get(index)
                    .map(SegmentDraft::from_segment)
                    .unwrap_or_default();
                let max = current.timeline.max_duration_for(index).unwrap_or(0);
                (draft, max)
            }
        }
    });

    let mut name = use_signal(|| initial.name.clone());
    let mut duration_text = use_signal(|| initial.duration.max(1).to_string());
    let mut organisation = use_signal(|| initial.organisation);
    let mut explanation = use_signal(|| initial.explanation.clone());
    let mut tools = use_signal(|| initial.tools.clone());
    let mut error = use_signal(|| None::<String>);

    let tr = |key: &str| labels.read().tr(key);
    let title = match mode {
        SegmentDialogMode::Add => tr("dialog_add_title"),
        SegmentDialogMode::Edit(_) => tr("dialog_edit_title"),
    };
    let duration_hint = labels
        .read()
        .tr_with("field_duration_hint", &[("max", max_duration.to_string())]);
    let field_style = input_style();
    let selected_key = organisation().key();
    let organisation_options: Vec<(&'static str, String)> = Organisation::ALL
        .iter()
        .map(|option| (option.key(), tr(option.label_key())))
        .collect();
    let name_label = tr("field_name");
    let duration_label = tr("field_duration");
    let organisation_label = tr("field_organisation");
    let explanation_label = tr("field_explanation");
    let tools_label = tr("field_tools");
    let tools_hint = tr("field_tools_hint");
    let cancel_label = tr("btn_cancel");
    let ok_label = tr("btn_ok");

    let mut submit = move || {
        let Some(duration) = parse_bounded_input(&duration_text(), 1, max_duration) else {
            error.set(Some(labels.read().tr_with(
                "error_out_of_range",
                &[("min", "1".to_string()), ("max", max_duration.to_string())],
            )));
            return;
        };
        let draft = SegmentDraft::new(name(), duration)
            .with_organisation(organisation())
            .with_explanation(explanation())
            .with_tools(tools());
        let result = match session.write().as_mut() {
            Some(current) => match mode {
                SegmentDialogMode::Add => current.add_segment(draft),
                SegmentDialogMode::Edit(index) => current.edit_segment(index, draft),
            },
            None => return,
        };
        match result {
            Ok(()) => on_close.call(()),
            Err(err) => {
                log::warn!("segment rejected: {}", err);
                error.set(Some(
                    labels
                        .read()
                        .tr_with("error_invalid_section", &[("error", err.to_string())]),
                ));
            }
        }
    };

    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.35);
                display: flex; align-items: center; justify-content: center;
                z-index: 2000;
            ",
            onclick: move |_| on_close.call(()),
            div {
                style: "
                    width: 420px; background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.2);
                    display: flex; flex-direction: column; gap: 14px;
                ",
                onclick: move |e| e.stop_propagation(),
                onkeydown: move |e: KeyboardEvent| {
                    e.stop_propagation();
                    if e.key() == Key::Escape {
                        on_close.call(());
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
                    FieldLabel { text: duration_label, hint: duration_hint }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{max_duration}",
                        step: "1",
                        value: "{duration_text}",
                        style: "{field_style}",
                        oninput: move |e| duration_text.set(e.value()),
                    }
                }
                div {
                    FieldLabel { text: organisation_label }
                    select {
                        style: "{field_style}",
                        value: "{selected_key}",
                        onchange: move |e| {
                            if let Some(parsed) = Organisation::parse(&e.value()) {
                                organisation.set(parsed);
                            }
                        },
                        for (key, label) in organisation_options {
                            option {
                                value: "{key}",
                                selected: key == selected_key,
                                "{label}"
                            }
                        }
                    }
                }
                div {
                    FieldLabel { text: explanation_label }
                    textarea {
                        rows: "3",
                        value: "{explanation}",
                        style: "{field_style} resize: vertical;",
                        oninput: move |e| explanation.set(e.value()),
                    }
                }
                div {
                    FieldLabel { text: tools_label, hint: tools_hint }
                    input {
                        r#type: "text",
                        value: "{tools}",
                        style: "{field_style}",
                        oninput: move |e| tools.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                submit();
                            }
                        },
                    }
                }

                if let Some(message) = error() {
                    div { style: "font-size: 12px; color: {TEXT_DANGER};", "{message}" }
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "padding: 6px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; cursor: pointer;",
                        onclick: move |_| on_close.call(()),
                        "{cancel_label}"
                    }
                    button {
                        style: "padding: 6px 14px; background: {ACCENT_PRIMARY}; border: none; border-radius: 4px; color: white; cursor: pointer;",
                        onclick: move |_| submit(),
                        "{ok_label}"
                    }
                }
            }
        }
    }
}
