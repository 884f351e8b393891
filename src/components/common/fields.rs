use dioxus::prelude::*;
use crate::constants::*;
use crate::utils::parse_u32_input;

/// Whole-number input that commits on blur or Enter, clamped to `min..=max`.
#[component]
pub fn IntegerField(
    label: String,
    value: u32,
    min: u32,
    max: u32,
    on_commit: EventHandler<u32>,
) -> Element {
    let mut text = use_signal(|| value.to_string());
    let mut last_prop_value = use_signal(|| value);

    use_effect(move || {
        let v = value;
        if v != last_prop_value() {
            text.set(v.to_string());
            last_prop_value.set(v);
        }
    });

    let make_commit = || {
        let mut text = text.clone();
        let mut last_prop_value = last_prop_value.clone();
        let on_commit = on_commit.clone();
        move || {
            let parsed = parse_u32_input(&text(), value).clamp(min, max.max(min));
            on_commit.call(parsed);
            text.set(parsed.to_string());
            last_prop_value.set(parsed);
        }
    };

    let mut commit_on_blur = make_commit();
    let mut commit_on_key = make_commit();

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 6px;",
            span { style: "font-size: 11px; color: {TEXT_MUTED};", "{label}" }
            input {
                r#type: "number",
                min: "{min}",
                max: "{max}",
                step: "1",
                value: "{text()}",
                style: "
                    width: 64px; box-sizing: border-box;
                    padding: 4px 6px; font-size: 12px;
                    background-color: {BG_ELEVATED}; color: {TEXT_PRIMARY};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    outline: none;
                    user-select: text;
                ",
                oninput: move |e| text.set(e.value()),
                onblur: move |_| commit_on_blur(),
                onkeydown: move |e: KeyboardEvent| {
                    e.stop_propagation();
                    if e.key() == Key::Enter {
                        commit_on_key();
                    }
                },
            }
        }
    }
}

/// Caption above a dialog input.
#[component]
pub fn FieldLabel(text: String, hint: Option<String>) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 4px;",
            span { style: "font-size: 11px; font-weight: 600; color: {TEXT_SECONDARY};", "{text}" }
            if let Some(hint) = hint {
                span { style: "font-size: 10px; color: {TEXT_MUTED};", "{hint}" }
            }
        }
    }
}

/// Shared look for dialog inputs, selects and textareas.
pub fn input_style() -> String {
    format!(
        "width: 100%; box-sizing: border-box; padding: 6px 8px; font-size: 12px; \
         background-color: {BG_ELEVATED}; color: {TEXT_PRIMARY}; \
         border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; outline: none; user-select: text;"
    )
}
