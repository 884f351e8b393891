use dioxus::prelude::*;

use crate::constants::*;
use crate::core::geometry::Rect;
use crate::core::reorder::{CursorHint, PointerButton, PressOutcome};
use crate::core::render::DrawCommand;
use crate::state::EditorSession;

/// Map the webview's button to the engine's button identity.
fn pointer_button(button: impl std::fmt::Debug) -> PointerButton {
    match format!("{:?}", button).as_str() {
        "Primary" => PointerButton::Primary,
        "Secondary" => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

/// Convert a client position into widget coordinates.
fn widget_point(origin: (f64, f64), client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x - origin.0, client_y - origin.1)
}

/// The proportional timeline bar.
///
/// Paints the session's draw list with absolutely positioned divs and routes
/// pointer input back into the session. A transparent overlay on top
/// receives presses, so `element_coordinates` are widget coordinates. Once a
/// drag starts, a window-wide overlay takes over and positions are derived
/// from client coordinates minus the widget origin.
#[component]
pub fn BarWidget(
    session: Signal<Option<EditorSession>>,
    context_menu: Signal<Option<(f64, f64, usize)>>,
) -> Element {
    let mut cursor = use_signal(|| CursorHint::Default);
    // Client position of the widget's top-left corner, taken at press time.
    let mut origin = use_signal(|| (0.0, 0.0));

    let snapshot = session
        .read()
        .as_ref()
        .map(|s| (s.widget_size(), s.draw_commands(), s.engine().is_dragging()));
    let Some(((width, height), commands, dragging)) = snapshot else {
        return rsx! {};
    };
    let cursor_css = cursor().css();

    rsx! {
        div {
            style: "
                position: relative; flex-shrink: 0;
                width: {width}px; height: {height}px;
                overflow: hidden; border-radius: 8px;
                border: 1px solid {BORDER_SUBTLE};
                user-select: none;
            ",
            for command in commands.iter() {
                {draw_element(command)}
            }

            // Input overlay
            div {
                style: "position: absolute; inset: 0; cursor: {cursor_css};",
                onmousedown: move |e| {
                    let Some(button) = e.trigger_button().map(pointer_button) else {
                        return;
                    };
                    let point = e.element_coordinates();
                    let outcome = match session.write().as_mut() {
                        Some(s) => s.pointer_down(button, point.x, point.y),
                        None => return,
                    };
                    match outcome {
                        PressOutcome::DragStarted(_) => {
                            e.prevent_default();
                            let client = e.client_coordinates();
                            origin.set((client.x - point.x, client.y - point.y));
                            cursor.set(CursorHint::ClosedHand);
                        }
                        PressOutcome::ContextMenu(index) => {
                            let client = e.client_coordinates();
                            context_menu.set(Some((client.x, client.y, index)));
                        }
                        PressOutcome::Ignored => {}
                    }
                },
                onmousemove: move |e| {
                    let point = e.element_coordinates();
                    let hint = session
                        .peek()
                        .as_ref()
                        .map(|s| s.cursor(point.x, point.y))
                        .unwrap_or(CursorHint::Default);
                    if hint != cursor() {
                        cursor.set(hint);
                    }
                },
                oncontextmenu: move |e| e.prevent_default(),
            }

            // Global drag overlay: keeps receiving the pointer after it
            // leaves the bar, so a release anywhere resolves the drop.
            if dragging {
                div {
                    style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 9999; cursor: grabbing;",
                    oncontextmenu: move |e| e.prevent_default(),
                    onmousemove: move |e| {
                        e.prevent_default();
                        let client = e.client_coordinates();
                        let (x, y) = widget_point(origin(), client.x, client.y);
                        if let Some(s) = session.write().as_mut() {
                            s.pointer_move(x, y);
                        }
                    },
                    onmouseup: move |e| {
                        let Some(button) = e.trigger_button().map(pointer_button) else {
                            return;
                        };
                        e.stop_propagation();
                        let client = e.client_coordinates();
                        let (x, y) = widget_point(origin(), client.x, client.y);
                        if let Some(s) = session.write().as_mut() {
                            s.pointer_up(button, x);
                            cursor.set(s.cursor(x, y));
                        }
                    },
                }
            }
        }
    }
}

fn draw_element(command: &DrawCommand) -> Element {
    match command {
        DrawCommand::Fill { rect, color } => {
            let Rect { x, y, width, height } = *rect;
            let bg = color.to_css();
            rsx! {
                div {
                    style: "
                        position: absolute; pointer-events: none;
                        left: {x}px; top: {y}px;
                        width: {width}px; height: {height}px;
                        background-color: {bg};
                    ",
                }
            }
        }
        DrawCommand::RoundedRect {
            rect,
            radius,
            fill,
            stroke,
        } => {
            let Rect { x, y, width, height } = *rect;
            let bg = fill.to_css();
            let border = match stroke {
                Some(stroke) => format!(
                    "{}px {} {}",
                    stroke.width,
                    if stroke.dashed { "dashed" } else { "solid" },
                    stroke.color.to_css()
                ),
                None => "none".to_string(),
            };
            rsx! {
                div {
                    style: "
                        position: absolute; pointer-events: none; box-sizing: border-box;
                        left: {x}px; top: {y}px;
                        width: {width}px; height: {height}px;
                        border-radius: {radius}px;
                        background-color: {bg};
                        border: {border};
                    ",
                }
            }
        }
        DrawCommand::GuideLine { x, y1, y2, color } => {
            let line = color.to_css();
            let length = (y2 - y1).max(0.0);
            rsx! {
                div {
                    style: "
                        position: absolute; pointer-events: none;
                        left: {x}px; top: {y1}px;
                        width: 0; height: {length}px;
                        border-left: 1px dashed {line};
                    ",
                }
            }
        }
        DrawCommand::Label {
            rect,
            text,
            color,
            size_pt,
        } => {
            let Rect { x, y, width, height } = *rect;
            let fg = color.to_css();
            rsx! {
                div {
                    style: "
                        position: absolute; pointer-events: none;
                        left: {x}px; top: {y}px;
                        width: {width}px; height: {height}px;
                        display: flex; align-items: center; justify-content: center;
                        font-size: {size_pt}pt; color: {fg};
                        white-space: nowrap; overflow: hidden; text-overflow: ellipsis;
                    ",
                    "{text}"
                }
            }
        }
    }
}
