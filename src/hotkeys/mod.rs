//! Hotkey system
//!
//! Keyboard shortcuts for the planner window.
//!
//! - **HotkeyAction**: what a shortcut does
//! - **HotkeyContext**: app state that gates shortcuts
//! - **handle_hotkey()**: maps a key event to an action
//!
//! New shortcuts: add a variant to `HotkeyAction`, bind it in
//! `handle_hotkey()`, then handle it in the App component.

use dioxus::prelude::Key;

/// Semantic actions, decoupled from the keys that trigger them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    ImportSpreadsheet,
    ExportSpreadsheet,
    ExportPng,
    ExportDocument,
    /// Asks for confirmation before clearing the plan
    ResetPlan,
    ZoomIn,
    ZoomOut,
    ToggleMaximize,
    /// Close the topmost menu or dialog
    Dismiss,
}

#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a plan is open (plan-level shortcuts need one)
    pub has_plan: bool,
    /// Whether a dialog or text field has focus (suppresses most hotkeys)
    pub input_focused: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (input focused, no plan)
    Suppressed,
}

pub fn handle_hotkey(
    key: &Key,
    _shift: bool,
    ctrl: bool,
    _alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    // Window-level keys work even while typing.
    match key {
        Key::Escape => return HotkeyResult::Action(HotkeyAction::Dismiss),
        Key::F11 => return HotkeyResult::Action(HotkeyAction::ToggleMaximize),
        _ => {}
    }

    if context.input_focused {
        return HotkeyResult::Suppressed;
    }

    let command = ctrl || meta;
    let action = match key {
        Key::Character(c) if command => match c.to_lowercase().as_str() {
            "i" => HotkeyAction::ImportSpreadsheet,
            "e" => HotkeyAction::ExportSpreadsheet,
            "p" => HotkeyAction::ExportPng,
            "d" => HotkeyAction::ExportDocument,
            "r" => HotkeyAction::ResetPlan,
            // "=" is the unshifted "+" on most layouts
            "+" | "=" => HotkeyAction::ZoomIn,
            "-" => HotkeyAction::ZoomOut,
            _ => return HotkeyResult::NoMatch,
        },
        _ => return HotkeyResult::NoMatch,
    };

    if context.has_plan {
        HotkeyResult::Action(action)
    } else {
        HotkeyResult::Suppressed
    }
}
