//! Root application component
//!
//! Owns the open plan and wires the toolbar, hotkeys, dialogs and exports
//! together. Settings and labels are created once here and handed to the
//! session; nothing below this component reaches for global state.

use chrono::Local;
use dioxus::desktop::use_window;
use dioxus::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::components::{
    BarWidget, ConfirmModal, NewPlanModal, PlanCommand, PlanHeader, SegmentContextMenu,
    SegmentDialog, SegmentDialogMode, StatusBar, StatusMessage, TitleBar, Toolbar,
};
use crate::constants::*;
use crate::core::export::document::{default_document_name, fill_template, write_sample_template, DocumentFields};
use crate::core::export::raster::write_png;
use crate::core::export::spreadsheet::{read_spreadsheet, write_spreadsheet};
use crate::core::export::{ExportError, ExportResult};
use crate::core::i18n::Translator;
use crate::core::paths::{default_export_dir, default_template_path, resolve_resource_path, settings_path};
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{AppSettings, EditorSession};
use crate::utils::{sanitize_filename, window_title};

fn save_dialog(filter_name: &str, extension: &str, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_directory(default_export_dir())
        .add_filter(filter_name, &[extension])
        .set_file_name(file_name)
        .save_file()
}

/// Status line for a finished export or import.
fn outcome_status(labels: &Translator, result: ExportResult<String>) -> StatusMessage {
    match result {
        Ok(message) => StatusMessage::Info(message),
        Err(ExportError::TemplateNotFound { path }) => {
            log::warn!("template not found: {}", path.display());
            StatusMessage::Warning(labels.tr_with(
                "error_template_not_found",
                &[("template", path.display().to_string())],
            ))
        }
        Err(ExportError::Import { row, message }) => {
            log::warn!("import failed at row {}: {}", row, message);
            StatusMessage::Warning(labels.tr_with(
                "error_import",
                &[("error", format!("row {}: {}", row, message))],
            ))
        }
        Err(err @ ExportError::Timeline(_)) => {
            log::warn!("import rejected: {}", err);
            StatusMessage::Warning(labels.tr_with("error_import", &[("error", err.to_string())]))
        }
        Err(err) => {
            log::warn!("export failed: {}", err);
            StatusMessage::Warning(labels.tr_with("error_export", &[("error", err.to_string())]))
        }
    }
}

fn saved_message(labels: &Translator, path: &Path) -> String {
    labels.tr_with("status_saved", &[("path", path.display().to_string())])
}

fn template_path(settings: &AppSettings) -> PathBuf {
    settings
        .template_path
        .as_deref()
        .map(resolve_resource_path)
        .unwrap_or_else(default_template_path)
}

#[component]
pub fn App() -> Element {
    let settings = use_signal(|| Arc::new(AppSettings::load_or_default(&settings_path())));
    let mut labels = use_signal(|| Arc::new(Translator::new(&settings.peek().language)));
    let mut session = use_signal(|| None::<EditorSession>);
    let mut status = use_signal(|| StatusMessage::Info(labels.peek().tr("status_ready")));
    let mut show_new_plan = use_signal(|| true);
    let mut dialog = use_signal(|| None::<SegmentDialogMode>);
    let mut context_menu = use_signal(|| None::<(f64, f64, usize)>);
    let mut confirm_reset = use_signal(|| false);
    let desktop = use_window();

    let title_window = desktop.clone();
    use_effect(move || {
        let app_title = labels.read().tr("app_title");
        let title = window_title(&app_title, session.read().as_ref().map(|s| s.plan_name.as_str()));
        title_window.window.set_title(&title);
    });

    let tr = move |key: &str| labels.peek().tr(key);

    let mut run_command = move |command: PlanCommand| {
        let Some((plan_name, remaining)) = session
            .peek()
            .as_ref()
            .map(|s| (s.plan_name.clone(), s.timeline.remaining_minutes()))
        else {
            status.set(StatusMessage::Warning(tr("status_no_plan")));
            return;
        };
        let labels_now = labels.peek().clone();

        match command {
            PlanCommand::AddSegment => {
                if remaining == 0 {
                    status.set(StatusMessage::Warning(tr("status_plan_full")));
                } else {
                    dialog.set(Some(SegmentDialogMode::Add));
                }
            }
            PlanCommand::ZoomIn => {
                if let Some(s) = session.write().as_mut() {
                    s.zoom_in();
                }
            }
            PlanCommand::ZoomOut => {
                if let Some(s) = session.write().as_mut() {
                    s.zoom_out();
                }
            }
            PlanCommand::Reset => confirm_reset.set(true),
            PlanCommand::ImportSpreadsheet => {
                let Some(path) = rfd::FileDialog::new()
                    .set_directory(default_export_dir())
                    .add_filter(tr("filter_spreadsheet"), &["xlsx"])
                    .pick_file()
                else {
                    return;
                };
                let result = read_spreadsheet(&path).and_then(|segments| {
                    let count = segments.len();
                    match session.write().as_mut() {
                        Some(s) => s.replace_segments(segments)?,
                        None => return Ok(String::new()),
                    }
                    log::info!("imported {} segments from {}", count, path.display());
                    Ok(labels_now.tr_with(
                        "status_imported",
                        &[
                            ("count", count.to_string()),
                            ("path", path.display().to_string()),
                        ],
                    ))
                });
                status.set(outcome_status(&labels_now, result));
            }
            PlanCommand::ExportSpreadsheet => {
                let file_name = format!("{}.xlsx", sanitize_filename(&plan_name));
                let Some(path) = save_dialog(&tr("filter_spreadsheet"), "xlsx", &file_name) else {
                    return;
                };
                let result = match session.peek().as_ref() {
                    Some(s) => write_spreadsheet(&path, &s.timeline, s.labels())
                        .map(|()| saved_message(&labels_now, &path)),
                    None => return,
                };
                status.set(outcome_status(&labels_now, result));
            }
            PlanCommand::ExportPng => {
                let file_name = format!("{}.png", sanitize_filename(&plan_name));
                let Some(path) = save_dialog(&tr("filter_image"), "png", &file_name) else {
                    return;
                };
                let result = match session.peek().as_ref() {
                    Some(s) => write_png(&path, s).map(|()| saved_message(&labels_now, &path)),
                    None => return,
                };
                status.set(outcome_status(&labels_now, result));
            }
            PlanCommand::ExportDocument => {
                let settings_now = settings.peek().clone();
                let template = template_path(&settings_now);
                if !template.is_file() {
                    let missing: ExportResult<String> = Err(ExportError::TemplateNotFound { path: template });
                    status.set(outcome_status(&labels_now, missing));
                    return;
                }
                let file_name = default_document_name(
                    &plan_name,
                    &settings_now.trainer_name,
                    Local::now().date_naive(),
                );
                let Some(path) = save_dialog(&tr("filter_document"), "docx", &file_name) else {
                    return;
                };
                let result = match session.peek().as_ref() {
                    Some(s) => fill_template(
                        &template,
                        &path,
                        &DocumentFields::from_session(s),
                        s.timeline.segments(),
                        s.labels(),
                    )
                    .map(|()| saved_message(&labels_now, &path)),
                    None => return,
                };
                status.set(outcome_status(&labels_now, result));
            }
            PlanCommand::SampleTemplate => {
                let Some(path) = save_dialog(&tr("filter_document"), "docx", "training_plan.docx") else {
                    return;
                };
                let result = write_sample_template(&path, &labels_now).map(|written| {
                    labels_now.tr_with(
                        "status_template_created",
                        &[("path", written.display().to_string())],
                    )
                });
                status.set(outcome_status(&labels_now, result));
            }
        }
    };

    let has_plan = session.read().is_some();
    let dragging = session
        .read()
        .as_ref()
        .is_some_and(|s| s.engine().is_dragging());
    let drag_cursor = if dragging { "grabbing" } else { "default" };
    let plan_name = session
        .read()
        .as_ref()
        .map(|s| s.plan_name.clone())
        .unwrap_or_default();
    let plan_full = session
        .read()
        .as_ref()
        .is_some_and(|s| s.timeline.remaining_minutes() == 0);
    let (segment_count, zoom) = session
        .read()
        .as_ref()
        .map(|s| (s.timeline.len(), s.zoom()))
        .unwrap_or((0, 1.0));
    let empty_hint = labels.read().tr("status_no_plan");

    rsx! {
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 8px; height: 8px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 4px; }}
            .collapse-btn {{ opacity: 0.7; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            .tool-btn {{ transition: filter 0.15s ease; }}
            .tool-btn:hover:not(:disabled) {{ filter: brightness(0.95); }}
            .tool-btn:disabled {{ opacity: 0.45; cursor: not-allowed !important; }}
            .menu-item:hover {{ background-color: {BG_HOVER}; }}
            "#
        }

        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
                cursor: {drag_cursor};
            ",
            oncontextmenu: move |e| e.prevent_default(),
            tabindex: "0",
            onkeydown: move |e: KeyboardEvent| {
                let hotkey_context = HotkeyContext {
                    has_plan: session.peek().is_some(),
                    input_focused: show_new_plan() || dialog().is_some() || confirm_reset(),
                };
                let modifiers = e.modifiers();
                let result = handle_hotkey(
                    &e.key(),
                    modifiers.shift(),
                    modifiers.ctrl(),
                    modifiers.alt(),
                    modifiers.meta(),
                    &hotkey_context,
                );
                let HotkeyResult::Action(action) = result else {
                    return;
                };
                e.prevent_default();
                match action {
                    HotkeyAction::ImportSpreadsheet => run_command(PlanCommand::ImportSpreadsheet),
                    HotkeyAction::ExportSpreadsheet => run_command(PlanCommand::ExportSpreadsheet),
                    HotkeyAction::ExportPng => run_command(PlanCommand::ExportPng),
                    HotkeyAction::ExportDocument => run_command(PlanCommand::ExportDocument),
                    HotkeyAction::ResetPlan => run_command(PlanCommand::Reset),
                    HotkeyAction::ZoomIn => run_command(PlanCommand::ZoomIn),
                    HotkeyAction::ZoomOut => run_command(PlanCommand::ZoomOut),
                    HotkeyAction::ToggleMaximize => {
                        let maximized = desktop.window.is_maximized();
                        desktop.window.set_maximized(!maximized);
                    }
                    HotkeyAction::Dismiss => {
                        context_menu.set(None);
                        dialog.set(None);
                        confirm_reset.set(false);
                        if session.peek().is_some() {
                            show_new_plan.set(false);
                        }
                    }
                }
            },

            TitleBar {
                plan_name: plan_name,
                labels: labels,
                on_new_plan: move |_| show_new_plan.set(true),
                on_language: move |code: String| {
                    let mut next = Translator::clone(&labels.peek());
                    next.change_language(&code);
                    let next = Arc::new(next);
                    labels.set(next.clone());
                    if let Some(s) = session.write().as_mut() {
                        s.set_labels(next);
                    }
                    log::info!("language switched to {}", code);
                },
            }

            if has_plan {
                Toolbar {
                    labels: labels,
                    plan_full: plan_full,
                    on_command: move |command| run_command(command),
                }
                PlanHeader { session: session }
                div {
                    style: "flex: 1; overflow: auto; padding: 8px 20px 20px;",
                    BarWidget { session: session, context_menu: context_menu }
                }
            } else {
                div {
                    style: "flex: 1; display: flex; align-items: center; justify-content: center; color: {TEXT_MUTED}; font-size: 13px;",
                    "{empty_hint}"
                }
            }

            StatusBar { status: status, segment_count: segment_count, zoom: zoom }
        }

        SegmentContextMenu {
            context_menu: context_menu,
            session: session,
            labels: labels,
            on_edit: move |index| dialog.set(Some(SegmentDialogMode::Edit(index))),
            on_delete: move |index| {
                let removed = session.write().as_mut().map(|s| s.delete_segment(index));
                if let Some(Err(err)) = removed {
                    log::warn!("delete failed: {}", err);
                }
            },
        }

        if let Some(mode) = dialog() {
            SegmentDialog {
                mode: mode,
                session: session,
                labels: labels,
                on_close: move |_| dialog.set(None),
            }
        }

        if confirm_reset() {
            ConfirmModal {
                title: tr("confirm_reset_title"),
                message: tr("confirm_reset_message"),
                confirm_label: tr("btn_confirm"),
                cancel_label: tr("btn_cancel"),
                on_confirm: move |_| {
                    if let Some(s) = session.write().as_mut() {
                        s.reset();
                    }
                    confirm_reset.set(false);
                    status.set(StatusMessage::Info(tr("status_reset")));
                },
                on_cancel: move |_| confirm_reset.set(false),
            }
        }

        if show_new_plan() {
            NewPlanModal {
                labels: labels,
                can_cancel: has_plan,
                on_create: move |(name, total): (String, u32)| {
                    match EditorSession::new(name, total, settings.peek().clone(), labels.peek().clone()) {
                        Ok(created) => {
                            session.set(Some(created));
                            show_new_plan.set(false);
                            context_menu.set(None);
                            dialog.set(None);
                            status.set(StatusMessage::Info(tr("status_ready")));
                        }
                        Err(err) => {
                            log::warn!("plan not created: {}", err);
                            status.set(StatusMessage::Warning(err.to_string()));
                        }
                    }
                },
                on_cancel: move |_| show_new_plan.set(false),
            }
        }
    }
}
