use dioxus::prelude::*;
use std::sync::Arc;

use crate::constants::*;
use crate::core::i18n::Translator;

/// Plan-level commands shared by the toolbar and the hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanCommand {
    AddSegment,
    ZoomIn,
    ZoomOut,
    Reset,
    ImportSpreadsheet,
    ExportSpreadsheet,
    ExportPng,
    ExportDocument,
    SampleTemplate,
}

impl PlanCommand {
    fn label_key(self) -> &'static str {
        match self {
            PlanCommand::AddSegment => "btn_add_segment",
            PlanCommand::ZoomIn => "btn_zoom_in",
            PlanCommand::ZoomOut => "btn_zoom_out",
            PlanCommand::Reset => "btn_reset",
            PlanCommand::ImportSpreadsheet => "btn_import",
            PlanCommand::ExportSpreadsheet => "btn_export_xlsx",
            PlanCommand::ExportPng => "btn_export_png",
            PlanCommand::ExportDocument => "btn_export_docx",
            PlanCommand::SampleTemplate => "btn_sample_template",
        }
    }
}

const GROUPS: [&[PlanCommand]; 3] = [
    &[PlanCommand::AddSegment, PlanCommand::Reset],
    &[PlanCommand::ZoomOut, PlanCommand::ZoomIn],
    &[
        PlanCommand::ImportSpreadsheet,
        PlanCommand::ExportSpreadsheet,
        PlanCommand::ExportPng,
        PlanCommand::ExportDocument,
        PlanCommand::SampleTemplate,
    ],
];

#[component]
pub fn Toolbar(
    labels: Signal<Arc<Translator>>,
    plan_full: bool,
    on_command: EventHandler<PlanCommand>,
) -> Element {
    let groups: Vec<Vec<(PlanCommand, String)>> = GROUPS
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|command| (*command, labels.read().tr(command.label_key())))
                .collect()
        })
        .collect();

    rsx! {
        div {
            style: "
                display: flex; align-items: center; gap: 16px; flex-wrap: wrap;
                padding: 8px 16px; background-color: {BG_ELEVATED};
                border-bottom: 1px solid {BORDER_SUBTLE};
            ",
            for group in groups {
                div {
                    style: "display: flex; gap: 6px;",
                    for (command, label) in group {
                        {
                            let disabled = command == PlanCommand::AddSegment && plan_full;
                            let (bg, fg) = match command {
                                PlanCommand::AddSegment => (ACCENT_PRIMARY, "#ffffff"),
                                PlanCommand::Reset => (BG_ELEVATED, TEXT_DANGER),
                                _ => (BG_ELEVATED, TEXT_PRIMARY),
                            };
                            rsx! {
                                button {
                                    class: "tool-btn",
                                    disabled: disabled,
                                    style: "
                                        padding: 5px 12px; font-size: 12px; border-radius: 4px;
                                        background: {bg}; color: {fg};
                                        border: 1px solid {BORDER_DEFAULT};
                                        cursor: pointer;
                                    ",
                                    onclick: move |_| on_command.call(command),
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
