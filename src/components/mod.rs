//! UI components for the planner window.
pub mod common;

mod bar_widget;
mod confirm_modal;
mod new_plan_modal;
mod plan_header;
mod segment_context_menu;
mod segment_dialog;
mod status_bar;
mod title_bar;
mod toolbar;

pub use bar_widget::BarWidget;
pub use confirm_modal::ConfirmModal;
pub use new_plan_modal::NewPlanModal;
pub use plan_header::PlanHeader;
pub use segment_context_menu::SegmentContextMenu;
pub use segment_dialog::{SegmentDialog, SegmentDialogMode};
pub use status_bar::{StatusBar, StatusMessage};
pub use title_bar::TitleBar;
pub use toolbar::{PlanCommand, Toolbar};
