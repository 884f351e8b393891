//! State management module
//!
//! - Plan: segments and the contiguous timeline that owns them
//! - Settings: read-only user preferences
//! - Session: one open editor with its drag state and collaborators

mod plan;
mod settings;
mod session;

pub use plan::*;
pub use settings::{AppSettings, SettingsError};
pub use session::EditorSession;
