//! Shared constants: UI palette, bar layout, and plan limits.

pub const BG_BASE: &str = "#f4f7fa";
pub const BG_ELEVATED: &str = "#ffffff";
pub const BG_SURFACE: &str = "#eef2f7";
pub const BG_HOVER: &str = "#e2e8f0";

pub const BORDER_SUBTLE: &str = "#e5e9f0";
pub const BORDER_DEFAULT: &str = "#d4dae3";
pub const BORDER_ACCENT: &str = "#4a6cff";

pub const TEXT_PRIMARY: &str = "#1e1e1e";
pub const TEXT_TITLE: &str = "#2a3a5a";
pub const TEXT_SECONDARY: &str = "#444444";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DANGER: &str = "#ef4444";

pub const ACCENT_PRIMARY: &str = "#6a8cff";
pub const ACCENT_PRIMARY_DARK: &str = "#3a4a7a";

// Bar layout
pub const BAR_MARGIN_PX: f64 = 80.0;
pub const BAR_HEIGHT_PX: f64 = 120.0;
pub const BAR_RADIUS_PX: f64 = 16.0;
pub const SEGMENT_RADIUS_PX: f64 = 12.0;
pub const GUIDE_ABOVE_PX: f64 = 8.0;
pub const GUIDE_BELOW_PX: f64 = 18.0;
pub const LABEL_GAP_PX: f64 = 6.0;
pub const LABEL_HEIGHT_PX: f64 = 18.0;
pub const BAR_WIDGET_BASE_WIDTH: f64 = 1300.0;
pub const BAR_WIDGET_BASE_HEIGHT: f64 = 340.0;

// Zoom
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.1;

// Plan limits
pub const MIN_TOTAL_MINUTES: u32 = 10;
pub const MAX_TOTAL_MINUTES: u32 = 1440;
pub const DEFAULT_TOTAL_MINUTES: u32 = 120;
pub const DEFAULT_SEGMENT_MINUTES: u32 = 10;
pub const DEFAULT_PLAN_NAME: &str = "My Plan";
