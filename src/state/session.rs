//! One open editor: the plan, its drag state, and injected collaborators.

use std::sync::Arc;

use crate::constants::{
    BAR_WIDGET_BASE_HEIGHT, BAR_WIDGET_BASE_WIDTH, DEFAULT_SEGMENT_MINUTES, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::core::geometry::BarGeometry;
use crate::core::i18n::Translator;
use crate::core::render::{render_bar, DrawCommand};
use crate::core::reorder::{CursorHint, DropOutcome, PointerButton, PressOutcome, ReorderEngine};
use crate::core::tools_merge::{merge_segment_tools, ToolSummary};
use super::{AppSettings, Segment, SegmentDraft, Timeline, TimelineResult};

/// Editor state for a single plan.
///
/// Settings and labels are passed in by the caller; nothing here reaches
/// for global state.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub plan_name: String,
    pub timeline: Timeline,
    pub player_count: u32,
    zoom: f64,
    engine: ReorderEngine,
    settings: Arc<AppSettings>,
    labels: Arc<Translator>,
}

impl EditorSession {
    pub fn new(
        plan_name: impl Into<String>,
        total_minutes: u32,
        settings: Arc<AppSettings>,
        labels: Arc<Translator>,
    ) -> TimelineResult<Self> {
        let timeline = Timeline::new(total_minutes)?;
        let plan_name = plan_name.into();
        log::info!("new plan '{}' ({} min)", plan_name, total_minutes);
        Ok(Self {
            plan_name,
            timeline,
            player_count: settings.default_player_count,
            zoom: 1.0,
            engine: ReorderEngine::new(),
            settings,
            labels,
        })
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn labels(&self) -> &Translator {
        &self.labels
    }

    /// Swap the label service after a language change.
    pub fn set_labels(&mut self, labels: Arc<Translator>) {
        self.labels = labels;
    }

    pub fn engine(&self) -> &ReorderEngine {
        &self.engine
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    fn set_zoom(&mut self, zoom: f64) {
        // Keep one decimal so repeated steps do not drift.
        self.zoom = ((zoom * 10.0).round() / 10.0).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Bar widget size at the current zoom.
    pub fn widget_size(&self) -> (f64, f64) {
        (
            (BAR_WIDGET_BASE_WIDTH * self.zoom).floor(),
            (BAR_WIDGET_BASE_HEIGHT * self.zoom).floor(),
        )
    }

    pub fn geometry(&self) -> BarGeometry {
        let (width, height) = self.widget_size();
        BarGeometry::new(self.timeline.total_minutes(), width, height)
    }

    // ---------------------------------------------------------------------
    // Pointer routing
    // ---------------------------------------------------------------------

    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) -> PressOutcome {
        let geometry = self.geometry();
        self.engine.press(&self.timeline, &geometry, button, x, y)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self, button: PointerButton, x: f64) -> Option<DropOutcome> {
        let geometry = self.geometry();
        let outcome = self.engine.release(&mut self.timeline, &geometry, button, x);
        if let Some(outcome) = outcome.filter(DropOutcome::moved) {
            log::debug!("reordered segment {} -> {}", outcome.from, outcome.to);
        }
        outcome
    }

    pub fn cursor(&self, x: f64, y: f64) -> CursorHint {
        self.engine.cursor(&self.timeline, &self.geometry(), x, y)
    }

    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        render_bar(&self.timeline, &self.engine, &self.geometry())
    }

    // ---------------------------------------------------------------------
    // Segment actions
    // ---------------------------------------------------------------------

    pub fn add_segment(&mut self, draft: SegmentDraft) -> TimelineResult<()> {
        self.timeline.append(draft).map(|_| ())
    }

    pub fn edit_segment(&mut self, index: usize, draft: SegmentDraft) -> TimelineResult<()> {
        self.timeline.edit(index, draft)
    }

    pub fn delete_segment(&mut self, index: usize) -> TimelineResult<Segment> {
        self.timeline.remove(index)
    }

    /// Remove every segment and abandon any drag.
    pub fn reset(&mut self) {
        self.engine = ReorderEngine::new();
        self.timeline.clear();
        log::info!("plan '{}' reset", self.plan_name);
    }

    /// Replace all segments (spreadsheet import).
    pub fn replace_segments(&mut self, segments: Vec<Segment>) -> TimelineResult<()> {
        self.timeline.replace_segments(segments)?;
        self.engine = ReorderEngine::new();
        Ok(())
    }

    /// Suggested duration for the add dialog.
    pub fn default_new_duration(&self) -> u32 {
        DEFAULT_SEGMENT_MINUTES.min(self.timeline.remaining_minutes())
    }

    pub fn tool_summary(&self) -> ToolSummary {
        merge_segment_tools(self.timeline.segments())
    }

    /// "Total duration: 2h 0min (120 minutes)" in the active language.
    pub fn duration_info(&self) -> String {
        let total = self.timeline.total_minutes();
        self.labels.tr_with(
            "info_duration",
            &[
                ("hours", (total / 60).to_string()),
                ("minutes", (total % 60).to_string()),
                ("total", total.to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::Translator;

    fn session() -> EditorSession {
        let labels = Arc::new(Translator::with_dir("en-us", "en-us", None));
        let mut session = EditorSession::new("Tuesday", 100, Arc::new(AppSettings::default()), labels).unwrap();
        session.add_segment(SegmentDraft::new("A", 10).with_tools("3 cones, 1 goal")).unwrap();
        session.add_segment(SegmentDraft::new("B", 20).with_tools("6 cones")).unwrap();
        session.add_segment(SegmentDraft::new("C", 15).with_tools("12 cones, 2 bibs")).unwrap();
        session
    }

    #[test]
    fn test_new_session_uses_injected_settings() {
        let settings = AppSettings {
            default_player_count: 22,
            ..Default::default()
        };
        let session = EditorSession::new(
            "Plan",
            60,
            Arc::new(settings),
            Arc::new(Translator::with_dir("en-us", "en-us", None)),
        )
        .unwrap();
        assert_eq!(session.player_count, 22);
        assert!(EditorSession::new("Plan", 5, Arc::default(), Arc::default()).is_err());
    }

    #[test]
    fn test_zoom_is_clamped_and_scales_widget() {
        let mut session = session();
        assert_eq!(session.widget_size(), (1300.0, 340.0));
        for _ in 0..30 {
            session.zoom_in();
        }
        assert_eq!(session.zoom(), 2.5);
        for _ in 0..30 {
            session.zoom_out();
        }
        assert_eq!(session.zoom(), 0.5);
        assert_eq!(session.widget_size(), (650.0, 170.0));
    }

    #[test]
    fn test_drag_through_session() {
        let mut session = session();
        // 1300px widget, 100 min: 11.4px per minute from x=80; bar y 110..230.
        let outcome = session.pointer_down(PointerButton::Primary, 90.0, 170.0);
        assert_eq!(outcome, PressOutcome::DragStarted(0));
        assert_eq!(session.cursor(0.0, 0.0), CursorHint::ClosedHand);
        assert!(session.pointer_move(300.0, 170.0));
        let drop = session.pointer_up(PointerButton::Primary, 80.0 + 15.0 * 11.4).unwrap();
        assert_eq!((drop.from, drop.to), (0, 1));
        let names: Vec<_> = session.timeline.segments().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(session.cursor(0.0, 0.0), CursorHint::Default);
    }

    #[test]
    fn test_release_past_widget_edge_moves_segment_last() {
        let mut session = session();
        assert_eq!(session.pointer_down(PointerButton::Primary, 90.0, 170.0), PressOutcome::DragStarted(0));
        // The pointer leaves the 1300px widget before the button comes up.
        assert!(session.pointer_move(1400.0, 170.0));
        let drop = session.pointer_up(PointerButton::Primary, 1400.0).unwrap();
        assert_eq!((drop.from, drop.to), (0, 2));
        let names: Vec<_> = session.timeline.segments().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        let starts: Vec<_> = session.timeline.segments().iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 20, 35]);
    }

    #[test]
    fn test_release_left_of_widget_moves_segment_first() {
        let mut session = session();
        assert_eq!(session.pointer_down(PointerButton::Primary, 80.0 + 40.0 * 11.4, 170.0), PressOutcome::DragStarted(2));
        session.pointer_move(-50.0, 400.0);
        let drop = session.pointer_up(PointerButton::Primary, -50.0).unwrap();
        assert_eq!((drop.from, drop.to), (2, 0));
        let names: Vec<_> = session.timeline.segments().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_tool_summary_and_info() {
        let session = session();
        assert_eq!(session.tool_summary().to_string(), "2 bibs, 12 cones, 1 goal");
        assert_eq!(session.duration_info(), "Total duration: 1h 40min (100 minutes)");
        assert_eq!(session.default_new_duration(), 10);
    }

    #[test]
    fn test_reset_clears_segments_and_drag() {
        let mut session = session();
        session.pointer_down(PointerButton::Primary, 90.0, 170.0);
        session.reset();
        assert!(session.timeline.is_empty());
        assert!(!session.engine().is_dragging());
        assert_eq!(session.default_new_duration(), 10);
    }
}
