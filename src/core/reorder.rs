//! Drag-to-reorder state machine for the timeline bar.
//!
//! A primary press on a segment starts a drag. Moves only track the pointer;
//! the sequence is untouched until release, when the drop index is resolved
//! against the pre-drag layout and the timeline is re-derived.

use crate::state::{Segment, Timeline};
use super::geometry::{BarGeometry, Rect};

/// Pointer button identity as delivered by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// Cursor affordance the widget should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    OpenHand,
    ClosedHand,
}

impl CursorHint {
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::OpenHand => "grab",
            CursorHint::ClosedHand => "grabbing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Sequence index of the grabbed segment
        index: usize,
        /// Pointer x minus the segment's left edge at press time
        grab_offset: f64,
        /// Latest pointer position
        pointer: (f64, f64),
    },
}

impl DragState {
    pub fn dragged_index(&self) -> Option<usize> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { index, .. } => Some(*index),
        }
    }
}

/// What a pointer press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Ignored,
    DragStarted(usize),
    /// Secondary press on a segment while idle: open edit/delete actions.
    ContextMenu(usize),
}

/// Result of a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub from: usize,
    pub to: usize,
}

impl DropOutcome {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn press(
        &mut self,
        timeline: &Timeline,
        geometry: &BarGeometry,
        button: PointerButton,
        x: f64,
        y: f64,
    ) -> PressOutcome {
        if self.is_dragging() {
            return PressOutcome::Ignored;
        }
        let Some(index) = geometry.hit_test(timeline.segments(), x, y) else {
            return PressOutcome::Ignored;
        };
        match button {
            PointerButton::Primary => {
                let rect = geometry.segment_rect(&timeline.segments()[index]);
                self.state = DragState::Dragging {
                    index,
                    grab_offset: x - rect.x,
                    pointer: (x, y),
                };
                PressOutcome::DragStarted(index)
            }
            PointerButton::Secondary => PressOutcome::ContextMenu(index),
            PointerButton::Other => PressOutcome::Ignored,
        }
    }

    /// Track the pointer. Returns true when a repaint is needed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match &mut self.state {
            DragState::Dragging { pointer, .. } => {
                *pointer = (x, y);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Finish a drag on primary release. Non-primary releases and releases
    /// while idle do nothing.
    pub fn release(
        &mut self,
        timeline: &mut Timeline,
        geometry: &BarGeometry,
        button: PointerButton,
        x: f64,
    ) -> Option<DropOutcome> {
        if button != PointerButton::Primary {
            return None;
        }
        let DragState::Dragging { index: from, .. } = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        let rel_x = x - geometry.margin();
        let to = resolve_drop_index(timeline.segments(), from, rel_x, |duration| {
            geometry.span_width(duration)
        });
        if let Err(err) = timeline.move_segment(from, to) {
            log::warn!("drop of segment {} discarded: {}", from, err);
            timeline.rederive_starts();
            return None;
        }
        Some(DropOutcome { from, to })
    }

    /// Cursor for the current state and pointer position.
    pub fn cursor(&self, timeline: &Timeline, geometry: &BarGeometry, x: f64, y: f64) -> CursorHint {
        if self.is_dragging() {
            return CursorHint::ClosedHand;
        }
        match geometry.hit_test(timeline.segments(), x, y) {
            Some(_) => CursorHint::OpenHand,
            None => CursorHint::Default,
        }
    }

    /// Where the floating copy of the dragged segment is drawn.
    pub fn ghost_rect(&self, timeline: &Timeline, geometry: &BarGeometry) -> Option<Rect> {
        let DragState::Dragging { index, grab_offset, pointer } = self.state else {
            return None;
        };
        let segment = timeline.get(index)?;
        Some(Rect::new(
            pointer.0 - grab_offset,
            pointer.1 - (geometry.bar_height() / 2.0).floor(),
            geometry.span_width(segment.duration),
            geometry.bar_height(),
        ))
    }
}

/// Resolve the index a dragged segment should land on.
///
/// Walks the other segments in their original order, accumulating pixel
/// widths; the first one whose horizontal midpoint lies right of `rel_x`
/// claims the slot. `rel_x` is measured from the bar's left edge. Widths are
/// the pre-drag widths; there is no reflow while dragging.
pub fn resolve_drop_index(
    segments: &[Segment],
    dragged: usize,
    rel_x: f64,
    width_of: impl Fn(u32) -> f64,
) -> usize {
    let mut running = 0.0;
    for (slot, segment) in segments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != dragged)
        .map(|(_, segment)| segment)
        .enumerate()
    {
        let width = width_of(segment.duration);
        if rel_x < running + width / 2.0 {
            return slot;
        }
        running += width;
    }
    segments.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SegmentDraft;

    /// 100 minutes over a 1000px bar: 10px per minute, bar starts at x=80.
    fn fixture() -> (Timeline, BarGeometry) {
        let mut timeline = Timeline::new(100).unwrap();
        for (name, duration) in [("A", 10), ("B", 20), ("C", 15)] {
            timeline.append(SegmentDraft::new(name, duration)).unwrap();
        }
        (timeline, BarGeometry::new(100, 1160.0, 340.0))
    }

    fn names(timeline: &Timeline) -> Vec<&str> {
        timeline.segments().iter().map(|s| s.name.as_str()).collect()
    }

    fn starts(timeline: &Timeline) -> Vec<u32> {
        timeline.segments().iter().map(|s| s.start).collect()
    }

    const BAR_MID_Y: f64 = 170.0;

    #[test]
    fn test_press_on_segment_starts_drag_with_grab_offset() {
        let (timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        let outcome = engine.press(&timeline, &geometry, PointerButton::Primary, 200.0, BAR_MID_Y);
        assert_eq!(outcome, PressOutcome::DragStarted(1));
        assert_eq!(
            *engine.state(),
            DragState::Dragging {
                index: 1,
                grab_offset: 20.0,
                pointer: (200.0, BAR_MID_Y),
            }
        );
    }

    #[test]
    fn test_press_outside_segments_is_ignored() {
        let (timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        assert_eq!(
            engine.press(&timeline, &geometry, PointerButton::Primary, 700.0, BAR_MID_Y),
            PressOutcome::Ignored
        );
        assert_eq!(
            engine.press(&timeline, &geometry, PointerButton::Primary, 100.0, 20.0),
            PressOutcome::Ignored
        );
        assert_eq!(*engine.state(), DragState::Idle);
    }

    #[test]
    fn test_secondary_press_requests_context_menu() {
        let (timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        assert_eq!(
            engine.press(&timeline, &geometry, PointerButton::Secondary, 450.0, BAR_MID_Y),
            PressOutcome::ContextMenu(2)
        );
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_move_tracks_pointer_without_touching_timeline() {
        let (mut timeline, geometry) = fixture();
        let before = timeline.clone();
        let mut engine = ReorderEngine::new();
        assert!(!engine.pointer_move(10.0, 10.0));
        engine.press(&timeline, &geometry, PointerButton::Primary, 85.0, BAR_MID_Y);
        assert!(engine.pointer_move(400.0, 90.0));
        assert_eq!(timeline, before);

        let ghost = engine.ghost_rect(&timeline, &geometry).unwrap();
        assert_eq!(ghost.x, 395.0);
        assert_eq!(ghost.y, 30.0);
        assert_eq!(ghost.width, 100.0);

        engine.release(&mut timeline, &geometry, PointerButton::Secondary, 400.0);
        assert!(engine.is_dragging());
    }

    #[test]
    fn test_drop_past_neighbour_midpoint_swaps() {
        let (mut timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        engine.press(&timeline, &geometry, PointerButton::Primary, 85.0, BAR_MID_Y);
        // rel_x = 150 (15 min): past B's midpoint (10), before C's start (20).
        let outcome = engine.release(&mut timeline, &geometry, PointerButton::Primary, 230.0);
        assert_eq!(outcome, Some(DropOutcome { from: 0, to: 1 }));
        assert_eq!(names(&timeline), vec!["B", "A", "C"]);
        assert_eq!(starts(&timeline), vec![0, 20, 30]);
        assert_eq!(*engine.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_beyond_all_midpoints_goes_last() {
        let (mut timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        engine.press(&timeline, &geometry, PointerButton::Primary, 85.0, BAR_MID_Y);
        engine.release(&mut timeline, &geometry, PointerButton::Primary, 1100.0);
        assert_eq!(names(&timeline), vec!["B", "C", "A"]);
        assert_eq!(starts(&timeline), vec![0, 20, 35]);
    }

    #[test]
    fn test_drop_before_first_midpoint_goes_first() {
        let (mut timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        engine.press(&timeline, &geometry, PointerButton::Primary, 420.0, BAR_MID_Y);
        engine.release(&mut timeline, &geometry, PointerButton::Primary, 20.0);
        assert_eq!(names(&timeline), vec!["C", "A", "B"]);
        assert_eq!(starts(&timeline), vec![0, 15, 25]);
    }

    #[test]
    fn test_drop_on_own_slot_is_a_no_op() {
        let (mut timeline, geometry) = fixture();
        let before = timeline.clone();
        let mut engine = ReorderEngine::new();
        engine.press(&timeline, &geometry, PointerButton::Primary, 200.0, BAR_MID_Y);
        engine.pointer_move(600.0, 20.0);
        // rel_x = 120 (12 min): past A's midpoint (5), before C's (17.5).
        let outcome = engine.release(&mut timeline, &geometry, PointerButton::Primary, 200.0).unwrap();
        assert!(!outcome.moved());
        assert_eq!(timeline, before);

        timeline.rederive_starts();
        assert_eq!(timeline, before);
    }

    #[test]
    fn test_cursor_hints() {
        let (timeline, geometry) = fixture();
        let mut engine = ReorderEngine::new();
        assert_eq!(engine.cursor(&timeline, &geometry, 100.0, BAR_MID_Y), CursorHint::OpenHand);
        assert_eq!(engine.cursor(&timeline, &geometry, 900.0, BAR_MID_Y), CursorHint::Default);
        engine.press(&timeline, &geometry, PointerButton::Primary, 100.0, BAR_MID_Y);
        assert_eq!(engine.cursor(&timeline, &geometry, 900.0, 5.0), CursorHint::ClosedHand);
    }

    #[test]
    fn test_resolve_uses_pre_drag_widths() {
        let (timeline, _) = fixture();
        let width = |d: u32| f64::from(d) * 10.0;
        // Dragging C: walk A (0..100, mid 50) then B (100..300, mid 200).
        assert_eq!(resolve_drop_index(timeline.segments(), 2, 49.0, width), 0);
        assert_eq!(resolve_drop_index(timeline.segments(), 2, 50.0, width), 1);
        assert_eq!(resolve_drop_index(timeline.segments(), 2, 199.0, width), 1);
        assert_eq!(resolve_drop_index(timeline.segments(), 2, 200.0, width), 2);
        assert_eq!(resolve_drop_index(&[], 0, 10.0, width), 0);
    }
}
