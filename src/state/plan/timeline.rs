use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TOTAL_MINUTES, MIN_TOTAL_MINUTES};
use crate::core::color::harmonic_color;
use super::{Segment, SegmentDraft};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    #[error("segment name must not be empty")]
    EmptyName,
    #[error("duration {duration} min is outside the allowed range 1..={max}")]
    InvalidDuration { duration: u32, max: u32 },
    #[error("the timeline is already full")]
    NoCapacity,
    #[error("segment index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("total duration {minutes} min is outside {}..={}", MIN_TOTAL_MINUTES, MAX_TOTAL_MINUTES)]
    InvalidTotal { minutes: u32 },
    #[error("{scheduled} min scheduled but the timeline only holds {total} min")]
    OverCapacity { scheduled: u32, total: u32 },
}

pub type TimelineResult<T> = Result<T, TimelineError>;

/// The ordered, gapless sequence of segments of one training session.
///
/// Sequence order is schedule order. Every mutator finishes with a
/// re-derivation pass, so after any call the first segment starts at 0 and
/// each following segment starts where its predecessor ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    total_minutes: u32,
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new(total_minutes: u32) -> TimelineResult<Self> {
        if !(MIN_TOTAL_MINUTES..=MAX_TOTAL_MINUTES).contains(&total_minutes) {
            return Err(TimelineError::InvalidTotal { minutes: total_minutes });
        }
        Ok(Self {
            total_minutes,
            segments: Vec::new(),
        })
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all durations.
    pub fn scheduled_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Minutes still free at the end of the timeline.
    pub fn remaining_minutes(&self) -> u32 {
        self.total_minutes.saturating_sub(self.scheduled_minutes())
    }

    /// Largest duration the segment at `index` may be edited to.
    pub fn max_duration_for(&self, index: usize) -> TimelineResult<u32> {
        let segment = self.segment_at(index)?;
        Ok(self.remaining_minutes() + segment.duration)
    }

    /// Append a new segment at the current end of the timeline.
    pub fn append(&mut self, draft: SegmentDraft) -> TimelineResult<&Segment> {
        let max = self.remaining_minutes();
        if max == 0 {
            return Err(TimelineError::NoCapacity);
        }
        let name = validate_draft(&draft, max)?;
        let start = self.scheduled_minutes();
        let segment = Segment::new(start, draft.duration, name, harmonic_color(self.segments.len()))
            .with_organisation(draft.organisation)
            .with_explanation(draft.explanation)
            .with_tools(draft.tools);
        log::debug!("append segment '{}' ({} min) at {}", segment.name, segment.duration, start);
        self.segments.push(segment);
        self.rederive_starts();
        let last = self.segments.len() - 1;
        Ok(&self.segments[last])
    }

    /// Replace the user-editable fields of the segment at `index`.
    pub fn edit(&mut self, index: usize, draft: SegmentDraft) -> TimelineResult<()> {
        let max = self.max_duration_for(index)?;
        let name = validate_draft(&draft, max)?;
        let segment = &mut self.segments[index];
        segment.name = name;
        segment.duration = draft.duration;
        segment.organisation = draft.organisation;
        segment.explanation = draft.explanation;
        segment.tools = draft.tools;
        log::debug!("edit segment {} -> '{}' ({} min)", index, segment.name, segment.duration);
        self.rederive_starts();
        Ok(())
    }

    /// Splice out the segment at `index`; later segments move up.
    pub fn remove(&mut self, index: usize) -> TimelineResult<Segment> {
        self.segment_at(index)?;
        let removed = self.segments.remove(index);
        log::debug!("remove segment {} '{}'", index, removed.name);
        self.rederive_starts();
        Ok(removed)
    }

    /// Move the segment at `from` so it ends up at position `to`.
    pub fn move_segment(&mut self, from: usize, to: usize) -> TimelineResult<()> {
        self.segment_at(from)?;
        if to >= self.segments.len() {
            return Err(TimelineError::IndexOutOfRange {
                index: to,
                len: self.segments.len(),
            });
        }
        if from != to {
            let segment = self.segments.remove(from);
            self.segments.insert(to, segment);
            log::debug!("move segment {} -> {}", from, to);
        }
        self.rederive_starts();
        Ok(())
    }

    /// Drop every segment, keeping the total duration.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Swap in a whole new sequence (import). Nothing changes on error.
    pub fn replace_segments(&mut self, segments: Vec<Segment>) -> TimelineResult<()> {
        let mut scheduled: u32 = 0;
        for segment in &segments {
            if segment.name.trim().is_empty() {
                return Err(TimelineError::EmptyName);
            }
            if segment.duration == 0 {
                return Err(TimelineError::InvalidDuration {
                    duration: 0,
                    max: self.total_minutes,
                });
            }
            scheduled = scheduled.saturating_add(segment.duration);
        }
        if scheduled > self.total_minutes {
            return Err(TimelineError::OverCapacity {
                scheduled,
                total: self.total_minutes,
            });
        }
        self.segments = segments;
        self.rederive_starts();
        Ok(())
    }

    /// Recompute every start from sequence order and durations.
    pub fn rederive_starts(&mut self) {
        let mut cursor = 0;
        for segment in &mut self.segments {
            segment.start = cursor;
            cursor += segment.duration;
        }
        debug_assert!(self.is_contiguous());
    }

    /// True when starts form a gapless chain from 0 and capacity holds.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 0;
        for segment in &self.segments {
            if segment.start != expected || segment.duration == 0 {
                return false;
            }
            expected = segment.end();
        }
        expected <= self.total_minutes
    }

    fn segment_at(&self, index: usize) -> TimelineResult<&Segment> {
        self.segments.get(index).ok_or(TimelineError::IndexOutOfRange {
            index,
            len: self.segments.len(),
        })
    }
}

fn validate_draft(draft: &SegmentDraft, max: u32) -> TimelineResult<String> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(TimelineError::EmptyName);
    }
    if draft.duration < 1 || draft.duration > max {
        return Err(TimelineError::InvalidDuration {
            duration: draft.duration,
            max,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Organisation;
    use proptest::prelude::*;

    fn timeline_with(durations: &[(&str, u32)], total: u32) -> Timeline {
        let mut timeline = Timeline::new(total).unwrap();
        for (name, duration) in durations {
            timeline.append(SegmentDraft::new(*name, *duration)).unwrap();
        }
        timeline
    }

    fn starts(timeline: &Timeline) -> Vec<u32> {
        timeline.segments().iter().map(|s| s.start).collect()
    }

    fn names(timeline: &Timeline) -> Vec<&str> {
        timeline.segments().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_total_range_is_enforced() {
        assert!(Timeline::new(9).is_err());
        assert!(Timeline::new(10).is_ok());
        assert!(Timeline::new(1440).is_ok());
        assert_eq!(Timeline::new(1441), Err(TimelineError::InvalidTotal { minutes: 1441 }));
    }

    #[test]
    fn test_append_places_segments_back_to_back() {
        let timeline = timeline_with(&[("A", 10), ("B", 20), ("C", 15)], 100);
        assert_eq!(starts(&timeline), vec![0, 10, 30]);
        assert_eq!(timeline.remaining_minutes(), 55);
        assert_eq!(timeline.segments()[2].end(), 45);
    }

    #[test]
    fn test_append_assigns_palette_colors_by_position() {
        let timeline = timeline_with(&[("A", 10), ("B", 10)], 100);
        assert_eq!(timeline.segments()[0].color, harmonic_color(0));
        assert_eq!(timeline.segments()[1].color, harmonic_color(1));
    }

    #[test]
    fn test_append_rejects_bad_input_without_mutation() {
        let mut timeline = timeline_with(&[("A", 90)], 100);
        let before = timeline.clone();

        assert_eq!(
            timeline.append(SegmentDraft::new("B", 11)).unwrap_err(),
            TimelineError::InvalidDuration { duration: 11, max: 10 }
        );
        assert_eq!(
            timeline.append(SegmentDraft::new("B", 0)).unwrap_err(),
            TimelineError::InvalidDuration { duration: 0, max: 10 }
        );
        assert_eq!(timeline.append(SegmentDraft::new("   ", 5)).unwrap_err(), TimelineError::EmptyName);
        assert_eq!(timeline, before);

        timeline.append(SegmentDraft::new("B", 10)).unwrap();
        assert_eq!(timeline.append(SegmentDraft::new("C", 1)).unwrap_err(), TimelineError::NoCapacity);
    }

    #[test]
    fn test_append_trims_name_and_keeps_details() {
        let mut timeline = Timeline::new(60).unwrap();
        let segment = timeline
            .append(
                SegmentDraft::new("  Rondo  ", 15)
                    .with_organisation(Organisation::GameForm)
                    .with_explanation("5 v 2")
                    .with_tools("6 cones, 1 ball"),
            )
            .unwrap();
        assert_eq!(segment.name, "Rondo");
        assert_eq!(segment.organisation, Organisation::GameForm);
        assert_eq!(segment.explanation, "5 v 2");
        assert_eq!(segment.tools, "6 cones, 1 ball");
    }

    #[test]
    fn test_edit_rederives_following_starts() {
        let mut timeline = timeline_with(&[("A", 10), ("B", 20), ("C", 15)], 100);
        timeline.edit(0, SegmentDraft::new("A2", 25)).unwrap();
        assert_eq!(names(&timeline), vec!["A2", "B", "C"]);
        assert_eq!(starts(&timeline), vec![0, 25, 45]);
    }

    #[test]
    fn test_edit_capacity_includes_own_duration() {
        let mut timeline = timeline_with(&[("A", 10), ("B", 20)], 40);
        assert_eq!(timeline.max_duration_for(1).unwrap(), 30);
        let before = timeline.clone();
        assert!(timeline.edit(1, SegmentDraft::new("B", 31)).is_err());
        assert_eq!(timeline, before);
        timeline.edit(1, SegmentDraft::new("B", 30)).unwrap();
        assert_eq!(timeline.remaining_minutes(), 0);
    }

    #[test]
    fn test_remove_any_index_closes_the_gap() {
        for removed in 0..3 {
            let mut timeline = timeline_with(&[("A", 7), ("B", 13), ("C", 21)], 100);
            timeline.remove(removed).unwrap();
            let segments = timeline.segments();
            assert_eq!(segments.len(), 2);
            assert_eq!(segments[0].start, 0);
            assert_eq!(segments[1].start, segments[0].duration);
        }
    }

    #[test]
    fn test_move_segment_and_bounds() {
        let mut timeline = timeline_with(&[("A", 10), ("B", 20), ("C", 15)], 100);
        timeline.move_segment(0, 2).unwrap();
        assert_eq!(names(&timeline), vec!["B", "C", "A"]);
        assert_eq!(starts(&timeline), vec![0, 20, 35]);
        assert!(timeline.move_segment(3, 0).is_err());
        assert!(timeline.move_segment(0, 3).is_err());
    }

    #[test]
    fn test_replace_segments_validates_before_mutating() {
        let mut timeline = timeline_with(&[("A", 10)], 30);
        let before = timeline.clone();
        let too_long = vec![
            Segment::new(99, 20, "X", harmonic_color(0)),
            Segment::new(99, 20, "Y", harmonic_color(1)),
        ];
        assert_eq!(
            timeline.replace_segments(too_long),
            Err(TimelineError::OverCapacity { scheduled: 40, total: 30 })
        );
        assert_eq!(timeline, before);

        let fits = vec![
            Segment::new(99, 10, "X", harmonic_color(0)),
            Segment::new(5, 20, "Y", harmonic_color(1)),
        ];
        timeline.replace_segments(fits).unwrap();
        assert_eq!(starts(&timeline), vec![0, 10]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(u32),
        Edit(usize, u32),
        Remove(usize),
        Move(usize, usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..40).prop_map(Op::Append),
            (0usize..12, 0u32..40).prop_map(|(i, d)| Op::Edit(i, d)),
            (0usize..12).prop_map(Op::Remove),
            (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Move(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn prop_mutations_keep_timeline_contiguous(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut timeline = Timeline::new(120).unwrap();
            for (step, op) in ops.into_iter().enumerate() {
                let before = timeline.clone();
                let result = match op {
                    Op::Append(d) => timeline.append(SegmentDraft::new(format!("S{step}"), d)).map(|_| ()),
                    Op::Edit(i, d) => timeline.edit(i, SegmentDraft::new(format!("E{step}"), d)),
                    Op::Remove(i) => timeline.remove(i).map(|_| ()),
                    Op::Move(a, b) => timeline.move_segment(a, b),
                };
                if result.is_err() {
                    prop_assert_eq!(&timeline, &before);
                }
                prop_assert!(timeline.is_contiguous());
                prop_assert!(timeline.scheduled_minutes() <= timeline.total_minutes());
                if let Some(first) = timeline.segments().first() {
                    prop_assert_eq!(first.start, 0);
                }
            }
        }
    }
}
