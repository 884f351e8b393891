//! Plan data model
//!
//! The segment entity and the timeline that keeps segments contiguous.

mod segment;
mod timeline;

pub use segment::{Organisation, Segment, SegmentDraft};
pub use timeline::{Timeline, TimelineError, TimelineResult};
