//! Drawing primitives for the timeline bar.
//!
//! `render_bar` is a pure function of the timeline, the drag state and the
//! widget geometry. The on-screen widget and the PNG export both consume
//! its output.

use crate::constants::{
    BAR_RADIUS_PX, GUIDE_ABOVE_PX, GUIDE_BELOW_PX, LABEL_GAP_PX, LABEL_HEIGHT_PX, SEGMENT_RADIUS_PX,
};
use crate::state::{Segment, Timeline};
use super::color::Color;
use super::geometry::{BarGeometry, Rect};
use super::reorder::ReorderEngine;

const CANVAS_BG: Color = Color::rgb(250, 252, 255);
const BAR_TRACK: Color = Color::rgb(230, 235, 245);
const GUIDE: Color = Color::rgba(120, 120, 120, 120);
const GHOST_OUTLINE: Color = Color::rgba(120, 120, 120, 80);
const LABEL: Color = Color::rgb(30, 30, 30);
const LABEL_FONT_PT: f64 = 8.0;
const GHOST_LIGHTEN_PERCENT: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Vertical dashed guide at `x` from `y1` to `y2`.
    GuideLine {
        x: f64,
        y1: f64,
        y2: f64,
        color: Color,
    },
    /// Text centered inside `rect`.
    Label {
        rect: Rect,
        text: String,
        color: Color,
        size_pt: f64,
    },
}

/// Label shown under each block.
pub fn segment_label(segment: &Segment) -> String {
    format!("{} ({} min)", segment.name, segment.duration)
}

pub fn render_bar(timeline: &Timeline, engine: &ReorderEngine, geometry: &BarGeometry) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(timeline.len() * 4 + 8);
    commands.push(DrawCommand::Fill {
        rect: Rect::new(0.0, 0.0, geometry.widget_width(), geometry.widget_height()),
        color: CANVAS_BG,
    });
    commands.push(DrawCommand::RoundedRect {
        rect: geometry.bar_rect(),
        radius: BAR_RADIUS_PX,
        fill: BAR_TRACK,
        stroke: None,
    });

    let dragged = engine.state().dragged_index();
    for (index, segment) in timeline.segments().iter().enumerate() {
        if dragged == Some(index) {
            continue;
        }
        push_block(&mut commands, geometry.segment_rect(segment), segment, segment.color, None);
    }

    if let (Some(index), Some(ghost)) = (dragged, engine.ghost_rect(timeline, geometry)) {
        if let Some(segment) = timeline.get(index) {
            let outline = Stroke {
                color: GHOST_OUTLINE,
                width: 2.0,
                dashed: true,
            };
            push_block(
                &mut commands,
                ghost,
                segment,
                segment.color.lighter(GHOST_LIGHTEN_PERCENT),
                Some(outline),
            );
        }
    }
    commands
}

fn push_block(commands: &mut Vec<DrawCommand>, rect: Rect, segment: &Segment, fill: Color, stroke: Option<Stroke>) {
    commands.push(DrawCommand::RoundedRect {
        rect,
        radius: SEGMENT_RADIUS_PX,
        fill,
        stroke,
    });
    for x in [rect.x, rect.right()] {
        commands.push(DrawCommand::GuideLine {
            x: x.trunc(),
            y1: (rect.y - GUIDE_ABOVE_PX).trunc(),
            y2: (rect.bottom() + GUIDE_BELOW_PX).trunc(),
            color: GUIDE,
        });
    }
    commands.push(DrawCommand::Label {
        rect: Rect::new(rect.x, rect.bottom() + LABEL_GAP_PX, rect.width, LABEL_HEIGHT_PX),
        text: segment_label(segment),
        color: LABEL,
        size_pt: LABEL_FONT_PT,
    });
}
