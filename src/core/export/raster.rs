//! PNG snapshot of the timeline bar.

use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size, Blend};
use std::path::Path;

use crate::core::color::Color;
use crate::core::geometry::Rect;
use crate::core::render::{DrawCommand, Stroke};
use crate::state::EditorSession;
use super::ExportResult;

const DASH_PX: f32 = 4.0;
const ELLIPSIS: char = '\u{2026}';

static LABEL_FONT_BYTES: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

fn label_font() -> Option<FontRef<'static>> {
    match FontRef::try_from_slice(LABEL_FONT_BYTES) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("label font unusable, png labels skipped: {}", err);
            None
        }
    }
}

/// Rasterize a draw list onto a transparent canvas of `width` x `height`.
pub fn rasterize(commands: &[DrawCommand], width: u32, height: u32) -> RgbaImage {
    let mut canvas = Blend(RgbaImage::new(width.max(1), height.max(1)));
    let font = label_font();
    for command in commands {
        match command {
            DrawCommand::Fill { rect, color } => fill_rounded(&mut canvas.0, rect, 0.0, *color),
            DrawCommand::RoundedRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                fill_rounded(&mut canvas.0, rect, *radius, *fill);
                if let Some(stroke) = stroke {
                    outline(&mut canvas, rect, *radius, stroke);
                }
            }
            DrawCommand::GuideLine { x, y1, y2, color } => {
                dashed_line(&mut canvas, (*x as f32, *y1 as f32), (*x as f32, *y2 as f32), *color)
            }
            DrawCommand::Label {
                rect,
                text,
                color,
                size_pt,
            } => {
                if let Some(font) = &font {
                    draw_label(&mut canvas.0, font, rect, text, *color, *size_pt);
                }
            }
        }
    }
    canvas.0
}

/// Render the session's bar at its current zoom and save it as PNG.
pub fn write_png(path: &Path, session: &EditorSession) -> ExportResult<()> {
    let (width, height) = session.widget_size();
    let image = rasterize(&session.draw_commands(), width as u32, height as u32);
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("png written to {} ({}x{})", path.display(), width, height);
    Ok(())
}

/// Point size to pixels at the webview's 96 dpi.
fn label_scale(size_pt: f64) -> PxScale {
    PxScale::from((size_pt * 96.0 / 72.0) as f32)
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
/// `None` when not even the ellipsis fits.
fn fit_label(font: &FontRef, scale: PxScale, text: &str, max_width: f64) -> Option<String> {
    let fits = |candidate: &str| f64::from(text_size(scale, font, candidate).0) <= max_width;
    if fits(text) {
        return Some(text.to_string());
    }
    let mut chars: Vec<char> = text.chars().collect();
    while chars.pop().is_some() {
        let candidate: String = chars.iter().chain(std::iter::once(&ELLIPSIS)).collect();
        if fits(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn draw_label(image: &mut RgbaImage, font: &FontRef, rect: &Rect, text: &str, color: Color, size_pt: f64) {
    let scale = label_scale(size_pt);
    let Some(text) = fit_label(font, scale, text, rect.width) else {
        return;
    };
    let (text_width, text_height) = text_size(scale, font, &text);
    let x = rect.x + (rect.width - f64::from(text_width)) / 2.0;
    let y = rect.y + (rect.height - f64::from(text_height)) / 2.0;
    draw_text_mut(image, rgba(color), x.round() as i32, y.round() as i32, scale, font, &text);
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn blend_pixel(image: &mut RgbaImage, x: u32, y: u32, color: Color) {
    let dst = image.get_pixel_mut(x, y);
    let src_a = f32::from(color.a) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let mix = |s: u8, d: u8| {
        ((f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    *dst = Rgba([
        mix(color.r, dst[0]),
        mix(color.g, dst[1]),
        mix(color.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Pixel-center coverage test against a rounded rectangle.
fn inside_rounded(rect: &Rect, radius: f64, px: f64, py: f64) -> bool {
    if px < rect.x || px >= rect.right() || py < rect.y || py >= rect.bottom() {
        return false;
    }
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let cx = px.clamp(rect.x + radius, rect.right() - radius);
    let cy = py.clamp(rect.y + radius, rect.bottom() - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

fn fill_rounded(image: &mut RgbaImage, rect: &Rect, radius: f64, color: Color) {
    let (w, h) = image.dimensions();
    let x0 = rect.x.floor().max(0.0) as u32;
    let y0 = rect.y.floor().max(0.0) as u32;
    let x1 = (rect.right().ceil().max(0.0) as u32).min(w);
    let y1 = (rect.bottom().ceil().max(0.0) as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            if inside_rounded(rect, radius, f64::from(x) + 0.5, f64::from(y) + 0.5) {
                blend_pixel(image, x, y, color);
            }
        }
    }
}

fn outline(canvas: &mut Blend<RgbaImage>, rect: &Rect, radius: f64, stroke: &Stroke) {
    let inset = radius.min(rect.width / 2.0).min(rect.height / 2.0) as f32;
    let (left, top) = (rect.x as f32, rect.y as f32);
    let (right, bottom) = (rect.right() as f32 - 1.0, rect.bottom() as f32 - 1.0);
    let edges = [
        ((left + inset, top), (right - inset, top)),
        ((left + inset, bottom), (right - inset, bottom)),
        ((left, top + inset), (left, bottom - inset)),
        ((right, top + inset), (right, bottom - inset)),
    ];
    let passes = stroke.width.round().max(1.0) as i32;
    for (start, end) in edges {
        for pass in 0..passes {
            // Thicken inwards.
            let shift = pass as f32;
            let (dx, dy) = if start.1 == end.1 {
                (0.0, if start.1 == top { shift } else { -shift })
            } else {
                (if start.0 == left { shift } else { -shift }, 0.0)
            };
            let a = (start.0 + dx, start.1 + dy);
            let b = (end.0 + dx, end.1 + dy);
            if stroke.dashed {
                dashed_line(canvas, a, b, stroke.color);
            } else {
                draw_line_segment_mut(canvas, a, b, rgba(stroke.color));
            }
        }
    }
}

fn dashed_line(canvas: &mut Blend<RgbaImage>, start: (f32, f32), end: (f32, f32), color: Color) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut offset = 0.0;
    while offset < length {
        let dash_end = (offset + DASH_PX).min(length);
        draw_line_segment_mut(
            canvas,
            (start.0 + ux * offset, start.1 + uy * offset),
            (start.0 + ux * dash_end, start.1 + uy * dash_end),
            rgba(color),
        );
        offset += DASH_PX * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BarGeometry;
    use crate::core::i18n::Translator;
    use crate::core::render::render_bar;
    use crate::core::reorder::ReorderEngine;
    use crate::state::{AppSettings, SegmentDraft, Timeline};
    use std::sync::Arc;

    #[test]
    fn test_rounded_corners_stay_transparent() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        let commands = vec![DrawCommand::RoundedRect {
            rect,
            radius: 12.0,
            fill: Color::rgb(200, 10, 10),
            stroke: None,
        }];
        let image = rasterize(&commands, 40, 40);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(*image.get_pixel(20, 20), Rgba([200, 10, 10, 255]));
        assert_eq!(*image.get_pixel(20, 0), Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_segments_land_at_their_pixel_spans() {
        let mut timeline = Timeline::new(100).unwrap();
        timeline.append(SegmentDraft::new("A", 10)).unwrap();
        timeline.append(SegmentDraft::new("B", 20)).unwrap();
        let geometry = BarGeometry::new(100, 1160.0, 340.0);
        let commands = render_bar(&timeline, &ReorderEngine::new(), &geometry);
        let image = rasterize(&commands, 1160, 340);

        let a = timeline.segments()[0].color;
        let b = timeline.segments()[1].color;
        assert_eq!(*image.get_pixel(130, 170), rgba(a));
        assert_eq!(*image.get_pixel(250, 170), rgba(b));
        // Past the last segment the empty bar track shows through.
        assert_eq!(*image.get_pixel(700, 170), Rgba([230, 235, 245, 255]));
    }

    #[test]
    fn test_translucent_guides_blend() {
        let commands = vec![
            DrawCommand::Fill {
                rect: Rect::new(0.0, 0.0, 10.0, 20.0),
                color: Color::rgb(255, 255, 255),
            },
            DrawCommand::GuideLine {
                x: 5.0,
                y1: 0.0,
                y2: 19.0,
                color: Color::rgba(0, 0, 0, 128),
            },
        ];
        let image = rasterize(&commands, 10, 20);
        let dash = image.get_pixel(5, 1);
        assert!(dash[0] > 100 && dash[0] < 150);
        assert_eq!(dash[3], 255);
        assert_eq!(*image.get_pixel(5, 6), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_labels_are_drawn_inside_their_rect() {
        let label = Rect::new(20.0, 10.0, 160.0, 18.0);
        let commands = vec![
            DrawCommand::Fill {
                rect: Rect::new(0.0, 0.0, 200.0, 40.0),
                color: Color::rgb(255, 255, 255),
            },
            DrawCommand::Label {
                rect: label,
                text: "Rondo (20 min)".to_string(),
                color: Color::rgb(0, 0, 0),
                size_pt: 8.0,
            },
        ];
        let image = rasterize(&commands, 200, 40);
        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked
            .iter()
            .all(|&(x, y)| label.contains(f64::from(x), f64::from(y))));
        // Centered: ink on both sides of the middle.
        assert!(inked.iter().any(|&(x, _)| x < 100) && inked.iter().any(|&(x, _)| x > 100));
    }

    #[test]
    fn test_long_labels_are_elided() {
        let font = label_font().unwrap();
        let scale = label_scale(8.0);
        assert_eq!(fit_label(&font, scale, "A (5 min)", 200.0).as_deref(), Some("A (5 min)"));

        let fitted = fit_label(&font, scale, "Positional play in three zones (45 min)", 60.0).unwrap();
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(f64::from(text_size(scale, &font, &fitted).0) <= 60.0);
        assert_eq!(fit_label(&font, scale, "Rondo", 1.0), None);
    }

    #[test]
    fn test_write_png() {
        let labels = Arc::new(Translator::with_dir("en-us", "en-us", None));
        let mut session = EditorSession::new("Plan", 60, Arc::new(AppSettings::default()), labels).unwrap();
        session.add_segment(SegmentDraft::new("A", 30)).unwrap();
        session.zoom_out();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.png");
        write_png(&path, &session).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1170, 306));
    }
}
