/// Rasterizer: paints a certificate display list onto a tiny-skia surface

use std::f32::consts::PI;

use log::error;
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect, Shader,
    SpreadMode, Stroke, Transform,
};

use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use super::paint::{PaintCommand, Rgb};
use super::text;
use crate::{Error, Result, MAX_SCALE};

/// Largest surface the rasterizer will allocate: the canvas at [`MAX_SCALE`].
pub const MAX_SURFACE_PIXELS: u64 =
    (CANVAS_WIDTH * MAX_SCALE) as u64 * (CANVAS_HEIGHT * MAX_SCALE) as u64;

/// Pixel size of the surface for a given scale factor.
pub fn surface_size(scale: f32) -> (u32, u32) {
    let w = (CANVAS_WIDTH * scale).round();
    let h = (CANVAS_HEIGHT * scale).round();
    if !w.is_finite() || !h.is_finite() || w < 0.0 || h < 0.0 {
        return (0, 0);
    }
    (w as u32, h as u32)
}

/// Fails before anything is painted, for empty surfaces and for anything
/// over [`MAX_SURFACE_PIXELS`].
fn acquire_surface(scale: f32) -> Result<Pixmap> {
    let (width, height) = surface_size(scale);
    if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
        error!(
            "refusing {}x{} raster surface (budget {} pixels)",
            width, height, MAX_SURFACE_PIXELS
        );
        return Err(Error::SurfaceUnavailable { width, height });
    }
    Pixmap::new(width, height).ok_or_else(|| {
        error!("cannot acquire {}x{} raster surface", width, height);
        Error::SurfaceUnavailable { width, height }
    })
}

fn solid(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke { width, ..Default::default() }
}

fn star_path(cx: f32, cy: f32, outer: f32, inner: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for i in 0..10 {
        let r = if i % 2 == 0 { outer } else { inner };
        // first point straight up
        let angle = -PI / 2.0 + i as f32 * PI / 5.0;
        let (x, y) = (cx + r * angle.cos(), cy + r * angle.sin());
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

fn paint_command(pixmap: &mut Pixmap, cmd: &PaintCommand, base: Transform) {
    match cmd {
        PaintCommand::VerticalGradient { top, bottom } => {
            let shader = LinearGradient::new(
                Point::from_xy(0.0, 0.0),
                Point::from_xy(0.0, CANVAS_HEIGHT),
                vec![GradientStop::new(0.0, top.to_skia()), GradientStop::new(1.0, bottom.to_skia())],
                SpreadMode::Pad,
                Transform::identity(),
            )
            .unwrap_or_else(|| Shader::SolidColor(top.to_skia()));
            let paint = Paint { shader, ..Default::default() };
            if let Some(rect) = Rect::from_xywh(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT) {
                pixmap.fill_rect(rect, &paint, base, None);
            }
        }
        PaintCommand::StrokeRect { x, y, width, height, line_width, color } => {
            if let Some(rect) = Rect::from_xywh(*x, *y, *width, *height) {
                let path = PathBuilder::from_rect(rect);
                pixmap.stroke_path(&path, &solid(*color), &stroke(*line_width), base, None);
            }
        }
        PaintCommand::Line { x0, y0, x1, y1, line_width, color } => {
            let mut pb = PathBuilder::new();
            pb.move_to(*x0, *y0);
            pb.line_to(*x1, *y1);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &solid(*color), &stroke(*line_width), base, None);
            }
        }
        PaintCommand::StrokeCircle { cx, cy, radius, line_width, color } => {
            if let Some(path) = PathBuilder::from_circle(*cx, *cy, *radius) {
                pixmap.stroke_path(&path, &solid(*color), &stroke(*line_width), base, None);
            }
        }
        PaintCommand::Star { cx, cy, outer_radius, inner_radius, color } => {
            if let Some(path) = star_path(*cx, *cy, *outer_radius, *inner_radius) {
                pixmap.fill_path(&path, &solid(*color), FillRule::Winding, base, None);
            }
        }
        PaintCommand::Text { x, y, text: run, font, align, color } => {
            if let Some(path) = text::glyph_path(run, font, *x, *y, *align) {
                pixmap.fill_path(&path, &solid(*color), FillRule::Winding, base, None);
            }
        }
    }
}

/// Paint `commands` in order onto a fresh surface scaled by `scale`.
pub fn rasterize(commands: &[PaintCommand], scale: f32) -> Result<Pixmap> {
    let mut pixmap = acquire_surface(scale)?;
    let base = Transform::from_scale(scale, scale);
    for cmd in commands {
        paint_command(&mut pixmap, cmd, base);
    }
    Ok(pixmap)
}
