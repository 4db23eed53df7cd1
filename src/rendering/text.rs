//! Text against the bundled DejaVu faces.
//!
//! A run is laid out left to right from the face's advance widths plus its
//! kerning pairs. [`measure`] and [`glyph_path`] walk the same caret, so the
//! measured width is exactly how far the pen travels while painting.

use std::sync::OnceLock;

use rusttype::{Font as Face, GlyphId, OutlineBuilder, Scale};
use tiny_skia::PathBuilder;

use super::paint::{Align, Family, Font};

static SERIF_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");
static SERIF_BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf");
static SERIF_ITALIC_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Italic.ttf");
static SANS_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

fn load(slot: &'static OnceLock<Face<'static>>, data: &'static [u8]) -> &'static Face<'static> {
    slot.get_or_init(|| Face::try_from_bytes(data).expect("bundled font is a valid TrueType file"))
}

/// Face used for a request. There is no bold italic face; bold wins.
/// Sans requests always get the regular sans face.
pub fn face(font: &Font) -> &'static Face<'static> {
    static SERIF: OnceLock<Face<'static>> = OnceLock::new();
    static SERIF_BOLD: OnceLock<Face<'static>> = OnceLock::new();
    static SERIF_ITALIC: OnceLock<Face<'static>> = OnceLock::new();
    static SANS: OnceLock<Face<'static>> = OnceLock::new();

    match (font.family, font.bold, font.italic) {
        (Family::Sans, _, _) => load(&SANS, SANS_TTF),
        (Family::Serif, true, _) => load(&SERIF_BOLD, SERIF_BOLD_TTF),
        (Family::Serif, false, true) => load(&SERIF_ITALIC, SERIF_ITALIC_TTF),
        (Family::Serif, false, false) => load(&SERIF, SERIF_TTF),
    }
}

// rusttype sizes by ascent-to-descent height, the canvas sizes by em
fn scale_for(face: &Face<'_>, size: f32) -> Scale {
    let v = face.v_metrics_unscaled();
    Scale::uniform(size * (v.ascent - v.descent) / f32::from(face.units_per_em()))
}

/// Glyphs of a run with their pen offsets, and the total advance.
fn layout_run(face: &Face<'static>, text: &str, scale: Scale) -> (Vec<(GlyphId, f32)>, f32) {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        // unmapped chars get the face's .notdef box
        let glyph = face.glyph(c);
        let id = glyph.id();
        if let Some(prev) = prev {
            caret += face.pair_kerning(scale, prev, id);
        }
        glyphs.push((id, caret));
        caret += glyph.scaled(scale).h_metrics().advance_width;
        prev = Some(id);
    }
    (glyphs, caret)
}

/// Rendered width of `text` in logical units: the sum of the glyph advances
/// and kerning adjustments.
pub fn measure(text: &str, font: &Font) -> f32 {
    if font.size.is_nan() || font.size <= 0.0 {
        return 0.0;
    }
    let face = face(font);
    layout_run(face, text, scale_for(face, font.size)).1
}

fn anchor(x: f32, width: f32, align: Align) -> f32 {
    match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    }
}

/// Left edge of a run anchored at `x` with the given alignment.
pub fn origin_x(text: &str, font: &Font, x: f32, align: Align) -> f32 {
    anchor(x, measure(text, font), align)
}

/// Feeds rusttype outlines (already scaled, y down, origin on the baseline)
/// into a tiny-skia path at the current pen position.
struct GlyphPathBuilder {
    path_builder: PathBuilder,
    x: f32,
    y: f32,
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path_builder.move_to(self.x + x, self.y + y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path_builder.line_to(self.x + x, self.y + y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path_builder.quad_to(self.x + x1, self.y + y1, self.x + x, self.y + y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path_builder.cubic_to(
            self.x + x1,
            self.y + y1,
            self.x + x2,
            self.y + y2,
            self.x + x,
            self.y + y,
        );
    }

    fn close(&mut self) {
        self.path_builder.close();
    }
}

/// Outline path of the whole run, ready for a winding fill.
///
/// Returns `None` when the run has no ink (empty or all-space text).
pub fn glyph_path(text: &str, font: &Font, x: f32, baseline: f32, align: Align) -> Option<tiny_skia::Path> {
    if font.size.is_nan() || font.size <= 0.0 {
        return None;
    }
    let face = face(font);
    let scale = scale_for(face, font.size);
    let (glyphs, width) = layout_run(face, text, scale);
    let left = anchor(x, width, align);

    let mut builder = GlyphPathBuilder { path_builder: PathBuilder::new(), x: left, y: baseline };
    for (id, offset) in glyphs {
        builder.x = left + offset;
        face.glyph(id).scaled(scale).build_outline(&mut builder);
    }
    builder.path_builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn measure_sums_real_advances() {
        // DejaVu Serif Bold advances, 2048 units/em:
        // J 969 + a 1327 + n 1489 + e 1303 + space 713 + D 1776 + o 1366 + e 1303
        assert!(close(measure("Jane Doe", &Font::bold(36.0)), 180.10547));
        assert_eq!(measure("", &Font::regular(20.0)), 0.0);
    }

    #[test]
    fn measure_applies_kerning() {
        let f = Font::regular(20.0);
        let pair = measure("AV", &f);
        assert!(pair < measure("A", &f) + measure("V", &f) - 0.5);
    }

    #[test]
    fn measure_scales_with_size() {
        let small = measure("Certificate", &Font::regular(10.0));
        let large = measure("Certificate", &Font::regular(40.0));
        assert!(close(large, small * 4.0));
    }

    #[test]
    fn faces_follow_the_request() {
        let regular = Font::regular(20.0);
        assert!(measure("Jane Doe", &Font::bold(20.0)) > measure("Jane Doe", &regular));
        assert!(!std::ptr::eq(face(&regular), face(&Font::italic(20.0))));
        assert!(!std::ptr::eq(face(&regular), face(&regular.sans())));
        assert!(std::ptr::eq(face(&Font::bold(20.0)), face(&Font { italic: true, ..Font::bold(20.0) })));
    }

    #[test]
    fn alignment_anchors() {
        let f = Font::regular(10.0);
        let w = measure("abcd", &f);
        assert_eq!(origin_x("abcd", &f, 100.0, Align::Left), 100.0);
        assert!(close(origin_x("abcd", &f, 100.0, Align::Center), 100.0 - w / 2.0));
        assert!(close(origin_x("abcd", &f, 100.0, Align::Right), 100.0 - w));
    }

    #[test]
    fn glyph_ink_stays_within_measured_box() {
        let f = Font::regular(20.0);
        let path = glyph_path("Hg", &f, 50.0, 100.0, Align::Left).unwrap();
        let b = path.bounds();
        assert!(b.left() >= 50.0);
        assert!(b.right() <= 50.0 + measure("Hg", &f));
        // descender reaches below the baseline, caps stay above
        assert!(b.top() < 100.0);
        assert!(b.bottom() > 100.0);
    }

    #[test]
    fn bold_ink_tracks_measured_width() {
        // only side bearings may poke past the advance box
        let f = Font::bold(36.0);
        for name in ["Al", "Jane Doe", "Alexandria Montgomery-Whitfield"] {
            let w = measure(name, &f);
            let b = glyph_path(name, &f, 600.0, 360.0, Align::Center).unwrap().bounds();
            let (left, right) = (600.0 - w / 2.0, 600.0 + w / 2.0);
            assert!(b.left() >= left - 3.0, "{}: ink starts at {} before {}", name, b.left(), left);
            assert!(b.right() <= right + 3.0, "{}: ink ends at {} past {}", name, b.right(), right);
            assert!(b.width() > w * 0.9, "{}: ink {} vs measure {}", name, b.width(), w);
        }
    }

    #[test]
    fn blank_text_has_no_ink() {
        assert!(glyph_path("   ", &Font::regular(20.0), 0.0, 10.0, Align::Left).is_none());
        assert!(glyph_path("", &Font::regular(20.0), 0.0, 10.0, Align::Left).is_none());
        assert!(measure("   ", &Font::regular(20.0)) > 0.0);
    }

    #[test]
    fn unmapped_chars_still_advance_and_ink() {
        let f = Font::regular(20.0);
        assert!(measure("\u{E000}", &f) > 0.0);
        assert!(glyph_path("\u{E000}", &f, 0.0, 20.0, Align::Left).is_some());
    }
}
