/// Paint command set for the certificate display list

use std::fmt;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const PRIMARY: Rgb = Rgb(0x25, 0x63, 0xeb);
    pub const PRIMARY_DARK: Rgb = Rgb(0x1e, 0x40, 0xaf);
    pub const ACCENT: Rgb = Rgb(0x06, 0xb6, 0xd4);
    pub const BODY: Rgb = Rgb(0x37, 0x41, 0x51);
    pub const MUTED: Rgb = Rgb(0x6b, 0x72, 0x80);
    pub const BACKGROUND_TOP: Rgb = Rgb(0xf8, 0xfa, 0xff);
    pub const BACKGROUND_BOTTOM: Rgb = Rgb(0xf0, 0xf9, 0xff);

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.0, self.1, self.2, 255)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Typeface family. Serif is the certificate face; sans is only used for
/// small print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Family {
    #[default]
    Serif,
    Sans,
}

/// Font request for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: Family,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self { family: Family::Serif, size, bold: false, italic: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { family: Family::Serif, size, bold: true, italic: false }
    }

    pub const fn italic(size: f32) -> Self {
        Self { family: Family::Serif, size, bold: false, italic: true }
    }

    pub const fn sans(self) -> Self {
        Self { family: Family::Sans, ..self }
    }
}

/// One drawing operation in logical (unscaled) canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole canvas with a top-to-bottom two-stop gradient
    VerticalGradient { top: Rgb, bottom: Rgb },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Rgb,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        line_width: f32,
        color: Rgb,
    },
    StrokeCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        line_width: f32,
        color: Rgb,
    },
    /// Filled five-point star
    Star {
        cx: f32,
        cy: f32,
        outer_radius: f32,
        inner_radius: f32,
        color: Rgb,
    },
    /// Text run; `y` is the baseline
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        align: Align,
        color: Rgb,
    },
}

impl PaintCommand {
    pub fn text(&self) -> Option<&str> {
        match self {
            PaintCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        })
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family {
            Family::Serif => "serif",
            Family::Sans => "sans",
        };
        let style = match (self.bold, self.italic) {
            (false, false) => "regular",
            (true, false) => "bold",
            (false, true) => "italic",
            (true, true) => "bold-italic",
        };
        write!(f, "{} {} {:.2}", family, style, self.size)
    }
}

/// One line per command, coordinates to two decimals. Golden tests hash
/// this text.
impl fmt::Display for PaintCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintCommand::VerticalGradient { top, bottom } => write!(f, "gradient {} {}", top, bottom),
            PaintCommand::StrokeRect { x, y, width, height, line_width, color } => write!(
                f,
                "rect {:.2} {:.2} {:.2} {:.2} w={:.2} {}",
                x, y, width, height, line_width, color
            ),
            PaintCommand::Line { x0, y0, x1, y1, line_width, color } => write!(
                f,
                "line {:.2} {:.2} {:.2} {:.2} w={:.2} {}",
                x0, y0, x1, y1, line_width, color
            ),
            PaintCommand::StrokeCircle { cx, cy, radius, line_width, color } => {
                write!(f, "circle {:.2} {:.2} r={:.2} w={:.2} {}", cx, cy, radius, line_width, color)
            }
            PaintCommand::Star { cx, cy, outer_radius, inner_radius, color } => write!(
                f,
                "star {:.2} {:.2} r={:.2}/{:.2} {}",
                cx, cy, outer_radius, inner_radius, color
            ),
            PaintCommand::Text { x, y, text, font, align, color } => {
                write!(f, "text {:.2} {:.2} {} {} {} {:?}", x, y, align, font, color, text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accessor_only_matches_text_runs() {
        let cmd = PaintCommand::Text {
            x: 0.0,
            y: 0.0,
            text: "CERTIFICATE".into(),
            font: Font::bold(48.0),
            align: Align::Center,
            color: Rgb::PRIMARY_DARK,
        };
        assert_eq!(cmd.text(), Some("CERTIFICATE"));

        let line = PaintCommand::Line {
            x0: 0.0,
            y0: 0.0,
            x1: 10.0,
            y1: 0.0,
            line_width: 1.0,
            color: Rgb::BODY,
        };
        assert_eq!(line.text(), None);
    }

    #[test]
    fn commands_print_one_line_each() {
        let title = PaintCommand::Text {
            x: 600.0,
            y: 180.0,
            text: "CERTIFICATE".into(),
            font: Font::bold(48.0),
            align: Align::Center,
            color: Rgb::PRIMARY_DARK,
        };
        assert_eq!(title.to_string(), r#"text 600.00 180.00 center serif bold 48.00 #1e40af "CERTIFICATE""#);

        let quoted = PaintCommand::Text {
            x: 1100.0,
            y: 700.0,
            text: "No \"1\"".into(),
            font: Font::regular(12.0).sans(),
            align: Align::Right,
            color: Rgb::MUTED,
        };
        assert_eq!(quoted.to_string(), r#"text 1100.00 700.00 right sans regular 12.00 #6b7280 "No \"1\"""#);

        let star = PaintCommand::Star { cx: 950.0, cy: 600.0, outer_radius: 14.0, inner_radius: 6.0, color: Rgb::PRIMARY };
        assert_eq!(star.to_string(), "star 950.00 600.00 r=14.00/6.00 #2563eb");
    }

    #[test]
    fn palette_converts_to_opaque_skia_colors() {
        let c = Rgb::ACCENT.to_skia().to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0x06, 0xb6, 0xd4, 255));
    }
}
