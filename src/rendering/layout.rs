/// Certificate layout: turns a record into an ordered display list
///
/// All coordinates are in the fixed 1200x800 logical canvas. The rasterizer
/// scales them uniformly.

use log::warn;

use super::paint::{Align, Font, PaintCommand, Rgb};
use super::text;
use crate::CertificateRecord;

pub const CANVAS_WIDTH: f32 = 1200.0;
pub const CANVAS_HEIGHT: f32 = 800.0;
const CENTER_X: f32 = CANVAS_WIDTH / 2.0;

pub const NAME_UNDERLINE_Y: f32 = 375.0;
pub const SEAL_CENTER: (f32, f32) = (950.0, 600.0);
const SEAL_RADIUS: f32 = 50.0;

pub const INVALID_DATE: &str = "Invalid Date";

/// Long-form en-US date (`January 15, 2024`), or `Invalid Date`.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; a timestamp contributes the
/// calendar date as written, without converting time zones.
pub fn format_completion_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => {
            warn!("unparseable completion date {:?}; rendering fallback", raw);
            INVALID_DATE.to_string()
        }
    }
}

/// `Certificate No: CERT-NNNNNN` with the low six digits of `serial`.
pub fn serial_text(serial: u32) -> String {
    format!("Certificate No: CERT-{:06}", serial % 1_000_000)
}

fn centered(y: f32, text: impl Into<String>, font: Font, color: Rgb) -> PaintCommand {
    PaintCommand::Text {
        x: CENTER_X,
        y,
        text: text.into(),
        font,
        align: Align::Center,
        color,
    }
}

fn line(x0: f32, y0: f32, x1: f32, y1: f32, line_width: f32, color: Rgb) -> PaintCommand {
    PaintCommand::Line { x0, y0, x1, y1, line_width, color }
}

fn inset_rect(inset: f32, line_width: f32, color: Rgb) -> PaintCommand {
    PaintCommand::StrokeRect {
        x: inset,
        y: inset,
        width: CANVAS_WIDTH - inset * 2.0,
        height: CANVAS_HEIGHT - inset * 2.0,
        line_width,
        color,
    }
}

/// Lay out one certificate. The order of the returned commands is the paint order.
pub fn layout_certificate(record: &CertificateRecord, serial: u32) -> Vec<PaintCommand> {
    let mut cmds = Vec::with_capacity(24);

    cmds.push(PaintCommand::VerticalGradient {
        top: Rgb::BACKGROUND_TOP,
        bottom: Rgb::BACKGROUND_BOTTOM,
    });
    cmds.push(inset_rect(40.0, 8.0, Rgb::PRIMARY));
    cmds.push(inset_rect(60.0, 2.0, Rgb::ACCENT));

    cmds.push(centered(180.0, "CERTIFICATE", Font::bold(48.0), Rgb::PRIMARY_DARK));

    if !record.certificate_type.is_known() {
        warn!("unrecognized certificate type {:?}; rendering literally", record.certificate_type.as_str());
    }
    cmds.push(centered(
        220.0,
        format!("OF {}", record.certificate_type.label()),
        Font::regular(24.0),
        Rgb::ACCENT,
    ));

    cmds.push(line(300.0, 250.0, 900.0, 250.0, 3.0, Rgb::ACCENT));

    cmds.push(centered(300.0, "This is to certify that", Font::regular(20.0), Rgb::BODY));

    let name_font = Font::bold(36.0);
    cmds.push(centered(360.0, record.student_name.clone(), name_font, Rgb::PRIMARY_DARK));
    let name_width = text::measure(&record.student_name, &name_font);
    cmds.push(line(
        (CANVAS_WIDTH - name_width) / 2.0,
        NAME_UNDERLINE_Y,
        (CANVAS_WIDTH + name_width) / 2.0,
        NAME_UNDERLINE_Y,
        2.0,
        Rgb::PRIMARY_DARK,
    ));

    cmds.push(centered(420.0, "has successfully completed the course", Font::regular(20.0), Rgb::BODY));
    cmds.push(centered(470.0, record.course_name.clone(), Font::bold(28.0), Rgb::ACCENT));

    cmds.push(centered(
        530.0,
        format!("Completed on {}", format_completion_date(&record.completion_date)),
        Font::regular(18.0),
        Rgb::BODY,
    ));

    if record.has_instructor() {
        cmds.push(PaintCommand::Text {
            x: 200.0,
            y: 650.0,
            text: "Instructor:".into(),
            font: Font::regular(16.0),
            align: Align::Left,
            color: Rgb::BODY,
        });
        cmds.push(PaintCommand::Text {
            x: 200.0,
            y: 680.0,
            text: record.instructor_name.clone(),
            font: Font::italic(18.0),
            align: Align::Left,
            color: Rgb::PRIMARY_DARK,
        });
        cmds.push(line(200.0, 690.0, 400.0, 690.0, 1.0, Rgb::BODY));
    }

    cmds.push(PaintCommand::Text {
        x: CANVAS_WIDTH - 100.0,
        y: CANVAS_HEIGHT - 100.0,
        text: serial_text(serial),
        font: Font::regular(12.0).sans(),
        align: Align::Right,
        color: Rgb::MUTED,
    });

    let (cx, cy) = SEAL_CENTER;
    cmds.push(PaintCommand::StrokeCircle { cx, cy, radius: SEAL_RADIUS, line_width: 3.0, color: Rgb::PRIMARY });
    cmds.push(PaintCommand::StrokeCircle { cx, cy, radius: SEAL_RADIUS - 10.0, line_width: 2.0, color: Rgb::ACCENT });
    cmds.push(PaintCommand::Star { cx, cy, outer_radius: 14.0, inner_radius: 6.0, color: Rgb::PRIMARY });

    cmds
}
