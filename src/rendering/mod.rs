//! Certificate rendering: layout -> display list -> pixels -> PNG

pub mod layout;
pub mod paint;
pub mod raster;
pub mod text;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use sha2::{Digest, Sha256};
use tiny_skia::Pixmap;

use crate::{CertificateRecord, Error, Result};
use paint::PaintCommand;

/// Where the six-digit serial suffix comes from.
pub trait SerialSource {
    fn next_serial(&self) -> u32;
}

/// Low-order digits of the current Unix time in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampSerial;

impl SerialSource for TimestampSerial {
    fn next_serial(&self) -> u32 {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        (millis % 1_000_000) as u32
    }
}

/// Always the same serial; makes output reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedSerial(pub u32);

impl SerialSource for FixedSerial {
    fn next_serial(&self) -> u32 {
        self.0 % 1_000_000
    }
}

/// A rendered certificate: the pixels plus the display list that produced them.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
    commands: Vec<PaintCommand>,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Display list in paint order.
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Every string drawn onto the image, in paint order.
    pub fn text_runs(&self) -> Vec<&str> {
        self.commands.iter().filter_map(|c| c.text()).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().iter().any(|t| *t == needle)
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::EncodeError(e.to_string()))
    }

    /// `data:image/png;base64,...` form of the PNG.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    /// Hex SHA-256 of the raw pixel buffer.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.pixmap.data()))
    }

    /// The display list as text, one command per line.
    pub fn display_list(&self) -> String {
        self.commands.iter().map(|c| format!("{}\n", c)).collect()
    }

    /// Hex SHA-256 of [`display_list`](Self::display_list). Unlike
    /// [`fingerprint`](Self::fingerprint) it does not depend on scale or
    /// anti-aliasing, only on what was laid out where.
    pub fn layout_fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.display_list().as_bytes()))
    }
}

/// Renders certificate records at a fixed scale.
pub struct Renderer {
    scale: f32,
    serial: Box<dyn SerialSource>,
}

impl Renderer {
    pub fn new(scale: f32) -> Self {
        Self::with_serial(scale, Box::new(TimestampSerial))
    }

    pub fn with_serial(scale: f32, serial: Box<dyn SerialSource>) -> Self {
        Self { scale, serial }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Paint one certificate.
    ///
    /// The record is assumed valid; see [`CertificateRecord::validate`].
    /// Fails only when the surface cannot be allocated, in which case nothing
    /// is drawn.
    pub fn render(&self, record: &CertificateRecord) -> Result<RasterImage> {
        let commands = layout::layout_certificate(record, self.serial.next_serial());
        let pixmap = raster::rasterize(&commands, self.scale)?;
        debug!(
            "rendered certificate for {:?}: {}x{}, {} paint commands",
            record.student_name,
            pixmap.width(),
            pixmap.height(),
            commands.len()
        );
        Ok(RasterImage { pixmap, commands })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_serial_wraps_to_six_digits() {
        assert_eq!(FixedSerial(1_000_042).next_serial(), 42);
        assert!(TimestampSerial.next_serial() < 1_000_000);
    }

    #[test]
    fn render_returns_image_and_display_list() {
        let r = Renderer::with_serial(0.5, Box::new(FixedSerial(123456)));
        let img = r
            .render(&CertificateRecord::new("Jane Doe", "Rust").with_date("2024-01-15"))
            .unwrap();
        assert_eq!((img.width(), img.height()), (600, 400));
        assert!(img.contains_text("Certificate No: CERT-123456"));
    }

    #[test]
    fn layout_fingerprint_ignores_scale() {
        let rec = CertificateRecord::new("Jane Doe", "Rust").with_date("2024-01-15");
        let small = Renderer::with_serial(0.25, Box::new(FixedSerial(9))).render(&rec).unwrap();
        let large = Renderer::with_serial(0.5, Box::new(FixedSerial(9))).render(&rec).unwrap();
        assert_ne!(small.fingerprint(), large.fingerprint());
        assert_eq!(small.layout_fingerprint(), large.layout_fingerprint());
        assert_eq!(small.display_list().lines().count(), small.commands().len());
        assert!(small.display_list().starts_with("gradient #f8faff #f0f9ff\n"));
    }

    #[test]
    fn data_url_wraps_png() {
        let r = Renderer::with_serial(0.25, Box::new(FixedSerial(1)));
        let img = r.render(&CertificateRecord::new("A", "B")).unwrap();
        let url = img.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn zero_scale_signals_surface_failure() {
        let r = Renderer::with_serial(0.0, Box::new(FixedSerial(1)));
        let err = r.render(&CertificateRecord::new("A", "B")).unwrap_err();
        assert!(matches!(err, Error::SurfaceUnavailable { .. }));
    }
}
