//! certgen
//!
//! Renders course certificates (student, course, instructor, date, type) onto
//! a fixed 1200x800 canvas and exports them as PNG.
//!
//! # Features
//!
//! - **Deterministic layout**: a record becomes an ordered display list that
//!   can be inspected before or after rasterization
//! - **Scalable output**: one scale factor for both axes keeps the 3:2 ratio
//! - **Pluggable export**: write into a directory or produce a data URL
//!
//! # Example
//!
//! ```no_run
//! use certgen::{CertificateConfig, CertificateGenerator, CertificateRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CertificateConfig {
//!     scale: 2.0,
//!     output_dir: "out".into(),
//!     ..Default::default()
//! };
//!
//! let generator = CertificateGenerator::new(config)?;
//! let record = CertificateRecord::new("Jane Doe", "Cloud Computing Fundamentals")
//!     .with_instructor("Dr. Smith");
//! let path = generator.generate_to_dir(&record)?;
//! println!("Saved: {}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod export;
pub mod record;
pub mod rendering;

pub use export::{download_file_name, DirectoryExporter, Exporter};
pub use record::{CertificateKind, CertificateRecord};
pub use rendering::{FixedSerial, RasterImage, Renderer, SerialSource, TimestampSerial};

/// Largest accepted scale factor (9600x6400 pixels).
pub const MAX_SCALE: f32 = 8.0;

/// Configuration for certificate generation
///
/// Every field has a default, so a JSON config file may set any subset.
///
/// # Examples
///
/// ```
/// let cfg = certgen::CertificateConfig::default();
/// assert_eq!(cfg.scale, 1.0);
/// assert!(cfg.serial.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateConfig {
    /// Output scale; 1.0 is 1200x800
    pub scale: f32,
    /// Artificial delay before rendering, in milliseconds (0 => none)
    pub generation_delay_ms: u64,
    /// Directory used by `generate_to_dir`
    pub output_dir: PathBuf,
    /// Fixed serial number; `None` derives one from the clock
    pub serial: Option<u32>,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            generation_delay_ms: 0,
            output_dir: PathBuf::from("."),
            serial: None,
        }
    }
}

impl CertificateConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::ConfigError(format!("scale must be positive, got {}", self.scale)));
        }
        if self.scale > MAX_SCALE {
            return Err(Error::ConfigError(format!(
                "scale {} exceeds maximum of {}",
                self.scale, MAX_SCALE
            )));
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Validates records, renders them and hands them to an exporter.
pub struct CertificateGenerator {
    config: CertificateConfig,
    renderer: Renderer,
}

impl CertificateGenerator {
    pub fn new(config: CertificateConfig) -> Result<Self> {
        config.validate()?;
        let serial: Box<dyn SerialSource> = match config.serial {
            Some(n) => Box::new(FixedSerial(n)),
            None => Box::new(TimestampSerial),
        };
        let renderer = Renderer::with_serial(config.scale, serial);
        Ok(Self { config, renderer })
    }

    pub fn config(&self) -> &CertificateConfig {
        &self.config
    }

    /// Validate and render. Invalid records never reach the renderer.
    pub fn generate(&self, record: &CertificateRecord) -> Result<RasterImage> {
        record.validate()?;
        if self.config.generation_delay_ms > 0 {
            debug!("delaying generation by {}ms", self.config.generation_delay_ms);
            std::thread::sleep(Duration::from_millis(self.config.generation_delay_ms));
        }
        self.renderer.render(record)
    }

    /// Generate and export under the derived download file name.
    pub fn generate_and_export(&self, record: &CertificateRecord, exporter: &dyn Exporter) -> Result<PathBuf> {
        let image = self.generate(record)?;
        exporter.export(&image, &download_file_name(&record.student_name))
    }

    /// Generate and write into the configured output directory.
    pub fn generate_to_dir(&self, record: &CertificateRecord) -> Result<PathBuf> {
        let exporter = DirectoryExporter::new(self.config.output_dir.clone());
        self.generate_and_export(record, &exporter)
    }
}
