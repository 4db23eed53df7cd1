//! Image export: download file names and export sinks

use std::path::{Path, PathBuf};

use log::info;

use crate::rendering::RasterImage;
use crate::{Error, Result};

/// `certificate-<slug>.png`, where the slug is the student name with
/// whitespace runs (and path separators) collapsed to `-`, lowercased.
///
/// ```
/// assert_eq!(certgen::export::download_file_name("Jane  Doe"), "certificate-jane-doe.png");
/// ```
pub fn download_file_name(student_name: &str) -> String {
    let mut slug = String::with_capacity(student_name.len());
    let mut in_gap = false;
    for c in student_name.chars() {
        if c.is_whitespace() {
            if !in_gap {
                slug.push('-');
            }
            in_gap = true;
            continue;
        }
        in_gap = false;
        if c == '/' || c == '\\' {
            slug.push('-');
        } else {
            slug.extend(c.to_lowercase());
        }
    }
    format!("certificate-{}.png", slug)
}

/// Something that takes a finished image and saves it.
pub trait Exporter {
    /// Save `image` as PNG under `suggested_file_name`. Returns where it went.
    fn export(&self, image: &RasterImage, suggested_file_name: &str) -> Result<PathBuf>;
}

/// Writes PNG files into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirectoryExporter {
    fn export(&self, image: &RasterImage, suggested_file_name: &str) -> Result<PathBuf> {
        let name = Path::new(suggested_file_name);
        // exactly one normal component: no directories, no `..`
        let mut components = name.components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => {}
            _ => {
                return Err(Error::ExportError(format!(
                    "not a plain file name: {:?}",
                    suggested_file_name
                )))
            }
        }

        let png = image.encode_png()?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, &png)?;
        info!("exported {} bytes to {}", png.len(), path.display());
        Ok(path)
    }
}
