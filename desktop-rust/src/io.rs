use anyhow::{Context, Result};
use std::path::Path;

use inspect_report_common::{CameraDevice, CapturedImage, Error as FormError, GeneratedPdf};

/// Camera backed by the system file picker: every capture asks for one
/// image file; cancelling the dialog yields no frame.
#[derive(Debug, Default)]
pub struct DialogCamera;

impl CameraDevice for DialogCamera {
    fn get_frame(&mut self) -> inspect_report_common::Result<Option<CapturedImage>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Imágenes", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return Ok(None);
        };

        let bytes = std::fs::read(&path)
            .map_err(|e| FormError::Image(format!("{}: {}", path.display(), e)))?;
        Ok(Some(CapturedImage::from_bytes(bytes)))
    }
}

pub fn save_pdf(path: &Path, pdf: &GeneratedPdf) -> Result<()> {
    std::fs::write(path, &pdf.bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
