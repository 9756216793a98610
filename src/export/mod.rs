pub mod pdf;

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use inspect_report_common::GeneratedPdf;

use crate::config::Config;
use crate::error::Result;

lazy_static! {
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\-]+").unwrap();
}

/// Disk-safe artifact name for a client: `Reporte_{client}.pdf` with
/// anything outside `[A-Za-z0-9_-]` collapsed to underscores.
pub fn artifact_file_name(client: &str) -> String {
    let stem = UNSAFE_FILE_CHARS.replace_all(client.trim(), "_");
    let stem = stem.trim_matches('_');

    if stem.is_empty() {
        "Reporte_informe.pdf".to_string()
    } else {
        format!("Reporte_{}.pdf", stem)
    }
}

/// Where to write the artifact: an explicit file path wins, an explicit
/// directory gets the artifact name, otherwise the configured output
/// directory (or the current one).
pub fn resolve_output_path(output: Option<&Path>, config: &Config, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => config
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(file_name),
    }
}

pub fn write_pdf(path: &Path, pdf: &GeneratedPdf) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &pdf.bytes)?;
    Ok(())
}
