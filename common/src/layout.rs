//! PDF layout shared by renderers.
//!
//! All measurements are in points; [`pt_to_mm`] converts at the
//! rendering-library boundary.

use crate::types::ReportFields;
use crate::validation::{field_value, FORM_FIELDS};

/// Document and page title.
pub const REPORT_TITLE: &str = "Informe de Inspección";

/// Layout constants for the report page (A4 portrait).
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub title_size_pt: f32,
    pub body_size_pt: f32,
    pub line_height_pt: f32,
    pub photo_width_pt: f32,
    pub photo_height_pt: f32,
    pub photo_margin_pt: f32,
}

impl PdfLayout {
    pub fn a4() -> Self {
        Self {
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            margin_pt: 20.0,
            title_size_pt: 18.0,
            body_size_pt: 11.0,
            line_height_pt: 16.0,
            photo_width_pt: 200.0,
            photo_height_pt: 150.0,
            photo_margin_pt: 10.0,
        }
    }

    /// Vertical room one photo needs: caption line, margins, image box.
    pub fn photo_block_height_pt(&self) -> f32 {
        self.line_height_pt + self.photo_height_pt + 2.0 * self.photo_margin_pt
    }

    /// Lowest usable y offset from the page top.
    pub fn content_bottom_pt(&self) -> f32 {
        self.page_height_pt - self.margin_pt
    }
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::a4()
    }
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// One `label: value` line of the field block.
#[derive(Debug, Clone)]
pub struct PdfFieldLine {
    pub label: &'static str,
    pub value: String,
}

impl PdfFieldLine {
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Field lines in registered order; blank values render as `-`.
pub fn build_field_lines(fields: &ReportFields) -> Vec<PdfFieldLine> {
    FORM_FIELDS
        .iter()
        .map(|spec| {
            let raw = field_value(fields, spec.name);
            PdfFieldLine {
                label: spec.label,
                value: if raw.is_empty() { "-".to_string() } else { raw },
            }
        })
        .collect()
}

/// Caption above each embedded photo.
pub fn photo_caption(index: usize, description: &str) -> String {
    format!("Foto {}: {}", index + 1, description)
}
