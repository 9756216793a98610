//! Document renderer seam.

use crate::error::Result;
use crate::types::{GeneratedPdf, InspectionReport};

/// Renders one report into a PDF. Implementations must be pure in the
/// report: equal reports yield identical bytes.
pub trait ReportRenderer {
    fn render(&self, report: &InspectionReport) -> Result<GeneratedPdf>;
}
