//! Inspection Form Common Library
//!
//! Types, validation and the form state machine shared by the CLI
//! and the desktop app.

pub mod camera;
pub mod controller;
pub mod error;
pub mod layout;
pub mod render;
pub mod types;
pub mod validation;

pub use camera::{CameraDevice, QueueCamera};
pub use controller::{CaptureOutcome, FormController, FormPhase, History, HistoryEntry, MAX_PHOTOS};
pub use error::{Error, Result};
pub use layout::{photo_caption, pt_to_mm, PdfFieldLine, PdfLayout, REPORT_TITLE};
pub use render::ReportRenderer;
pub use types::{CapturedImage, GeneratedPdf, InspectionReport, PhotoEntry, ReportFields};
pub use validation::{
    field_value, find_field, validate, FieldKind, FieldSpec, ValidationErrors, FORM_FIELDS,
};
