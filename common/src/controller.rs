//! Inspection form state machine.
//!
//! [`FormController`] owns all mutable form state and drives the
//! capture → describe → confirm → submit flow. Submission is two-phase
//! ([`FormController::begin_submit`] / [`FormController::complete_submit`])
//! so a UI can render the PDF off-thread while the controller stays
//! non-reentrant behind an explicit pending flag.

use crate::camera::CameraDevice;
use crate::error::{Error, Result};
use crate::render::ReportRenderer;
use crate::types::{GeneratedPdf, InspectionReport, PhotoEntry, ReportFields};
use crate::validation::{self, ValidationErrors};

/// Photo capacity per report.
pub const MAX_PHOTOS: usize = 5;

/// Default bound on retained history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Inline message for a rejected photo confirmation.
pub const CONFIRM_MESSAGE: &str =
    "Captura una foto y escribe una descripción antes de continuar";

/// Primary form phases. Camera visibility is an orthogonal flag, not
/// part of this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Filling,
    Submittable,
    Submitting,
}

/// Outcome of one shutter actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured,
    /// The device produced no frame; nothing was appended.
    NoFrame,
}

/// One finalized report in the session history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub client: String,
    pub reference: String,
    pub file_name: String,
    pub pdf: GeneratedPdf,
}

/// Session-lifetime list of finalized reports. Bounded: pushing past
/// the limit evicts the oldest entry, which revokes its PDF buffer.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        while self.entries.len() > self.limit {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every retained PDF buffer. Called on app teardown.
    pub fn revoke_all(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

/// Owns field values, the photo sequence, the current photo index, the
/// camera flag and the report history.
#[derive(Debug)]
pub struct FormController {
    pub fields: ReportFields,
    photos: Vec<PhotoEntry>,
    current_photo: usize,
    camera_active: bool,
    submitting: bool,
    errors: ValidationErrors,
    banner: Option<String>,
    history: History,
}

impl FormController {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            fields: ReportFields::default(),
            photos: Vec::new(),
            current_photo: 0,
            camera_active: false,
            submitting: false,
            errors: ValidationErrors::default(),
            banner: None,
            history: History::with_limit(limit),
        }
    }

    pub fn photos(&self) -> &[PhotoEntry] {
        &self.photos
    }

    pub fn current_photo(&self) -> usize {
        self.current_photo
    }

    pub fn camera_active(&self) -> bool {
        self.camera_active
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn revoke_history(&mut self) {
        self.history.revoke_all();
    }

    pub fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else if self.fields == ReportFields::default() && self.photos.is_empty() {
            FormPhase::Empty
        } else if validation::validate(&self.fields).is_empty() {
            FormPhase::Submittable
        } else {
            FormPhase::Filling
        }
    }

    /// No effect if the camera is already active.
    pub fn activate_camera(&mut self) {
        self.camera_active = true;
    }

    /// Read one frame from the device and append it as a new photo with
    /// an empty description. The capacity check lives here, not only in
    /// the UI affordance.
    pub fn capture_photo(&mut self, camera: &mut dyn CameraDevice) -> Result<CaptureOutcome> {
        if !self.camera_active {
            return Err(Error::CameraInactive);
        }
        if self.photos.len() >= MAX_PHOTOS {
            return Err(Error::PhotoLimit);
        }

        match camera.get_frame()? {
            Some(image) => {
                self.photos.push(PhotoEntry {
                    image,
                    description: String::new(),
                });
                Ok(CaptureOutcome::Captured)
            }
            None => Ok(CaptureOutcome::NoFrame),
        }
    }

    pub fn set_description(&mut self, index: usize, text: &str) -> Result<()> {
        let entry = self
            .photos
            .get_mut(index)
            .ok_or(Error::PhotoIndex(index))?;
        entry.description = text.to_string();
        Ok(())
    }

    /// Mutable description slot for UI text bindings.
    pub fn description_mut(&mut self, index: usize) -> Option<&mut String> {
        self.photos.get_mut(index).map(|entry| &mut entry.description)
    }

    /// Whether the confirm affordance should be offered: one freshly
    /// captured photo pending and capacity not yet reached.
    pub fn can_confirm(&self) -> bool {
        self.current_photo < MAX_PHOTOS && self.photos.len() == self.current_photo + 1
    }

    /// Advance to the next photo slot. Fails, with no state change
    /// beyond the inline message, unless the photo at the current index
    /// has both an image and a description.
    pub fn confirm_photo(&mut self) -> Result<()> {
        let ready = self.current_photo < MAX_PHOTOS
            && self
                .photos
                .get(self.current_photo)
                .map(PhotoEntry::is_complete)
                .unwrap_or(false);

        if !ready {
            self.banner = Some(CONFIRM_MESSAGE.to_string());
            return Err(Error::IncompletePhoto);
        }

        self.banner = None;
        self.current_photo += 1;
        Ok(())
    }

    /// Remove the photo at `index`; later entries shift down one slot
    /// with their descriptions attached.
    pub fn delete_photo(&mut self, index: usize) -> Result<()> {
        if index >= self.photos.len() {
            return Err(Error::PhotoIndex(index));
        }
        self.photos.remove(index);
        self.current_photo = self.current_photo.saturating_sub(1);
        Ok(())
    }

    /// Re-run field validation, refreshing the inline messages.
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate(&self.fields);
        self.errors.is_empty()
    }

    /// First half of a submission: validate and freeze the report.
    /// On a validation failure the inline messages are the only state
    /// change. While a submission is pending, further submits fail.
    pub fn begin_submit(&mut self) -> Result<InspectionReport> {
        if self.submitting {
            return Err(Error::SubmitInFlight);
        }

        self.banner = None;
        if !self.validate() {
            return Err(Error::Validation);
        }

        self.submitting = true;
        Ok(InspectionReport {
            fields: self.fields.clone(),
            photos: self.confirmed_photos(),
        })
    }

    /// Second half: record the artifact and reset the form to empty.
    /// Returns the artifact file name.
    pub fn complete_submit(&mut self, report: &InspectionReport, pdf: GeneratedPdf) -> String {
        let file_name = download_name(&report.fields.client);
        self.history.push(HistoryEntry {
            client: report.fields.client.clone(),
            reference: report.fields.reference.clone(),
            file_name: file_name.clone(),
            pdf,
        });
        self.reset();
        self.submitting = false;
        file_name
    }

    /// Renderer failure path: keep the form intact for a retry and
    /// surface a recoverable banner.
    pub fn abort_submit(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.banner = Some(message.into());
    }

    /// Synchronous submission for the CLI and tests.
    pub fn submit(&mut self, renderer: &dyn ReportRenderer) -> Result<String> {
        let report = self.begin_submit()?;
        match renderer.render(&report) {
            Ok(pdf) => Ok(self.complete_submit(&report, pdf)),
            Err(err) => {
                self.abort_submit(err.to_string());
                Err(err)
            }
        }
    }

    /// Back to `Empty`: fields, photos, descriptions and the current
    /// index. The camera flag and history are untouched.
    pub fn reset(&mut self) {
        self.fields = ReportFields::default();
        self.photos.clear();
        self.current_photo = 0;
        self.errors = ValidationErrors::default();
    }

    fn confirmed_photos(&self) -> Vec<PhotoEntry> {
        let confirmed = self.current_photo.min(self.photos.len());
        self.photos[..confirmed].to_vec()
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

fn download_name(client: &str) -> String {
    format!("Reporte_{}.pdf", client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::QueueCamera;
    use crate::types::CapturedImage;

    struct JsonRenderer;

    impl ReportRenderer for JsonRenderer {
        fn render(&self, report: &InspectionReport) -> Result<GeneratedPdf> {
            let bytes = serde_json::to_vec(report).map_err(|e| Error::Render(e.to_string()))?;
            Ok(GeneratedPdf::new(bytes))
        }
    }

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn render(&self, _report: &InspectionReport) -> Result<GeneratedPdf> {
            Err(Error::Render("sin fuente".to_string()))
        }
    }

    fn frame() -> CapturedImage {
        CapturedImage::from_bytes(vec![0xff, 0xd8, 0xff])
    }

    fn fill_required(controller: &mut FormController) {
        controller.fields.client = "Acme".to_string();
        controller.fields.reference = "R-001".to_string();
        controller.fields.brand = "Siemens".to_string();
        controller.fields.model = "Motor".to_string();
        controller.fields.serial = "SN1".to_string();
        controller.fields.power_kw = Some(50.0);
    }

    fn attach_photo(controller: &mut FormController, description: &str) {
        let mut camera = QueueCamera::new();
        camera.push_frame(frame());
        controller.activate_camera();
        controller.capture_photo(&mut camera).unwrap();
        let index = controller.photos().len() - 1;
        controller.set_description(index, description).unwrap();
        controller.confirm_photo().unwrap();
    }

    #[test]
    fn test_capture_requires_active_camera() {
        let mut controller = FormController::new();
        let mut camera = QueueCamera::new();
        camera.push_frame(frame());

        let result = controller.capture_photo(&mut camera);
        assert!(matches!(result, Err(Error::CameraInactive)));
        assert!(controller.photos().is_empty());
    }

    #[test]
    fn test_activate_camera_is_idempotent() {
        let mut controller = FormController::new();
        controller.activate_camera();
        controller.activate_camera();
        assert!(controller.camera_active());
    }

    #[test]
    fn test_capture_cap_enforced_at_entry() {
        let mut controller = FormController::new();
        controller.activate_camera();

        let mut camera = QueueCamera::new();
        for _ in 0..MAX_PHOTOS + 1 {
            camera.push_frame(frame());
        }

        for i in 0..MAX_PHOTOS {
            controller.capture_photo(&mut camera).unwrap();
            controller.set_description(i, "foto").unwrap();
            controller.confirm_photo().unwrap();
        }

        let result = controller.capture_photo(&mut camera);
        assert!(matches!(result, Err(Error::PhotoLimit)));
        assert_eq!(controller.photos().len(), MAX_PHOTOS);
    }

    #[test]
    fn test_missed_frame_appends_nothing() {
        let mut controller = FormController::new();
        controller.activate_camera();

        let mut camera = QueueCamera::new();
        camera.push_missed();

        let outcome = controller.capture_photo(&mut camera).unwrap();
        assert_eq!(outcome, CaptureOutcome::NoFrame);
        assert!(controller.photos().is_empty());
    }

    #[test]
    fn test_confirm_is_noop_without_pending_photo() {
        let mut controller = FormController::new();

        let result = controller.confirm_photo();
        assert!(matches!(result, Err(Error::IncompletePhoto)));
        assert_eq!(controller.current_photo(), 0);
        assert_eq!(controller.banner(), Some(CONFIRM_MESSAGE));
    }

    #[test]
    fn test_confirm_is_noop_with_empty_description() {
        let mut controller = FormController::new();
        controller.activate_camera();
        let mut camera = QueueCamera::new();
        camera.push_frame(frame());
        controller.capture_photo(&mut camera).unwrap();

        let result = controller.confirm_photo();
        assert!(matches!(result, Err(Error::IncompletePhoto)));
        assert_eq!(controller.current_photo(), 0);

        // blank description is still incomplete
        controller.set_description(0, "   ").unwrap();
        assert!(controller.confirm_photo().is_err());
        assert_eq!(controller.current_photo(), 0);
    }

    #[test]
    fn test_capture_describe_confirm_loop() {
        let mut controller = FormController::new();

        for round in 0..MAX_PHOTOS {
            attach_photo(&mut controller, &format!("foto {}", round + 1));
            assert_eq!(controller.current_photo(), round + 1);
        }

        // the confirm affordance disappears exactly at the cap
        assert_eq!(controller.current_photo(), MAX_PHOTOS);
        assert!(!controller.can_confirm());
    }

    #[test]
    fn test_set_description_out_of_range() {
        let mut controller = FormController::new();
        let result = controller.set_description(3, "x");
        assert!(matches!(result, Err(Error::PhotoIndex(3))));
    }

    #[test]
    fn test_delete_photo_compacts_and_steps_back() {
        let mut controller = FormController::new();
        attach_photo(&mut controller, "primera");
        attach_photo(&mut controller, "segunda");
        attach_photo(&mut controller, "tercera");
        assert_eq!(controller.current_photo(), 3);

        controller.delete_photo(1).unwrap();

        let descriptions: Vec<&str> = controller
            .photos()
            .iter()
            .map(|p| p.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["primera", "tercera"]);
        assert_eq!(controller.current_photo(), 2);
    }

    #[test]
    fn test_delete_photo_floors_at_zero() {
        let mut controller = FormController::new();
        controller.activate_camera();
        let mut camera = QueueCamera::new();
        camera.push_frame(frame());
        controller.capture_photo(&mut camera).unwrap();

        // unconfirmed photo: current index is still 0
        controller.delete_photo(0).unwrap();
        assert_eq!(controller.current_photo(), 0);

        let result = controller.delete_photo(0);
        assert!(matches!(result, Err(Error::PhotoIndex(0))));
    }

    #[test]
    fn test_submit_rejected_when_required_fields_empty() {
        let mut controller = FormController::new();
        controller.fields.client = "Acme".to_string();
        attach_photo(&mut controller, "foto");

        let result = controller.submit(&JsonRenderer);

        assert!(matches!(result, Err(Error::Validation)));
        assert!(controller.history().is_empty());
        assert_eq!(controller.fields.client, "Acme");
        assert_eq!(controller.photos().len(), 1);
        assert!(controller.errors().message("reference").is_some());
        assert!(!controller.is_submitting());
    }

    #[test]
    fn test_submit_success_appends_history_and_resets() {
        let mut controller = FormController::new();
        fill_required(&mut controller);
        attach_photo(&mut controller, "Vista frontal");

        let file_name = controller.submit(&JsonRenderer).unwrap();
        assert_eq!(file_name, "Reporte_Acme.pdf");

        assert_eq!(controller.history().len(), 1);
        let entry = &controller.history().entries()[0];
        assert_eq!(entry.client, "Acme");
        assert_eq!(entry.reference, "R-001");
        assert!(!entry.pdf.is_empty());

        assert_eq!(controller.fields, ReportFields::default());
        assert!(controller.photos().is_empty());
        assert_eq!(controller.current_photo(), 0);
        assert_eq!(controller.phase(), FormPhase::Empty);
        // the camera overlay is orthogonal and stays up
        assert!(controller.camera_active());
    }

    #[test]
    fn test_submit_includes_only_confirmed_photos() {
        let mut controller = FormController::new();
        fill_required(&mut controller);
        attach_photo(&mut controller, "confirmada");

        // captured but never confirmed
        let mut camera = QueueCamera::new();
        camera.push_frame(frame());
        controller.capture_photo(&mut camera).unwrap();

        let report = controller.begin_submit().unwrap();
        assert_eq!(report.photos.len(), 1);
        assert_eq!(report.photos[0].description, "confirmada");
    }

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let mut controller = FormController::new();
        fill_required(&mut controller);

        let report = controller.begin_submit().unwrap();
        let again = controller.begin_submit();
        assert!(matches!(again, Err(Error::SubmitInFlight)));

        controller.complete_submit(&report, GeneratedPdf::new(vec![1]));
        assert!(!controller.is_submitting());
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_render_failure_keeps_form_for_retry() {
        let mut controller = FormController::new();
        fill_required(&mut controller);
        attach_photo(&mut controller, "foto");

        let result = controller.submit(&FailingRenderer);
        assert!(matches!(result, Err(Error::Render(_))));

        assert!(controller.history().is_empty());
        assert!(!controller.is_submitting());
        assert_eq!(controller.fields.client, "Acme");
        assert_eq!(controller.photos().len(), 1);
        assert!(controller.banner().unwrap().contains("sin fuente"));

        // retry with a working renderer succeeds
        controller.submit(&JsonRenderer).unwrap();
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_phase_progression() {
        let mut controller = FormController::new();
        assert_eq!(controller.phase(), FormPhase::Empty);

        controller.fields.client = "Acme".to_string();
        assert_eq!(controller.phase(), FormPhase::Filling);

        fill_required(&mut controller);
        assert_eq!(controller.phase(), FormPhase::Submittable);

        controller.begin_submit().unwrap();
        assert_eq!(controller.phase(), FormPhase::Submitting);
    }

    #[test]
    fn test_history_limit_evicts_oldest() {
        let mut controller = FormController::with_history_limit(2);

        for i in 0..3 {
            fill_required(&mut controller);
            controller.fields.reference = format!("R-{:03}", i + 1);
            controller.submit(&JsonRenderer).unwrap();
        }

        let refs: Vec<&str> = controller
            .history()
            .entries()
            .iter()
            .map(|e| e.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["R-002", "R-003"]);
    }

    #[test]
    fn test_revoke_history_drops_buffers() {
        let mut controller = FormController::new();
        fill_required(&mut controller);
        controller.submit(&JsonRenderer).unwrap();
        assert_eq!(controller.history().len(), 1);

        controller.revoke_history();
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_renderer_is_deterministic_over_snapshot() {
        let mut controller = FormController::new();
        fill_required(&mut controller);
        attach_photo(&mut controller, "Vista frontal");

        let report = controller.begin_submit().unwrap();
        let first = JsonRenderer.render(&report).unwrap();
        let second = JsonRenderer.render(&report).unwrap();
        assert_eq!(first, second);
    }
}
