//! Report draft files.
//!
//! A draft is the JSON a report is built from: field values plus photo
//! references. A photo may embed its image (base64) or point at a file
//! on disk; relative paths resolve against the draft's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use inspect_report_common::{
    CaptureOutcome, CapturedImage, FormController, QueueCamera, ReportFields, MAX_PHOTOS,
};

use crate::error::{InspectError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPhoto {
    pub path: Option<PathBuf>,
    pub image: Option<CapturedImage>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub fields: ReportFields,
    pub photos: Vec<DraftPhoto>,
}

impl Draft {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InspectError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut draft: Draft = serde_json::from_str(&content)?;

        // resolve photo paths against the draft's directory
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for photo in &mut draft.photos {
            if let Some(photo_path) = &photo.path {
                if photo_path.is_relative() {
                    photo.path = Some(base_dir.join(photo_path));
                }
            }
        }

        Ok(draft)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Blank draft with one example photo entry.
    pub fn template() -> Self {
        Self {
            fields: ReportFields::default(),
            photos: vec![DraftPhoto {
                path: Some(PathBuf::from("foto1.jpg")),
                image: None,
                description: "Vista frontal".to_string(),
            }],
        }
    }
}

/// Image bytes for one draft photo: embedded image first, file second.
pub fn resolve_image(photo: &DraftPhoto, index: usize) -> Result<CapturedImage> {
    if let Some(image) = &photo.image {
        if !image.is_empty() {
            return Ok(image.clone());
        }
    }

    if let Some(path) = &photo.path {
        if !path.exists() {
            return Err(InspectError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| InspectError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        return Ok(CapturedImage::from_bytes(bytes));
    }

    Err(InspectError::EmptyDraftPhoto(index))
}

/// Drive the controller through the draft: set fields, then capture,
/// describe and confirm each photo. Stops at the capacity or at the
/// first photo that cannot be confirmed (no description and no file
/// stem to borrow). Returns the number of confirmed photos.
pub fn apply_draft(controller: &mut FormController, draft: &Draft) -> Result<usize> {
    controller.fields = draft.fields.clone();
    controller.activate_camera();

    let mut confirmed = 0;
    for (index, photo) in draft.photos.iter().enumerate() {
        if controller.photos().len() >= MAX_PHOTOS {
            break;
        }

        let description = if !photo.description.trim().is_empty() {
            photo.description.clone()
        } else if let Some(path) = &photo.path {
            crate::scanner::file_stem(path)
        } else {
            String::new()
        };
        if description.trim().is_empty() {
            break;
        }

        let image = resolve_image(photo, index)?;
        let mut camera = QueueCamera::new();
        camera.push_frame(image);

        let outcome = controller.capture_photo(&mut camera)?;
        if outcome != CaptureOutcome::Captured {
            continue;
        }

        let slot = controller.photos().len() - 1;
        controller.set_description(slot, &description)?;
        controller.confirm_photo()?;
        confirmed += 1;
    }

    Ok(confirmed)
}
