//! Core data model
//!
//! Shared between the CLI and the desktop app:
//! - ReportFields: the structured form values
//! - PhotoEntry: one captured image plus its description
//! - InspectionReport: fields + confirmed photos, frozen at submission
//! - GeneratedPdf: the rendered artifact

use serde::{Deserialize, Serialize};

/// Structured form values. Serialized camelCase in draft files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFields {
    pub client: String,
    pub reference: String,
    pub data_plate: bool,
    pub oil_leak: bool,
    pub brand: String,

    /// Nameplate "Tipo" field.
    pub model: String,

    pub serial: String,
    pub power_kw: Option<f64>,
    pub ratio: String,
    pub oil_type: String,

    /// Liters.
    pub oil_quantity: Option<f64>,
}

/// Encoded image bytes (PNG/JPEG) as produced by a camera device.
/// Serialized as base64 so drafts stay valid JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapturedImage {
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// One captured image paired with its user-written description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoEntry {
    pub image: CapturedImage,
    pub description: String,
}

impl PhotoEntry {
    /// A photo may be confirmed only when both halves are present.
    pub fn is_complete(&self) -> bool {
        !self.image.is_empty() && !self.description.trim().is_empty()
    }
}

/// Fields plus the confirmed photo sequence, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionReport {
    pub fields: ReportFields,
    pub photos: Vec<PhotoEntry>,
}

/// Rendered PDF bytes for one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
}

impl GeneratedPdf {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
