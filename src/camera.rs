//! File-backed camera source for batch attachment.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use inspect_report_common::{CameraDevice, CapturedImage, Error as FormError};

use crate::error::Result;
use crate::scanner;

/// Serves the image files of a folder as camera frames, in file-name
/// order. An exhausted folder yields `None`, like a shutter that
/// produced no frame.
#[derive(Debug)]
pub struct FolderCamera {
    frames: VecDeque<PathBuf>,
}

impl FolderCamera {
    pub fn scan(folder: &Path) -> Result<Self> {
        let frames = scanner::scan_folder(folder)?;
        Ok(Self {
            frames: frames.into(),
        })
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            frames: paths.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Stem of the frame the next capture will produce.
    pub fn next_stem(&self) -> Option<String> {
        self.frames.front().map(|path| scanner::file_stem(path))
    }
}

impl CameraDevice for FolderCamera {
    fn get_frame(&mut self) -> inspect_report_common::Result<Option<CapturedImage>> {
        let Some(path) = self.frames.pop_front() else {
            return Ok(None);
        };

        let bytes = std::fs::read(&path)
            .map_err(|e| FormError::Image(format!("{}: {}", path.display(), e)))?;
        Ok(Some(CapturedImage::from_bytes(bytes)))
    }
}
