//! Camera device seam.

use std::collections::VecDeque;

use crate::error::Result;
use crate::types::CapturedImage;

/// A source of single frames. `None` means the device produced no
/// frame this time; the caller appends nothing.
pub trait CameraDevice {
    fn get_frame(&mut self) -> Result<Option<CapturedImage>>;
}

/// Deterministic camera fed from a queue of frames. Used to attach
/// pre-loaded images (draft photos) and throughout the tests.
#[derive(Debug, Default)]
pub struct QueueCamera {
    frames: VecDeque<Option<CapturedImage>>,
}

impl QueueCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self, image: CapturedImage) {
        self.frames.push_back(Some(image));
    }

    /// Queue a shutter actuation that yields no frame.
    pub fn push_missed(&mut self) {
        self.frames.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl CameraDevice for QueueCamera {
    fn get_frame(&mut self) -> Result<Option<CapturedImage>> {
        Ok(self.frames.pop_front().flatten())
    }
}
