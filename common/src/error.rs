//! Error type for the form library.

use thiserror::Error;

use crate::controller::MAX_PHOTOS;

#[derive(Error, Debug)]
pub enum Error {
    #[error("camera is not active")]
    CameraInactive,

    #[error("photo limit of {} reached", MAX_PHOTOS)]
    PhotoLimit,

    #[error("no complete photo pending confirmation")]
    IncompletePhoto,

    #[error("photo index {0} out of range")]
    PhotoIndex(usize),

    #[error("a submission is already in progress")]
    SubmitInFlight,

    #[error("required fields are missing")]
    Validation,

    #[error("image error: {0}")]
    Image(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Result alias for the form library.
pub type Result<T> = std::result::Result<T, Error>;
