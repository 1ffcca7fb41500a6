//! Error types used by the crate.

use thiserror::Error;

/// Bosmap error type.
#[derive(Debug, Error)]
pub enum BosmapError {
    /// I/O error (network or file)
    #[error("failed to load data")]
    IO,
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// Image decoding error.
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] image::ImageError),
    /// Invalid tile URL template.
    #[error("invalid tile url template: {0}")]
    UrlTemplate(#[from] strfmt::FmtError),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
    /// Error reading/writing data to the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

impl From<reqwest::Error> for BosmapError {
    fn from(_value: reqwest::Error) -> Self {
        Self::IO
    }
}
