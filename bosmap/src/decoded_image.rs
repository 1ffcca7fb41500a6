//! This module contains utilities for decoding tile images fetched from a basemap service.

use crate::error::BosmapError;

/// An image that has been decoded into raw RGBA pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images will be
    /// converted to RGBA.
    pub fn new(bytes: &[u8]) -> Result<Self, BosmapError> {
        use image::GenericImageView;
        let decoded = image::load_from_memory(bytes)?;
        let dimensions = decoded.dimensions();
        let bytes = decoded.to_rgba8();

        Ok(Self {
            bytes: bytes.into_vec(),
            dimensions,
        })
    }

    /// Creates an image from raw RGBA bytes.
    pub fn from_raw(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, BosmapError> {
        if bytes.len() != (width as usize) * (height as usize) * 4 {
            return Err(BosmapError::Generic(format!(
                "invalid image buffer size {} for dimensions {width}x{height}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// Raw bytes of the image, in RGBA order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
