use thiserror::Error;

use crate::graph::ImageHandle;
use crate::source::{Location, ReadError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("image {location} could not be read")]
    NotFound {
        location: String,
        #[source]
        source: ReadError,
    },
    #[error("image {location} could not be decoded")]
    DecodeFailure {
        location: String,
        #[source]
        source: image::ImageError,
    },
}

/// RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub trait ImageSource: Send + Sync {
    fn fetch(&self, handle: &ImageHandle) -> Result<DecodedImage, FetchError>;
}

/// Images stored under one directory or URL prefix, addressed by display name.
#[derive(Clone, Debug)]
pub struct ImageDirectory {
    base: Location,
}

impl ImageDirectory {
    pub fn new(base: Location) -> Self {
        Self { base }
    }
}

impl ImageSource for ImageDirectory {
    fn fetch(&self, handle: &ImageHandle) -> Result<DecodedImage, FetchError> {
        let location = self.base.join(&handle.display_name);
        let bytes = location
            .read_bytes()
            .map_err(|source| FetchError::NotFound {
                location: location.to_string(),
                source,
            })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| FetchError::DecodeFailure {
                location: location.to_string(),
                source,
            })?
            .to_rgba8();

        Ok(DecodedImage {
            width: image.width() as usize,
            height: image.height() as usize,
            rgba: image.into_raw(),
        })
    }
}
