use std::path::PathBuf;

use crate::core::RasterError;
use crate::mosaic::MosaicError;

/// Errors produced by the facade helpers and the command-line tool.
#[derive(thiserror::Error, Debug)]
pub enum BinarizeError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("raster dimensions {width}x{height} exceed the image crate limits")]
    Dimensions { width: usize, height: usize },

    #[error(transparent)]
    Mosaic(#[from] MosaicError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
