//! High-level facade for the `binarize-*` workspace.
//!
//! This crate provides:
//! - a re-export of [`binarize_core`] (rasters, Otsu threshold, binarization)
//! - JSON-loadable run configuration ([`BinarizeConfig`])
//! - (feature `image`) adapters from `image` crate buffers and a mosaic
//!   composer for showing results side by side
//! - (feature `cli`) the `binarize` command-line tool
//!
//! ## Quickstart
//!
//! ```no_run
//! use binarize::convert;
//! use binarize::core::OtsuParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = convert::load_rgb("fish.png")?;
//! let out = convert::binarize_rgb(&img, &OtsuParams::default())?;
//! println!("threshold: {}", out.threshold.threshold);
//! out.binary.save("fish_binary.png")?;
//! # Ok(())
//! # }
//! ```

pub use binarize_core as core;

pub use binarize_core::{
    BinarizeOutput, BinarizePipeline, OtsuParams, OtsuVariant, ThresholdEstimate,
    ThresholdSource,
};

mod config;
mod error;
pub mod mosaic;

#[cfg(feature = "image")]
pub mod convert;

pub use config::BinarizeConfig;
pub use error::BinarizeError;
pub use mosaic::{MosaicError, MosaicLayout};

#[cfg(feature = "image")]
pub use mosaic::compose_mosaic;
