//! Global image binarization with Otsu's method on plain 8-bit rasters.
//!
//! The crate has no image I/O and no dependency on any concrete image type.
//! A run goes through three stages:
//!
//! - [`reduce_intensity`] – three-channel raster to intensity, using the
//!   truncated unweighted mean of the channels.
//! - [`estimate_threshold`] – 256-bin histogram and a scan for the split
//!   maximizing between-class variance. Degenerate histograms report a
//!   configurable fallback threshold instead of a split.
//! - [`binarize()`] – pixels strictly above the threshold become 255, the rest 0.
//!
//! [`BinarizePipeline`] chains the three and returns every intermediate
//! product.
//!
//! # Features
//!
//! - `rayon` – histogram accumulation over row bands and the per-pixel maps
//!   run in parallel. Results are identical; the threshold scan itself is
//!   always sequential.
//! - `tracing` – spans on the entry points and [`init_tracing`].

mod binarize;
mod histogram;
mod image;
mod logger;
mod otsu;
mod pipeline;
mod reduce;

pub use binarize::{binarize, BACKGROUND, FOREGROUND};
pub use histogram::{Histogram, NUM_BINS};
pub use image::{GrayImage, GrayImageView, RasterError, RgbImage, RgbImageView};
pub use otsu::{
    best_split, estimate_threshold, estimate_threshold_from_histogram, OtsuParams, OtsuVariant,
    Split, ThresholdEstimate, ThresholdSource, DEFAULT_FALLBACK_THRESHOLD, SCAN_FIRST, SCAN_LAST,
    SCAN_LAST_FULL_RANGE,
};
pub use pipeline::{BinarizeOutput, BinarizePipeline};
pub use reduce::{mean_intensity, reduce_intensity};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, tracing_filter};

pub use logger::{init_with_level, level_from_env, LOG_ENV_VAR};
