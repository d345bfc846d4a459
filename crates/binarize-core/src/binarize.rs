//! Two-level output from an intensity raster.

use crate::{GrayImage, GrayImageView};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Output value for pixels strictly above the threshold.
pub const FOREGROUND: u8 = 255;
/// Output value for all other pixels.
pub const BACKGROUND: u8 = 0;

/// Map every pixel to [`FOREGROUND`] if it is `> threshold`, else to
/// [`BACKGROUND`].
pub fn binarize(src: &GrayImageView<'_>, threshold: u8) -> GrayImage {
    let classify = |v: u8| if v > threshold { FOREGROUND } else { BACKGROUND };

    #[cfg(feature = "rayon")]
    let data: Vec<u8> = src.data.par_iter().map(|&v| classify(v)).collect();

    #[cfg(not(feature = "rayon"))]
    let data: Vec<u8> = src.data.iter().map(|&v| classify(v)).collect();

    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
