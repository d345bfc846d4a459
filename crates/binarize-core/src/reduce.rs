//! Three-channel to intensity reduction.

use crate::{GrayImage, RgbImageView};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Unweighted channel mean, truncated.
#[inline]
pub fn mean_intensity(px: [u8; 3]) -> u8 {
    ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8
}

/// Reduce a three-channel raster to single-channel intensity.
///
/// Every output pixel is `floor((c0 + c1 + c2) / 3)`. The output has the
/// dimensions of the input; an empty input gives an empty output.
pub fn reduce_intensity(src: &RgbImageView<'_>) -> GrayImage {
    let reduce_row = |(rgb, out): (&[u8], &mut [u8])| {
        for (px, dst) in rgb.chunks_exact(3).zip(out.iter_mut()) {
            *dst = mean_intensity([px[0], px[1], px[2]]);
        }
    };

    let mut data = vec![0u8; src.width * src.height];
    if src.width > 0 {
        #[cfg(feature = "rayon")]
        src.data
            .par_chunks_exact(3 * src.width)
            .zip(data.par_chunks_exact_mut(src.width))
            .for_each(reduce_row);

        #[cfg(not(feature = "rayon"))]
        src.data
            .chunks_exact(3 * src.width)
            .zip(data.chunks_exact_mut(src.width))
            .for_each(reduce_row);
    }

    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
