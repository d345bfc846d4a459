//! Adapters between the `image` crate and the core raster types.

use std::path::Path;

use image::{DynamicImage, ImageReader};
use serde::Serialize;

use crate::core::{self, BinarizePipeline, OtsuParams, ThresholdEstimate};
use crate::BinarizeError;

/// Borrow an `image::RgbImage` as a core view.
///
/// `ImageBuffer::from_raw` accepts buffers longer than the image; only the
/// first `3 * width * height` bytes are pixels, so the view stops there.
pub fn rgb_view(img: &image::RgbImage) -> core::RgbImageView<'_> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    core::RgbImageView {
        width,
        height,
        data: &img.as_raw()[..3 * width * height],
    }
}

/// Borrow an `image::GrayImage` as a core view, trimmed to `width * height`
/// bytes.
pub fn gray_view(img: &image::GrayImage) -> core::GrayImageView<'_> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    core::GrayImageView {
        width,
        height,
        data: &img.as_raw()[..width * height],
    }
}

/// Move a core raster into an `image::GrayImage`.
pub fn to_luma_image(img: core::GrayImage) -> Result<image::GrayImage, BinarizeError> {
    let (width, height) = (img.width, img.height);
    let dims_err = || BinarizeError::Dimensions { width, height };
    let w = u32::try_from(width).map_err(|_| dims_err())?;
    let h = u32::try_from(height).map_err(|_| dims_err())?;
    image::GrayImage::from_raw(w, h, img.data).ok_or_else(dims_err)
}

/// Decode an image file and convert it to 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<image::RgbImage, BinarizeError> {
    Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

/// Intensity and binary images of one run.
#[derive(Clone, Debug)]
pub struct ImageOutput {
    pub intensity: image::GrayImage,
    pub binary: image::GrayImage,
    pub threshold: ThresholdEstimate,
}

/// Summary of a run, suitable for JSON output.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub threshold: ThresholdEstimate,
}

impl ImageOutput {
    pub fn report(&self) -> Report {
        Report {
            width: self.intensity.width(),
            height: self.intensity.height(),
            threshold: self.threshold,
        }
    }
}

/// Run the binarization pipeline on an RGB image.
pub fn binarize_rgb(
    img: &image::RgbImage,
    params: &OtsuParams,
) -> Result<ImageOutput, BinarizeError> {
    let out = BinarizePipeline::new(params.clone()).run(&rgb_view(img));
    Ok(ImageOutput {
        intensity: to_luma_image(out.intensity)?,
        binary: to_luma_image(out.binary)?,
        threshold: out.threshold,
    })
}

/// Run the binarization pipeline on any decoded image.
///
/// The image is converted to 8-bit RGB first; alpha is dropped.
pub fn binarize_image(
    img: &DynamicImage,
    params: &OtsuParams,
) -> Result<ImageOutput, BinarizeError> {
    match img {
        DynamicImage::ImageRgb8(rgb) => binarize_rgb(rgb, params),
        other => binarize_rgb(&other.to_rgb8(), params),
    }
}
