use crate::binarize::binarize;
use crate::histogram::Histogram;
use crate::otsu::{estimate_threshold_from_histogram, OtsuParams, ThresholdEstimate};
use crate::reduce::reduce_intensity;
use crate::{GrayImage, GrayImageView, RgbImageView};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Products of one binarization run.
#[derive(Clone, Debug)]
pub struct BinarizeOutput {
    pub intensity: GrayImage,
    pub threshold: ThresholdEstimate,
    pub binary: GrayImage,
}

/// Color raster -> intensity -> Otsu threshold -> binary raster.
#[derive(Clone, Debug, Default)]
pub struct BinarizePipeline {
    params: OtsuParams,
}

impl BinarizePipeline {
    pub fn new(params: OtsuParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OtsuParams {
        &self.params
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, src), fields(width = src.width, height = src.height))
    )]
    pub fn run(&self, src: &RgbImageView<'_>) -> BinarizeOutput {
        let intensity = reduce_intensity(src);
        let (threshold, binary) = self.threshold_gray(&intensity.view());
        BinarizeOutput {
            intensity,
            threshold,
            binary,
        }
    }

    /// Run the threshold and binarization stages on an existing intensity
    /// raster.
    pub fn run_gray(&self, intensity: &GrayImageView<'_>) -> BinarizeOutput {
        let (threshold, binary) = self.threshold_gray(intensity);
        BinarizeOutput {
            intensity: GrayImage {
                width: intensity.width,
                height: intensity.height,
                data: intensity.data.to_vec(),
            },
            threshold,
            binary,
        }
    }

    fn threshold_gray(&self, intensity: &GrayImageView<'_>) -> (ThresholdEstimate, GrayImage) {
        let hist = Histogram::from_gray(intensity);
        let threshold = estimate_threshold_from_histogram(&hist, &self.params);
        let binary = binarize(intensity, threshold.threshold);
        debug!(
            "binarized {}x{} at {} ({:?})",
            intensity.width, intensity.height, threshold.threshold, threshold.source
        );
        (threshold, binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otsu::ThresholdSource;
    use crate::RgbImage;

    #[test]
    fn runs_all_stages() {
        let img = RgbImage::from_fn(4, 1, |x, _| if x < 2 { [30, 30, 30] } else { [220, 200, 210] })
            .unwrap();
        let out = BinarizePipeline::default().run(&img.view());
        assert_eq!(out.intensity.data, vec![30, 30, 210, 210]);
        assert_eq!(out.threshold.source, ThresholdSource::Otsu);
        assert_eq!(out.threshold.threshold, 30);
        assert_eq!(out.binary.data, vec![0, 0, 255, 255]);
    }

    #[test]
    fn empty_input_uses_fallback() {
        let img = RgbImage::new(0, 0, Vec::new()).unwrap();
        let out = BinarizePipeline::default().run(&img.view());
        assert!(out.threshold.is_fallback());
        assert!(out.intensity.data.is_empty());
        assert!(out.binary.data.is_empty());
    }
}
