//! Global two-class threshold selection (Otsu's method).
//!
//! The search walks candidate thresholds in increasing order, moving the
//! probability mass of each intensity from the high class to the low class
//! and keeping running class weights and mass-weighted intensity sums. The
//! candidate with the largest between-class variance
//! `w_low * w_high * (mean_low - mean_high)^2` wins; on ties the first one
//! is kept.
//!
//! A histogram with no usable split (empty, or a single occupied intensity)
//! yields no candidate; [`estimate_threshold`] then reports the configured
//! fallback instead.

use crate::histogram::{Histogram, NUM_BINS};
use crate::GrayImageView;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// First candidate threshold of the scan.
pub const SCAN_FIRST: u8 = 1;
/// Last candidate threshold of the classic scan.
pub const SCAN_LAST: u8 = 253;
/// Last candidate threshold of the full-range scan.
pub const SCAN_LAST_FULL_RANGE: u8 = 254;
/// Threshold reported when no split improves on zero variance.
pub const DEFAULT_FALLBACK_THRESHOLD: u8 = 127;

/// Class bookkeeping used by the scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtsuVariant {
    /// Candidates `1..=253`. The high class starts with the whole mass and
    /// its initial intensity sum covers `0..=254` only; bin 0 is never moved
    /// into the low class. Bit-for-bit compatible with the reference
    /// binarizer this crate replaces.
    #[default]
    Classic,
    /// Candidates `1..=254`. Low class is every intensity `<= t` (bin 0
    /// included), high class every intensity `> t` (bin 255 included).
    FullRange,
}

/// Parameters for threshold estimation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtsuParams {
    pub variant: OtsuVariant,
    /// Threshold used when the histogram admits no split.
    pub fallback_threshold: u8,
}

impl Default for OtsuParams {
    fn default() -> Self {
        Self {
            variant: OtsuVariant::Classic,
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
        }
    }
}

/// Winning candidate of a scan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub threshold: u8,
    /// Between-class variance at `threshold`, in squared intensity units.
    pub variance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Chosen by the variance scan.
    Otsu,
    /// No split found; the configured fallback was used.
    Fallback,
}

/// Threshold for one image together with how it was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEstimate {
    pub threshold: u8,
    /// Between-class variance of the chosen split, `0.0` for the fallback.
    pub variance: f64,
    pub source: ThresholdSource,
}

impl ThresholdEstimate {
    pub fn is_fallback(&self) -> bool {
        self.source == ThresholdSource::Fallback
    }
}

/// Find the threshold maximizing between-class variance.
///
/// Returns `None` when the histogram is empty or when no candidate has a
/// variance strictly above zero.
pub fn best_split(hist: &Histogram, variant: OtsuVariant) -> Option<Split> {
    if hist.is_empty() {
        return None;
    }
    match variant {
        OtsuVariant::Classic => classic_split(hist),
        OtsuVariant::FullRange => full_range_split(hist),
    }
}

fn classic_split(hist: &Histogram) -> Option<Split> {
    let counts = hist.counts();
    let n = hist.total() as f64;

    let mut weight_low = 0f64;
    let mut mean_low_sum = 0f64;
    let mut weight_high = 1f64;
    let mut mean_high_sum = counts[..NUM_BINS - 1]
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum::<f64>()
        / n;

    let mut best: Option<Split> = None;
    let mut best_var = 0f64;

    for t in SCAN_FIRST..=SCAN_LAST {
        let p = counts[t as usize] as f64 / n;
        weight_low += p;
        weight_high -= p;
        mean_low_sum += t as f64 * p;
        mean_high_sum -= t as f64 * p;

        // Either class may still be (or already be) empty here.
        if weight_low <= 0.0 || weight_high <= 0.0 {
            continue;
        }

        let d = mean_low_sum / weight_low - mean_high_sum / weight_high;
        let variance = weight_low * weight_high * d * d;
        if variance > best_var {
            best_var = variance;
            best = Some(Split {
                threshold: t,
                variance,
            });
        }
    }

    best
}

fn full_range_split(hist: &Histogram) -> Option<Split> {
    let counts = hist.counts();
    let n = hist.total() as f64;
    let sum_total: f64 = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut count_low = counts[0];
    let mut sum_low = 0f64;

    let mut best: Option<Split> = None;
    let mut best_var = 0f64;

    for t in SCAN_FIRST..=SCAN_LAST_FULL_RANGE {
        let c = counts[t as usize];
        count_low += c;
        sum_low += t as f64 * c as f64;

        if count_low == 0 {
            continue;
        }
        let count_high = hist.total() - count_low;
        if count_high == 0 {
            break;
        }

        let weight_low = count_low as f64 / n;
        let weight_high = count_high as f64 / n;
        let d = sum_low / count_low as f64 - (sum_total - sum_low) / count_high as f64;
        let variance = weight_low * weight_high * d * d;
        if variance > best_var {
            best_var = variance;
            best = Some(Split {
                threshold: t,
                variance,
            });
        }
    }

    best
}

/// Estimate the binarization threshold from an existing histogram.
pub fn estimate_threshold_from_histogram(
    hist: &Histogram,
    params: &OtsuParams,
) -> ThresholdEstimate {
    debug!(
        "otsu: {} pixels, {} distinct intensities, range {:?}",
        hist.total(),
        hist.support(),
        hist.range()
    );

    match best_split(hist, params.variant) {
        Some(split) => {
            debug!(
                "otsu: threshold {} (variance {:.3})",
                split.threshold, split.variance
            );
            ThresholdEstimate {
                threshold: split.threshold,
                variance: split.variance,
                source: ThresholdSource::Otsu,
            }
        }
        None => {
            warn!(
                "otsu: no split with positive variance, using fallback threshold {}",
                params.fallback_threshold
            );
            ThresholdEstimate {
                threshold: params.fallback_threshold,
                variance: 0.0,
                source: ThresholdSource::Fallback,
            }
        }
    }
}

/// Build the histogram of `img` and estimate its binarization threshold.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, params), fields(width = img.width, height = img.height))
)]
pub fn estimate_threshold(img: &GrayImageView<'_>, params: &OtsuParams) -> ThresholdEstimate {
    let hist = Histogram::from_gray(img);
    estimate_threshold_from_histogram(&hist, params)
}
