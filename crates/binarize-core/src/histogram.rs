//! 256-bin intensity histogram.

use crate::GrayImageView;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub const NUM_BINS: usize = 256;

/// Rows per partial histogram when accumulating in parallel.
#[cfg(feature = "rayon")]
const ROWS_PER_BAND: usize = 64;

/// Pixel counts per intensity value. The counts always sum to the number of
/// pixels that were accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: vec![0; NUM_BINS],
            total: 0,
        }
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every pixel of `img`.
    pub fn from_gray(img: &GrayImageView<'_>) -> Self {
        #[cfg(feature = "rayon")]
        {
            if img.width == 0 {
                return Self::default();
            }
            img.data
                .par_chunks(img.width * ROWS_PER_BAND)
                .map(Self::from_samples)
                .reduce(Self::default, |mut acc, part| {
                    acc.merge(&part);
                    acc
                })
        }

        #[cfg(not(feature = "rayon"))]
        {
            Self::from_samples(img.data)
        }
    }

    pub fn from_samples(samples: &[u8]) -> Self {
        let mut hist = Self::default();
        for &v in samples {
            hist.add(v);
        }
        hist
    }

    #[inline]
    pub fn add(&mut self, value: u8) {
        self.counts[value as usize] += 1;
        self.total += 1;
    }

    /// Add the counts of `other` bin by bin.
    pub fn merge(&mut self, other: &Histogram) {
        for (dst, &src) in self.counts.iter_mut().zip(&other.counts) {
            *dst += src;
        }
        self.total += other.total;
    }

    #[inline]
    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of intensity values that occur at least once.
    pub fn support(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Smallest and largest occurring intensity.
    pub fn range(&self) -> Option<(u8, u8)> {
        let lo = self.counts.iter().position(|&c| c > 0)?;
        let hi = self.counts.iter().rposition(|&c| c > 0)?;
        Some((lo as u8, hi as u8))
    }
}
