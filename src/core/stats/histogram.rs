//! Equal-width binning of image sizes.

use serde::{Deserialize, Serialize};

/// Distribution of sizes over equal-width bins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeHistogram {
    /// Lower edge of the first bin (MiB)
    pub min: f64,
    /// Upper edge of the last bin (MiB)
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl SizeHistogram {
    /// Bin `sizes` into `bins` buckets spanning their min..=max.
    ///
    /// Returns `None` for no sizes or zero bins.
    pub fn from_sizes(sizes: &[f64], bins: usize) -> Option<Self> {
        if sizes.is_empty() || bins == 0 {
            return None;
        }

        let min = sizes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sizes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &size in sizes {
            let index = if bin_width > 0.0 {
                (((size - min) / bin_width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[index] += 1;
        }

        Some(Self {
            min,
            max,
            bin_width,
            counts,
        })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn peak(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Lower and upper edge of bin `index`
    pub fn bin_edges(&self, index: usize) -> (f64, f64) {
        let lower = self.min + self.bin_width * index as f64;
        (lower, lower + self.bin_width)
    }
}
