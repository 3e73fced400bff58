//! Logarithmic frequency bands and bin-to-band reduction.

use serde::{Deserialize, Serialize};

/// Fixed gain applied to every band value before smoothing.
pub const DISPLAY_GAIN: f32 = 5.0;

/// A contiguous frequency range in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub lower: f32,
    pub upper: f32,
}

impl FrequencyBand {
    /// Geometric centre of the band.
    pub fn center(&self) -> f32 {
        (self.lower * self.upper).sqrt()
    }

    pub fn contains(&self, freq: f32) -> bool {
        freq >= self.lower && freq < self.upper
    }
}

/// Split `start..end` into `count` logarithmically spaced bands.
///
/// Edge `i` is `start · r^i` with `r = 2^(log2(end / start) / count)`, evaluated in f64
/// from `start` each time. The last upper edge is pinned to `end`.
///
/// Very narrow ranges split into many bands can collapse neighbouring edges once
/// rounded to f32; check the result with [`is_strictly_increasing`].
pub fn log_bands(start: f32, end: f32, count: usize) -> Vec<FrequencyBand> {
    let start64 = start as f64;
    let ratio = 2f64.powf((end as f64 / start64).log2() / count as f64);
    let edge = |i: usize| match i {
        0 => start,
        i if i == count => end,
        i => (start64 * ratio.powi(i as i32)) as f32,
    };

    (0..count)
        .map(|i| FrequencyBand {
            lower: edge(i),
            upper: edge(i + 1),
        })
        .collect()
}

/// Every band is non-empty and each starts above the previous one.
pub fn is_strictly_increasing(bands: &[FrequencyBand]) -> bool {
    bands.iter().all(|band| band.upper > band.lower)
        && bands.windows(2).all(|pair| pair[1].lower > pair[0].lower)
}

/// Maps FFT bins onto bands.
///
/// Bin ranges are resolved once from the bin width, so per-block mapping is a
/// max over precomputed inclusive ranges.
#[derive(Debug, Clone)]
pub struct BandMapper {
    bands: Vec<FrequencyBand>,
    ranges: Vec<(usize, usize)>,
}

impl BandMapper {
    /// `num_bins` is `fft_size / 2`; `bin_width` is `sample_rate / fft_size` in Hz.
    pub fn new(bands: Vec<FrequencyBand>, num_bins: usize, bin_width: f32) -> Self {
        let last_bin = num_bins.saturating_sub(1);
        let ranges = bands
            .iter()
            .map(|band| {
                let hi = ((band.upper / bin_width).round() as usize).min(last_bin);
                // Narrower than one bin, or entirely above the last bin: use the nearest one.
                let lo = ((band.lower / bin_width).round() as usize).min(hi);
                (lo, hi)
            })
            .collect();

        Self { bands, ranges }
    }

    pub fn bands(&self) -> &[FrequencyBand] {
        &self.bands
    }

    /// Inclusive bin range covered by each band.
    pub fn bin_ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// Reduce a weighted magnitude frame into `out`, one value per band.
    pub fn map(&self, magnitudes: &[f32], out: &mut [f32]) {
        for (value, &(lo, hi)) in out.iter_mut().zip(&self.ranges) {
            let peak = magnitudes
                .get(lo..=hi)
                .map(|bins| bins.iter().cloned().fold(0.0f32, f32::max))
                .unwrap_or(0.0);
            *value = peak * DISPLAY_GAIN;
        }
    }
}
