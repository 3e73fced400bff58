//! Analyzer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::analyzer::AnalyzerError;
use super::bands::{is_strictly_increasing, log_bands};

/// Settings for an [`Analyzer`](super::Analyzer).
///
/// Every field has a default, so a JSON document only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Samples per channel per block. Must be a power of 2.
    pub transform_size: usize,
    /// Number of output bands.
    pub band_count: usize,
    /// Lower edge of the first band in Hz.
    pub start_frequency: f32,
    /// Upper edge of the last band in Hz.
    pub end_frequency: f32,
    /// Weight kept from the previous block, clamped to 0.0..=1.0.
    pub smoothing: f32,
    /// Sample rate of the delivered audio; sets the bin width used for banding.
    pub sample_rate: f32,
    /// Sample rate the A-weighting curve is computed for.
    pub weighting_sample_rate: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            transform_size: 2048,
            band_count: 10,
            start_frequency: 100.0,
            end_frequency: 18000.0,
            smoothing: 0.5,
            sample_rate: 44100.0,
            weighting_sample_rate: 44100.0,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_transform_size(mut self, transform_size: usize) -> Self {
        self.transform_size = transform_size;
        self
    }

    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count;
        self
    }

    pub fn with_frequency_range(mut self, start: f32, end: f32) -> Self {
        self.start_frequency = start;
        self.end_frequency = end;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_weighting_sample_rate(mut self, sample_rate: f32) -> Self {
        self.weighting_sample_rate = sample_rate;
        self
    }

    /// Number of FFT bins per block.
    pub fn num_bins(&self) -> usize {
        self.transform_size / 2
    }

    /// Width of one FFT bin in Hz at the playback sample rate.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / self.transform_size as f32
    }

    /// Check every field. The smoothing factor is not checked; it is clamped instead.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if !self.transform_size.is_power_of_two() {
            return Err(AnalyzerError::InvalidTransformSize(self.transform_size));
        }
        if self.band_count < 1 {
            return Err(AnalyzerError::InvalidBandCount(self.band_count));
        }

        let (start, end) = (self.start_frequency, self.end_frequency);
        if !(start.is_finite() && end.is_finite() && start > 0.0 && end > start) {
            return Err(AnalyzerError::InvalidFrequencyRange { start, end });
        }

        if !is_strictly_increasing(&log_bands(start, end, self.band_count)) {
            return Err(AnalyzerError::BandsTooNarrow {
                start,
                end,
                count: self.band_count,
            });
        }

        for rate in [self.sample_rate, self.weighting_sample_rate] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(AnalyzerError::InvalidSampleRate(rate));
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, AnalyzerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, AnalyzerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
