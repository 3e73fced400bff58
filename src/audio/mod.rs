//! Real-time spectrum analysis.
//!
//! This module provides:
//! - Hann windowing and FFT magnitude spectra via RustFFT
//! - A-weighting of FFT bins
//! - Logarithmic band layout and bin-to-band reduction
//! - Spatial (across bands) and temporal (across blocks) smoothing
//! - The [`Analyzer`] that chains them per incoming block
//! - Synthetic test signals

pub mod analyzer;
pub mod bands;
pub mod config;
pub mod fft;
pub mod smoothing;
pub mod synth;
pub mod weighting;
pub mod window;

// Re-export commonly used types
pub use analyzer::{Analyzer, AnalyzerError, ErrorKind, Spectra};
pub use bands::{is_strictly_increasing, log_bands, BandMapper, FrequencyBand, DISPLAY_GAIN};
pub use config::AnalyzerConfig;
pub use fft::SpectralTransform;
pub use smoothing::{smooth_spatial, TemporalSmoother, SPATIAL_KERNEL};
pub use synth::{generate_noise_block, generate_sine_block, interleave};
pub use weighting::{a_weighting, WeightCurve};
pub use window::{apply_window, hann_window};
