//! Realtime Spectrum
//!
//! Turns fixed-size blocks of audio samples into smoothed per-band magnitudes
//! for spectrum visualizers.
//!
//! # Features
//!
//! - Hann window and FFT magnitude spectrum via RustFFT
//! - A-weighting for perceptual loudness
//! - Logarithmically spaced bands between configurable frequencies
//! - 7-tap smoothing across bands and exponential smoothing across blocks
//! - Planar or interleaved multi-channel input
//! - JSON configuration via serde
//!
//! # Example
//!
//! ```
//! use realtime_spectrum::{Analyzer, AnalyzerConfig};
//!
//! let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
//! let block = vec![0.0f32; 2048];
//! let spectra = analyzer.analyze(&[&block]).unwrap();
//! assert_eq!(spectra[0].len(), 10);
//! ```

pub mod audio;

// Re-export commonly used types
pub use audio::{
    Analyzer, AnalyzerConfig, AnalyzerError, ErrorKind, FrequencyBand, SpectralTransform, Spectra,
};
