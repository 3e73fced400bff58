//! FFT magnitude spectrum using RustFFT.
//!
//! Converts one windowed block of real samples into a one-sided amplitude
//! spectrum suitable for band visualization.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::analyzer::AnalyzerError;
use super::window::hann_window;

/// Windowed forward FFT of a fixed, power-of-two size.
///
/// The FFT plan, window and working buffers are allocated once in [`SpectralTransform::new`],
/// so [`SpectralTransform::magnitudes`] does not allocate.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralTransform {
    /// Create a transform for blocks of `fft_size` samples.
    ///
    /// Common FFT sizes: 512, 1024, 2048, 4096.
    /// Larger sizes give better frequency resolution but worse time resolution.
    pub fn new(fft_size: usize) -> Result<Self, AnalyzerError> {
        if !fft_size.is_power_of_two() {
            return Err(AnalyzerError::InvalidTransformSize(fft_size));
        }

        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            fft,
            fft_size,
            window: hann_window(fft_size),
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch,
        })
    }

    /// FFT size being used.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins in the output (FFT size / 2).
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// The Hann window applied to every block.
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Compute the magnitude spectrum of `samples` into `out`.
    ///
    /// `samples` must hold exactly `fft_size` values and `out` at least `fft_size / 2`.
    /// Bins above DC are scaled by `2 / N` (one-sided amplitude); the DC bin is
    /// scaled by `1 / N`, half of that, since it has no mirrored partner.
    pub fn magnitudes(&mut self, samples: &[f32], out: &mut [f32]) -> Result<(), AnalyzerError> {
        if samples.len() != self.fft_size {
            return Err(AnalyzerError::InputLength {
                channel: 0,
                expected: self.fft_size,
                got: samples.len(),
            });
        }
        if out.len() < self.num_bins() {
            return Err(AnalyzerError::OutputLength {
                expected: self.num_bins(),
                got: out.len(),
            });
        }

        for ((slot, &s), &w) in self.buffer.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 2.0 / self.fft_size as f32;
        for (mag, c) in out.iter_mut().zip(&self.buffer[..self.num_bins()]) {
            *mag = c.norm() * scale;
        }
        if let Some(dc) = out.first_mut() {
            *dc *= 0.5;
        }

        Ok(())
    }

    /// Convenience wrapper around [`SpectralTransform::magnitudes`] returning a new vector.
    pub fn analyze(&mut self, samples: &[f32]) -> Result<Vec<f32>, AnalyzerError> {
        let mut out = vec![0.0; self.num_bins()];
        self.magnitudes(samples, &mut out)?;
        Ok(out)
    }

    /// Get the frequency in Hz for a given bin index.
    pub fn bin_to_freq(&self, bin: usize, sample_rate: f32) -> f32 {
        bin as f32 * sample_rate / self.fft_size as f32
    }

    /// Get the bin index for a given frequency in Hz.
    pub fn freq_to_bin(&self, freq: f32, sample_rate: f32) -> usize {
        (freq * self.fft_size as f32 / sample_rate).round() as usize
    }
}
