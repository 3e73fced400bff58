//! Hann window generation.
//!
//! The window tapers each block toward zero at both ends before the FFT,
//! which reduces spectral leakage between neighbouring bins.

use std::f32::consts::PI;

/// Create a symmetric Hann window of length `size`.
///
/// `w[i] = 0.5 * (1 - cos(2π·i / (size - 1)))`. A window of length 1 is `[1.0]`.
pub fn hann_window(size: usize) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0; size];
    }

    (0..size)
        .map(|i| {
            let t = i as f32 / (size - 1) as f32;
            0.5 * (1.0 - (2.0 * PI * t).cos())
        })
        .collect()
}

/// Multiply `samples` by `window` into `out`.
///
/// All three slices are expected to have the same length; extra elements are ignored.
pub fn apply_window(samples: &[f32], window: &[f32], out: &mut [f32]) {
    for ((o, s), w) in out.iter_mut().zip(samples).zip(window) {
        *o = s * w;
    }
}
