//! A-weighting curve over FFT bins.

/// 12194.217²
const C1: f64 = 12194.217 * 12194.217;
/// 20.598997²
const C2: f64 = 20.598997 * 20.598997;
/// 107.65265²
const C3: f64 = 107.65265 * 107.65265;
/// 737.86223²
const C4: f64 = 737.86223 * 737.86223;

/// Gain offset so that the curve is ~1.0 at 1 kHz.
const GAIN: f64 = 1.2589;

/// A-weighting gain for a single frequency in Hz.
///
/// Evaluated in f64 so `c1·f⁴` stays in range for high sample rates.
pub fn a_weighting(freq: f32) -> f32 {
    let f2 = freq as f64 * freq as f64;
    let num = C1 * f2 * f2;
    let den = (f2 + C2) * ((f2 + C3) * (f2 + C4)).sqrt() * (f2 + C1);
    (GAIN * num / den) as f32
}

/// Per-bin perceptual gains for one FFT size.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCurve {
    weights: Vec<f32>,
}

impl WeightCurve {
    /// Build the curve for `fft_size / 2` bins spaced `reference_rate / fft_size` Hz apart.
    pub fn new(fft_size: usize, reference_rate: f32) -> Self {
        let delta_f = reference_rate / fft_size as f32;
        let weights = (0..fft_size / 2)
            .map(|bin| a_weighting(bin as f32 * delta_f))
            .collect();

        Self { weights }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Multiply a magnitude frame by the curve in place.
    pub fn apply(&self, magnitudes: &mut [f32]) {
        for (m, w) in magnitudes.iter_mut().zip(&self.weights) {
            *m *= w;
        }
    }
}
