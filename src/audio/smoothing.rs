//! Band smoothing across frequency (spatial) and across time (temporal).

/// Symmetric kernel used to highlight the overall spectrum shape.
pub const SPATIAL_KERNEL: [f32; 7] = [1.0, 2.0, 3.0, 5.0, 3.0, 2.0, 1.0];

const KERNEL_SUM: f32 = 17.0;
const HALF_WIDTH: usize = SPATIAL_KERNEL.len() / 2;

/// Weighted moving average across adjacent bands.
///
/// Bands without three neighbours on both sides are copied unchanged, so
/// spectra shorter than the kernel pass straight through.
pub fn smooth_spatial(input: &[f32], out: &mut [f32]) {
    let len = input.len().min(out.len());
    out[..len].copy_from_slice(&input[..len]);

    if len < SPATIAL_KERNEL.len() {
        return;
    }

    for i in HALF_WIDTH..len - HALF_WIDTH {
        let window = &input[i - HALF_WIDTH..=i + HALF_WIDTH];
        let sum: f32 = window.iter().zip(&SPATIAL_KERNEL).map(|(v, k)| v * k).sum();
        out[i] = sum / KERNEL_SUM;
    }
}

/// Exponential smoothing of band values over successive blocks, one state row per channel.
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    factor: f32,
    num_bands: usize,
    state: Vec<Vec<f32>>,
}

impl TemporalSmoother {
    /// `factor` is the weight kept from the previous value; it is clamped to `0.0..=1.0`.
    pub fn new(factor: f32, num_bands: usize) -> Self {
        Self {
            factor: clamp_factor(factor),
            num_bands,
            state: Vec::new(),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn num_channels(&self) -> usize {
        self.state.len()
    }

    pub fn is_sized(&self) -> bool {
        !self.state.is_empty()
    }

    /// Resize to `channels` rows, all zero.
    pub fn resize(&mut self, channels: usize) {
        self.state = vec![vec![0.0; self.num_bands]; channels];
    }

    /// Drop all rows; the next [`TemporalSmoother::resize`] starts from zero.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Blend `current` into the stored row for `channel`.
    ///
    /// `new = previous * factor + current * (1 - factor)`
    ///
    /// `channel` must be below [`TemporalSmoother::num_channels`].
    pub fn update(&mut self, channel: usize, current: &[f32]) {
        debug_assert!(
            channel < self.state.len(),
            "channel {} out of range for {} channel(s)",
            channel,
            self.state.len()
        );
        let factor = self.factor;
        if let Some(row) = self.state.get_mut(channel) {
            for (prev, &cur) in row.iter_mut().zip(current) {
                *prev = *prev * factor + cur * (1.0 - factor);
            }
        }
    }

    pub fn state(&self) -> &[Vec<f32>] {
        &self.state
    }
}

/// NaN falls back to the midpoint.
pub(crate) fn clamp_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        0.5
    } else {
        factor.clamp(0.0, 1.0)
    }
}
