//! Block-sized test signals.
//!
//! Everything here produces exactly the number of samples asked for, so the
//! output can be fed straight into an analyzer of that transform size.

use std::f32::consts::PI;

/// `num_samples` samples of a sine at `frequency` Hz, starting at phase 0.
pub fn generate_sine_block(
    frequency: f32,
    sample_rate: f32,
    num_samples: usize,
    amplitude: f32,
) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// `num_samples` of uniform noise in `-amplitude..amplitude`.
///
/// Driven by splitmix64, so the same seed always gives the same block.
pub fn generate_noise_block(num_samples: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..num_samples)
        .map(|_| {
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^= z >> 31;

            // Top 24 bits give an exact f32 in 0..1.
            let unit = (z >> 40) as f32 / (1u64 << 24) as f32;
            amplitude * (unit * 2.0 - 1.0)
        })
        .collect()
}

/// Interleave planar channels frame by frame (`L R L R ...`).
///
/// Stops at the shortest channel.
pub fn interleave<C: AsRef<[f32]>>(channels: &[C]) -> Vec<f32> {
    let frames = channels
        .iter()
        .map(|c| c.as_ref().len())
        .min()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        for channel in channels {
            out.push(channel.as_ref()[i]);
        }
    }
    out
}
