//! Block-by-block spectrum analyzer for band visualizers.
//!
//! Chains the Hann window, FFT, A-weighting, log band mapping and both
//! smoothing stages, keeping one row of smoothed band values per channel.

use super::bands::{log_bands, BandMapper, FrequencyBand};
use super::config::AnalyzerConfig;
use super::fft::SpectralTransform;
use super::smoothing::{clamp_factor, smooth_spatial, TemporalSmoother};
use super::weighting::WeightCurve;

/// Per-channel band values, outer index is the channel.
pub type Spectra = Vec<Vec<f32>>;

/// Broad category of an [`AnalyzerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected while building the analyzer or loading its config.
    Configuration,
    /// A block did not match the analyzer's shape; nothing was updated.
    InputShape,
}

/// Error type for spectrum analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Transform size must be a power of 2, got {0}")]
    InvalidTransformSize(usize),
    #[error("Band count must be at least 1, got {0}")]
    InvalidBandCount(usize),
    #[error("Invalid frequency range: start {start} Hz must be positive and below end {end} Hz")]
    InvalidFrequencyRange { start: f32, end: f32 },
    #[error("{count} bands do not fit between {start} Hz and {end} Hz")]
    BandsTooNarrow { start: f32, end: f32, count: usize },
    #[error("Sample rate must be positive, got {0}")]
    InvalidSampleRate(f32),
    #[error("Failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Channel {channel}: need {expected} samples but got {got}")]
    InputLength {
        channel: usize,
        expected: usize,
        got: usize,
    },
    #[error("Block has no channels")]
    NoChannels,
    #[error("Analyzer has {expected} channels but block has {got}")]
    ChannelCountMismatch { expected: usize, got: usize },
    #[error("Output buffer holds {got} bins, need {expected}")]
    OutputLength { expected: usize, got: usize },
    #[error("Interleaved block for {channels} channels needs {expected} samples but got {got}")]
    InterleavedLength {
        channels: usize,
        expected: usize,
        got: usize,
    },
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::InvalidTransformSize(_)
            | AnalyzerError::InvalidBandCount(_)
            | AnalyzerError::InvalidFrequencyRange { .. }
            | AnalyzerError::BandsTooNarrow { .. }
            | AnalyzerError::InvalidSampleRate(_)
            | AnalyzerError::ConfigIo(_)
            | AnalyzerError::ConfigParse(_) => ErrorKind::Configuration,
            AnalyzerError::InputLength { .. }
            | AnalyzerError::NoChannels
            | AnalyzerError::ChannelCountMismatch { .. }
            | AnalyzerError::OutputLength { .. }
            | AnalyzerError::InterleavedLength { .. } => ErrorKind::InputShape,
        }
    }
}

/// Stateful spectrum analyzer.
///
/// Everything the per-block path needs is allocated up front, so once the
/// channel count is known [`Analyzer::analyze`] does not allocate. Not meant to
/// be shared: `analyze` takes `&mut self` and mutates the smoothed state in place.
pub struct Analyzer {
    config: AnalyzerConfig,
    transform: SpectralTransform,
    weights: WeightCurve,
    mapper: BandMapper,
    smoother: TemporalSmoother,
    magnitudes: Vec<f32>,
    banded: Vec<f32>,
    highlighted: Vec<f32>,
    deinterleaved: Vec<Vec<f32>>,
}

impl Analyzer {
    /// Build an analyzer; the channel count is taken from the first block.
    pub fn new(mut config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;

        let clamped = clamp_factor(config.smoothing);
        if clamped != config.smoothing {
            log::warn!(
                "Smoothing factor {} out of range, clamped to {}",
                config.smoothing,
                clamped
            );
            config.smoothing = clamped;
        }

        let transform = SpectralTransform::new(config.transform_size)?;
        let weights = WeightCurve::new(config.transform_size, config.weighting_sample_rate);
        let bands = log_bands(
            config.start_frequency,
            config.end_frequency,
            config.band_count,
        );
        let mapper = BandMapper::new(bands, config.num_bins(), config.bin_width());

        log::debug!(
            "Analyzer ready: FFT size {}, {} bands over {}-{} Hz, bin width {:.2} Hz",
            config.transform_size,
            config.band_count,
            config.start_frequency,
            config.end_frequency,
            config.bin_width()
        );

        Ok(Self {
            magnitudes: vec![0.0; config.num_bins()],
            banded: vec![0.0; config.band_count],
            highlighted: vec![0.0; config.band_count],
            smoother: TemporalSmoother::new(config.smoothing, config.band_count),
            deinterleaved: Vec::new(),
            config,
            transform,
            weights,
            mapper,
        })
    }

    /// Build an analyzer with state for `channels` channels allocated up front.
    pub fn with_channels(config: AnalyzerConfig, channels: usize) -> Result<Self, AnalyzerError> {
        let mut analyzer = Self::new(config)?;
        analyzer.initialize_channels(channels)?;
        Ok(analyzer)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn bands(&self) -> &[FrequencyBand] {
        self.mapper.bands()
    }

    pub fn weights(&self) -> &[f32] {
        self.weights.weights()
    }

    /// Channel count of the smoothed state, or `None` before it is sized.
    pub fn channel_count(&self) -> Option<usize> {
        self.smoother
            .is_sized()
            .then(|| self.smoother.num_channels())
    }

    /// Resize the smoothed state to `channels` zeroed rows.
    pub fn initialize_channels(&mut self, channels: usize) -> Result<(), AnalyzerError> {
        if channels == 0 {
            return Err(AnalyzerError::NoChannels);
        }
        self.smoother.resize(channels);
        log::debug!("Analyzer state sized for {} channel(s)", channels);
        Ok(())
    }

    /// Forget all smoothed values and the channel count.
    pub fn reset(&mut self) {
        self.smoother.clear();
    }

    /// Current smoothed values for every channel.
    pub fn spectra(&self) -> &[Vec<f32>] {
        self.smoother.state()
    }

    /// Owned copy of [`Analyzer::spectra`].
    pub fn snapshot(&self) -> Spectra {
        self.smoother.state().to_vec()
    }

    /// Output to hand the display when playback stops. The analyzer itself
    /// never decays toward silence.
    pub fn cleared_output() -> Spectra {
        Vec::new()
    }

    /// Analyze one block with one slice per channel.
    ///
    /// Every channel must hold exactly `transform_size` samples. The whole block is
    /// checked before any state changes, so on error the previous output stands.
    /// Returns the smoothed values for all channels, not only those just updated.
    pub fn analyze<C: AsRef<[f32]>>(&mut self, channels: &[C]) -> Result<&[Vec<f32>], AnalyzerError> {
        self.check_channel_count(channels.len())?;
        let expected = self.config.transform_size;
        for (channel, samples) in channels.iter().enumerate() {
            let got = samples.as_ref().len();
            if got != expected {
                return Err(AnalyzerError::InputLength {
                    channel,
                    expected,
                    got,
                });
            }
        }

        self.ensure_sized(channels.len());
        for (channel, samples) in channels.iter().enumerate() {
            self.process_channel(channel, samples.as_ref())?;
        }

        log::trace!("Analyzed block of {} channel(s)", channels.len());
        Ok(self.smoother.state())
    }

    /// Analyze one frame-major interleaved block (`L R L R ...` for stereo).
    pub fn analyze_interleaved(
        &mut self,
        samples: &[f32],
        channels: usize,
    ) -> Result<&[Vec<f32>], AnalyzerError> {
        self.check_channel_count(channels)?;
        let expected = self.config.transform_size.checked_mul(channels);
        if expected != Some(samples.len()) {
            return Err(AnalyzerError::InterleavedLength {
                channels,
                expected: expected.unwrap_or(usize::MAX),
                got: samples.len(),
            });
        }

        let mut buffers = std::mem::take(&mut self.deinterleaved);
        if buffers.len() != channels {
            buffers = vec![vec![0.0; self.config.transform_size]; channels];
        }
        for (frame_idx, frame) in samples.chunks_exact(channels).enumerate() {
            for (buffer, &sample) in buffers.iter_mut().zip(frame) {
                buffer[frame_idx] = sample;
            }
        }

        self.ensure_sized(channels);
        let result = buffers
            .iter()
            .enumerate()
            .try_for_each(|(channel, buffer)| self.process_channel(channel, buffer));
        self.deinterleaved = buffers;
        result?;

        log::trace!("Analyzed interleaved block of {} channel(s)", channels);
        Ok(self.smoother.state())
    }

    fn check_channel_count(&self, got: usize) -> Result<(), AnalyzerError> {
        if got == 0 {
            return Err(AnalyzerError::NoChannels);
        }
        match self.channel_count() {
            Some(expected) if expected != got => {
                Err(AnalyzerError::ChannelCountMismatch { expected, got })
            }
            _ => Ok(()),
        }
    }

    fn ensure_sized(&mut self, channels: usize) {
        if !self.smoother.is_sized() {
            self.smoother.resize(channels);
            log::debug!("Analyzer state sized for {} channel(s)", channels);
        }
    }

    fn process_channel(&mut self, channel: usize, samples: &[f32]) -> Result<(), AnalyzerError> {
        self.transform.magnitudes(samples, &mut self.magnitudes)?;
        self.weights.apply(&mut self.magnitudes);
        self.mapper.map(&self.magnitudes, &mut self.banded);
        smooth_spatial(&self.banded, &mut self.highlighted);
        self.smoother.update(channel, &self.highlighted);
        Ok(())
    }
}
