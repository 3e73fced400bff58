//! Integration tests for the block analyzer.

use realtime_spectrum::audio::{
    generate_noise_block, generate_sine_block, interleave, log_bands, SpectralTransform,
};
use realtime_spectrum::{Analyzer, AnalyzerConfig, AnalyzerError, ErrorKind};
use std::io::Write;

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK: usize = 2048;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn peak_band(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn test_silence_stays_zero() {
    init_logging();
    let config = AnalyzerConfig::default()
        .with_transform_size(2048)
        .with_band_count(10)
        .with_frequency_range(100.0, 18000.0)
        .with_smoothing(0.5);
    let mut analyzer = Analyzer::new(config).unwrap();
    let silence = vec![0.0; BLOCK];

    for _ in 0..5 {
        let spectra = analyzer.analyze(&[&silence]).unwrap();
        assert_eq!(spectra.len(), 1);
        assert_eq!(spectra[0].len(), 10);
        assert!(spectra[0].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_silence_magnitudes_are_zero() {
    let mut transform = SpectralTransform::new(BLOCK).unwrap();
    let magnitudes = transform.analyze(&vec![0.0; BLOCK]).unwrap();
    assert_eq!(magnitudes.len(), BLOCK / 2);
    assert!(magnitudes.iter().all(|&m| m == 0.0));
}

#[test]
fn test_sine_peaks_in_its_band() {
    init_logging();
    for (freq, expected_band) in [(1000.0, 4), (5000.0, 7)] {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        assert!(analyzer.bands()[expected_band].contains(freq));

        let tone = generate_sine_block(freq, SAMPLE_RATE, BLOCK, 0.8);
        for _ in 0..3 {
            analyzer.analyze(&[&tone]).unwrap();
        }

        let spectra = analyzer.snapshot();
        assert_eq!(
            peak_band(&spectra[0]),
            expected_band,
            "{} Hz should peak in band {}: {:?}",
            freq,
            expected_band,
            spectra[0]
        );
    }
}

#[test]
fn test_output_shape_and_non_negative() {
    let config = AnalyzerConfig::default()
        .with_transform_size(1024)
        .with_band_count(24)
        .with_frequency_range(40.0, 16000.0);
    let mut analyzer = Analyzer::new(config).unwrap();
    let noise = generate_noise_block(44100, 0.9, 42);

    for block in noise.chunks_exact(2048).take(8) {
        let (left, right) = block.split_at(1024);
        let spectra = analyzer.analyze(&[left, right]).unwrap();
        assert_eq!(spectra.len(), 2);
        for channel in spectra {
            assert_eq!(channel.len(), 24);
            assert!(channel.iter().all(|&v| v >= 0.0 && v.is_finite()));
        }
    }
}

#[test]
fn test_returns_all_channels() {
    let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
    let tone = generate_sine_block(1000.0, SAMPLE_RATE, BLOCK, 0.8);
    let silence = vec![0.0; BLOCK];

    let spectra = analyzer.analyze(&[&tone, &silence]).unwrap();
    assert_eq!(spectra.len(), 2);
    assert!(spectra[0].iter().any(|&v| v > 0.0));
    assert!(spectra[1].iter().all(|&v| v == 0.0));
}

#[test]
fn test_constant_input_converges() {
    let tone = generate_sine_block(2000.0, SAMPLE_RATE, BLOCK, 0.5);

    // With no smoothing the output is the frame itself.
    let mut instant = Analyzer::new(AnalyzerConfig::default().with_smoothing(0.0)).unwrap();
    let target = instant.analyze(&[&tone]).unwrap()[0].clone();
    assert_eq!(instant.analyze(&[&tone]).unwrap()[0], target);

    let mut smoothed = Analyzer::new(AnalyzerConfig::default().with_smoothing(0.6)).unwrap();
    let max_error = |out: &[f32]| {
        out.iter()
            .zip(&target)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max)
    };

    let mut prev_err = f32::MAX;
    for _ in 0..15 {
        let err = max_error(&smoothed.analyze(&[&tone]).unwrap()[0]);
        assert!(err < prev_err);
        prev_err = err;
    }
    for _ in 0..45 {
        smoothed.analyze(&[&tone]).unwrap();
    }
    let err = max_error(&smoothed.spectra()[0]);
    assert!(err < 1e-5, "did not converge: {}", err);
}

#[test]
fn test_full_smoothing_never_moves() {
    let mut analyzer = Analyzer::new(AnalyzerConfig::default().with_smoothing(1.0)).unwrap();
    let tone = generate_sine_block(1000.0, SAMPLE_RATE, BLOCK, 1.0);
    for _ in 0..5 {
        let spectra = analyzer.analyze(&[&tone]).unwrap();
        assert!(spectra[0].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_non_power_of_two_rejected() {
    let err = Analyzer::new(AnalyzerConfig::default().with_transform_size(1000))
        .err()
        .unwrap();
    assert!(matches!(err, AnalyzerError::InvalidTransformSize(1000)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_wrong_length_leaves_state_unchanged() {
    let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
    let tone = generate_sine_block(3000.0, SAMPLE_RATE, BLOCK, 0.8);
    analyzer.analyze(&[&tone]).unwrap();
    let before = analyzer.snapshot();

    let err = analyzer.analyze(&[&tone[..1024]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputShape);
    assert_eq!(analyzer.snapshot(), before);
}

#[test]
fn test_interleaved_matches_planar() {
    let left = generate_sine_block(700.0, SAMPLE_RATE, BLOCK, 0.7);
    let right = generate_sine_block(4200.0, SAMPLE_RATE, BLOCK, 0.4);
    let mixed = interleave(&[&left, &right]);

    let mut planar = Analyzer::new(AnalyzerConfig::default()).unwrap();
    let mut interleaved = Analyzer::new(AnalyzerConfig::default()).unwrap();
    for _ in 0..3 {
        let a = planar.analyze(&[&left, &right]).unwrap().to_vec();
        let b = interleaved.analyze_interleaved(&mixed, 2).unwrap().to_vec();
        assert_eq!(a, b);
    }
}

#[test]
fn test_interleaved_channel_count_is_fixed() {
    let mut analyzer = Analyzer::with_channels(AnalyzerConfig::default(), 2).unwrap();
    let left = generate_sine_block(700.0, SAMPLE_RATE, BLOCK, 0.7);
    let right = generate_sine_block(4200.0, SAMPLE_RATE, BLOCK, 0.4);
    analyzer
        .analyze_interleaved(&interleave(&[&left, &right]), 2)
        .unwrap();
    let before = analyzer.snapshot();

    let err = analyzer.analyze_interleaved(&left, 1).unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::ChannelCountMismatch {
            expected: 2,
            got: 1
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InputShape);
    assert_eq!(analyzer.snapshot(), before);
}

#[test]
fn test_reset_and_resize() {
    let mut analyzer = Analyzer::with_channels(AnalyzerConfig::default(), 1).unwrap();
    assert_eq!(analyzer.channel_count(), Some(1));

    let tone = generate_sine_block(1000.0, SAMPLE_RATE, BLOCK, 0.8);
    analyzer.analyze(&[&tone]).unwrap();

    analyzer.initialize_channels(2).unwrap();
    assert_eq!(analyzer.snapshot(), vec![vec![0.0; 10]; 2]);
    analyzer.analyze(&[&tone, &tone]).unwrap();

    analyzer.reset();
    assert_eq!(analyzer.channel_count(), None);
    assert!(analyzer.spectra().is_empty());
}

#[test]
fn test_band_layout_properties() {
    for (start, end, count) in [(100.0, 18000.0, 10), (20.0, 20000.0, 64), (440.0, 880.0, 3)] {
        let config = AnalyzerConfig::default()
            .with_frequency_range(start, end)
            .with_band_count(count);
        let analyzer = Analyzer::new(config).unwrap();
        let bands = analyzer.bands();

        assert_eq!(bands, log_bands(start, end, count).as_slice());
        assert_eq!(bands.len(), count);
        assert_eq!(bands[0].lower, start);
        assert_eq!(bands[count - 1].upper, end);
        for band in bands {
            assert!(band.upper > band.lower);
        }
        for pair in bands.windows(2) {
            assert!(pair[1].lower > pair[0].lower);
        }
    }
}

#[test]
fn test_small_band_count_does_not_panic() {
    for count in 1..7 {
        let mut analyzer =
            Analyzer::new(AnalyzerConfig::default().with_band_count(count)).unwrap();
        let tone = generate_sine_block(1000.0, SAMPLE_RATE, BLOCK, 0.8);
        let spectra = analyzer.analyze(&[&tone]).unwrap();
        assert_eq!(spectra[0].len(), count);
    }
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "transform_size": 4096, "band_count": 16, "smoothing": 0.25 }}"#
    )
    .unwrap();

    let config = AnalyzerConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.transform_size, 4096);
    assert_eq!(config.band_count, 16);

    let analyzer = Analyzer::new(config).unwrap();
    assert_eq!(analyzer.weights().len(), 2048);
}

#[test]
fn test_config_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnalyzerConfig::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, AnalyzerError::ConfigIo(_)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
