//! Example: stream synthetic stereo audio through the analyzer.
//!
//! A "playback" thread owns the analyzer, feeds it blocks of a rising sweep and
//! sends each snapshot to the main thread, which draws them as text bars. When
//! playback stops the thread sends the cleared output so the display empties.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example stream_synthetic

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use realtime_spectrum::audio::synth::{generate_sine_block, interleave};
use realtime_spectrum::{Analyzer, AnalyzerConfig, Spectra};

const BLOCKS: usize = 24;

fn render(spectra: &Spectra) -> String {
    if spectra.is_empty() {
        return "(stopped)".to_string();
    }

    spectra
        .iter()
        .enumerate()
        .map(|(channel, bands)| {
            let bars: String = bands
                .iter()
                .map(|&v| match (v * 8.0) as usize {
                    0 => ' ',
                    1 => '▁',
                    2 => '▂',
                    3 => '▃',
                    4 => '▄',
                    5 => '▅',
                    6 => '▆',
                    7 => '▇',
                    _ => '█',
                })
                .collect();
            format!("ch{} |{}|", channel, bars)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Realtime Spectrum - Synthetic Stream Example");
    println!("============================================\n");

    let config = AnalyzerConfig::default().with_band_count(16);
    let block_size = config.transform_size;
    let sample_rate = config.sample_rate;
    let block_duration = Duration::from_secs_f32(block_size as f32 / sample_rate);

    println!("  Block size: {} samples", block_size);
    println!("  Sample rate: {} Hz", sample_rate);
    println!("  Bands: {}\n", config.band_count);

    let mut analyzer = Analyzer::with_channels(config, 2)?;
    let (tx, rx) = mpsc::channel::<Spectra>();

    let playback = thread::spawn(move || -> anyhow::Result<()> {
        for i in 0..BLOCKS {
            // Left sweeps up, right sweeps down.
            let t = i as f32 / (BLOCKS - 1) as f32;
            let left_freq = 150.0 * (100.0f32).powf(t);
            let right_freq = 15000.0 / (100.0f32).powf(t);

            let left = generate_sine_block(left_freq, sample_rate, block_size, 0.8);
            let right = generate_sine_block(right_freq, sample_rate, block_size, 0.6);
            let block = interleave(&[&left, &right]);

            let spectra = analyzer.analyze_interleaved(&block, 2)?;
            if tx.send(spectra.to_vec()).is_err() {
                break;
            }
            thread::sleep(block_duration);
        }

        let _ = tx.send(Analyzer::cleared_output());
        Ok(())
    });

    for spectra in rx {
        println!("{}", render(&spectra));
    }

    playback
        .join()
        .map_err(|_| anyhow::anyhow!("playback thread panicked"))??;

    println!("\nDone!");
    Ok(())
}
