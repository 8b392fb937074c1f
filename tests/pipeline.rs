//! End-to-end runs of the compression pipeline on generated WAV files

use audio_compress::decoder;
use audio_compress::encoder::write_wav;
use audio_compress::processor::{OutputPaths, Pipeline, PipelineConfig};
use audio_compress::{AudioBuffer, AudioError, BitDepth, Channels};
use std::path::Path;
use tempfile::tempdir;

fn write_input(path: &Path, samples: Vec<i32>, rate: u32, channels: Channels) {
    let buffer = AudioBuffer::new(samples, rate, channels, BitDepth::I16).unwrap();
    write_wav(path, &buffer).unwrap();
}

fn tone(len: usize) -> Vec<i32> {
    (0..len)
        .map(|i| ((i as f64 * 0.3).sin() * 12000.0) as i32)
        .collect()
}

#[test]
fn test_ten_second_clip_scenario() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.wav");
    write_input(&input, tone(1000), 100, Channels::MONO);

    let mut config = PipelineConfig::for_input(&input);
    config.outputs = OutputPaths::in_dir(dir.path().join("out"));
    let report = Pipeline::new(config.clone()).run().unwrap();

    assert_eq!(report.source.frames, 1000);
    assert_eq!(report.source.duration_secs(), 10.0);
    assert_eq!(report.segment.frames, 500);
    assert_eq!(report.downsampled.frames, 250);
    assert_eq!(report.downsampled.sample_rate, 50);
    assert_eq!(report.quantized.frames, 500);

    let segment = decoder::load(&config.outputs.segment).unwrap();
    let downsampled = decoder::load(&config.outputs.downsampled).unwrap();
    assert_eq!(segment.frames(), 500);
    assert_eq!(segment.sample_rate(), 100);
    assert_eq!(downsampled.sample_rate(), 50);
    for (i, &s) in downsampled.samples().iter().enumerate() {
        assert_eq!(s, segment.samples()[i * 2]);
    }

    // Quantization keeps the storage width, so the file size does not change
    assert_eq!(report.sizes.len(), 3);
    assert_eq!(report.sizes[0].bytes, report.sizes[2].bytes);
    assert!(report.sizes[1].bytes < report.sizes[0].bytes);
}

#[test]
fn test_packed_output_halves_storage() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.wav");
    write_input(&input, tone(1000), 100, Channels::MONO);

    let mut config = PipelineConfig::for_input(&input);
    config.outputs = OutputPaths::in_dir(dir.path());
    config.packed_8bit = true;
    let report = Pipeline::new(config.clone()).run().unwrap();

    let quantized = decoder::load(&config.outputs.quantized).unwrap();
    assert_eq!(quantized.bit_depth(), BitDepth::I8);
    assert_eq!(quantized.frames(), 500);

    // Same 44-byte header, one byte per sample instead of two
    assert_eq!(report.sizes[0].bytes - 44, 2 * (report.sizes[2].bytes - 44));
}

#[test]
fn test_stereo_input_quantizes_first_channel() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("stereo.wav");
    let samples: Vec<i32> = tone(400).into_iter().flat_map(|s| [s, 0]).collect();
    write_input(&input, samples, 40, Channels::STEREO);

    let mut config = PipelineConfig::for_input(&input);
    config.outputs = OutputPaths::in_dir(dir.path());
    let report = Pipeline::new(config).run().unwrap();

    assert_eq!(report.segment.channels, Channels::STEREO);
    assert_eq!(report.segment.frames, 200);
    assert_eq!(report.downsampled.channels, Channels::STEREO);
    assert_eq!(report.downsampled.sample_rate, 20);
    assert_eq!(report.quantized.channels, Channels::MONO);
}

#[test]
fn test_silent_input_fails_explicitly() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("silence.wav");
    write_input(&input, vec![0; 1000], 100, Channels::MONO);

    let mut config = PipelineConfig::for_input(&input);
    config.outputs = OutputPaths::in_dir(dir.path());
    let result = Pipeline::new(config).run();

    assert!(matches!(result, Err(AudioError::InvalidInput(_))));
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let mut config = PipelineConfig::for_input(dir.path().join("absent.wav"));
    config.outputs = OutputPaths::in_dir(dir.path());

    let result = Pipeline::new(config.clone()).run();

    assert!(matches!(result, Err(AudioError::Io(_))));
    assert!(!config.outputs.segment.exists());
}

#[test]
fn test_zero_factor_is_rejected_before_loading() {
    let mut config = PipelineConfig::for_input("/nonexistent/input.wav");
    config.downsample_factor = 0;

    let result = Pipeline::new(config).run();
    assert!(matches!(result, Err(AudioError::InvalidArgument(_))));
}
