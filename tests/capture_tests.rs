// Unit tests for capture configuration and sample normalization.

use pronounce_practice::audio::{decimate, mix_to_mono, CaptureConfig};

#[test]
fn capture_config_default_is_16khz_mono() {
    let config = CaptureConfig::default();

    assert_eq!(config.target_sample_rate, 16000);
    assert_eq!(config.target_channels, 1);
}

#[test]
fn stereo_mixes_down_by_summing() {
    let (mono, channels) = mix_to_mono(vec![100, 200, 150, 250, 175, 275], 2);

    assert_eq!(channels, 1);
    assert_eq!(mono, vec![300, 400, 450]);
}

#[test]
fn mixdown_clamps_instead_of_wrapping() {
    let (mono, _) = mix_to_mono(vec![i16::MAX, i16::MAX, i16::MIN, i16::MIN], 2);

    assert_eq!(mono, vec![i16::MAX, i16::MIN]);
}

#[test]
fn mono_input_passes_through() {
    let samples = vec![1, 2, 3, 4, 5];
    let (mono, channels) = mix_to_mono(samples.clone(), 1);

    assert_eq!(channels, 1);
    assert_eq!(mono, samples);
}

#[test]
fn decimation_takes_every_nth_sample() {
    let samples: Vec<i16> = (0..12).collect();
    let (decimated, rate) = decimate(samples, 48000, 16000);

    assert_eq!(rate, 16000);
    assert_eq!(decimated, vec![0, 3, 6, 9]);
}

#[test]
fn non_integral_ratio_passes_through() {
    // 44.1kHz does not decimate cleanly to 16kHz; keep the source rate.
    let samples: Vec<i16> = (0..10).collect();
    let (out, rate) = decimate(samples.clone(), 44100, 16000);

    assert_eq!(rate, 44100);
    assert_eq!(out, samples);
}

#[test]
fn decimation_never_upsamples() {
    let samples: Vec<i16> = (0..10).collect();
    let (out, rate) = decimate(samples.clone(), 8000, 16000);

    assert_eq!(rate, 8000);
    assert_eq!(out, samples);
}
