// Tests for in-memory WAV artifact encoding.

use std::io::Cursor;

use pronounce_practice::audio::AudioArtifact;
use tempfile::TempDir;

#[test]
fn encoded_artifact_round_trips_through_hound() {
    let samples: Vec<i16> = (0..1600).map(|i| (i % 100) as i16).collect();
    let artifact = AudioArtifact::from_samples(&samples, 16000, 1).unwrap();

    let reader = hound::WavReader::new(Cursor::new(&artifact.bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let decoded: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(decoded, samples);
}

#[test]
fn artifact_metadata_matches_input() {
    let artifact = AudioArtifact::from_samples(&[0i16; 32000], 16000, 2).unwrap();

    assert_eq!(artifact.sample_rate, 16000);
    assert_eq!(artifact.channels, 2);
    assert_eq!(artifact.sample_count, 32000);
    // 32000 interleaved samples over 2 channels at 16kHz = 1 second
    assert!((artifact.duration_secs() - 1.0).abs() < 1e-9);
}

#[test]
fn upload_naming_is_fixed() {
    let artifact = AudioArtifact::from_samples(&[0i16; 16], 16000, 1).unwrap();

    assert_eq!(artifact.file_name(), "audio.wav");
    assert_eq!(artifact.mime(), "audio/wav");
}

#[test]
fn empty_recording_still_encodes() {
    // A tap without speech produces a valid zero-sample container.
    let artifact = AudioArtifact::from_samples(&[], 16000, 1).unwrap();

    assert_eq!(artifact.sample_count, 0);
    assert_eq!(artifact.duration_secs(), 0.0);

    let reader = hound::WavReader::new(Cursor::new(&artifact.bytes)).unwrap();
    assert_eq!(reader.len(), 0);
}

#[test]
fn write_to_places_a_readable_wav() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("attempt-001.wav");

    let artifact = AudioArtifact::from_samples(&[42i16; 800], 16000, 1).unwrap();
    artifact.write_to(&path).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 800);

    // The artifact itself is untouched and still uploadable.
    assert!(!artifact.bytes.is_empty());
}
