//! Audio decoder implementations

pub mod symphonia;
pub mod wav;

pub use symphonia::SymphoniaDecoder;
pub use wav::WavDecoder;

use crate::core::{AudioBuffer, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use log::{debug, info};
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Sample rate of the stream
    fn sample_rate(&self) -> u32;

    /// Channel layout of the stream
    fn channels(&self) -> Channels;

    /// Storage width of the decoded samples
    fn bit_depth(&self) -> BitDepth;

    /// Get next chunk of audio from the stream
    fn decode_frame(&mut self) -> AudioResult<Option<AudioBuffer>>;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;

    /// Drain the stream into a single buffer
    fn decode_all(&mut self) -> AudioResult<AudioBuffer> {
        let mut samples = Vec::new();
        while let Some(chunk) = self.decode_frame()? {
            samples.extend(chunk.into_samples());
        }
        AudioBuffer::new(samples, self.sample_rate(), self.channels(), self.bit_depth())
    }
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Create a decoder from a file path
///
/// Integer PCM WAV files keep their native width; anything else, including
/// floating-point WAV, goes through Symphonia and comes out as 16-bit.
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    let path = path.as_ref();

    if is_wav(path) {
        match WavDecoder::open(path) {
            Ok(decoder) => return Ok(Box::new(decoder)),
            Err(AudioError::UnsupportedFormat(reason)) => {
                debug!("{}: {reason}, falling back to symphonia", path.display());
            }
            Err(e) => return Err(e),
        }
    }

    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Load a whole file into memory
pub fn load<P: AsRef<Path>>(path: P) -> AudioResult<AudioBuffer> {
    let path = path.as_ref();
    let buffer = from_file(path)?.decode_all()?;
    info!(
        "Loaded {}: {} frames at {} Hz",
        path.display(),
        buffer.frames(),
        buffer.sample_rate()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::write_wav;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let result = load("/nonexistent/input.wav");
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn test_wav_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.wav");
        let original = AudioBuffer::new(
            vec![0, 1, -1, 32767, -32768, 1234, -4321, 7],
            22050,
            Channels::STEREO,
            BitDepth::I16,
        )
        .unwrap();

        write_wav(&path, &original).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_round_trip_keeps_narrow_and_wide_widths() {
        let dir = tempdir().unwrap();
        for (depth, samples) in [
            (BitDepth::I8, vec![-128, 0, 5, 127]),
            (BitDepth::I24, vec![-8_388_608, 0, 42, 8_388_607]),
        ] {
            let path = dir.path().join(format!("width_{}.wav", depth.bits()));
            let original = AudioBuffer::new(samples, 8000, Channels::MONO, depth).unwrap();

            write_wav(&path, &original).unwrap();
            assert_eq!(load(&path).unwrap(), original);
        }
    }

    #[test]
    fn test_is_wav_ignores_case() {
        assert!(is_wav(Path::new("a/B.WAV")));
        assert!(!is_wav(Path::new("piano-sample.mp3")));
        assert!(!is_wav(Path::new("noext")));
    }
}
