use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use log::debug;

/// Leading-segment extractor - keeps the first N seconds of a buffer
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Segment duration in seconds
    seconds: f64,
}

impl Segment {
    /// Create a new extractor
    pub fn new(seconds: f64) -> AudioResult<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AudioError::InvalidArgument(format!(
                "segment duration must be a non-negative number of seconds, got {seconds}"
            )));
        }

        Ok(Segment { seconds })
    }

    /// Get the requested duration in seconds
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Number of frames a segment of this duration spans at `sample_rate`
    pub fn frames_at(&self, sample_rate: u32) -> usize {
        (self.seconds * f64::from(sample_rate)).floor() as usize
    }

    /// Cut the leading segment.
    ///
    /// Asking for more than the buffer holds returns the whole buffer.
    pub fn extract(&self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        let frames = self.frames_at(buffer.sample_rate()).min(buffer.frames());
        let end = frames * buffer.channels().count() as usize;

        debug!(
            "Extracting {} of {} frames ({} s requested)",
            frames,
            buffer.frames(),
            self.seconds
        );

        buffer.with_samples(buffer.samples()[..end].to_vec())
    }
}
