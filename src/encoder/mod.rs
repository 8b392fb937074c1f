//! Audio encoder implementations

pub mod wav;

pub use wav::WavEncoder;

use crate::core::AudioBuffer;
use crate::error::AudioResult;
use log::debug;
use std::path::Path;

/// Trait for audio encoders
pub trait Encoder {
    /// Encode an audio buffer to output
    fn encode(&mut self, buffer: &AudioBuffer) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Write a whole buffer to a WAV file in its own rate, layout and width
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> AudioResult<()> {
    let path = path.as_ref();
    let mut encoder = WavEncoder::for_buffer(path, buffer)?;
    encoder.encode(buffer)?;
    encoder.finalize()?;
    debug!("Wrote {} frames to {}", buffer.frames(), path.display());
    Ok(())
}
