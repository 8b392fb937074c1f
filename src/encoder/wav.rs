use crate::core::{AudioBuffer, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Integer PCM WAV encoder
pub struct WavEncoder {
    writer: Option<WavWriter<BufWriter<File>>>,
    sample_rate: u32,
    channels: Channels,
    bit_depth: BitDepth,
}

impl WavEncoder {
    /// Create a new WAV encoder to file
    pub fn new<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: Channels,
        bit_depth: BitDepth,
    ) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        let spec = WavSpec {
            channels: channels.count(),
            sample_rate,
            bits_per_sample: bit_depth.bits(),
            sample_format: SampleFormat::Int,
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
            bit_depth,
        })
    }

    /// Create an encoder matching a buffer's layout
    pub fn for_buffer<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> AudioResult<Self> {
        WavEncoder::new(
            path,
            buffer.sample_rate(),
            buffer.channels(),
            buffer.bit_depth(),
        )
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the storage width
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, buffer: &AudioBuffer) -> AudioResult<()> {
        if buffer.sample_rate() != self.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: buffer.sample_rate(),
            });
        }

        if buffer.channels() != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: buffer.channels().count(),
            });
        }

        if buffer.bit_depth() != self.bit_depth {
            return Err(AudioError::EncodeError(format!(
                "encoder writes {}-bit samples, buffer holds {}-bit",
                self.bit_depth.bits(),
                buffer.bit_depth().bits()
            )));
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::ProcessingError("Encoder already finalized".to_string()))?;

        for &sample in buffer.samples() {
            writer.write_sample(sample)?;
        }

        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}
