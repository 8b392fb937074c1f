use crate::error::{AudioError, AudioResult};
use std::fmt;
use std::time::Duration;

/// Channel count of an interleaved buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channels(u16);

impl Channels {
    /// Single channel
    pub const MONO: Channels = Channels(1);
    /// Two channels
    pub const STEREO: Channels = Channels(2);

    /// Create Channels from channel count
    pub fn new(count: u16) -> AudioResult<Self> {
        if count == 0 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }
        Ok(Channels(count))
    }

    /// Get the number of channels
    pub fn count(&self) -> u16 {
        self.0
    }

    /// Get channel layout name
    pub fn name(&self) -> String {
        match self.0 {
            1 => "Mono".to_string(),
            2 => "Stereo".to_string(),
            n => format!("{n} channels"),
        }
    }
}

/// Integer PCM storage width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit (held as -128..=127, stored unsigned in WAV)
    I8,
    /// 16-bit signed (-32768 to 32767)
    I16,
    /// 24-bit signed
    I24,
    /// 32-bit signed
    I32,
}

impl BitDepth {
    /// Map a bits-per-sample value onto a storage width
    pub fn from_bits(bits: u16) -> AudioResult<Self> {
        match bits {
            8 => Ok(BitDepth::I8),
            16 => Ok(BitDepth::I16),
            24 => Ok(BitDepth::I24),
            32 => Ok(BitDepth::I32),
            n => Err(AudioError::UnsupportedFormat(format!(
                "{n}-bit integer PCM"
            ))),
        }
    }

    /// Get bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::I8 => 8,
            BitDepth::I16 => 16,
            BitDepth::I24 => 24,
            BitDepth::I32 => 32,
        }
    }

    /// Get bytes per sample
    pub fn bytes_per_sample(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Largest representable sample value
    pub fn max_value(&self) -> i32 {
        match self {
            BitDepth::I32 => i32::MAX,
            _ => (1i32 << (self.bits() - 1)) - 1,
        }
    }

    /// Smallest representable sample value
    pub fn min_value(&self) -> i32 {
        match self {
            BitDepth::I32 => i32::MIN,
            _ => -(1i32 << (self.bits() - 1)),
        }
    }

    /// Whether `sample` fits this width
    pub fn contains(&self, sample: i32) -> bool {
        (self.min_value()..=self.max_value()).contains(&sample)
    }
}

/// Interleaved integer PCM samples plus the layout needed to interpret them.
///
/// A buffer is never modified after construction; every stage of the
/// pipeline builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved samples, `channels` values per frame
    samples: Vec<i32>,
    /// Sample rate in Hz
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Storage width the samples must fit
    bit_depth: BitDepth,
}

impl AudioBuffer {
    /// Create a new buffer, validating rate, layout and sample range
    pub fn new(
        samples: Vec<i32>,
        sample_rate: u32,
        channels: Channels,
        bit_depth: BitDepth,
    ) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::BufferError(format!(
                "{} samples cannot be split into {} channels",
                samples.len(),
                channels.count()
            )));
        }

        if let Some(bad) = samples.iter().find(|&&s| !bit_depth.contains(s)) {
            return Err(AudioError::BufferError(format!(
                "sample {bad} does not fit {}-bit storage",
                bit_depth.bits()
            )));
        }

        Ok(AudioBuffer {
            samples,
            sample_rate,
            channels,
            bit_depth,
        })
    }

    /// Build a buffer sharing this one's layout but holding other samples
    pub fn with_samples(&self, samples: Vec<i32>) -> AudioResult<Self> {
        AudioBuffer::new(samples, self.sample_rate, self.channels, self.bit_depth)
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Get owned samples (consumes buffer)
    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get storage width
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Iterate over frames as slices of `channels` samples
    pub fn frame_iter(&self) -> std::slice::ChunksExact<'_, i32> {
        self.samples.chunks_exact(self.channels.count() as usize)
    }

    /// Playback duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u32 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Summary of a buffer for display
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Samples per channel
    pub frames: usize,
    /// Number of channels
    pub channels: Channels,
    /// Storage width
    pub bit_depth: BitDepth,
    /// Playback duration
    pub duration: Duration,
}

impl AudioInfo {
    /// Get duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

impl From<&AudioBuffer> for AudioInfo {
    fn from(buffer: &AudioBuffer) -> Self {
        AudioInfo {
            sample_rate: buffer.sample_rate(),
            frames: buffer.frames(),
            channels: buffer.channels(),
            bit_depth: buffer.bit_depth(),
            duration: buffer.duration(),
        }
    }
}

impl fmt::Display for AudioInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sampling rate: {} Hz", self.sample_rate)?;
        writeln!(f, "Number of samples: {}", self.frames)?;
        writeln!(f, "Channels: {}", self.channels.name())?;
        writeln!(f, "Bit depth: {}-bit", self.bit_depth.bits())?;
        write!(f, "Duration: {:.2} seconds", self.duration_secs())
    }
}
