use crate::core::{AudioBuffer, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{SampleFormat, WavReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Frames handed out per `decode_frame` call
const CHUNK_FRAMES: usize = 4096;

/// Integer PCM WAV decoder backed by hound
pub struct WavDecoder {
    reader: WavReader<BufReader<File>>,
    sample_rate: u32,
    channels: Channels,
    bit_depth: BitDepth,
    finished: bool,
}

impl WavDecoder {
    /// Open a WAV file, rejecting floating-point data
    pub fn open<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_format == SampleFormat::Float {
            return Err(AudioError::UnsupportedFormat(
                "floating-point WAV".to_string(),
            ));
        }

        Ok(WavDecoder {
            sample_rate: spec.sample_rate,
            channels: Channels::new(spec.channels)?,
            bit_depth: BitDepth::from_bits(spec.bits_per_sample)?,
            reader,
            finished: false,
        })
    }
}

impl super::Decoder for WavDecoder {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> Channels {
        self.channels
    }

    fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    fn decode_frame(&mut self) -> AudioResult<Option<AudioBuffer>> {
        if self.finished {
            return Ok(None);
        }

        let wanted = CHUNK_FRAMES * self.channels.count() as usize;
        let mut samples = Vec::with_capacity(wanted);
        for sample in self.reader.samples::<i32>().take(wanted) {
            samples.push(sample?);
        }

        if samples.len() < wanted {
            self.finished = true;
        }
        if samples.is_empty() {
            return Ok(None);
        }

        AudioBuffer::new(samples, self.sample_rate, self.channels, self.bit_depth).map(Some)
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
