use crate::core::{AudioBuffer, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use log::warn;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based decoder for compressed and floating-point sources.
///
/// Whatever the source format, samples come out as 16-bit PCM.
pub struct SymphoniaDecoder {
    /// Current reader for the audio source
    reader: Box<dyn FormatReader>,
    /// Track being decoded
    track_id: u32,
    /// Sample rate
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Whether decoding is finished
    finished: bool,
    /// Codec state
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = Box::new(File::open(path)?);
        let mss = MediaSourceStream::new(file, Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        let channels = match codec_params.channels {
            Some(layout) => Channels::new(layout.count() as u16)?,
            None => {
                return Err(AudioError::InvalidMetadata(
                    "Unknown channel count".to_string(),
                ));
            }
        };

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            sample_rate,
            channels,
            finished: false,
            decoder,
        })
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> Channels {
        self.channels
    }

    fn bit_depth(&self) -> BitDepth {
        BitDepth::I16
    }

    fn decode_frame(&mut self) -> AudioResult<Option<AudioBuffer>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(reason)) => {
                    warn!("Skipping corrupt packet: {reason}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            if spec.channels.count() != self.channels.count() as usize {
                return Err(AudioError::InvalidChannels {
                    expected: self.channels.count(),
                    got: spec.channels.count() as u16,
                });
            }

            let mut converted = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
            converted.copy_interleaved_ref(decoded);

            let samples = converted.samples().iter().map(|&s| i32::from(s)).collect();
            let buffer = AudioBuffer::new(samples, self.sample_rate, self.channels, BitDepth::I16)?;

            return Ok(Some(buffer));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
