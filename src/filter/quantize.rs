use super::remix::ChannelSelection;
use crate::core::{AudioBuffer, BitDepth};
use crate::error::{AudioError, AudioResult};
use log::debug;

/// Positive levels of signed 8-bit audio
pub const EIGHT_BIT_LEVELS: u32 = 127;

/// Amplitude-resolution reducer ("8-bit conversion").
///
/// The signal is reduced to one channel, peak-normalized to [-1, 1],
/// snapped to `levels` steps on each side of zero and rescaled to the full
/// range of the source storage width. Storage width is kept unless packed
/// output is requested, so by default a mono file keeps its byte size and
/// only its perceptual resolution drops.
#[derive(Clone, Debug)]
pub struct BitDepthReducer {
    /// Steps per polarity
    levels: u32,
    /// Channel reduction applied first
    selection: ChannelSelection,
    /// Store the result as real 8-bit PCM
    packed: bool,
}

impl Default for BitDepthReducer {
    fn default() -> Self {
        BitDepthReducer {
            levels: EIGHT_BIT_LEVELS,
            selection: ChannelSelection::First,
            packed: false,
        }
    }
}

impl BitDepthReducer {
    /// Create a reducer with 127 levels, first-channel selection, unpacked output
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different number of levels per polarity
    pub fn with_levels(mut self, levels: u32) -> AudioResult<Self> {
        if levels == 0 {
            return Err(AudioError::InvalidArgument(
                "quantizer needs at least one level".to_string(),
            ));
        }
        self.levels = levels;
        Ok(self)
    }

    /// Choose how multi-channel input is reduced
    pub fn with_selection(mut self, selection: ChannelSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Store output as 8-bit PCM instead of the source width
    pub fn packed(mut self, packed: bool) -> Self {
        self.packed = packed;
        self
    }

    /// Get levels per polarity
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Snap a normalized value onto the level grid
    fn snap(normalized: f64, levels: f64) -> f64 {
        (normalized * levels).round() / levels
    }
}

impl super::Filter for BitDepthReducer {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        let mono = self.selection.apply(buffer)?;

        let peak = mono.peak();
        if peak == 0 {
            return Err(AudioError::InvalidInput(
                "cannot normalize a silent or empty signal".to_string(),
            ));
        }

        let peak = f64::from(peak);
        let levels = f64::from(self.levels);
        let target = if self.packed {
            BitDepth::I8
        } else {
            mono.bit_depth()
        };
        let full_scale = f64::from(target.max_value());

        let samples = mono
            .samples()
            .iter()
            .map(|&s| {
                let level = Self::snap(f64::from(s) / peak, levels);
                let scaled = level * full_scale;
                if self.packed {
                    scaled.round() as i32
                } else {
                    // Truncate toward zero like an integer cast
                    scaled.trunc() as i32
                }
            })
            .collect();

        debug!(
            "Quantized {} frames to {} levels ({}-bit storage)",
            mono.frames(),
            self.levels,
            target.bits()
        );

        AudioBuffer::new(samples, mono.sample_rate(), mono.channels(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;
    use crate::filter::Filter;

    fn mono(samples: Vec<i32>) -> AudioBuffer {
        AudioBuffer::new(samples, 8000, Channels::MONO, BitDepth::I16).unwrap()
    }

    #[test]
    fn test_quantize_values() {
        let out = BitDepthReducer::new().process(&mono(vec![1000, -500, 0, 3])).unwrap();

        // peak 1000: 1.0 -> 32767, -0.5 -> round(-63.5) = -64 -> -64/127*32767
        assert_eq!(out.samples()[0], 32767);
        assert_eq!(out.samples()[1], (-64.0f64 / 127.0 * 32767.0).trunc() as i32);
        assert_eq!(out.samples()[2], 0);
        assert_eq!(out.samples()[3], 0);
        assert_eq!(out.bit_depth(), BitDepth::I16);
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let input: Vec<i32> = (0..2000)
            .map(|i| ((i as f64 * 0.013).sin() * 21000.0) as i32)
            .collect();
        let mut reducer = BitDepthReducer::new();

        let once = reducer.process(&mono(input)).unwrap();
        let twice = reducer.process(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_constant_signal_hits_full_scale() {
        let out = BitDepthReducer::new().process(&mono(vec![1234; 50])).unwrap();
        assert!(out.samples().iter().all(|&s| s == 32767));

        let out = BitDepthReducer::new().process(&mono(vec![-77; 50])).unwrap();
        assert!(out.samples().iter().all(|&s| s == -32767));
    }

    #[test]
    fn test_silence_is_rejected() {
        // No division by zero: silence is an explicit error
        let result = BitDepthReducer::new().process(&mono(vec![0, 0, 0]));
        assert!(matches!(result, Err(AudioError::InvalidInput(_))));

        let result = BitDepthReducer::new().process(&mono(Vec::new()));
        assert!(matches!(result, Err(AudioError::InvalidInput(_))));
    }

    #[test]
    fn test_takes_first_channel_by_default() {
        let stereo = AudioBuffer::new(
            vec![100, 0, -100, 0],
            8000,
            Channels::STEREO,
            BitDepth::I16,
        )
        .unwrap();
        let out = BitDepthReducer::new().process(&stereo).unwrap();

        assert_eq!(out.channels(), Channels::MONO);
        assert_eq!(out.samples(), &[32767, -32767]);

        // The second channel is silent
        let result = BitDepthReducer::new()
            .with_selection(ChannelSelection::Index(1))
            .process(&stereo);
        assert!(matches!(result, Err(AudioError::InvalidInput(_))));
    }

    #[test]
    fn test_packed_output_uses_8_bit_storage() {
        let out = BitDepthReducer::new()
            .packed(true)
            .process(&mono(vec![20000, -10000, 5]))
            .unwrap();

        assert_eq!(out.bit_depth(), BitDepth::I8);
        assert_eq!(out.samples(), &[127, -64, 0]);
    }

    #[test]
    fn test_custom_levels() {
        assert!(BitDepthReducer::new().with_levels(0).is_err());

        let out = BitDepthReducer::new()
            .with_levels(1)
            .unwrap()
            .process(&mono(vec![100, 40, 60, -100]))
            .unwrap();
        assert_eq!(out.samples(), &[32767, 0, 32767, -32767]);
    }
}
