use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use log::debug;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Sinc window length of the band-limited mode
const SINC_LEN: usize = 256;

/// How samples are dropped when the rate is reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownsampleMode {
    /// Keep every `factor`-th frame, no anti-alias filtering
    #[default]
    Decimate,
    /// Band-limited sinc resampling to the same target rate
    Filtered,
}

/// Integer-factor sample rate reducer
#[derive(Debug, Clone)]
pub struct Downsample {
    factor: u32,
    mode: DownsampleMode,
}

impl Downsample {
    /// Create a decimating downsampler
    ///
    /// # Arguments
    /// * `factor` - Keep one frame out of every `factor`; must be at least 1
    pub fn new(factor: u32) -> AudioResult<Self> {
        if factor == 0 {
            return Err(AudioError::InvalidArgument(
                "downsample factor must be at least 1".to_string(),
            ));
        }

        Ok(Downsample {
            factor,
            mode: DownsampleMode::Decimate,
        })
    }

    /// Switch the reduction mode
    pub fn with_mode(mut self, mode: DownsampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the decimation factor
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Get the reduction mode
    pub fn mode(&self) -> DownsampleMode {
        self.mode
    }

    /// Rate after reduction; the remainder of the division is dropped
    pub fn output_rate(&self, input_rate: u32) -> u32 {
        input_rate / self.factor
    }

    fn decimate(buffer: &AudioBuffer, factor: usize) -> Vec<i32> {
        buffer
            .frame_iter()
            .step_by(factor)
            .flatten()
            .copied()
            .collect()
    }

    fn filtered(buffer: &AudioBuffer, output_rate: u32) -> AudioResult<Vec<i32>> {
        let channels = buffer.channels().count() as usize;
        let frames = buffer.frames();
        if frames == 0 {
            return Ok(Vec::new());
        }

        let params = SincInterpolationParameters {
            sinc_len: SINC_LEN,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        // Zero tail long enough to push the last real frame through the sinc window
        let tail = 2 * SINC_LEN + (buffer.sample_rate() / output_rate) as usize + 1;

        let depth = buffer.bit_depth();
        let scale = f64::from(depth.max_value());
        let planar: Vec<Vec<f64>> = (0..channels)
            .map(|ch| {
                buffer
                    .frame_iter()
                    .map(|frame| f64::from(frame[ch]) / scale)
                    .chain(std::iter::repeat_n(0.0, tail))
                    .collect()
            })
            .collect();

        let ratio = f64::from(output_rate) / f64::from(buffer.sample_rate());
        let mut resampler = SincFixedIn::<f64>::new(ratio, 2.0, params, frames + tail, channels)
            .map_err(|e| AudioError::ResamplingError(e.to_string()))?;

        let output = resampler
            .process(&planar, None)
            .map_err(|e| AudioError::ResamplingError(e.to_string()))?;

        // Output starts `delay` frames late and runs on into the zero tail
        let delay = resampler.output_delay();
        let wanted = (frames as u64 * u64::from(output_rate))
            .div_ceil(u64::from(buffer.sample_rate())) as usize;
        let available = output.first().map(Vec::len).unwrap_or(0);
        let end = (delay + wanted).min(available);
        let start = delay.min(end);

        let (min, max) = (f64::from(depth.min_value()), f64::from(depth.max_value()));
        let mut interleaved = Vec::with_capacity((end - start) * channels);
        for i in start..end {
            for channel in &output {
                interleaved.push((channel[i] * scale).round().clamp(min, max) as i32);
            }
        }

        Ok(interleaved)
    }
}

impl super::Filter for Downsample {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        let output_rate = self.output_rate(buffer.sample_rate());
        if output_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: output_rate });
        }

        if self.factor == 1 {
            return Ok(buffer.clone());
        }

        let samples = match self.mode {
            DownsampleMode::Decimate => Self::decimate(buffer, self.factor as usize),
            DownsampleMode::Filtered => Self::filtered(buffer, output_rate)?,
        };

        debug!(
            "Downsampled {} Hz -> {} Hz by {} ({:?})",
            buffer.sample_rate(),
            output_rate,
            self.factor,
            self.mode
        );

        AudioBuffer::new(samples, output_rate, buffer.channels(), buffer.bit_depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BitDepth, Channels};
    use crate::filter::Filter;

    fn mono(samples: Vec<i32>, rate: u32) -> AudioBuffer {
        AudioBuffer::new(samples, rate, Channels::MONO, BitDepth::I16).unwrap()
    }

    #[test]
    fn test_downsample_zero_factor() {
        assert!(matches!(Downsample::new(0), Err(AudioError::InvalidArgument(_))));
    }

    #[test]
    fn test_decimate_keeps_every_kth() {
        let input: Vec<i32> = (0..10).collect();
        let out = Downsample::new(3).unwrap().process(&mono(input.clone(), 44100)).unwrap();

        // ceil(10 / 3) = 4 samples, each input[i * 3]
        assert_eq!(out.samples(), &[0, 3, 6, 9]);
        assert_eq!(out.sample_rate(), 14700);
        for (i, &s) in out.samples().iter().enumerate() {
            assert_eq!(s, input[i * 3]);
        }
    }

    #[test]
    fn test_rate_truncates() {
        let out = Downsample::new(2).unwrap().process(&mono(vec![1, 2, 3], 44101)).unwrap();
        assert_eq!(out.sample_rate(), 22050);
        assert_eq!(out.samples(), &[1, 3]);
    }

    #[test]
    fn test_decimate_keeps_frames_together() {
        let buffer = AudioBuffer::new(
            vec![1, -1, 2, -2, 3, -3],
            48000,
            Channels::STEREO,
            BitDepth::I16,
        )
        .unwrap();
        let out = Downsample::new(2).unwrap().process(&buffer).unwrap();

        assert_eq!(out.samples(), &[1, -1, 3, -3]);
        assert_eq!(out.channels(), Channels::STEREO);
    }

    #[test]
    fn test_factor_one_is_identity() {
        let buffer = mono(vec![5, 6, 7], 8000);
        assert_eq!(Downsample::new(1).unwrap().process(&buffer).unwrap(), buffer);
    }

    #[test]
    fn test_factor_above_rate_fails() {
        let result = Downsample::new(200).unwrap().process(&mono(vec![1, 2], 100));
        assert!(matches!(result, Err(AudioError::InvalidSampleRate { rate: 0 })));
    }

    #[test]
    fn test_filtered_mode_matches_decimated_length() {
        for len in [100usize, 500, 4800] {
            let buffer = mono(vec![1000; len], 44100);
            let decimated = Downsample::new(2).unwrap().process(&buffer).unwrap();
            let filtered = Downsample::new(2)
                .unwrap()
                .with_mode(DownsampleMode::Filtered)
                .process(&buffer)
                .unwrap();

            assert_eq!(filtered.sample_rate(), 22050);
            assert!(
                filtered.frames().abs_diff(decimated.frames()) <= 1,
                "len {len}: filtered {} vs decimated {}",
                filtered.frames(),
                decimated.frames()
            );
        }
    }

    #[test]
    fn test_filtered_mode_keeps_level_and_alignment() {
        let buffer = mono(vec![1000; 4800], 48000);
        let out = Downsample::new(2)
            .unwrap()
            .with_mode(DownsampleMode::Filtered)
            .process(&buffer)
            .unwrap();

        assert_eq!(out.frames(), 2400);
        // Away from the edges a constant signal passes through unchanged
        let middle = out.samples()[1200];
        assert!((middle - 1000).abs() <= 50, "middle sample {middle}");
    }

    #[test]
    fn test_filtered_stereo_keeps_channels_apart() {
        let samples: Vec<i32> = (0..2000).flat_map(|_| [3000, -3000]).collect();
        let buffer = AudioBuffer::new(samples, 16000, Channels::STEREO, BitDepth::I16).unwrap();
        let out = Downsample::new(4)
            .unwrap()
            .with_mode(DownsampleMode::Filtered)
            .process(&buffer)
            .unwrap();

        assert_eq!(out.frames(), 500);
        let frame = &out.samples()[500..502];
        assert!(frame[0] > 2900 && frame[1] < -2900, "frame {frame:?}");
    }
}
