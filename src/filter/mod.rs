//! Audio filter implementations

pub mod downsample;
pub mod quantize;
pub mod remix;

pub use downsample::{Downsample, DownsampleMode};
pub use quantize::BitDepthReducer;
pub use remix::{ChannelSelect, ChannelSelection};

use crate::core::AudioBuffer;
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Build a new buffer from `buffer`; the input is left untouched
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer>;
}
