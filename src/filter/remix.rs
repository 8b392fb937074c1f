use crate::core::{AudioBuffer, Channels};
use crate::error::{AudioError, AudioResult};
use std::fmt;
use std::str::FromStr;

/// How a multi-channel buffer is reduced to one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelSelection {
    /// Keep channel 0
    #[default]
    First,
    /// Rounded mean of all channels
    Average,
    /// Keep an explicit channel
    Index(u16),
}

impl ChannelSelection {
    /// Produce a mono buffer according to this policy
    pub fn apply(&self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        let count = buffer.channels().count();

        let samples: Vec<i32> = match *self {
            ChannelSelection::First => buffer.frame_iter().map(|frame| frame[0]).collect(),
            ChannelSelection::Index(index) if index < count => buffer
                .frame_iter()
                .map(|frame| frame[index as usize])
                .collect(),
            ChannelSelection::Index(index) => {
                return Err(AudioError::InvalidArgument(format!(
                    "channel {index} requested from a {count}-channel buffer"
                )));
            }
            ChannelSelection::Average => buffer
                .frame_iter()
                .map(|frame| {
                    let sum: i64 = frame.iter().map(|&s| i64::from(s)).sum();
                    (sum as f64 / f64::from(count)).round() as i32
                })
                .collect(),
        };

        AudioBuffer::new(samples, buffer.sample_rate(), Channels::MONO, buffer.bit_depth())
    }
}

impl FromStr for ChannelSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ChannelSelection::First),
            "average" | "mean" => Ok(ChannelSelection::Average),
            other => other.parse::<u16>().map(ChannelSelection::Index).map_err(|_| {
                format!("expected `first`, `average` or a channel index, got `{s}`")
            }),
        }
    }
}

impl fmt::Display for ChannelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelSelection::First => write!(f, "first"),
            ChannelSelection::Average => write!(f, "average"),
            ChannelSelection::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Channel reducer - turns any layout into mono
#[derive(Debug, Clone, Default)]
pub struct ChannelSelect {
    policy: ChannelSelection,
}

impl ChannelSelect {
    /// Create a reducer using `policy`
    pub fn new(policy: ChannelSelection) -> Self {
        ChannelSelect { policy }
    }

    /// Get the selection policy
    pub fn policy(&self) -> ChannelSelection {
        self.policy
    }
}

impl super::Filter for ChannelSelect {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        self.policy.apply(buffer)
    }
}
