//! Core audio types and structures

/// Buffer, layout and summary types
pub mod audio;

pub use audio::{AudioBuffer, AudioInfo, BitDepth, Channels};
