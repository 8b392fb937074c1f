#![warn(missing_docs)]

//! # audio-compress: PCM audio compression exercises
//!
//! Load an uncompressed audio file, cut a leading segment, then compare two
//! ways of shrinking it: lowering the sample rate and lowering amplitude
//! resolution. Every intermediate result is written as WAV so the sizes can
//! be compared.
//!
//! ## Features
//!
//! - **Decode** - integer PCM WAV natively, MP3/FLAC/OGG/float WAV via Symphonia
//! - **Segment** - keep the first N seconds
//! - **Downsample** - integer-factor decimation or band-limited resampling
//! - **Quantize** - 127-level "8-bit" amplitude reduction
//! - **Report** - byte sizes of the produced files
//!
//! ## Quick Start
//!
//! ```ignore
//! use audio_compress::processor::{Pipeline, PipelineConfig};
//!
//! let report = Pipeline::new(PipelineConfig::for_input("interview-sample.wav")).run()?;
//! println!("{}", report.source);
//! audio_compress::processor::print_sizes(&report.sizes);
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Audio filter implementations
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Audio processing pipelines
pub mod processor;

pub use crate::core::{AudioBuffer, AudioInfo, BitDepth, Channels};
pub use error::{AudioError, AudioResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
