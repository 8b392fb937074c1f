use std::io;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors raised by any stage of the compression pipeline
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error (missing input, unwritable output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Container or codec not understood by any decoder
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Stream is missing rate or channel information
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// WAV container read/write failure reported by hound
    #[error("WAV container error: {0}")]
    Container(String),

    /// Band-limited resampling failed
    #[error("Resampling error: {0}")]
    ResamplingError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u16,
        /// Got number of channels
        got: u16,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Sample data does not match the declared layout or width
    #[error("Buffer error: {0}")]
    BufferError(String),

    /// A caller-supplied parameter is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The signal itself cannot be processed (e.g. silence fed to the quantizer)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audio processing error
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => AudioError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                AudioError::UnsupportedFormat(what.to_string())
            }
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            e => AudioError::Container(e.to_string()),
        }
    }
}
