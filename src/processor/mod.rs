//! Audio processing pipeline implementations

pub mod pipeline;
pub mod report;
pub mod segment;

pub use pipeline::{OutputPaths, Pipeline, PipelineConfig, PipelineReport};
pub use report::{FileSize, file_sizes, print_sizes};
pub use segment::Segment;
