use super::report::{self, FileSize};
use super::segment::Segment;
use crate::core::{AudioBuffer, AudioInfo};
use crate::decoder;
use crate::encoder::write_wav;
use crate::error::{AudioError, AudioResult};
use crate::filter::{BitDepthReducer, ChannelSelection, Downsample, DownsampleMode, Filter};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Where each stage writes its result
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    /// Leading segment
    pub segment: PathBuf,
    /// Segment at the reduced rate
    pub downsampled: PathBuf,
    /// Segment at reduced amplitude resolution
    pub quantized: PathBuf,
}

impl OutputPaths {
    /// Standard file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        OutputPaths {
            segment: dir.join("segment.wav"),
            downsampled: dir.join("segment_downsampled.wav"),
            quantized: dir.join("segment_8bit.wav"),
        }
    }

    /// All paths, in pipeline order
    pub fn all(&self) -> [&Path; 3] {
        [
            self.segment.as_path(),
            self.downsampled.as_path(),
            self.quantized.as_path(),
        ]
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths::in_dir(".")
    }
}

/// Parameters of one compression run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Source audio file
    pub input_path: PathBuf,
    /// Length of the leading segment in seconds
    pub segment_seconds: f64,
    /// Integer rate reduction factor
    pub downsample_factor: u32,
    /// Rate reduction method
    pub downsample_mode: DownsampleMode,
    /// Channel fed to the quantizer
    pub channel_selection: ChannelSelection,
    /// Store the quantized segment as real 8-bit PCM
    pub packed_8bit: bool,
    /// Output files
    pub outputs: OutputPaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from("interview-sample.wav"),
            segment_seconds: 5.0,
            downsample_factor: 2,
            downsample_mode: DownsampleMode::Decimate,
            channel_selection: ChannelSelection::First,
            packed_8bit: false,
            outputs: OutputPaths::default(),
        }
    }
}

impl PipelineConfig {
    /// Config for `input_path` with every other field at its default
    pub fn for_input<P: Into<PathBuf>>(input_path: P) -> Self {
        PipelineConfig {
            input_path: input_path.into(),
            ..Default::default()
        }
    }

    /// Check parameters before any file is touched
    pub fn validate(&self) -> AudioResult<()> {
        Segment::new(self.segment_seconds)?;
        Downsample::new(self.downsample_factor)?;

        let input = file_key(&self.input_path)?;
        let mut seen: Vec<PathBuf> = Vec::with_capacity(3);
        for output in self.outputs.all() {
            let key = file_key(output)?;
            if key == input {
                return Err(AudioError::InvalidArgument(format!(
                    "output {} would overwrite input {}",
                    output.display(),
                    self.input_path.display()
                )));
            }
            if seen.contains(&key) {
                return Err(AudioError::InvalidArgument(format!(
                    "{} is used for more than one output",
                    output.display()
                )));
            }
            seen.push(key);
        }
        Ok(())
    }
}

/// Identity of a path for collision checks: resolved if it exists,
/// otherwise made absolute without touching the filesystem
fn file_key(path: &Path) -> AudioResult<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(_) => Ok(std::path::absolute(path)?),
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Loaded source
    pub source: AudioInfo,
    /// Leading segment
    pub segment: AudioInfo,
    /// Rate-reduced segment
    pub downsampled: AudioInfo,
    /// Quantized segment
    pub quantized: AudioInfo,
    /// Output sizes, in pipeline order
    pub sizes: Vec<FileSize>,
}

/// Load, segment, downsample, quantize, report
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline for `config`
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn save(path: &Path, buffer: &AudioBuffer) -> AudioResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        write_wav(path, buffer)?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// Run every stage in order; the first failure stops the run
    pub fn run(&self) -> AudioResult<PipelineReport> {
        let config = &self.config;
        config.validate()?;

        let source = decoder::load(&config.input_path)?;
        let source_info = AudioInfo::from(&source);

        let segment = Segment::new(config.segment_seconds)?.extract(&source)?;
        Self::save(&config.outputs.segment, &segment)?;

        let downsampled = Downsample::new(config.downsample_factor)?
            .with_mode(config.downsample_mode)
            .process(&segment)?;
        Self::save(&config.outputs.downsampled, &downsampled)?;

        let quantized = BitDepthReducer::new()
            .with_selection(config.channel_selection)
            .packed(config.packed_8bit)
            .process(&segment)?;
        Self::save(&config.outputs.quantized, &quantized)?;

        let sizes = report::file_sizes(config.outputs.all())?;

        Ok(PipelineReport {
            source: source_info,
            segment: AudioInfo::from(&segment),
            downsampled: AudioInfo::from(&downsampled),
            quantized: AudioInfo::from(&quantized),
            sizes,
        })
    }
}
