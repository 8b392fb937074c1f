//! audio-compress command line interface
//!
//! Segment, downsample and quantize PCM audio, then compare file sizes.

use audio_compress::decoder;
use audio_compress::encoder::write_wav;
use audio_compress::filter::{BitDepthReducer, ChannelSelection, Downsample, DownsampleMode, Filter};
use audio_compress::processor::{self, OutputPaths, Pipeline, PipelineConfig, Segment};
use audio_compress::AudioInfo;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audio-compress")]
#[command(about = "Compare sample-rate and bit-depth reduction on PCM audio", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print rate, sample count and duration of an audio file
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Keep the first N seconds of a file
    Segment {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Segment duration in seconds
        #[arg(short, long, default_value_t = 5.0)]
        duration: f64,
    },

    /// Reduce the sample rate by an integer factor
    Downsample {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Keep one frame out of every FACTOR
        #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        factor: u32,

        /// Low-pass before dropping samples instead of plain decimation
        #[arg(long)]
        filtered: bool,
    },

    /// Quantize amplitude to 8-bit resolution
    Quantize {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Channel to keep: first, average or an index
        #[arg(short, long, default_value_t = ChannelSelection::First)]
        channel: ChannelSelection,

        /// Levels per polarity
        #[arg(short, long, default_value_t = 127)]
        levels: u32,

        /// Store as real 8-bit PCM instead of the source width
        #[arg(long)]
        packed: bool,
    },

    /// Print the byte size of each file
    Sizes {
        /// Files to measure
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Segment, downsample and quantize in one go, then compare sizes
    Run {
        /// Input audio file
        #[arg(value_name = "FILE", default_value = "interview-sample.wav")]
        input: PathBuf,

        /// Directory for segment.wav, segment_downsampled.wav and segment_8bit.wav
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Segment duration in seconds
        #[arg(short, long, default_value_t = 5.0)]
        duration: f64,

        /// Downsample factor
        #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        factor: u32,

        /// Channel fed to the quantizer: first, average or an index
        #[arg(short, long, default_value_t = ChannelSelection::First)]
        channel: ChannelSelection,

        /// Low-pass before dropping samples instead of plain decimation
        #[arg(long)]
        filtered: bool,

        /// Store the quantized segment as real 8-bit PCM
        #[arg(long)]
        packed: bool,
    },
}

fn downsample_mode(filtered: bool) -> DownsampleMode {
    if filtered {
        DownsampleMode::Filtered
    } else {
        DownsampleMode::Decimate
    }
}

fn run_pipeline(config: PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Processing {}", config.input_path.display());
    let report = Pipeline::new(config).run()?;

    println!("{}", report.source);
    println!("\nSegment: {} samples at {} Hz", report.segment.frames, report.segment.sample_rate);
    println!(
        "Downsampled: {} samples at {} Hz",
        report.downsampled.frames, report.downsampled.sample_rate
    );
    println!(
        "8-bit: {} samples, {}-bit storage",
        report.quantized.frames,
        report.quantized.bit_depth.bits()
    );
    println!();
    processor::print_sizes(&report.sizes);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    info!("audio-compress {}", audio_compress::VERSION);

    match cli.command {
        Some(Commands::Probe { input }) => {
            let buffer = decoder::load(&input)?;
            println!("{}", AudioInfo::from(&buffer));
        }
        Some(Commands::Segment {
            input,
            output,
            duration,
        }) => {
            let buffer = decoder::load(&input)?;
            let segment = Segment::new(duration)?.extract(&buffer)?;
            write_wav(&output, &segment)?;
            println!("{}", AudioInfo::from(&segment));
        }
        Some(Commands::Downsample {
            input,
            output,
            factor,
            filtered,
        }) => {
            let buffer = decoder::load(&input)?;
            let downsampled = Downsample::new(factor)?
                .with_mode(downsample_mode(filtered))
                .process(&buffer)?;
            write_wav(&output, &downsampled)?;
            println!("{}", AudioInfo::from(&downsampled));
        }
        Some(Commands::Quantize {
            input,
            output,
            channel,
            levels,
            packed,
        }) => {
            let buffer = decoder::load(&input)?;
            let quantized = BitDepthReducer::new()
                .with_levels(levels)?
                .with_selection(channel)
                .packed(packed)
                .process(&buffer)?;
            write_wav(&output, &quantized)?;
            processor::print_sizes(&processor::file_sizes([&input, &output])?);
        }
        Some(Commands::Sizes { files }) => {
            processor::print_sizes(&processor::file_sizes(&files)?);
        }
        Some(Commands::Run {
            input,
            out_dir,
            duration,
            factor,
            channel,
            filtered,
            packed,
        }) => {
            run_pipeline(PipelineConfig {
                input_path: input,
                segment_seconds: duration,
                downsample_factor: factor,
                downsample_mode: downsample_mode(filtered),
                channel_selection: channel,
                packed_8bit: packed,
                outputs: OutputPaths::in_dir(out_dir),
            })?;
        }
        None => run_pipeline(PipelineConfig::default())?,
    }

    Ok(())
}
