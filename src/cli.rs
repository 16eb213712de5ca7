use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sonoframe",
    about = "Deterministic per-frame audio features for offline shader rendering"
)]
pub struct Cli {
    /// Config file path (defaults to sonoframe.toml or the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a per-frame feature table (CSV) from an audio track
    Features(FeaturesArgs),
    /// Export a compact downsampled waveform for offline rendering
    Waveform(WaveformArgs),
}

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Resample rate before analysis
    #[arg(long, default_value_t = 48000)]
    pub sr: u32,

    /// Number of mel bins used to build the coarse spectrum
    #[arg(long, default_value_t = 24)]
    pub mel_bands: usize,

    /// Number of coarse bands written to the CSV
    #[arg(long, default_value_t = 6)]
    pub bands_out: usize,

    /// Destination CSV path
    #[arg(short, long, default_value = "features.csv")]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct WaveformArgs {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Resample the source to this rate before processing
    #[arg(long, default_value_t = 48000)]
    pub sr_in: u32,

    /// Output sample rate for the compact waveform
    #[arg(long, default_value_t = 2048)]
    pub sr_out: u32,

    /// Base path for output files (without extension)
    #[arg(long, default_value = "waveform_2048")]
    pub out_base: PathBuf,
}
