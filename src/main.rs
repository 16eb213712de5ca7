mod audio;
mod cli;
mod config;
mod error;
mod export;
mod features;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command, FeaturesArgs, WaveformArgs};
use features::AnalysisParams;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect sonoframe.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("sonoframe.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("sonoframe").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let cfg = match config_path {
        Some(ref path) => match config::load_config(path) {
            Some(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            None => {
                log::warn!("Failed to load config from {}", path.display());
                config::Config::default()
            }
        },
        None => config::Config::default(),
    };

    match cli.command {
        Command::Features(mut args) => {
            // Config values apply only when the CLI is at its default
            if args.fps == 60 {
                args.fps = cfg.analysis.fps;
            }
            if args.sr == 48000 {
                args.sr = cfg.analysis.sample_rate;
            }
            if args.mel_bands == 24 {
                args.mel_bands = cfg.analysis.mel_bands;
            }
            if args.bands_out == 6 {
                args.bands_out = cfg.analysis.bands_out;
            }
            run_features(args)
        }
        Command::Waveform(mut args) => {
            if args.sr_out == 2048 {
                args.sr_out = cfg.waveform.sample_rate_out;
            }
            run_waveform(args)
        }
    }
}

fn run_features(args: FeaturesArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    log::info!("Input: {}", args.input.display());
    log::info!(
        "Analysis: {} fps, {} Hz, {} mel bands -> {} coarse bands",
        args.fps,
        args.sr,
        args.mel_bands,
        args.bands_out
    );

    log::info!("Decoding audio...");
    let audio_data = audio::decode::load_audio(&args.input, args.sr)?;

    let params = AnalysisParams {
        fps: args.fps,
        mel_bands: args.mel_bands,
        bands_out: args.bands_out,
    };

    log::info!("Extracting features...");
    let table = features::extract_features(&audio_data, &params)?;

    export::csv::write_feature_csv(&table, args.bands_out, &args.out)?;

    log::info!(
        "Done. Frames: {}, duration: {:.2}s, csv: {}",
        table.frames.len(),
        table.duration,
        args.out.display()
    );
    Ok(())
}

fn run_waveform(args: WaveformArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    log::info!("Decoding audio...");
    let audio_data = audio::decode::load_audio(&args.input, args.sr_in)?;

    export::waveform::export_waveform(
        &audio_data.samples,
        audio_data.sample_rate,
        args.sr_out,
        &args.out_base,
    )
}
