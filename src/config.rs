use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub waveform: WaveformConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_mel_bands")]
    pub mel_bands: usize,
    #[serde(default = "default_bands_out")]
    pub bands_out: usize,
}

#[derive(Debug, Deserialize)]
pub struct WaveformConfig {
    #[serde(default = "default_waveform_rate")]
    pub sample_rate_out: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            sample_rate: default_sample_rate(),
            mel_bands: default_mel_bands(),
            bands_out: default_bands_out(),
        }
    }
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            sample_rate_out: default_waveform_rate(),
        }
    }
}

fn default_fps() -> u32 { 60 }
fn default_sample_rate() -> u32 { 48000 }
fn default_mel_bands() -> usize { 24 }
fn default_bands_out() -> usize { 6 }
fn default_waveform_rate() -> u32 { 2048 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
