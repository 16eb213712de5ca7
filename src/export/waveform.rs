use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::audio::resample::resample;

#[derive(Serialize)]
struct WaveformMeta {
    sample_rate: u32,
    length: usize,
}

/// Export a peak-normalized, heavily downsampled waveform as a little-endian
/// f32 dump (`<base>.f32`) plus a JSON sidecar (`<base>.json`).
pub fn export_waveform(
    samples: &[f32],
    sr_in: u32,
    sr_out: u32,
    out_base: &Path,
) -> Result<()> {
    let compact = prepare(samples, sr_in, sr_out)?;

    if let Some(parent) = out_base.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut bytes = Vec::with_capacity(compact.len() * 4);
    for &s in &compact {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    let bin_path = with_suffix(out_base, ".f32");
    std::fs::write(&bin_path, bytes)
        .with_context(|| format!("Failed to write {}", bin_path.display()))?;

    let meta = WaveformMeta {
        sample_rate: sr_out,
        length: compact.len(),
    };
    let meta_path = with_suffix(out_base, ".json");
    std::fs::write(&meta_path, serde_json::to_string(&meta)?)
        .with_context(|| format!("Failed to write {}", meta_path.display()))?;

    log::info!(
        "Wrote {} ({} samples), meta: {}",
        bin_path.display(),
        compact.len(),
        meta_path.display()
    );
    Ok(())
}

/// Peak-normalize then resample to the compact output rate.
fn prepare(samples: &[f32], sr_in: u32, sr_out: u32) -> Result<Vec<f32>> {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    let normalized: Vec<f32> = samples.iter().map(|&s| s / (peak + 1e-9)).collect();
    resample(&normalized, sr_in, sr_out)
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
