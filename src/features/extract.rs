use crate::audio::decode::AudioData;
use crate::error::ConfigError;

use super::framing::{fill_centered, FrameGeometry};
use super::mel::coarse_bands;
use super::normalize::normalize01;
use super::spectral::power_spectra;
use super::{FeatureFrame, FeatureTable};

/// Analysis configuration. The pipeline is a pure function of the decoded
/// signal and these parameters.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisParams {
    pub fps: u32,
    pub mel_bands: usize,
    pub bands_out: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            fps: 60,
            mel_bands: 24,
            bands_out: 6,
        }
    }
}

impl AnalysisParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mel_bands == 0 {
            return Err(ConfigError::ZeroMelBands);
        }
        if self.bands_out == 0 || self.bands_out > self.mel_bands {
            return Err(ConfigError::BadBandsOut {
                bands_out: self.bands_out,
                mel_bands: self.mel_bands,
            });
        }
        Ok(())
    }
}

/// Run the full extraction pipeline on one decoded track.
///
/// Configuration is checked up front; no spectral work happens on a bad
/// config. An empty signal yields an empty but valid table.
pub fn extract_features(
    audio: &AudioData,
    params: &AnalysisParams,
) -> Result<FeatureTable, ConfigError> {
    params.validate()?;
    let geom = FrameGeometry::new(audio.sample_rate, params.fps, audio.samples.len())?;
    let duration = audio.duration();

    if geom.frame_count == 0 {
        return Ok(FeatureTable {
            frames: Vec::new(),
            duration,
        });
    }

    log::info!(
        "Spectral transform: {} frames, hop {} samples",
        geom.frame_count,
        geom.hop
    );
    let spectra = power_spectra(&audio.samples, &geom);

    let level_raw = rms_energy(&audio.samples, &geom);
    let kick_raw = onset_strength(&spectra);
    let bands_raw = coarse_bands(
        &spectra,
        audio.sample_rate,
        geom.window,
        params.mel_bands,
        params.bands_out,
    );

    let level = normalize01(&level_raw);
    let kick = normalize01(&kick_raw);
    let bands: Vec<Vec<f32>> = bands_raw.iter().map(|b| normalize01(b)).collect();

    let frames = assemble(geom.frame_count, params.fps, &level, &kick, &bands);
    Ok(FeatureTable { frames, duration })
}

/// Root-mean-square of the raw (unwindowed) time-domain samples in each
/// frame's centered, zero-padded extent. Non-negative, unbounded above.
fn rms_energy(samples: &[f32], geom: &FrameGeometry) -> Vec<f32> {
    let mut segment = vec![0.0f32; geom.window];
    (0..geom.frame_count)
        .map(|i| {
            fill_centered(samples, geom.center(i), &mut segment);
            let mean_sq =
                segment.iter().map(|&s| s * s).sum::<f32>() / geom.window as f32;
            mean_sq.sqrt()
        })
        .collect()
}

/// Spectral flux: per frame, the summed positive increase in spectral
/// magnitude over the previous frame. The first frame is measured against a
/// silent reference.
fn onset_strength(spectra: &[Vec<f32>]) -> Vec<f32> {
    let n_bins = spectra.first().map_or(0, Vec::len);
    let mut prev = vec![0.0f32; n_bins];
    let mut flux = Vec::with_capacity(spectra.len());
    for spec in spectra {
        let mags: Vec<f32> = spec.iter().map(|&p| p.sqrt()).collect();
        flux.push(
            mags.iter()
                .zip(prev.iter())
                .map(|(&cur, &old)| (cur - old).max(0.0))
                .sum(),
        );
        prev = mags;
    }
    flux
}

/// Zip the normalized channels into one record per frame index. Missing
/// values from windowing edge effects default to 0.0 instead of failing.
fn assemble(
    frame_count: usize,
    fps: u32,
    level: &[f32],
    kick: &[f32],
    bands: &[Vec<f32>],
) -> Vec<FeatureFrame> {
    (0..frame_count)
        .map(|i| FeatureFrame {
            frame: i,
            time: i as f64 / fps as f64,
            level: level.get(i).copied().unwrap_or(0.0),
            kick: kick.get(i).copied().unwrap_or(0.0),
            bands: bands
                .iter()
                .map(|band| band.get(i).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(samples: Vec<f32>, sample_rate: u32) -> AudioData {
        AudioData {
            samples,
            sample_rate,
        }
    }

    fn sine(freq: f32, amp: f32, sr: u32, start: f64, end: f64, total: f64) -> Vec<f32> {
        let len = (total * sr as f64) as usize;
        (0..len)
            .map(|i| {
                let t = i as f64 / sr as f64;
                if t >= start && t < end {
                    amp * (2.0 * std::f32::consts::PI * freq * i as f32 / sr as f32).sin()
                } else {
                    0.0
                }
            })
            .collect()
    }

    #[test]
    fn silent_second_yields_sixty_valid_frames() {
        let audio = track(vec![0.0; 48000], 48000);
        let table = extract_features(&audio, &AnalysisParams::default()).unwrap();

        assert_eq!(table.frames.len(), 60);
        assert!((table.duration - 1.0).abs() < 1e-9);
        for (i, frame) in table.frames.iter().enumerate() {
            assert_eq!(frame.frame, i);
            assert!((frame.time - i as f64 / 60.0).abs() < 1e-12);
            assert_eq!(frame.bands.len(), 6);
            for &v in [frame.level, frame.kick].iter().chain(frame.bands.iter()) {
                assert!((0.0..=1.0).contains(&v));
            }
            // A silent track normalizes to a constant per channel.
            assert_eq!(frame.level, table.frames[0].level);
            assert_eq!(frame.kick, table.frames[0].kick);
        }
    }

    #[test]
    fn record_count_matches_frame_geometry() {
        for len in [1usize, 799, 800, 801, 48000, 48001] {
            let audio = track(vec![0.1; len], 48000);
            let table = extract_features(&audio, &AnalysisParams::default()).unwrap();
            assert_eq!(table.frames.len(), len.div_ceil(800), "len {len}");
        }
    }

    #[test]
    fn empty_signal_yields_empty_table() {
        let audio = track(Vec::new(), 48000);
        let table = extract_features(&audio, &AnalysisParams::default()).unwrap();
        assert!(table.frames.is_empty());
        assert_eq!(table.duration, 0.0);
    }

    #[test]
    fn duration_is_independent_of_fps() {
        let audio = track(vec![0.2; 96000], 48000);
        for fps in [30, 60, 120] {
            let params = AnalysisParams {
                fps,
                ..AnalysisParams::default()
            };
            let table = extract_features(&audio, &params).unwrap();
            assert!((table.duration - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sine_burst_lights_up_level_and_a_band() {
        // 1 kHz burst from 0.5s to 1.0s in an otherwise silent 2s track.
        let audio = track(sine(1000.0, 0.8, 48000, 0.5, 1.0, 2.0), 48000);
        let table = extract_features(&audio, &AnalysisParams::default()).unwrap();
        assert_eq!(table.frames.len(), 120);

        // Mid-burst: loud, with at least one hot mel band.
        let mid = &table.frames[45];
        assert!(mid.level > 0.5, "level {}", mid.level);
        assert!(
            mid.bands.iter().any(|&b| b > 0.5),
            "bands {:?}",
            mid.bands
        );

        // Well clear of the burst: near-silent.
        for idx in [5usize, 110] {
            let quiet = &table.frames[idx];
            assert!(quiet.level < 0.1, "frame {idx} level {}", quiet.level);
        }

        // The onset proxy peaks where the burst begins (frame 30, give or
        // take the window's reach across the boundary).
        let peak = table
            .frames
            .iter()
            .max_by(|a, b| a.kick.total_cmp(&b.kick))
            .unwrap();
        assert!(
            (27..=33).contains(&peak.frame),
            "kick peak at frame {}",
            peak.frame
        );
        assert!(peak.kick > 0.5);
    }

    #[test]
    fn identical_runs_produce_identical_tables() {
        // Deterministic pseudo-noise, no RNG state involved.
        let samples: Vec<f32> = (0..96000u64)
            .map(|i| {
                let x = i.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (x >> 40) as f32 / (1u64 << 24) as f32 - 0.5
            })
            .collect();
        let audio = track(samples, 48000);
        let params = AnalysisParams::default();

        let a = extract_features(&audio, &params).unwrap();
        let b = extract_features(&audio, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn config_is_validated_before_any_work() {
        let audio = track(vec![0.0; 4800], 48000);

        let bad = AnalysisParams {
            bands_out: 25,
            ..AnalysisParams::default()
        };
        assert_eq!(
            extract_features(&audio, &bad),
            Err(ConfigError::BadBandsOut {
                bands_out: 25,
                mel_bands: 24
            })
        );

        let bad = AnalysisParams {
            mel_bands: 0,
            ..AnalysisParams::default()
        };
        assert_eq!(extract_features(&audio, &bad), Err(ConfigError::ZeroMelBands));

        let bad = AnalysisParams {
            bands_out: 0,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            extract_features(&audio, &bad),
            Err(ConfigError::BadBandsOut { .. })
        ));

        let bad = AnalysisParams {
            fps: 0,
            ..AnalysisParams::default()
        };
        assert_eq!(extract_features(&audio, &bad), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn assembler_defaults_short_channels_to_zero() {
        let frames = assemble(3, 60, &[0.5, 0.6], &[0.1], &[vec![0.9]]);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].level, 0.0);
        assert_eq!(frames[1].kick, 0.0);
        assert_eq!(frames[1].bands, vec![0.0]);
        assert_eq!(frames[0].bands, vec![0.9]);
    }
}

