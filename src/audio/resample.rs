use anyhow::{Context, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Resample mono f32 audio from `from_rate` to `to_rate`.
///
/// Uses a fixed-ratio sinc resampler fed the whole signal as one chunk, so
/// the output is deterministic for identical input.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0, // max relative ratio
        params,
        samples.len(),
        1, // mono
    )
    .context("Failed to create resampler")?;

    let input = vec![samples.to_vec()];
    let output = resampler.process(&input, None).context("Resampling failed")?;

    Ok(output.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_rate_is_identity() {
        let samples = vec![0.25f32, -0.5, 0.75];
        let out = resample(&samples, 48000, 48000).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn empty_input_stays_empty() {
        let out = resample(&[], 48000, 2048).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn downsample_length_tracks_ratio() {
        let samples = vec![0.0f32; 48000];
        let out = resample(&samples, 48000, 2048).unwrap();
        // One second in, roughly one second out at the new rate.
        assert!(out.len() > 1800 && out.len() < 2300, "got {}", out.len());
    }
}
