use std::ops::Range;

use super::spectral::spectrum_bins;

/// Additive floor applied before the dB conversion, guarding log(0).
const POWER_FLOOR: f32 = 1e-12;

/// Convert a frequency in Hz to the mel scale (HTK formula).
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Inverse of [`hz_to_mel`].
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Build a triangular mel filterbank: `num_filters` rows over the
/// `window / 2 + 1` non-negative frequency bins, spanning 0 Hz to Nyquist.
/// Computed once per run and shared read-only across frames.
pub fn build_filterbank(num_filters: usize, window: usize, sample_rate: u32) -> Vec<Vec<f32>> {
    let n_bins = spectrum_bins(window);
    let mel_low = hz_to_mel(0.0);
    let mel_high = hz_to_mel(sample_rate as f32 / 2.0);

    // Linearly spaced mel points, num_filters + 2 to include both edges.
    let num_points = num_filters + 2;
    let bin_of = |i: usize| -> usize {
        let mel = mel_low + (mel_high - mel_low) * i as f32 / (num_points - 1) as f32;
        let hz = mel_to_hz(mel);
        let bin = ((window as f32 + 1.0) * hz / sample_rate as f32).floor() as usize;
        bin.min(n_bins - 1)
    };

    let mut filterbank = Vec::with_capacity(num_filters);
    for m in 0..num_filters {
        let mut filt = vec![0.0f32; n_bins];
        let f_left = bin_of(m);
        let f_center = bin_of(m + 1);
        let f_right = bin_of(m + 2);

        if f_center > f_left {
            for k in f_left..=f_center {
                filt[k] = (k - f_left) as f32 / (f_center - f_left) as f32;
            }
        }
        if f_right > f_center {
            for k in f_center..=f_right.min(n_bins - 1) {
                filt[k] = (f_right - k) as f32 / (f_right - f_center) as f32;
            }
        }
        filterbank.push(filt);
    }
    filterbank
}

/// Partition `mel_bands` rows into `bands_out` contiguous groups whose sizes
/// differ by at most one, with the remainder assigned to earlier groups.
pub fn split_groups(mel_bands: usize, bands_out: usize) -> Vec<Range<usize>> {
    let base = mel_bands / bands_out;
    let rem = mel_bands % bands_out;
    let mut groups = Vec::with_capacity(bands_out);
    let mut start = 0;
    for g in 0..bands_out {
        let len = base + usize::from(g < rem);
        groups.push(start..start + len);
        start += len;
    }
    groups
}

/// For each frame's power spectrum, apply the mel filterbank, convert to a
/// dB-like scale, and average the mel rows within each coarse group.
///
/// Returns `bands_out` sequences, one value per frame each, organized
/// band-major so each channel can be normalized independently.
pub fn coarse_bands(
    spectra: &[Vec<f32>],
    sample_rate: u32,
    window: usize,
    mel_bands: usize,
    bands_out: usize,
) -> Vec<Vec<f32>> {
    let filterbank = build_filterbank(mel_bands, window, sample_rate);
    let groups = split_groups(mel_bands, bands_out);

    let mut out = vec![Vec::with_capacity(spectra.len()); bands_out];
    for spec in spectra {
        let mel_db: Vec<f32> = filterbank
            .iter()
            .map(|filt| {
                let power: f32 = filt.iter().zip(spec.iter()).map(|(&w, &p)| w * p).sum();
                10.0 * (power + POWER_FLOOR).log10()
            })
            .collect();

        for (band, group) in out.iter_mut().zip(groups.iter()) {
            let sum: f32 = mel_db[group.clone()].iter().sum();
            band.push(sum / group.len() as f32);
        }
    }
    out
}
