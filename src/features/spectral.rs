use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

use super::framing::{fill_centered, FrameGeometry};

/// Number of retained spectrum bins (non-negative frequencies).
pub fn spectrum_bins(window: usize) -> usize {
    window / 2 + 1
}

/// Compute one power spectrum per frame: centered zero-padded segment,
/// Hann window, forward FFT, squared magnitudes.
///
/// Frames are independent once geometry is fixed, so the transform runs in
/// parallel; results are collected in frame-index order regardless of
/// completion order.
pub fn power_spectra(samples: &[f32], geom: &FrameGeometry) -> Vec<Vec<f32>> {
    let hann = hann_window(geom.window);
    let n_bins = spectrum_bins(geom.window);

    (0..geom.frame_count)
        .into_par_iter()
        .map(|frame_idx| {
            let mut segment = vec![0.0f32; geom.window];
            fill_centered(samples, geom.center(frame_idx), &mut segment);

            let mut buffer: Vec<Complex<f32>> = segment
                .iter()
                .zip(hann.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();

            // Per-thread FFT planner (rayon-safe)
            let mut planner = FftPlanner::<f32>::new();
            let fft = planner.plan_fft_forward(geom.window);
            fft.process(&mut buffer);

            buffer[..n_bins].iter().map(|c| c.norm_sqr()).collect()
        })
        .collect()
}

pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}
