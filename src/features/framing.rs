use crate::error::ConfigError;

/// Analysis window length in samples, fixed regardless of hop. Windows
/// overlap whenever hop < WINDOW_LEN.
pub const WINDOW_LEN: usize = 2048;

/// Fixed-hop frame geometry derived from the sample rate and target frame
/// rate. Computed once per run, before any feature computor starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Samples advanced between consecutive frames.
    pub hop: usize,
    /// Analysis window length in samples.
    pub window: usize,
    /// Total number of frames covering the signal.
    pub frame_count: usize,
}

impl FrameGeometry {
    pub fn new(sample_rate: u32, fps: u32, signal_len: usize) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        let hop = (sample_rate / fps) as usize;
        if hop == 0 {
            return Err(ConfigError::ZeroHop { sample_rate, fps });
        }
        Ok(Self {
            hop,
            window: WINDOW_LEN,
            frame_count: signal_len.div_ceil(hop),
        })
    }

    /// Sample index at the center of frame `i`.
    pub fn center(&self, frame: usize) -> usize {
        frame * self.hop
    }
}

/// Fill `out` with the segment centered on sample `center`, zero-padding
/// anything that falls outside the signal. Frame i is centered on sample
/// i*hop; RMS and spectral framing share this convention so level and
/// kick/bands stay time-aligned.
pub fn fill_centered(samples: &[f32], center: usize, out: &mut [f32]) {
    out.fill(0.0);
    let start = center as i64 - (out.len() / 2) as i64;
    let lo = start.max(0);
    let hi = (start + out.len() as i64).min(samples.len() as i64);
    if lo < hi {
        let dst = (lo - start) as usize;
        out[dst..dst + (hi - lo) as usize].copy_from_slice(&samples[lo as usize..hi as usize]);
    }
}
