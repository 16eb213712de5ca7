pub mod extract;
pub mod framing;
pub mod mel;
pub mod normalize;
pub mod spectral;

pub use extract::{extract_features, AnalysisParams};

/// One row of the per-frame feature table, ready for serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureFrame {
    /// 0-based frame index.
    pub frame: usize,
    /// Nominal frame time: frame / fps, independent of hop rounding.
    pub time: f64,
    /// Normalized RMS energy (0.0-1.0).
    pub level: f32,
    /// Normalized onset strength (0.0-1.0), a percussive-attack proxy.
    pub kick: f32,
    /// Normalized coarse mel bands (0.0-1.0 each), `bands_out` entries.
    pub bands: Vec<f32>,
}

/// Full extraction result for one track.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    pub frames: Vec<FeatureFrame>,
    /// Track length in seconds, signal length over the achieved sample rate.
    /// Computed once from the loaded signal, not from the frame records.
    pub duration: f64,
}
