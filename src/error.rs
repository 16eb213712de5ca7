use thiserror::Error;

/// Invalid analysis configuration. All variants are detected before any
/// spectral computation begins; a failed run produces no partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fps must be positive")]
    ZeroFps,

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("hop length is zero: {fps} fps is too high for a {sample_rate} Hz signal")]
    ZeroHop { sample_rate: u32, fps: u32 },

    #[error("mel_bands must be positive")]
    ZeroMelBands,

    #[error("bands_out ({bands_out}) must be between 1 and mel_bands ({mel_bands})")]
    BadBandsOut { bands_out: usize, mel_bands: usize },
}
