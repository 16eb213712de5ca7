pub mod csv;
pub mod waveform;
