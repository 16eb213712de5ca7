pub mod decode;
pub mod resample;
