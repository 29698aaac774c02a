/// FWHM analysis: per-run normalization, extraction and the pipeline that
/// drives both over a whole dataset.

pub mod fwhm;
pub mod normalize;
pub mod pipeline;
