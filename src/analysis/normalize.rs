use super::fwhm::peak;

/// Scale `intensities` by their own maximum.
///
/// Runs whose maximum is not strictly positive (including a missing maximum)
/// are returned unchanged.
pub fn normalize(intensities: &[f64]) -> Vec<f64> {
    let max = peak(intensities);
    if max > 0.0 {
        intensities.iter().map(|&v| v / max).collect()
    } else {
        intensities.to_vec()
    }
}

/// The intensities the extractor and the charts should see for one run.
pub fn prepare(intensities: &[f64], enabled: bool) -> Vec<f64> {
    if enabled {
        normalize(intensities)
    } else {
        intensities.to_vec()
    }
}
