/// Full width at half maximum of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fwhm {
    /// Angle of the first sample at or above half maximum.
    pub left: f64,
    /// Angle of the last sample at or above half maximum.
    pub right: f64,
    /// `right - left`.  Negative when the samples run from high to low angle.
    pub bandwidth: f64,
    /// Half of the run's peak intensity.
    pub half_max: f64,
}

/// Largest value of `values`, or `NaN` if any value is missing.
pub fn peak(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, |m, v| {
        if m.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            m.max(v)
        }
    })
}

/// Compute the FWHM of one run.
///
/// `intensities[i]` is the intensity measured at `angles[i]`.  Qualifying
/// samples are those with `intensity >= peak / 2`; the bounds are the angles
/// of the first and last qualifying sample in slice order, so callers that
/// want angular bounds must pass angle-sorted input.
///
/// Returns `None` when fewer than two samples qualify, which covers empty
/// input and runs whose peak is missing.
pub fn extract(angles: &[f64], intensities: &[f64]) -> Option<Fwhm> {
    debug_assert_eq!(angles.len(), intensities.len());
    if intensities.is_empty() {
        return None;
    }

    let half_max = peak(intensities) / 2.0;
    let mut above = intensities
        .iter()
        .zip(angles)
        .filter(|&(&i, _)| i >= half_max)
        .map(|(_, &a)| a);

    let left = above.next()?;
    let right = above.last()?;
    Some(Fwhm {
        left,
        right,
        bandwidth: right - left,
        half_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANGLES: [f64; 7] = [-30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0];

    #[test]
    fn triangular_profile() {
        let fwhm = extract(&ANGLES, &[1.0, 2.0, 5.0, 10.0, 5.0, 2.0, 1.0]).unwrap();
        assert_eq!(fwhm.half_max, 5.0);
        assert_eq!(fwhm.left, -10.0);
        assert_eq!(fwhm.right, 10.0);
        assert_eq!(fwhm.bandwidth, 20.0);
    }

    #[test]
    fn flat_positive_profile_spans_everything() {
        let angles = [5.0, -40.0, 12.0, 30.0];
        let fwhm = extract(&angles, &[3.0; 4]).unwrap();
        assert_eq!(fwhm.half_max, 1.5);
        assert_eq!(fwhm.left, 5.0);
        assert_eq!(fwhm.right, 30.0);
        assert_eq!(fwhm.bandwidth, 25.0);
    }

    #[test]
    fn all_zero_profile_qualifies_every_sample() {
        let fwhm = extract(&ANGLES, &[0.0; 7]).unwrap();
        assert_eq!(fwhm.half_max, 0.0);
        assert_eq!(fwhm.left, -30.0);
        assert_eq!(fwhm.right, 30.0);
        assert_eq!(fwhm.bandwidth, 60.0);
    }

    #[test]
    fn single_sample_is_undefined() {
        assert_eq!(extract(&[0.0], &[10.0]), None);
    }

    #[test]
    fn empty_run_is_undefined() {
        assert_eq!(extract(&[], &[]), None);
    }

    #[test]
    fn single_qualifying_sample_is_undefined() {
        assert_eq!(extract(&ANGLES, &[0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn missing_intensity_makes_run_undefined() {
        assert_eq!(
            extract(&ANGLES, &[1.0, 2.0, 5.0, f64::NAN, 5.0, 2.0, 1.0]),
            None
        );
    }

    #[test]
    fn reversed_input_gives_negative_bandwidth() {
        let mut angles = ANGLES;
        angles.reverse();
        let fwhm = extract(&angles, &[1.0, 4.0, 6.0, 10.0, 5.0, 2.0, 1.0]).unwrap();
        assert_eq!(fwhm.left, 10.0);
        assert_eq!(fwhm.right, -10.0);
        assert_eq!(fwhm.bandwidth, -20.0);
    }

    #[test]
    fn bounds_follow_slice_position_not_angle() {
        let angles = [0.0, -20.0, 20.0, -10.0];
        let fwhm = extract(&angles, &[10.0, 6.0, 1.0, 7.0]).unwrap();
        assert_eq!(fwhm.left, 0.0);
        assert_eq!(fwhm.right, -10.0);
    }

    #[test]
    fn scattered_region_uses_outermost_samples() {
        let fwhm = extract(&ANGLES, &[6.0, 1.0, 1.0, 10.0, 1.0, 1.0, 5.0]).unwrap();
        assert_eq!(fwhm.left, -30.0);
        assert_eq!(fwhm.right, 30.0);
    }

    #[test]
    fn sorted_single_peak_never_goes_negative() {
        for centre in 0..ANGLES.len() {
            let intensities: Vec<f64> = (0..ANGLES.len())
                .map(|i| 100.0 / (1.0 + (i as f64 - centre as f64).powi(2)))
                .collect();
            let fwhm = extract(&ANGLES, &intensities).unwrap();
            assert!(fwhm.left <= fwhm.right);
            assert!(fwhm.bandwidth >= 0.0);
        }
    }

    #[test]
    fn peak_propagates_missing_values() {
        assert_eq!(peak(&[1.0, 3.0, 2.0]), 3.0);
        assert!(peak(&[1.0, f64::NAN, 2.0]).is_nan());
        assert_eq!(peak(&[]), f64::NEG_INFINITY);
    }
}
