//! DC-gain normalization for matched filters
//!
//! Rescales already-scaled taps so their sum is a power of two, letting the
//! hardware return to unity gain with a right shift instead of a divide.
//! Conversion to integers here truncates toward zero, unlike the quantizer,
//! so the fixed-point DC gain lands at or slightly below 2^n.

use super::quantize::FixedPointTaps;
use crate::error::{CoeffError, CoeffResult};
use crate::filters::TapSequence;

/// Result of normalizing the DC gain to a power of two
#[derive(Debug, Clone, PartialEq)]
pub struct DcNormalization {
    /// Sum of the scaled taps before normalization
    pub dc_gain_before: f64,

    /// floor(log2(dc_gain_before)), the right shift that restores unity gain
    pub num_bits_to_truncate: i32,

    /// Taps rescaled so their sum is 2^num_bits_to_truncate
    pub normalized: TapSequence,

    /// Normalized taps truncated toward zero
    pub fixed: FixedPointTaps,
}

impl DcNormalization {
    /// The power of two the DC gain was normalized to
    pub fn target_dc_gain(&self) -> f64 {
        2f64.powi(self.num_bits_to_truncate)
    }

    /// Sum of the normalized floating-point taps
    pub fn normalized_dc_gain(&self) -> f64 {
        self.normalized.iter().sum()
    }

    /// Sum of the truncated fixed-point taps
    pub fn fixed_dc_gain(&self) -> i64 {
        self.fixed.iter().sum()
    }
}

/// Normalize the DC gain of scaled taps to a power of two
///
/// # Arguments
/// * `scaled` - Taps already scaled into the fixed-point range, not rounded
///
/// # Errors
/// `NonPositiveDcGain` when the taps sum to zero or less
pub fn normalize_dc_gain(scaled: &[f64]) -> CoeffResult<DcNormalization> {
    let dc_gain: f64 = scaled.iter().sum();
    if !(dc_gain.is_finite() && dc_gain > 0.0) {
        return Err(CoeffError::NonPositiveDcGain { dc_gain });
    }

    let num_bits_to_truncate = dc_gain.log2().floor() as i32;
    let target = 2f64.powi(num_bits_to_truncate);

    let normalized: TapSequence = scaled.iter().map(|&tap| (tap / dc_gain) * target).collect();
    let fixed: FixedPointTaps = normalized.iter().map(|&tap| tap.trunc() as i64).collect();

    tracing::debug!(dc_gain, num_bits_to_truncate, "normalized DC gain to a power of two");

    Ok(DcNormalization {
        dc_gain_before: dc_gain,
        num_bits_to_truncate,
        normalized,
        fixed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_target() {
        let scaled = vec![100.0, 300.0, 700.0, 300.0, 100.0];
        let norm = normalize_dc_gain(&scaled).unwrap();

        assert_eq!(norm.dc_gain_before, 1500.0);
        assert_eq!(norm.num_bits_to_truncate, 10);
        assert_eq!(norm.target_dc_gain(), 1024.0);
        assert!((norm.normalized_dc_gain() - 1024.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncates_toward_zero() {
        // Sum 3.0, target 2: taps become 1.3333, -0.6666, 1.3333
        let scaled = vec![2.0, -1.0, 2.0];
        let norm = normalize_dc_gain(&scaled).unwrap();
        assert_eq!(norm.num_bits_to_truncate, 1);
        assert_eq!(norm.fixed, vec![1, 0, 1]);
    }

    #[test]
    fn test_fixed_gain_within_tap_count_of_target() {
        let scaled: Vec<f64> = (0..31)
            .map(|n| {
                let x = (n as f64 - 15.0) / 3.1;
                if x == 0.0 { 8191.0 } else { 8191.0 * x.sin() / x }
            })
            .collect();
        let norm = normalize_dc_gain(&scaled).unwrap();
        let error = (norm.target_dc_gain() as i64 - norm.fixed_dc_gain()).abs();
        assert!(error < scaled.len() as i64);
    }

    #[test]
    fn test_non_positive_gain_is_rejected() {
        assert!(matches!(
            normalize_dc_gain(&[1.0, -1.0]),
            Err(CoeffError::NonPositiveDcGain { .. })
        ));
        assert!(matches!(
            normalize_dc_gain(&[-5.0, 1.0]),
            Err(CoeffError::NonPositiveDcGain { .. })
        ));
    }
}
