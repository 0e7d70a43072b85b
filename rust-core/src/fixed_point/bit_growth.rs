//! Accumulator sizing
//!
//! The worst case is every input sample at full scale with the sign of its
//! coefficient, so the gain is the sum of absolute fixed-point taps.

use crate::error::{CoeffError, CoeffResult};
use crate::filters::design::{require_width, INPUT_WIDTH_RANGE};

/// Bit growth of a fixed-point filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitGrowthReport {
    /// Sum of absolute values of the fixed-point taps
    pub max_gain: u64,

    /// ceil(log2(max_gain))
    pub bit_growth: u32,

    /// input_sample_width_bits + bit_growth
    pub accumulator_width: u32,
}

impl BitGrowthReport {
    /// log2 of the max gain, for display
    pub fn max_gain_bits(&self) -> f64 {
        (self.max_gain as f64).log2()
    }
}

/// Exact ceil(log2(value)) for value >= 1
fn ceil_log2(value: u64) -> u32 {
    u64::BITS - (value - 1).leading_zeros()
}

/// Compute the accumulator width needed to avoid overflow
///
/// # Errors
/// `InvalidParameter` when the input width is unsupported or the gain does
/// not fit in 64 bits, `DegenerateFilter` when every tap is zero
pub fn bit_growth(fixed: &[i64], input_sample_width_bits: u32) -> CoeffResult<BitGrowthReport> {
    require_width("input_sample_width_bits", input_sample_width_bits, &INPUT_WIDTH_RANGE)?;

    let max_gain = fixed
        .iter()
        .try_fold(0u64, |acc, tap| acc.checked_add(tap.unsigned_abs()))
        .ok_or_else(|| CoeffError::invalid("fixed_point_taps", "sum of absolute taps overflows 64 bits"))?;
    if max_gain == 0 {
        return Err(CoeffError::DegenerateFilter {
            stage: "bit-growth calculator",
        });
    }

    // Both terms are bounded by 64 after the checks above
    let bit_growth = ceil_log2(max_gain);
    let accumulator_width = input_sample_width_bits + bit_growth;

    tracing::debug!(max_gain, bit_growth, accumulator_width, "accumulator sizing");

    Ok(BitGrowthReport {
        max_gain,
        bit_growth,
        accumulator_width,
    })
}

/// Upper bound on growth from the coefficient width and tap count alone
///
/// coefficient_width_bits + ceil(log2(num_taps)); the true growth from
/// `bit_growth` never exceeds it.
pub fn worst_case_bit_growth(coefficient_width_bits: u32, num_taps: usize) -> u32 {
    coefficient_width_bits.saturating_add(ceil_log2(num_taps.max(1) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(22158), 15);
        assert_eq!(ceil_log2(32768), 15);
        assert_eq!(ceil_log2(32769), 16);
    }

    #[test]
    fn test_accumulator_width() {
        let report = bit_growth(&[-61, 63, 173, 4658, 173, 63, -61], 12).unwrap();
        assert_eq!(report.max_gain, 5252);
        assert_eq!(report.bit_growth, 13);
        assert_eq!(report.accumulator_width, 25);
    }

    #[test]
    fn test_power_of_two_gain_is_exact() {
        let report = bit_growth(&[1024, -1024], 12).unwrap();
        assert_eq!(report.max_gain, 2048);
        assert_eq!(report.bit_growth, 11);
        assert_eq!(report.max_gain_bits(), 11.0);
    }

    #[test]
    fn test_zero_gain_is_degenerate() {
        let err = bit_growth(&[0, 0, 0], 12).unwrap_err();
        assert!(matches!(err, CoeffError::DegenerateFilter { .. }));
        assert!(bit_growth(&[], 12).is_err());
    }

    #[test]
    fn test_unsupported_input_width_is_invalid() {
        for width_bits in [0, 65, u32::MAX] {
            assert!(matches!(
                bit_growth(&[1, 2], width_bits),
                Err(CoeffError::InvalidParameter { name: "input_sample_width_bits", .. })
            ));
        }
        assert_eq!(bit_growth(&[1, 2], 64).unwrap().accumulator_width, 66);
    }

    #[test]
    fn test_gain_overflow_is_reported() {
        let err = bit_growth(&[i64::MIN, i64::MIN], 12).unwrap_err();
        assert!(matches!(err, CoeffError::InvalidParameter { name: "fixed_point_taps", .. }));

        // 2^63 alone still fits
        let report = bit_growth(&[i64::MIN], 12).unwrap();
        assert_eq!(report.bit_growth, 63);
        assert_eq!(worst_case_bit_growth(u32::MAX, 21), u32::MAX);
    }

    #[test]
    fn test_worst_case_bounds_true_growth() {
        let taps = vec![8191i64; 21];
        let report = bit_growth(&taps, 12).unwrap();
        assert_eq!(worst_case_bit_growth(14, 21), 19);
        assert!(report.bit_growth <= worst_case_bit_growth(14, 21));
    }
}
