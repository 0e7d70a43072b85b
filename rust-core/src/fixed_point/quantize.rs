//! Floating-point to signed fixed-point conversion
//!
//! Taps are scaled so the limiting coefficient (largest magnitude) lands
//! exactly on the W-bit two's-complement boundary of its own sign, then
//! rounded half-to-even. Rounding must stay half-to-even: existing
//! coefficient tables were produced that way.
//!
//! A negative limiting value scales to -2^(W-1), so a positive tap of nearly
//! equal magnitude can round to 2^(W-1). Such codes saturate at 2^(W-1)-1.

use crate::error::{CoeffError, CoeffResult};
use crate::filters::design::{require_width, COEFFICIENT_WIDTH_RANGE};
use crate::filters::TapSequence;

/// Signed fixed-point taps
pub type FixedPointTaps = Vec<i64>;

/// Representable range of a W-bit two's-complement code
///
/// # Returns
/// `(min, max)` = `(-2^(W-1), 2^(W-1) - 1)`
///
/// # Errors
/// `InvalidParameter` when W is outside `COEFFICIENT_WIDTH_RANGE`
pub fn code_range(width_bits: u32) -> CoeffResult<(i64, i64)> {
    require_width("coefficient_width_bits", width_bits, &COEFFICIENT_WIDTH_RANGE)?;
    let half = 1i64 << (width_bits - 1);
    Ok((-half, half - 1))
}

/// Find the tap of largest magnitude
///
/// Compares the most negative and most positive taps. When their magnitudes
/// tie, the positive one wins, since its target 2^(W-1)-1 keeps the negative
/// extreme in range. Older coefficient tables let the negative extreme win
/// ties; that maps the positive tap to 2^(W-1), one past the max code.
pub fn limiting_value(taps: &[f64]) -> Option<f64> {
    let min = taps.iter().copied().reduce(f64::min)?;
    let max = taps.iter().copied().reduce(f64::max)?;
    Some(if min.abs() > max.abs() { min } else { max })
}

/// Scale applied to every tap before rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Tap of largest magnitude in the source sequence(s)
    pub limiting_value: f64,

    /// Code the limiting tap maps to: max positive or min negative code
    pub scale_target: i64,

    /// Coefficient width W
    pub width_bits: u32,
}

impl Scaling {
    /// Choose the scale target from the sign of the limiting value
    ///
    /// # Errors
    /// `InvalidParameter` for an unsupported width, `DegenerateFilter` when the
    /// limiting value is zero (all-zero input)
    pub fn new(limiting_value: f64, width_bits: u32) -> CoeffResult<Self> {
        let (min_code, max_code) = code_range(width_bits)?;
        if limiting_value == 0.0 || !limiting_value.is_finite() {
            return Err(CoeffError::DegenerateFilter { stage: "quantizer" });
        }

        let scale_target = if limiting_value > 0.0 { max_code } else { min_code };

        tracing::debug!(limiting_value, scale_target, width_bits, "coefficient scaling");

        Ok(Self {
            limiting_value,
            scale_target,
            width_bits,
        })
    }

    /// Scale taps into the fixed-point range without rounding
    pub fn apply(&self, taps: &[f64]) -> TapSequence {
        let limit = self.limiting_value.abs();
        let target = self.scale_target.unsigned_abs() as f64;
        taps.iter().map(|&tap| (tap / limit) * target).collect()
    }

    /// Round scaled taps half-to-even into the W-bit code range
    pub fn round(&self, scaled: &[f64]) -> CoeffResult<FixedPointTaps> {
        let (min_code, max_code) = code_range(self.width_bits)?;
        let mut fixed = round_half_even(scaled);
        for code in fixed.iter_mut() {
            if *code > max_code || *code < min_code {
                tracing::warn!(code = *code, max_code, "fixed-point coefficient saturated");
                *code = (*code).clamp(min_code, max_code);
            }
        }
        Ok(fixed)
    }
}

/// Round scaled taps to the nearest integer, ties to even
pub fn round_half_even(scaled: &[f64]) -> FixedPointTaps {
    scaled.iter().map(|&tap| tap.round_ties_even() as i64).collect()
}

/// Result of quantizing one tap sequence
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedTaps {
    pub scaling: Scaling,

    /// Scaled floating-point taps, before rounding
    pub scaled: TapSequence,

    /// Rounded fixed-point taps
    pub fixed: FixedPointTaps,
}

/// Scale and round a tap sequence into `width_bits`-bit signed codes
///
/// # Errors
/// `DegenerateFilter` if the sequence is empty or all zero, `InvalidParameter`
/// if `width_bits` is unsupported
pub fn quantize(taps: &[f64], width_bits: u32) -> CoeffResult<QuantizedTaps> {
    let limit = limiting_value(taps).ok_or(CoeffError::DegenerateFilter { stage: "quantizer" })?;
    let scaling = Scaling::new(limit, width_bits)?;
    let scaled = scaling.apply(taps);
    let fixed = scaling.round(&scaled)?;

    Ok(QuantizedTaps {
        scaling,
        scaled,
        fixed,
    })
}

/// Quantize several tap sequences with one shared scale
///
/// The limiting value is taken across all parts, earlier parts winning
/// magnitude ties, so sub-filters that are recombined downstream keep their
/// relative gain.
pub fn quantize_shared(parts: &[&[f64]], width_bits: u32) -> CoeffResult<Vec<QuantizedTaps>> {
    let mut shared: Option<f64> = None;
    for limit in parts.iter().filter_map(|part| limiting_value(part)) {
        match shared {
            Some(current) if limit.abs() <= current.abs() => {}
            _ => shared = Some(limit),
        }
    }

    let limit = shared.ok_or(CoeffError::DegenerateFilter { stage: "quantizer" })?;
    let scaling = Scaling::new(limit, width_bits)?;

    parts
        .iter()
        .map(|part| {
            let scaled = scaling.apply(part);
            let fixed = scaling.round(&scaled)?;
            Ok(QuantizedTaps {
                scaling,
                scaled,
                fixed,
            })
        })
        .collect()
}
