//! Root-raised-cosine impulse response
//!
//! Uses the non-energy-normalized form, where the center tap is
//! (1-α) + 4α/π. Any constant factor between conventions cancels once the
//! taps are scaled to the fixed-point range.
//!
//! The two removable singularities (t = 0 and |t| = 1/(4α·Rs)) are selected by
//! exact floating-point comparison. Tap times land on them exactly when the
//! sample grid does, and only then.

use super::design::{ensure_finite, DesignVariant, FilterSpec, TapSequence};
use crate::error::{CoeffError, CoeffResult};
use std::f64::consts::{PI, SQRT_2};

/// Value of the impulse response at t = 0
pub fn center_value(alpha: f64) -> f64 {
    (1.0 - alpha) + (4.0 * alpha) / PI
}

/// Value of the impulse response at |t| = 1/(4α·Rs)
pub fn singular_value(alpha: f64) -> f64 {
    let angle = PI / (4.0 * alpha);
    let value = (1.0 + 2.0 / PI) * angle.sin() + (1.0 - 2.0 / PI) * angle.cos();
    value * alpha / SQRT_2
}

/// Evaluate the RRC impulse response at time `t` seconds
pub fn impulse_response(alpha: f64, symbol_rate: f64, t: f64) -> f64 {
    if t == 0.0 {
        center_value(alpha)
    } else if t.abs() == 1.0 / (4.0 * alpha * symbol_rate) {
        singular_value(alpha)
    } else {
        // Operand order is kept stable so existing coefficient tables reproduce bit-exactly
        let pi_t_rs = PI * t * symbol_rate;
        let four_alpha_t_rs = 4.0 * alpha * t * symbol_rate;
        let numerator = (pi_t_rs * (1.0 - alpha)).sin()
            + four_alpha_t_rs * (pi_t_rs * (1.0 + alpha)).cos();
        numerator / (pi_t_rs * (1.0 - four_alpha_t_rs.powi(2)))
    }
}

/// Compute the RRC taps for `num_taps` samples centered on t = 0
///
/// # Returns
/// Floating-point taps, or `NonFiniteTap` when a denominator vanishes away
/// from the documented singular points
pub fn rrc_taps(
    alpha: f64,
    symbol_rate: f64,
    sample_rate: f64,
    num_taps: usize,
) -> CoeffResult<TapSequence> {
    let center = (num_taps as f64 - 1.0) / 2.0;
    let taps: TapSequence = (0..num_taps)
        .map(|n| {
            let t = (n as f64 - center) / sample_rate;
            impulse_response(alpha, symbol_rate, t)
        })
        .collect();

    ensure_finite("root-raised-cosine", &taps)?;
    Ok(taps)
}

/// Synthesize the RRC taps described by `spec`
pub fn design_rrc_fir(spec: &FilterSpec) -> CoeffResult<TapSequence> {
    match spec.design {
        DesignVariant::RootRaisedCosine { alpha, symbol_rate } => {
            if spec.num_taps % 2 == 0 {
                tracing::warn!(
                    num_taps = spec.num_taps,
                    "even tap count: matched-filter delay is not an integer number of samples"
                );
            }
            rrc_taps(alpha, symbol_rate, spec.sample_rate, spec.num_taps)
        }
        other => Err(CoeffError::invalid(
            "design",
            format!("expected a root-raised-cosine design (found: {})", other.name()),
        )),
    }
}
