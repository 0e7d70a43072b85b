//! Complex band-edge filter
//!
//! The kernel is the IDFT of a half-cycle sine centered on 0 Hz (a quarter
//! sine would be ideal but its discontinuity is not realizable), shifted up to
//! (1+α)·Rs/2 by multiplying with e^{j2πφ}. The negative band-edge filter is
//! the elementwise conjugate and is never synthesized separately.
//!
//! Downstream hardware avoids complex arithmetic by splitting the filter into
//! real and imaginary parts:
//!
//! ```text
//!        | -> Positive Band-Edge Filter -> |.|^2 ->
//! s(t) - |                                        [-] ->
//!        | -> Negative Band-Edge Filter -> |.|^2 ->
//!
//! = 4[s_r*h_i][s_i*h_r] - 4[s_r*h_r][s_i*h_i]
//! ```
//!
//! That is four real FIR filters, two multiplies and one subtraction. This
//! module only produces h_r and h_i.

use super::design::{ensure_finite, sinc, DesignVariant, FilterSpec, TapSequence};
use crate::error::{CoeffError, CoeffResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Complex taps of a band-edge filter
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTaps {
    taps: Vec<Complex64>,
}

impl ComplexTaps {
    pub fn new(taps: Vec<Complex64>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[Complex64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Real part of every tap
    pub fn real(&self) -> TapSequence {
        self.taps.iter().map(|c| c.re).collect()
    }

    /// Imaginary part of every tap
    pub fn imag(&self) -> TapSequence {
        self.taps.iter().map(|c| c.im).collect()
    }

    /// Elementwise complex conjugate (the negative band-edge filter)
    pub fn conjugate(&self) -> Self {
        Self::new(self.taps.iter().map(|c| c.conj()).collect())
    }
}

/// Compute the positive band-edge filter taps
///
/// # Arguments
/// * `alpha` - Roll-off factor of the RRC pulse shaping
/// * `symbol_rate` - Symbol rate in symbols/sec
/// * `sample_rate` - Sample rate in Hz
/// * `num_taps` - Filter length
pub fn band_edge_taps(
    alpha: f64,
    symbol_rate: f64,
    sample_rate: f64,
    num_taps: usize,
) -> CoeffResult<ComplexTaps> {
    let samples_per_symbol = sample_rate / symbol_rate;
    let center = (num_taps as f64 - 1.0) / 2.0;

    let taps: Vec<Complex64> = (0..num_taps)
        .map(|n| {
            let t = n as f64 - center;
            let x = 2.0 * alpha * t / samples_per_symbol;
            let kernel = sinc(x - 0.5) + sinc(x + 0.5);

            let phi = (t * (1.0 + alpha)) / (2.0 * sample_rate / symbol_rate);
            kernel * Complex64::new(0.0, 2.0 * PI * phi).exp()
        })
        .collect();

    let parts = ComplexTaps::new(taps);
    ensure_finite("band-edge", &parts.real())?;
    ensure_finite("band-edge", &parts.imag())?;
    Ok(parts)
}

/// Synthesize the positive band-edge taps described by `spec`
pub fn design_band_edge_fir(spec: &FilterSpec) -> CoeffResult<ComplexTaps> {
    match spec.design {
        DesignVariant::BandEdge { alpha, symbol_rate } => {
            band_edge_taps(alpha, symbol_rate, spec.sample_rate, spec.num_taps)
        }
        other => Err(CoeffError::invalid(
            "design",
            format!("expected a band-edge design (found: {})", other.name()),
        )),
    }
}
