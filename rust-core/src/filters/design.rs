//! FIR filter design parameters and the windowed-sinc low-pass routine
//!
//! A `FilterSpec` is built once per run and passed by reference through every
//! stage. The low-pass design follows `scipy.signal.firwin` with
//! `pass_zero=True, scale=True` so that existing coefficient tables reproduce.

use super::windows::{generate_window, WindowType};
use crate::error::{CoeffError, CoeffResult};
use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// Default width of the input samples fed to the filter
pub const DEFAULT_INPUT_SAMPLE_WIDTH_BITS: u32 = 12;

/// Default width of the fixed-point coefficients
pub const DEFAULT_COEFFICIENT_WIDTH_BITS: u32 = 14;

/// Supported fixed-point coefficient widths
pub const COEFFICIENT_WIDTH_RANGE: RangeInclusive<u32> = 2..=32;

/// Supported input sample widths
pub const INPUT_WIDTH_RANGE: RangeInclusive<u32> = 1..=64;

/// Floating-point taps, indexed 0..N-1 and centered at (N-1)/2
pub type TapSequence = Vec<f64>;

/// Closed-form design selected for a run, with its design-specific parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignVariant {
    /// Windowed-sinc low-pass with unity DC gain
    LowPass {
        /// Cutoff frequency in Hz
        cutoff_hz: f64,
        /// Window applied to the ideal sinc response
        window: WindowType,
    },

    /// Root-raised-cosine matched filter
    RootRaisedCosine {
        /// Roll-off factor α in [0, 1]
        alpha: f64,
        /// Symbol rate in symbols/sec
        symbol_rate: f64,
    },

    /// Complex band-edge filter for an RRC-shaped signal
    BandEdge {
        /// Roll-off factor of the RRC pulse shaping in [0, 1]
        alpha: f64,
        /// Symbol rate in symbols/sec
        symbol_rate: f64,
    },
}

impl DesignVariant {
    /// Human-readable design name used in errors and reports
    pub fn name(&self) -> &'static str {
        match self {
            DesignVariant::LowPass { .. } => "low-pass",
            DesignVariant::RootRaisedCosine { .. } => "root-raised-cosine",
            DesignVariant::BandEdge { .. } => "band-edge",
        }
    }

    /// Roll-off factor and symbol rate of the matched-filter designs
    pub fn pulse_shape(&self) -> Option<(f64, f64)> {
        match *self {
            DesignVariant::LowPass { .. } => None,
            DesignVariant::RootRaisedCosine { alpha, symbol_rate }
            | DesignVariant::BandEdge { alpha, symbol_rate } => Some((alpha, symbol_rate)),
        }
    }
}

/// Complete parameter set for one coefficient-generation run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Design variant and its parameters
    pub design: DesignVariant,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Number of taps in the filter
    pub num_taps: usize,

    /// Bits used to store input samples
    pub input_sample_width_bits: u32,

    /// Bits used to store each coefficient
    pub coefficient_width_bits: u32,
}

impl FilterSpec {
    /// Create a low-pass spec with a Hamming window and default widths
    pub fn low_pass(cutoff_hz: f64, sample_rate: f64, num_taps: usize) -> Self {
        Self::new(
            DesignVariant::LowPass {
                cutoff_hz,
                window: WindowType::Hamming,
            },
            sample_rate,
            num_taps,
        )
    }

    /// Create a root-raised-cosine spec with default widths
    pub fn rrc(alpha: f64, symbol_rate: f64, sample_rate: f64, num_taps: usize) -> Self {
        Self::new(
            DesignVariant::RootRaisedCosine { alpha, symbol_rate },
            sample_rate,
            num_taps,
        )
    }

    /// Create a band-edge spec with default widths
    pub fn band_edge(alpha: f64, symbol_rate: f64, sample_rate: f64, num_taps: usize) -> Self {
        Self::new(
            DesignVariant::BandEdge { alpha, symbol_rate },
            sample_rate,
            num_taps,
        )
    }

    fn new(design: DesignVariant, sample_rate: f64, num_taps: usize) -> Self {
        Self {
            design,
            sample_rate,
            num_taps,
            input_sample_width_bits: DEFAULT_INPUT_SAMPLE_WIDTH_BITS,
            coefficient_width_bits: DEFAULT_COEFFICIENT_WIDTH_BITS,
        }
    }

    /// Override the input sample and coefficient widths
    pub fn with_widths(mut self, input_sample_width_bits: u32, coefficient_width_bits: u32) -> Self {
        self.input_sample_width_bits = input_sample_width_bits;
        self.coefficient_width_bits = coefficient_width_bits;
        self
    }

    /// Check every parameter before any synthesis takes place
    pub fn validate(&self) -> CoeffResult<()> {
        require_positive("sample_rate", self.sample_rate)?;

        if self.num_taps == 0 {
            return Err(CoeffError::invalid("num_taps", "must be at least 1"));
        }

        require_width(
            "coefficient_width_bits",
            self.coefficient_width_bits,
            &COEFFICIENT_WIDTH_RANGE,
        )?;
        require_width(
            "input_sample_width_bits",
            self.input_sample_width_bits,
            &INPUT_WIDTH_RANGE,
        )?;

        match self.design {
            DesignVariant::LowPass { cutoff_hz, .. } => {
                require_positive("cutoff", cutoff_hz)?;
                let nyquist = self.sample_rate / 2.0;
                if cutoff_hz >= nyquist {
                    return Err(CoeffError::invalid(
                        "cutoff",
                        format!("must be below the Nyquist frequency {nyquist} Hz (found: {cutoff_hz})"),
                    ));
                }
            }
            DesignVariant::RootRaisedCosine { alpha, symbol_rate }
            | DesignVariant::BandEdge { alpha, symbol_rate } => {
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(CoeffError::invalid(
                        "alpha",
                        format!("must be within [0, 1] (found: {alpha})"),
                    ));
                }
                require_positive("symbol_rate", symbol_rate)?;
            }
        }

        Ok(())
    }

    /// Time offset of each tap from the filter center, in samples
    pub fn tap_offsets(&self) -> Vec<f64> {
        let center = (self.num_taps as f64 - 1.0) / 2.0;
        (0..self.num_taps).map(|n| n as f64 - center).collect()
    }

    /// Time offset of each tap from the filter center, in seconds
    pub fn tap_times(&self) -> Vec<f64> {
        self.tap_offsets()
            .into_iter()
            .map(|offset| offset / self.sample_rate)
            .collect()
    }

    /// Filter length expressed in symbols (matched-filter designs only)
    pub fn length_in_symbols(&self) -> Option<f64> {
        self.design
            .pulse_shape()
            .map(|(_, symbol_rate)| (self.num_taps as f64 / self.sample_rate) * symbol_rate)
    }

    /// Baseband bandwidth of the raised-cosine spectrum, 0.5*(1+α)*Rs
    pub fn raised_cosine_bandwidth(&self) -> Option<f64> {
        self.design
            .pulse_shape()
            .map(|(alpha, symbol_rate)| 0.5 * (1.0 + alpha) * symbol_rate)
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::rrc(0.5, 500e3, 2e6, 21)
    }
}

fn require_positive(name: &'static str, value: f64) -> CoeffResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoeffError::invalid(
            name,
            format!("must be a finite value greater than 0 (found: {value})"),
        ))
    }
}

/// Bit width check shared by spec validation and the fixed-point stages
pub(crate) fn require_width(
    name: &'static str,
    width_bits: u32,
    range: &RangeInclusive<u32>,
) -> CoeffResult<()> {
    if range.contains(&width_bits) {
        Ok(())
    } else {
        Err(CoeffError::invalid(
            name,
            format!(
                "must be between {} and {} (found: {width_bits})",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Normalized sinc: sin(πx)/(πx), with sinc(0) = 1
pub(crate) fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Reject any NaN or infinite tap produced by a closed-form design
pub(crate) fn ensure_finite(design: &'static str, taps: &[f64]) -> CoeffResult<()> {
    match taps.iter().position(|tap| !tap.is_finite()) {
        Some(index) => Err(CoeffError::NonFiniteTap { design, index }),
        None => Ok(()),
    }
}

/// Design a unity-DC-gain low-pass FIR filter using the windowing method
///
/// # Algorithm
/// 1. Ideal response h[n] = c*sinc(c*m), c = cutoff/nyquist, m = n - (N-1)/2
/// 2. Multiply by the symmetric window
/// 3. Divide by the sum of taps so the DC gain is exactly 1
///
/// # Arguments
/// * `num_taps` - Filter length N
/// * `cutoff_hz` - Cutoff frequency, strictly inside (0, sample_rate/2)
/// * `window_type` - Window applied to the ideal response
/// * `sample_rate` - Sample rate in Hz
pub fn firwin(
    num_taps: usize,
    cutoff_hz: f64,
    window_type: WindowType,
    sample_rate: f64,
) -> CoeffResult<TapSequence> {
    if num_taps == 0 {
        return Err(CoeffError::invalid("num_taps", "must be at least 1"));
    }
    require_positive("sample_rate", sample_rate)?;

    let nyquist = sample_rate / 2.0;
    let cutoff = cutoff_hz / nyquist;
    if !(cutoff > 0.0 && cutoff < 1.0) {
        return Err(CoeffError::invalid(
            "cutoff",
            format!("must be between 0 and {nyquist} Hz (found: {cutoff_hz})"),
        ));
    }

    let center = 0.5 * (num_taps as f64 - 1.0);
    let window = generate_window(window_type, num_taps);

    let mut h: TapSequence = window
        .iter()
        .enumerate()
        .map(|(n, &w)| cutoff * sinc(cutoff * (n as f64 - center)) * w)
        .collect();

    let dc_gain: f64 = h.iter().sum();
    if dc_gain != 0.0 {
        for tap in h.iter_mut() {
            *tap /= dc_gain;
        }
    }

    ensure_finite("low-pass", &h)?;
    Ok(h)
}

/// Synthesize the low-pass taps described by `spec`
pub fn design_lowpass_fir(spec: &FilterSpec) -> CoeffResult<TapSequence> {
    match spec.design {
        DesignVariant::LowPass { cutoff_hz, window } => {
            firwin(spec.num_taps, cutoff_hz, window, spec.sample_rate)
        }
        other => Err(CoeffError::invalid(
            "design",
            format!("expected a low-pass design (found: {})", other.name()),
        )),
    }
}
