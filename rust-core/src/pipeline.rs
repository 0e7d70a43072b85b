//! Coefficient-generation pipeline
//!
//! Synthesizer -> (DC-gain normalizer, RRC only) -> quantizer -> bit-growth
//! calculator. Each run validates its `FilterSpec`, then returns a structured
//! result that the `report` module renders.

use crate::error::{CoeffError, CoeffResult};
use crate::filters::{
    design_band_edge_fir, design_lowpass_fir, design_rrc_fir, ComplexTaps, DesignVariant,
    FilterSpec, TapSequence,
};
use crate::fixed_point::quantize::limiting_value;
use crate::fixed_point::{
    bit_growth, normalize_dc_gain, quantize, quantize_shared, worst_case_bit_growth,
    BitGrowthReport, DcNormalization, FixedPointTaps, QuantizedTaps, Scaling,
};

/// Windowed-sinc low-pass result
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassDesign {
    pub spec: FilterSpec,
    pub taps: TapSequence,
    pub quantized: QuantizedTaps,
    pub growth: BitGrowthReport,
}

/// Root-raised-cosine result
#[derive(Debug, Clone, PartialEq)]
pub struct RrcDesign {
    pub spec: FilterSpec,

    /// Tap times in seconds
    pub times: Vec<f64>,
    pub taps: TapSequence,
    pub scaling: Scaling,

    /// Taps scaled into the coefficient range, before normalization
    pub scaled: TapSequence,
    pub normalization: DcNormalization,
    pub growth: BitGrowthReport,
    pub worst_case_bit_growth: u32,
}

impl RrcDesign {
    /// Sum of absolute scaled taps, before DC normalization
    ///
    /// Unlike `growth.max_gain`, this never falls as odd tap counts grow: the
    /// center tap keeps limiting and only tail taps are added. Normalizing to
    /// 2^n rescales every tap, so the fixed-point gain can drop when the DC
    /// gain crosses a power of two.
    pub fn scaled_max_gain(&self) -> f64 {
        self.scaled.iter().map(|c| c.abs()).sum()
    }
}

/// Band-edge result, one quantized real filter per complex component
#[derive(Debug, Clone, PartialEq)]
pub struct BandEdgeDesign {
    pub spec: FilterSpec,

    /// Tap offsets in samples
    pub offsets: Vec<f64>,
    pub taps: ComplexTaps,
    pub real: QuantizedTaps,
    pub imag: QuantizedTaps,
    pub real_growth: BitGrowthReport,
    pub imag_growth: BitGrowthReport,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDesign {
    LowPass(LowPassDesign),
    RootRaisedCosine(RrcDesign),
    BandEdge(BandEdgeDesign),
}

impl FilterDesign {
    pub fn spec(&self) -> &FilterSpec {
        match self {
            FilterDesign::LowPass(d) => &d.spec,
            FilterDesign::RootRaisedCosine(d) => &d.spec,
            FilterDesign::BandEdge(d) => &d.spec,
        }
    }

    /// Final fixed-point taps, one sequence per real sub-filter
    pub fn fixed_point_taps(&self) -> Vec<&FixedPointTaps> {
        match self {
            FilterDesign::LowPass(d) => vec![&d.quantized.fixed],
            FilterDesign::RootRaisedCosine(d) => vec![&d.normalization.fixed],
            FilterDesign::BandEdge(d) => vec![&d.real.fixed, &d.imag.fixed],
        }
    }

    /// Required accumulator width, one per real sub-filter
    pub fn accumulator_widths(&self) -> Vec<u32> {
        match self {
            FilterDesign::LowPass(d) => vec![d.growth.accumulator_width],
            FilterDesign::RootRaisedCosine(d) => vec![d.growth.accumulator_width],
            FilterDesign::BandEdge(d) => {
                vec![d.real_growth.accumulator_width, d.imag_growth.accumulator_width]
            }
        }
    }
}

/// Validate `spec` and run the pipeline for its design variant
pub fn design(spec: &FilterSpec) -> CoeffResult<FilterDesign> {
    spec.validate()?;
    log_advisories(spec);

    let _span = tracing::debug_span!("design", variant = spec.design.name()).entered();

    Ok(match spec.design {
        DesignVariant::LowPass { .. } => FilterDesign::LowPass(low_pass(spec)?),
        DesignVariant::RootRaisedCosine { .. } => FilterDesign::RootRaisedCosine(rrc(spec)?),
        DesignVariant::BandEdge { .. } => FilterDesign::BandEdge(band_edge(spec)?),
    })
}

/// Low-pass: synthesize, quantize half-to-even, size the accumulator
pub fn low_pass(spec: &FilterSpec) -> CoeffResult<LowPassDesign> {
    let taps = design_lowpass_fir(spec)?;
    let quantized = quantize(&taps, spec.coefficient_width_bits)?;
    let growth = bit_growth(&quantized.fixed, spec.input_sample_width_bits)?;

    Ok(LowPassDesign {
        spec: spec.clone(),
        taps,
        quantized,
        growth,
    })
}

/// RRC: synthesize, scale, normalize DC gain to 2^n, truncate, size the accumulator
pub fn rrc(spec: &FilterSpec) -> CoeffResult<RrcDesign> {
    let taps = design_rrc_fir(spec)?;

    let limit = limiting_value(&taps).ok_or(CoeffError::DegenerateFilter { stage: "quantizer" })?;
    let scaling = Scaling::new(limit, spec.coefficient_width_bits)?;
    let scaled = scaling.apply(&taps);

    let normalization = normalize_dc_gain(&scaled)?;
    let growth = bit_growth(&normalization.fixed, spec.input_sample_width_bits)?;

    Ok(RrcDesign {
        spec: spec.clone(),
        times: spec.tap_times(),
        taps,
        scaling,
        scaled,
        normalization,
        growth,
        worst_case_bit_growth: worst_case_bit_growth(spec.coefficient_width_bits, spec.num_taps),
    })
}

/// Band-edge: synthesize, quantize real and imaginary parts with one scale,
/// size each accumulator
pub fn band_edge(spec: &FilterSpec) -> CoeffResult<BandEdgeDesign> {
    let taps = design_band_edge_fir(spec)?;
    let (re, im) = (taps.real(), taps.imag());

    let mut parts = quantize_shared(&[&re[..], &im[..]], spec.coefficient_width_bits)?;
    let imag = parts.pop().ok_or(CoeffError::DegenerateFilter { stage: "quantizer" })?;
    let real = parts.pop().ok_or(CoeffError::DegenerateFilter { stage: "quantizer" })?;

    let real_growth = bit_growth(&real.fixed, spec.input_sample_width_bits)?;
    let imag_growth = bit_growth(&imag.fixed, spec.input_sample_width_bits)?;

    Ok(BandEdgeDesign {
        spec: spec.clone(),
        offsets: spec.tap_offsets(),
        taps,
        real,
        imag,
        real_growth,
        imag_growth,
    })
}

fn log_advisories(spec: &FilterSpec) {
    if let Some(symbols) = spec.length_in_symbols() {
        if symbols < 2.0 {
            tracing::warn!(symbols, "filter spans fewer than 2 symbols");
        }
    }

    if spec.coefficient_width_bits < spec.input_sample_width_bits + 2 {
        tracing::warn!(
            coefficient_width_bits = spec.coefficient_width_bits,
            input_sample_width_bits = spec.input_sample_width_bits,
            "coefficients narrower than input width + 2 bits add quantization noise"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // alpha=0.5, symbol_rate=500e3, sample_rate=2e6, num_taps=21
    const RRC_21_TAPS: [i64; 21] = [
        -61, 63, 173, 63, -307, -642, -434, 642, 2371, 3994, 4658, 3994, 2371, 642, -434, -642,
        -307, 63, 173, 63, -61,
    ];

    // sample_rate=2e6, cutoff=100e3, num_taps=11
    const LOW_PASS_11_TAPS: [i64; 11] = [417, 1041, 2797, 5227, 7349, 8191, 7349, 5227, 2797, 1041, 417];

    #[test]
    fn test_rrc_reference_table() {
        let d = rrc(&FilterSpec::rrc(0.5, 500e3, 2e6, 21)).unwrap();

        assert!((d.taps[10] - 1.1366197723675815).abs() < 1e-12);
        assert_eq!(d.scaling.scale_target, 8191);
        assert_eq!(d.normalization.num_bits_to_truncate, 14);
        assert_eq!(d.normalization.fixed, RRC_21_TAPS.to_vec());

        // Truncation lands just below the 2^14 target
        assert_eq!(d.normalization.fixed_dc_gain(), 16382);
        assert_eq!(d.growth.max_gain, 22158);
        assert_eq!(d.growth.accumulator_width, 27);
        assert_eq!(d.worst_case_bit_growth, 19);
    }

    #[test]
    fn test_rrc_normalized_gain_close_to_power_of_two() {
        for num_taps in [11, 21, 33, 41, 65] {
            for alpha in [0.2, 0.35, 0.5, 0.9] {
                let d = rrc(&FilterSpec::rrc(alpha, 500e3, 2e6, num_taps)).unwrap();
                let target = 1i64 << d.normalization.num_bits_to_truncate;
                assert!((d.normalization.normalized_dc_gain() - target as f64).abs() < 1e-6);
                assert!((target - d.normalization.fixed_dc_gain()).abs() < num_taps as i64);
            }
        }
    }

    #[test]
    fn test_low_pass_reference_table() {
        let d = low_pass(&FilterSpec::low_pass(100e3, 2e6, 11)).unwrap();
        assert_eq!(d.quantized.fixed, LOW_PASS_11_TAPS.to_vec());
        assert_eq!(d.growth.max_gain, 41853);
        assert_eq!(d.growth.accumulator_width, 28);
    }

    #[test]
    fn test_band_edge_reference() {
        let d = band_edge(&FilterSpec::band_edge(0.5, 500e3, 2e6, 21)).unwrap();
        assert_eq!(d.real.scaling.scale_target, 8191);
        assert_eq!(d.real.fixed[10], 8191);
        assert_eq!(d.imag.fixed[10], 0);
        assert_eq!(d.real.fixed[7], -4281);
        assert_eq!(d.imag.fixed[9], -7135);
        assert_eq!(d.real_growth.max_gain, 35515);
        assert_eq!(d.imag_growth.max_gain, 34726);
        assert_eq!(d.real_growth.accumulator_width, 28);
        assert_eq!(d.imag_growth.accumulator_width, 28);
    }

    #[test]
    fn test_codes_stay_in_range() {
        let specs = [
            FilterSpec::low_pass(300e3, 2e6, 31),
            FilterSpec::rrc(0.25, 250e3, 2e6, 41),
            FilterSpec::band_edge(0.35, 250e3, 2e6, 33),
            FilterSpec::rrc(0.5, 500e3, 2e6, 21).with_widths(8, 10),
        ];
        for spec in specs.iter() {
            let d = design(spec).unwrap();
            let half = 1i64 << (spec.coefficient_width_bits - 1);
            for taps in d.fixed_point_taps() {
                assert_eq!(taps.len(), spec.num_taps);
                assert!(taps.iter().all(|&c| c >= -half && c < half));
            }
        }
    }

    #[test]
    fn test_fixed_point_symmetry() {
        let lp = low_pass(&FilterSpec::low_pass(150e3, 2e6, 25)).unwrap();
        let rc = rrc(&FilterSpec::rrc(0.35, 500e3, 2e6, 25)).unwrap();
        for taps in [&lp.quantized.fixed, &rc.normalization.fixed] {
            let n = taps.len();
            for i in 0..n / 2 {
                assert_eq!(taps[i], taps[n - 1 - i]);
            }
        }
    }

    #[test]
    fn test_max_gain_non_decreasing_with_taps() {
        let mut previous = 0;
        for num_taps in (5..=61).step_by(4) {
            let d = low_pass(&FilterSpec::low_pass(100e3, 2e6, num_taps)).unwrap();
            assert!(d.growth.max_gain >= previous, "num_taps = {}", num_taps);
            previous = d.growth.max_gain;
        }
    }

    #[test]
    fn test_rrc_scaled_gain_non_decreasing_with_taps() {
        for alpha in [0.2, 0.35, 0.5, 1.0] {
            let mut previous = 0.0;
            for num_taps in (5..=61).step_by(2) {
                let d = rrc(&FilterSpec::rrc(alpha, 500e3, 2e6, num_taps)).unwrap();
                let gain = d.scaled_max_gain();
                assert!(gain >= previous, "alpha = {}, num_taps = {}", alpha, num_taps);
                previous = gain;
            }
        }
    }

    #[test]
    fn test_rrc_fixed_gain_follows_normalization() {
        // DC gain crosses 2^15 at 7 taps and falls back below it at 9
        let gains: Vec<(u64, i32)> = [5, 7, 9, 11]
            .iter()
            .map(|&num_taps| {
                let d = rrc(&FilterSpec::rrc(0.5, 500e3, 2e6, num_taps)).unwrap();
                (d.growth.max_gain, d.normalization.num_bits_to_truncate)
            })
            .collect();
        assert_eq!(gains, vec![(16383, 14), (32763, 15), (17982, 14), (20656, 14)]);
    }

    #[test]
    fn test_invalid_spec_fails_before_synthesis() {
        let spec = FilterSpec::rrc(0.5, -1.0, 2e6, 21);
        assert!(matches!(
            design(&spec),
            Err(CoeffError::InvalidParameter { name: "symbol_rate", .. })
        ));
    }

    #[test]
    fn test_accumulator_widths_per_variant() {
        let d = design(&FilterSpec::band_edge(0.5, 500e3, 2e6, 21)).unwrap();
        assert_eq!(d.accumulator_widths(), vec![28, 28]);
        assert_eq!(d.fixed_point_taps().len(), 2);
        assert_eq!(d.spec().num_taps, 21);
    }
}
