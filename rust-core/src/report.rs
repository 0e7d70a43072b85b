//! Text rendering of pipeline results
//!
//! Fixed-point coefficients meant for pasting into RTL are written one per
//! line as sign-prefixed decimals ("+12", "-3", "+0"). That format is relied
//! on by hand-maintained hardware sources and must not change.

use crate::filters::{DesignVariant, FilterSpec};
use crate::pipeline::{BandEdgeDesign, FilterDesign, LowPassDesign, RrcDesign};
use num_complex::Complex64;
use std::fmt::{self, Write};

/// Sign-prefixed decimal rendering of one fixed-point coefficient
pub fn sign_prefixed(code: i64) -> String {
    format!("{code:+}")
}

/// One sign-prefixed coefficient per line
pub fn rtl_coefficients(codes: &[i64]) -> String {
    let mut out = String::new();
    for &code in codes {
        out.push_str(&sign_prefixed(code));
        out.push('\n');
    }
    out
}

fn float_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:e}")).collect();
    format!("[{}]", items.join(", "))
}

fn int_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn complex_list(values: &[Complex64]) -> String {
    let items: Vec<String> = values.iter().map(|c| format!("{:e}{:+e}j", c.re, c.im)).collect();
    format!("[{}]", items.join(", "))
}

fn write_parameters(out: &mut String, spec: &FilterSpec) -> fmt::Result {
    writeln!(out, "Parameters:")?;
    match spec.design {
        DesignVariant::LowPass { cutoff_hz, window } => {
            writeln!(out, "- sample_rate: {} samples/sec", spec.sample_rate)?;
            writeln!(out, "- cutoff_hz: {cutoff_hz} hertz")?;
            writeln!(out, "- window: {}", window.name())?;
        }
        DesignVariant::RootRaisedCosine { alpha, symbol_rate }
        | DesignVariant::BandEdge { alpha, symbol_rate } => {
            writeln!(out, "- alpha: {alpha}")?;
            writeln!(out, "- symbol_rate: {symbol_rate} symbols/sec")?;
            writeln!(out, "- sample_rate: {} samples/sec", spec.sample_rate)?;
        }
    }
    writeln!(out, "- num_taps: {}", spec.num_taps)?;
    writeln!(out, "- input_sample_width_bits: {}", spec.input_sample_width_bits)?;
    writeln!(out, "- coefficient_width_bits: {}", spec.coefficient_width_bits)?;

    if let Some(symbols) = spec.length_in_symbols() {
        writeln!(out, "Length of filter, in symbols: {symbols}")?;
    }
    if let Some(bandwidth) = spec.raised_cosine_bandwidth() {
        writeln!(out, "Raised-cosine filter baseband bandwidth: {bandwidth:e}")?;
    }
    Ok(())
}

fn write_low_pass(out: &mut String, d: &LowPassDesign) -> fmt::Result {
    write_parameters(out, &d.spec)?;
    writeln!(out, "Floating-point coefficients:")?;
    writeln!(out, "{}", float_list(&d.taps))?;
    writeln!(out, "Scaled floating-point coefficients:")?;
    writeln!(out, "{}", float_list(&d.quantized.scaled))?;
    writeln!(out, "Fixed-point coefficients:")?;
    writeln!(out, "{}", int_list(&d.quantized.fixed))?;
    writeln!(out, "Fixed-point coefficients for copying to verilog:")?;
    out.push_str(&rtl_coefficients(&d.quantized.fixed));
    writeln!(
        out,
        "Maximum gain: {} ({} bits)",
        d.growth.max_gain,
        d.growth.max_gain_bits()
    )?;
    writeln!(out, "Required accumulator length: {} bits", d.growth.accumulator_width)
}

fn write_rrc(out: &mut String, d: &RrcDesign) -> fmt::Result {
    write_parameters(out, &d.spec)?;
    writeln!(out, "Times:")?;
    writeln!(out, "{}", float_list(&d.times))?;
    writeln!(out, "Floating-point coefficients:")?;
    writeln!(out, "{}", float_list(&d.taps))?;
    writeln!(
        out,
        "DC gain of floating-point coefficients: {}",
        d.taps.iter().sum::<f64>()
    )?;
    writeln!(out, "Limiting coefficient value: {}", d.scaling.limiting_value)?;
    writeln!(out, "Scaled floating-point coefficients:")?;
    writeln!(out, "{}", float_list(&d.scaled))?;
    writeln!(out, "DC gain of scaled coefficients: {}", d.normalization.dc_gain_before)?;
    writeln!(
        out,
        "Max gain of scaled coefficients: {}",
        d.scaled_max_gain()
    )?;
    writeln!(
        out,
        "DC gain of normalized coefficients: {}",
        d.normalization.normalized_dc_gain()
    )?;
    writeln!(out, "Fixed-point coefficients:")?;
    writeln!(out, "{}", int_list(&d.normalization.fixed))?;
    writeln!(
        out,
        "DC gain of fixed-point coefficients: {}",
        d.normalization.fixed_dc_gain()
    )?;
    writeln!(out, "Fixed-point coefficients for copying to verilog:")?;
    out.push_str(&rtl_coefficients(&d.normalization.fixed));
    writeln!(out, "Worst-case max bit growth: {}", d.worst_case_bit_growth)?;
    writeln!(out, "Max bit growth: {}", d.growth.bit_growth)?;
    writeln!(
        out,
        "Required word length of accumulators: {}",
        d.growth.accumulator_width
    )?;
    writeln!(
        out,
        "Number of bits to truncate to get back to unity DC gain: {}",
        d.normalization.num_bits_to_truncate
    )
}

fn write_band_edge(out: &mut String, d: &BandEdgeDesign) -> fmt::Result {
    write_parameters(out, &d.spec)?;
    writeln!(out, "Times:")?;
    writeln!(out, "{}", float_list(&d.offsets))?;
    writeln!(out, "Complex floating-point coefficients:")?;
    writeln!(out, "{}", complex_list(d.taps.taps()))?;
    writeln!(out, "Scaled floating-point coefficients:")?;
    writeln!(out, "{}", float_list(&d.real.scaled))?;
    writeln!(out, "{}", float_list(&d.imag.scaled))?;
    writeln!(out, "Fixed-point coefficients:")?;
    writeln!(out, "{}", int_list(&d.real.fixed))?;
    writeln!(out, "{}", int_list(&d.imag.fixed))?;
    writeln!(out, "Fixed-point coefficients for copying to verilog, real:")?;
    out.push_str(&rtl_coefficients(&d.real.fixed));
    writeln!(out, "Fixed-point coefficients for copying to verilog, imag:")?;
    out.push_str(&rtl_coefficients(&d.imag.fixed));
    writeln!(
        out,
        "Maximum gain, real: {} ({} bits)",
        d.real_growth.max_gain,
        d.real_growth.max_gain_bits()
    )?;
    writeln!(
        out,
        "Maximum gain, imag: {} ({} bits)",
        d.imag_growth.max_gain,
        d.imag_growth.max_gain_bits()
    )?;
    writeln!(
        out,
        "Required accumulator length, real: {} bits",
        d.real_growth.accumulator_width
    )?;
    writeln!(
        out,
        "Required accumulator length, imag: {} bits",
        d.imag_growth.accumulator_width
    )
}

impl fmt::Display for FilterDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        match self {
            FilterDesign::LowPass(d) => write_low_pass(&mut out, d)?,
            FilterDesign::RootRaisedCosine(d) => write_rrc(&mut out, d)?,
            FilterDesign::BandEdge(d) => write_band_edge(&mut out, d)?,
        }
        f.write_str(&out)
    }
}

/// Render the full text report for a pipeline result
pub fn render(design: &FilterDesign) -> String {
    design.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;

    #[test]
    fn test_sign_prefixed() {
        assert_eq!(sign_prefixed(12), "+12");
        assert_eq!(sign_prefixed(-3), "-3");
        assert_eq!(sign_prefixed(0), "+0");
    }

    #[test]
    fn test_rtl_coefficients() {
        assert_eq!(rtl_coefficients(&[-61, 0, 4658]), "-61\n+0\n+4658\n");
    }

    #[test]
    fn test_rrc_report_contents() {
        let d = pipeline::design(&FilterSpec::rrc(0.5, 500e3, 2e6, 21)).unwrap();
        let text = render(&d);

        assert!(text.starts_with("Parameters:\n- alpha: 0.5\n"));
        assert!(text.contains("Length of filter, in symbols: 5.25\n"));
        assert!(text.contains("Fixed-point coefficients for copying to verilog:\n-61\n+63\n+173\n"));
        assert!(text.contains("DC gain of fixed-point coefficients: 16382\n"));
        assert!(text.contains("Required word length of accumulators: 27\n"));
        assert!(text.contains("Number of bits to truncate to get back to unity DC gain: 14\n"));
    }

    #[test]
    fn test_low_pass_report_contents() {
        let d = pipeline::design(&FilterSpec::low_pass(100e3, 2e6, 11)).unwrap();
        let text = render(&d);

        assert!(text.contains("- window: hamming\n"));
        assert!(!text.contains("Length of filter, in symbols"));
        assert!(text.contains("[417, 1041, 2797, 5227, 7349, 8191, 7349, 5227, 2797, 1041, 417]"));
        assert!(text.contains("+417\n+1041\n"));
        assert!(text.contains("Required accumulator length: 28 bits\n"));
    }

    #[test]
    fn test_band_edge_report_contents() {
        let d = pipeline::design(&FilterSpec::band_edge(0.5, 500e3, 2e6, 21)).unwrap();
        let text = render(&d);

        assert!(text.contains("Fixed-point coefficients for copying to verilog, real:\n"));
        assert!(text.contains("Fixed-point coefficients for copying to verilog, imag:\n"));
        assert!(text.contains("Maximum gain, real: 35515 ("));
        assert!(text.contains("Required accumulator length, imag: 28 bits\n"));
    }
}
