//! Python bindings for the coefficient pipeline

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::PyArray1;
use crate::error::CoeffError;
use crate::filters::{DesignVariant, FilterSpec, WindowType};
use crate::pipeline::{self, FilterDesign};
use crate::report;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

fn to_py_err(err: CoeffError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Completed filter design exposed to Python
#[pyclass(name = "FilterDesign")]
pub struct PyFilterDesign {
    design: FilterDesign,
}

impl PyFilterDesign {
    fn run(spec: FilterSpec) -> PyResult<Self> {
        let design = pipeline::design(&spec).map_err(to_py_err)?;
        Ok(Self { design })
    }
}

#[pymethods]
impl PyFilterDesign {
    /// Design a windowed-sinc low-pass filter
    ///
    /// Args:
    ///     cutoff: Cutoff frequency in hertz
    ///     sample_rate: Sampling frequency in hertz
    ///     num_taps: Number of taps
    ///     window_type: Window type (default Hamming)
    #[staticmethod]
    #[pyo3(signature = (cutoff, sample_rate, num_taps, window_type=PyWindowType::Hamming, input_sample_width_bits=12, coefficient_width_bits=14))]
    fn low_pass(
        cutoff: f64,
        sample_rate: f64,
        num_taps: usize,
        window_type: PyWindowType,
        input_sample_width_bits: u32,
        coefficient_width_bits: u32,
    ) -> PyResult<Self> {
        Self::run(FilterSpec {
            design: DesignVariant::LowPass {
                cutoff_hz: cutoff,
                window: window_type.into(),
            },
            sample_rate,
            num_taps,
            input_sample_width_bits,
            coefficient_width_bits,
        })
    }

    /// Design a root-raised-cosine matched filter
    #[staticmethod]
    #[pyo3(signature = (alpha, symbol_rate, sample_rate, num_taps, input_sample_width_bits=12, coefficient_width_bits=14))]
    fn rrc(
        alpha: f64,
        symbol_rate: f64,
        sample_rate: f64,
        num_taps: usize,
        input_sample_width_bits: u32,
        coefficient_width_bits: u32,
    ) -> PyResult<Self> {
        Self::run(
            FilterSpec::rrc(alpha, symbol_rate, sample_rate, num_taps)
                .with_widths(input_sample_width_bits, coefficient_width_bits),
        )
    }

    /// Design a complex band-edge filter
    #[staticmethod]
    #[pyo3(signature = (alpha, symbol_rate, sample_rate, num_taps, input_sample_width_bits=12, coefficient_width_bits=14))]
    fn band_edge(
        alpha: f64,
        symbol_rate: f64,
        sample_rate: f64,
        num_taps: usize,
        input_sample_width_bits: u32,
        coefficient_width_bits: u32,
    ) -> PyResult<Self> {
        Self::run(
            FilterSpec::band_edge(alpha, symbol_rate, sample_rate, num_taps)
                .with_widths(input_sample_width_bits, coefficient_width_bits),
        )
    }

    /// Fixed-point taps, one numpy array per real sub-filter
    fn fixed_point_taps<'py>(&self, py: Python<'py>) -> Vec<&'py PyArray1<i64>> {
        self.design
            .fixed_point_taps()
            .into_iter()
            .map(|taps| PyArray1::from_vec(py, taps.clone()))
            .collect()
    }

    /// Required accumulator widths, one per real sub-filter
    fn accumulator_widths(&self) -> Vec<u32> {
        self.design.accumulator_widths()
    }

    /// Full text report
    fn report(&self) -> String {
        report::render(&self.design)
    }
}
