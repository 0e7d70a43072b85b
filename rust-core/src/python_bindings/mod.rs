//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod design_bindings;

/// Python module definition
#[pymodule]
fn fir_coeffgen(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<design_bindings::PyFilterDesign>()?;
    m.add_class::<design_bindings::PyWindowType>()?;

    Ok(())
}
