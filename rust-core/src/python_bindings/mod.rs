//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod model_bindings;

/// Python module definition
#[pymodule]
fn cross_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(model_bindings::power_law, m)?)?;
    m.add_function(wrap_pyfunction!(model_bindings::output_shape, m)?)?;
    m.add_class::<model_bindings::PyPowerLaw>()?;
    
    Ok(())
}
