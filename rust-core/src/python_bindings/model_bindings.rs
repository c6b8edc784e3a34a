//! Python bindings for power-law cross spectra

use ndarray::ArrayD;
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArray1, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::model::{self, Amplitude, ModelError, Param, PowerLaw};

impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Convert any array-like to a float64 array, as `numpy.asarray` does
///
/// Integer and float32 arrays are cast instead of falling through to
/// `__float__`, and ragged nested lists are rejected by numpy itself.
fn as_f64_array(value: &PyAny) -> PyResult<ArrayD<f64>> {
    let numpy = value.py().import("numpy")?;
    let converted = numpy.call_method1("asarray", (value, "float64"))?;
    let array: PyReadonlyArrayDyn<f64> = converted.extract()?;
    Ok(array.as_array().to_owned())
}

/// Spectral index or slope: float, or 1-D array-like of shape (TEB)
fn extract_param(name: &'static str, value: &PyAny) -> PyResult<Param> {
    Ok(Param::from_array(name, as_f64_array(value)?)?)
}

/// Amplitude: float, 1-D diagonal or 2-D matrix
fn extract_amplitude(value: &PyAny) -> PyResult<Amplitude> {
    Ok(Amplitude::from_array(as_f64_array(value)?)?)
}

/// Cross spectrum of a power law in frequency and multipoles
///
/// Args:
///     freq: Frequencies at which the cross is evaluated, shape (freq)
///     freq0: Reference frequency of the SED
///     beta: Spectral index of the SED, float or array of shape (TEB)
///     lmin: Minimum multipole
///     lmax: Maximum multipole (inclusive)
///     ell0: Reference multipole
///     alpha: Multipole slope, float or array of shape (TEB). The TE
///         spectrum scales with (alpha_T + alpha_E) / 2
///     amplitude: Amplitude at ell0 and freq0, float or array of shape
///         ([TEB,] TEB). A 1-D array is the diagonal.
///
/// Returns:
///     Array of shape ([TEB, TEB,] freq, freq, ell). TEB axes are present
///     only if any input carried them.
///
/// Raises:
///     ValueError: On invalid values or mismatched component counts
#[pyfunction]
#[allow(clippy::too_many_arguments)]
pub fn power_law<'py>(
    py: Python<'py>,
    freq: PyReadonlyArray1<'py, f64>,
    freq0: f64,
    beta: &'py PyAny,
    lmin: usize,
    lmax: usize,
    ell0: f64,
    alpha: &'py PyAny,
    amplitude: &'py PyAny,
) -> PyResult<&'py PyArrayDyn<f64>> {
    let beta = extract_param("beta", beta)?;
    let alpha = extract_param("alpha", alpha)?;
    let amplitude = extract_amplitude(amplitude)?;

    let cross = model::power_law(
        freq.as_array(),
        freq0,
        &beta,
        lmin,
        lmax,
        ell0,
        &alpha,
        &amplitude,
    )?;

    Ok(cross.into_pyarray(py))
}

/// Shape `power_law` returns, without evaluating it
///
/// Args:
///     n_freq: Number of frequencies
///     lmin: Minimum multipole
///     lmax: Maximum multipole (inclusive)
///     beta: Spectral index, float or array
///     alpha: Multipole slope, float or array
///     amplitude: Amplitude, float, 1-D or 2-D array
#[pyfunction]
pub fn output_shape(
    n_freq: usize,
    lmin: usize,
    lmax: usize,
    beta: &PyAny,
    alpha: &PyAny,
    amplitude: &PyAny,
) -> PyResult<Vec<usize>> {
    Ok(model::output_shape(
        n_freq,
        lmin,
        lmax,
        &extract_param("beta", beta)?,
        &extract_param("alpha", alpha)?,
        &extract_amplitude(amplitude)?,
    )?)
}

/// Power-law model exposed to Python
#[pyclass(name = "PowerLaw")]
pub struct PyPowerLaw {
    model: PowerLaw,
}

#[pymethods]
impl PyPowerLaw {
    /// Create a new power-law model
    ///
    /// Args:
    ///     freq0: Reference frequency of the SED
    ///     beta: Spectral index, float or array of shape (TEB)
    ///     ell0: Reference multipole
    ///     alpha: Multipole slope, float or array of shape (TEB)
    ///     amplitude: Amplitude at ell0 and freq0
    #[new]
    fn new(
        freq0: f64,
        beta: &PyAny,
        ell0: f64,
        alpha: &PyAny,
        amplitude: &PyAny,
    ) -> PyResult<Self> {
        let model = PowerLaw::new(
            freq0,
            extract_param("beta", beta)?,
            ell0,
            extract_param("alpha", alpha)?,
            extract_amplitude(amplitude)?,
        );
        // Surface component mismatches at construction
        model.num_components()?;

        Ok(Self { model })
    }

    /// Evaluate the cross spectrum
    ///
    /// Args:
    ///     freq: Frequencies as numpy array
    ///     lmin: Minimum multipole
    ///     lmax: Maximum multipole (inclusive)
    ///
    /// Returns:
    ///     Cross spectrum as numpy array
    fn evaluate<'py>(
        &self,
        py: Python<'py>,
        freq: PyReadonlyArray1<'py, f64>,
        lmin: usize,
        lmax: usize,
    ) -> PyResult<&'py PyArrayDyn<f64>> {
        let cross = self.model.evaluate(freq.as_array(), lmin, lmax)?;
        Ok(cross.into_pyarray(py))
    }

    /// Shape `evaluate` returns for n_freq frequencies
    fn output_shape(&self, n_freq: usize, lmin: usize, lmax: usize) -> PyResult<Vec<usize>> {
        Ok(self.model.output_shape(n_freq, lmin, lmax)?)
    }

    /// Number of components, None when every parameter is a float
    fn num_components(&self) -> PyResult<Option<usize>> {
        Ok(self.model.num_components()?)
    }

    /// Get reference frequency
    #[getter]
    fn freq0(&self) -> f64 {
        self.model.freq0
    }

    /// Get reference multipole
    #[getter]
    fn ell0(&self) -> f64 {
        self.model.ell0
    }
}
