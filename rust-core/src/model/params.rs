//! Model parameters that may be plain numbers or resolved per component
//!
//! Components index the signal modes (temperature and the two polarization
//! modes, "TEB"). A parameter given per component adds two leading
//! `(component, component)` axes to the evaluated spectrum.

use ndarray::{Array1, Array2, ArrayD, Ix0, Ix1, Ix2};

use super::error::{ModelError, ModelResult};

/// Spectral index or multipole slope
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Same value for every component
    Scalar(f64),

    /// One value per component, shape (C,)
    PerComponent(Array1<f64>),
}

impl Param {
    /// Number of components, `None` when the parameter is plain
    pub fn num_components(&self) -> Option<usize> {
        match self {
            Param::Scalar(_) => None,
            Param::PerComponent(values) => Some(values.len()),
        }
    }

    pub fn is_component_resolved(&self) -> bool {
        matches!(self, Param::PerComponent(_))
    }

    /// Build from an array of any rank, dispatching on its dimensionality
    ///
    /// 0-d is plain, 1-d is per component. A length-1 array stays
    /// per component.
    pub fn from_array(name: &'static str, values: ArrayD<f64>) -> ModelResult<Self> {
        let ndim = values.ndim();
        let rank_error = ModelError::UnsupportedRank { name, ndim, max: 1 };
        match ndim {
            0 => {
                let value = values.into_dimensionality::<Ix0>().map_err(|_| rank_error)?;
                Ok(Param::Scalar(value[()]))
            }
            1 => {
                let values = values.into_dimensionality::<Ix1>().map_err(|_| rank_error)?;
                Ok(Param::PerComponent(values))
            }
            _ => Err(rank_error),
        }
    }

    /// Reject non-finite values and empty component arrays
    pub(crate) fn validate(&self, name: &'static str) -> ModelResult<()> {
        match self {
            Param::Scalar(value) if !value.is_finite() => Err(ModelError::NonFinite { name }),
            Param::Scalar(_) => Ok(()),
            Param::PerComponent(values) if values.is_empty() => {
                Err(ModelError::EmptyComponents { name })
            }
            Param::PerComponent(values) if !values.iter().all(|v| v.is_finite()) => {
                Err(ModelError::NonFinite { name })
            }
            Param::PerComponent(_) => Ok(()),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Scalar(value)
    }
}

impl From<Vec<f64>> for Param {
    fn from(values: Vec<f64>) -> Self {
        Param::PerComponent(Array1::from_vec(values))
    }
}

impl From<Array1<f64>> for Param {
    fn from(values: Array1<f64>) -> Self {
        Param::PerComponent(values)
    }
}

/// Amplitude of the spectra at the reference frequency and multipole
#[derive(Debug, Clone, PartialEq)]
pub enum Amplitude {
    /// Same amplitude for every component pair
    Scalar(f64),

    /// Auto-spectra amplitudes, shape (C,). Cross-component terms are zero.
    Diagonal(Array1<f64>),

    /// Full component-pair amplitudes, shape (C, C)
    Matrix(Array2<f64>),
}

impl Amplitude {
    /// Number of components, `None` when the amplitude is plain
    pub fn num_components(&self) -> Option<usize> {
        match self {
            Amplitude::Scalar(_) => None,
            Amplitude::Diagonal(values) => Some(values.len()),
            Amplitude::Matrix(matrix) => Some(matrix.nrows()),
        }
    }

    pub fn is_component_resolved(&self) -> bool {
        !matches!(self, Amplitude::Scalar(_))
    }

    /// Build from an array of any rank: 0-d plain, 1-d diagonal, 2-d matrix
    pub fn from_array(values: ArrayD<f64>) -> ModelResult<Self> {
        let ndim = values.ndim();
        let rank_error = ModelError::UnsupportedRank {
            name: "amplitude",
            ndim,
            max: 2,
        };
        match ndim {
            0 => {
                let value = values.into_dimensionality::<Ix0>().map_err(|_| rank_error)?;
                Ok(Amplitude::Scalar(value[()]))
            }
            1 => {
                let values = values.into_dimensionality::<Ix1>().map_err(|_| rank_error)?;
                Ok(Amplitude::Diagonal(values))
            }
            2 => {
                let matrix = values.into_dimensionality::<Ix2>().map_err(|_| rank_error)?;
                Ok(Amplitude::Matrix(matrix))
            }
            _ => Err(rank_error),
        }
    }

    /// Component-pair amplitude matrix
    ///
    /// # Returns
    /// `None` for a scalar amplitude, the diagonal expansion for a vector,
    /// the matrix itself otherwise
    pub fn to_matrix(&self) -> Option<Array2<f64>> {
        match self {
            Amplitude::Scalar(_) => None,
            Amplitude::Diagonal(values) => Some(Array2::from_diag(values)),
            Amplitude::Matrix(matrix) => Some(matrix.clone()),
        }
    }

    pub(crate) fn validate(&self) -> ModelResult<()> {
        let name = "amplitude";
        let all_finite = match self {
            Amplitude::Scalar(value) => value.is_finite(),
            Amplitude::Diagonal(values) => {
                if values.is_empty() {
                    return Err(ModelError::EmptyComponents { name });
                }
                values.iter().all(|v| v.is_finite())
            }
            Amplitude::Matrix(matrix) => {
                let (rows, cols) = matrix.dim();
                if rows != cols {
                    return Err(ModelError::NonSquareAmplitude { rows, cols });
                }
                if rows == 0 {
                    return Err(ModelError::EmptyComponents { name });
                }
                matrix.iter().all(|v| v.is_finite())
            }
        };

        if all_finite {
            Ok(())
        } else {
            Err(ModelError::NonFinite { name })
        }
    }
}

impl From<f64> for Amplitude {
    fn from(value: f64) -> Self {
        Amplitude::Scalar(value)
    }
}

impl From<Vec<f64>> for Amplitude {
    fn from(values: Vec<f64>) -> Self {
        Amplitude::Diagonal(Array1::from_vec(values))
    }
}

impl From<Array1<f64>> for Amplitude {
    fn from(values: Array1<f64>) -> Self {
        Amplitude::Diagonal(values)
    }
}

impl From<Array2<f64>> for Amplitude {
    fn from(matrix: Array2<f64>) -> Self {
        Amplitude::Matrix(matrix)
    }
}

/// Full matrix from nested rows; every row must match the first one's length
impl TryFrom<Vec<Vec<f64>>> for Amplitude {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<f64>>) -> ModelResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(ModelError::RaggedAmplitude {
                row,
                len: values.len(),
                expected: n_cols,
            });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_rows, n_cols), flat)
            .map(Amplitude::Matrix)
            .map_err(|_| ModelError::NonSquareAmplitude {
                rows: n_rows,
                cols: n_cols,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_param_components() {
        assert_eq!(Param::from(1.5).num_components(), None);
        assert_eq!(Param::from(vec![1.0, 2.0, 3.0]).num_components(), Some(3));
        assert!(!Param::Scalar(0.0).is_component_resolved());
    }

    #[test]
    fn test_diagonal_expansion() {
        let amp = Amplitude::from(vec![1.0, 2.0, 3.0]);
        let matrix = amp.to_matrix().unwrap();

        assert_eq!(matrix.dim(), (3, 3));
        for c1 in 0..3 {
            for c2 in 0..3 {
                if c1 == c2 {
                    assert_eq!(matrix[[c1, c2]], (c1 + 1) as f64);
                } else {
                    assert_eq!(matrix[[c1, c2]], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_scalar_amplitude_has_no_matrix() {
        assert!(Amplitude::Scalar(2.0).to_matrix().is_none());
        assert_eq!(Amplitude::Scalar(2.0).num_components(), None);
    }

    #[test]
    fn test_from_array_dispatches_on_rank() {
        use ndarray::{arr0, Array3};

        assert_eq!(
            Param::from_array("beta", arr0(1.5).into_dyn()),
            Ok(Param::Scalar(1.5))
        );

        // A single component is still component-resolved
        let single = Param::from_array("beta", array![3.0].into_dyn()).unwrap();
        assert_eq!(single.num_components(), Some(1));

        assert_eq!(
            Param::from_array("alpha", array![[1.0]].into_dyn()),
            Err(ModelError::UnsupportedRank { name: "alpha", ndim: 2, max: 1 })
        );

        let amp = Amplitude::from_array(array![[1.0, 2.0], [3.0, 4.0]].into_dyn()).unwrap();
        assert_eq!(amp, Amplitude::Matrix(array![[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(
            Amplitude::from_array(array![0.5].into_dyn()),
            Ok(Amplitude::Diagonal(array![0.5]))
        );
        assert_eq!(
            Amplitude::from_array(Array3::<f64>::zeros((1, 1, 1)).into_dyn()),
            Err(ModelError::UnsupportedRank { name: "amplitude", ndim: 3, max: 2 })
        );
    }

    #[test]
    fn test_nested_rows_must_be_rectangular() {
        let amp = Amplitude::try_from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(amp, Amplitude::Matrix(array![[1.0, 2.0], [3.0, 4.0]]));

        // Nine values in total, but not three rows of three
        let ragged = vec![
            vec![1.0, 2.0, 3.0],
            vec![],
            vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        ];
        assert_eq!(
            Amplitude::try_from(ragged),
            Err(ModelError::RaggedAmplitude { row: 1, len: 0, expected: 3 })
        );
    }

    #[test]
    fn test_validation() {
        assert!(Param::from(vec![1.0, -2.0]).validate("beta").is_ok());
        assert_eq!(
            Param::from(f64::NAN).validate("alpha"),
            Err(ModelError::NonFinite { name: "alpha" })
        );
        assert_eq!(
            Param::from(Vec::new()).validate("beta"),
            Err(ModelError::EmptyComponents { name: "beta" })
        );

        let rect = Amplitude::from(array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(
            rect.validate(),
            Err(ModelError::NonSquareAmplitude { rows: 2, cols: 3 })
        );
        assert_eq!(
            Amplitude::from(vec![1.0, f64::INFINITY]).validate(),
            Err(ModelError::NonFinite { name: "amplitude" })
        );
    }
}
