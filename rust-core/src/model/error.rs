//! Errors raised while validating and evaluating spectral models

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Frequency array is empty")]
    EmptyFrequencies,

    #[error("{name} must be finite and strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} contains a non-finite value")]
    NonFinite { name: &'static str },

    #[error("{name} is component-resolved but has no components")]
    EmptyComponents { name: &'static str },

    #[error("Amplitude row {row} has {len} values, expected {expected}")]
    RaggedAmplitude { row: usize, len: usize, expected: usize },

    #[error("{name} must have at most {max} dimensions, got {ndim}")]
    UnsupportedRank { name: &'static str, ndim: usize, max: usize },

    #[error("Multipole range {lmin}..={lmax} is too large")]
    MultipoleRangeTooLarge { lmin: usize, lmax: usize },

    #[error("Amplitude matrix must be square, got {rows}x{cols}")]
    NonSquareAmplitude { rows: usize, cols: usize },

    #[error(
        "Component count mismatch: {first} has {first_len} components, \
         {second} has {second_len}"
    )]
    ComponentMismatch {
        first: &'static str,
        first_len: usize,
        second: &'static str,
        second_len: usize,
    },

    #[error("Shapes {left:?} and {right:?} cannot be broadcast together")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
}

pub type ModelResult<T> = Result<T, ModelError>;
