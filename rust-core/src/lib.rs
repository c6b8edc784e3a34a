//! Cross Spectrum - Parametric Foreground Spectra
//! 
//! Power-law cross spectra between observation frequencies, with optional
//! per-component (TEB) parameters and Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod model;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use model::{power_law, Amplitude, ModelError, ModelResult, Param, PowerLaw};
