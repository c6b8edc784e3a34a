//! Separable cross-spectrum models

pub mod error;
pub mod params;
pub mod broadcast;
pub mod power_law;

pub use error::{ModelError, ModelResult};
pub use params::{Amplitude, Param};
pub use broadcast::{broadcast_product, broadcast_shape};
pub use power_law::{multipoles, output_shape, power_law, PowerLaw};
