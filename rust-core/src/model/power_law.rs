//! Power-law cross spectrum in frequency and multipoles
//!
//! The model is separable into three factors:
//!
//! ```text
//! C[c1, c2, f1, f2, l] = A[c1, c2]
//!                      * (ell[l] / ell0)^((alpha[c1] + alpha[c2]) / 2)
//!                      * (freq[f1] / freq0)^beta[c1]
//!                      * (freq[f2] / freq0)^beta[c2]
//! ```
//!
//! Output shape is `([C, C,] freq, freq, ell)`. The two component axes are
//! present only when at least one of `beta`, `alpha`, `amplitude` is
//! component-resolved; plain parameters are constant across them.

use ndarray::{Array1, Array2, ArrayD, ArrayView1, Axis, IxDyn};
use tracing::{debug, trace};

use super::broadcast::broadcast_product;
use super::error::{ModelError, ModelResult};
use super::params::{Amplitude, Param};

/// Power-law model parameters
///
/// Frequencies and the multipole range are supplied per evaluation; the
/// struct only carries the model itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLaw {
    /// Reference frequency of the SED
    pub freq0: f64,

    /// Spectral index of the SED, plain or shape (C,)
    pub beta: Param,

    /// Reference multipole
    pub ell0: f64,

    /// Multipole slope, plain or shape (C,)
    pub alpha: Param,

    /// Amplitude at `ell0` and `freq0`
    pub amplitude: Amplitude,
}

impl PowerLaw {
    pub fn new(
        freq0: f64,
        beta: impl Into<Param>,
        ell0: f64,
        alpha: impl Into<Param>,
        amplitude: impl Into<Amplitude>,
    ) -> Self {
        Self {
            freq0,
            beta: beta.into(),
            ell0,
            alpha: alpha.into(),
            amplitude: amplitude.into(),
        }
    }

    /// Evaluate the cross spectrum
    ///
    /// # Arguments
    /// * `freq` - Frequencies at which the cross spectrum is evaluated
    /// * `lmin` - Minimum multipole
    /// * `lmax` - Maximum multipole (inclusive)
    pub fn evaluate(
        &self,
        freq: ArrayView1<f64>,
        lmin: usize,
        lmax: usize,
    ) -> ModelResult<ArrayD<f64>> {
        power_law(
            freq,
            self.freq0,
            &self.beta,
            lmin,
            lmax,
            self.ell0,
            &self.alpha,
            &self.amplitude,
        )
    }

    /// Shape `evaluate` returns for `n_freq` frequencies
    pub fn output_shape(
        &self,
        n_freq: usize,
        lmin: usize,
        lmax: usize,
    ) -> ModelResult<Vec<usize>> {
        output_shape(n_freq, lmin, lmax, &self.beta, &self.alpha, &self.amplitude)
    }

    /// Shared component count, `None` if every parameter is plain
    pub fn num_components(&self) -> ModelResult<Option<usize>> {
        component_count(&self.beta, &self.alpha, &self.amplitude)
    }

    pub fn is_component_resolved(&self) -> bool {
        self.beta.is_component_resolved()
            || self.alpha.is_component_resolved()
            || self.amplitude.is_component_resolved()
    }
}

/// Multipoles `lmin..=lmax` divided by `ell0`
///
/// Empty when `lmin > lmax`.
pub fn multipoles(lmin: usize, lmax: usize, ell0: f64) -> Array1<f64> {
    (lmin..=lmax).map(|ell| ell as f64 / ell0).collect()
}

/// Length of the multipole axis; 0 when `lmin > lmax`
fn num_multipoles(lmin: usize, lmax: usize) -> ModelResult<usize> {
    if lmax < lmin {
        return Ok(0);
    }
    (lmax - lmin)
        .checked_add(1)
        .ok_or(ModelError::MultipoleRangeTooLarge { lmin, lmax })
}

/// Component count shared by all component-resolved parameters
fn component_count(
    beta: &Param,
    alpha: &Param,
    amplitude: &Amplitude,
) -> ModelResult<Option<usize>> {
    let counts = [
        ("beta", beta.num_components()),
        ("alpha", alpha.num_components()),
        ("amplitude", amplitude.num_components()),
    ];

    let mut shared: Option<(&'static str, usize)> = None;
    for (name, count) in counts {
        let Some(len) = count else { continue };
        match shared {
            None => shared = Some((name, len)),
            Some((first, first_len)) if first_len != len => {
                return Err(ModelError::ComponentMismatch {
                    first,
                    first_len,
                    second: name,
                    second_len: len,
                });
            }
            Some(_) => {}
        }
    }

    Ok(shared.map(|(_, len)| len))
}

/// Shape of the cross spectrum without evaluating it
///
/// # Returns
/// `[C, C, n_freq, n_freq, n_ell]` if any parameter is component-resolved,
/// `[n_freq, n_freq, n_ell]` otherwise
pub fn output_shape(
    n_freq: usize,
    lmin: usize,
    lmax: usize,
    beta: &Param,
    alpha: &Param,
    amplitude: &Amplitude,
) -> ModelResult<Vec<usize>> {
    let n_ell = num_multipoles(lmin, lmax)?;
    Ok(match component_count(beta, alpha, amplitude)? {
        Some(c) => vec![c, c, n_freq, n_freq, n_ell],
        None => vec![n_freq, n_freq, n_ell],
    })
}

fn check_positive(name: &'static str, value: f64) -> ModelResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonPositive { name, value })
    }
}

fn validate(
    freq: ArrayView1<f64>,
    freq0: f64,
    beta: &Param,
    ell0: f64,
    alpha: &Param,
    amplitude: &Amplitude,
) -> ModelResult<Option<usize>> {
    if freq.is_empty() {
        return Err(ModelError::EmptyFrequencies);
    }
    for &nu in freq.iter() {
        check_positive("freq", nu)?;
    }
    check_positive("freq0", freq0)?;
    check_positive("ell0", ell0)?;

    beta.validate("beta")?;
    alpha.validate("alpha")?;
    amplitude.validate()?;

    component_count(beta, alpha, amplitude)
}

/// SED at both frequency positions of the pair
///
/// The SED is computed once per (component, frequency) and placed on the
/// first and second frequency axes.
///
/// # Returns
/// `(first, second)`: shapes `(F, 1, 1)` and `(1, F, 1)` for a plain `beta`,
/// `(C, 1, F, 1, 1)` and `(1, C, 1, F, 1)` for a per-component one
fn sed_factors(freq: ArrayView1<f64>, freq0: f64, beta: &Param) -> (ArrayD<f64>, ArrayD<f64>) {
    match beta {
        Param::Scalar(beta) => {
            let sed = freq.mapv(|nu| (nu / freq0).powf(*beta));
            let first = sed.view().insert_axis(Axis(1)).insert_axis(Axis(2));
            let second = sed.view().insert_axis(Axis(0)).insert_axis(Axis(2));
            (first.into_dyn().to_owned(), second.into_dyn().to_owned())
        }
        Param::PerComponent(betas) => {
            // (C, F)
            let sed = Array2::from_shape_fn((betas.len(), freq.len()), |(c, f)| {
                (freq[f] / freq0).powf(betas[c])
            });
            let first = sed
                .view()
                .insert_axis(Axis(1))
                .insert_axis(Axis(3))
                .insert_axis(Axis(4));
            let second = sed
                .view()
                .insert_axis(Axis(0))
                .insert_axis(Axis(2))
                .insert_axis(Axis(4));
            (first.into_dyn().to_owned(), second.into_dyn().to_owned())
        }
    }
}

/// Multipole scaling, shape `(L,)` or `(C, C, 1, 1, L)`
///
/// Component pairs scale with the mean of their slopes.
fn multipole_factor(ells: &Array1<f64>, alpha: &Param) -> ArrayD<f64> {
    match alpha {
        Param::Scalar(alpha) => ells.mapv(|ell| ell.powf(*alpha)).into_dyn(),
        Param::PerComponent(alphas) => {
            let c = alphas.len();
            ArrayD::from_shape_fn(IxDyn(&[c, c, 1, 1, ells.len()]), |idx| {
                let exponent = (alphas[idx[0]] + alphas[idx[1]]) / 2.0;
                ells[idx[4]].powf(exponent)
            })
        }
    }
}

/// Amplitude, 0-d or shape `(C, C, 1, 1, 1)`
fn amplitude_factor(amplitude: &Amplitude) -> ArrayD<f64> {
    match amplitude {
        Amplitude::Scalar(value) => ArrayD::from_elem(IxDyn(&[]), *value),
        Amplitude::Diagonal(_) | Amplitude::Matrix(_) => amplitude
            .to_matrix()
            .unwrap_or_default()
            .insert_axis(Axis(2))
            .insert_axis(Axis(3))
            .insert_axis(Axis(4))
            .into_dyn(),
    }
}

/// Cross spectrum of a power law in frequency and multipoles
///
/// # Arguments
/// * `freq` - Frequencies at which the cross is evaluated, shape (F,)
/// * `freq0` - Reference frequency of the SED
/// * `beta` - Spectral index of the SED, plain or shape (C,)
/// * `lmin` - Minimum multipole
/// * `lmax` - Maximum multipole (inclusive)
/// * `ell0` - Reference multipole
/// * `alpha` - Multipole slope, plain or shape (C,). The `TE` spectrum, for
///   example, scales with `(alpha_T + alpha_E) / 2`
/// * `amplitude` - Amplitude at `ell0` and `freq0`: plain, diagonal (C,) or
///   full (C, C)
///
/// # Returns
/// Array of shape `([C, C,] F, F, lmax - lmin + 1)`
///
/// # Errors
/// Empty or non-positive frequencies, non-positive `freq0`/`ell0`,
/// non-finite parameters, and component counts that disagree between
/// parameters are all rejected before any computation.
#[allow(clippy::too_many_arguments)]
pub fn power_law(
    freq: ArrayView1<f64>,
    freq0: f64,
    beta: &Param,
    lmin: usize,
    lmax: usize,
    ell0: f64,
    alpha: &Param,
    amplitude: &Amplitude,
) -> ModelResult<ArrayD<f64>> {
    let components = validate(freq, freq0, beta, ell0, alpha, amplitude)?;
    num_multipoles(lmin, lmax)?;

    let ells = multipoles(lmin, lmax, ell0);

    let amp = amplitude_factor(amplitude);
    let ell_scaling = multipole_factor(&ells, alpha);
    let (sed_first, sed_second) = sed_factors(freq, freq0, beta);

    trace!(
        amplitude = ?amp.shape(),
        multipole = ?ell_scaling.shape(),
        sed = ?sed_first.shape(),
        "power-law factor shapes"
    );

    let cross = broadcast_product(&[amp, ell_scaling, sed_second, sed_first])?;

    debug!(
        n_freq = freq.len(),
        n_ell = ells.len(),
        components = ?components,
        shape = ?cross.shape(),
        "evaluated power-law cross spectrum"
    );

    Ok(cross)
}
