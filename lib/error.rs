//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    pub(crate) fn check_len<S, A>(a: &nd::ArrayBase<S, nd::Ix1>, n: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let na = a.len();
        (na == n).then_some(()).ok_or(Self(na, n))
    }
}

/// Returned from a call to [`find_zeros`][crate::interp::find_zeros] when data
/// arrays are less than 5 elements long.
#[derive(Debug, Error)]
#[error("coordinate arrays in interpolation must be longer than 4 elements; got {0}")]
pub struct LagrangeError(pub usize);

impl LagrangeError {
    pub(crate) fn check<S, A>(a: &nd::ArrayBase<S, nd::Ix1>)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let n = a.len();
        (n > 4).then_some(()).ok_or(Self(n))
    }
}

/// Returned from functions in [`interp`][crate::interp].
#[derive(Debug, Error)]
pub enum InterpError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// [`LagrangeError`]
    #[error("lagrange error: {0}")]
    Lagrange(#[from] LagrangeError),
}

/// Returned from [`Grid`][crate::grid::Grid] construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than two grid points are requested.
    #[error("grid must have more than 1 point; got {0}")]
    TooFewPoints(usize),

    /// Returned when the domain bounds are not strictly increasing.
    #[error("grid bounds must satisfy xmin < xmax; got ({0}, {1})")]
    BadBounds(f64, f64),
}

impl GridError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n > 1).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_bounds(xmin: f64, xmax: f64) -> Result<(), Self> {
        (xmin < xmax).then_some(()).ok_or(Self::BadBounds(xmin, xmax))
    }
}

/// Returned from the Crank-Nicolson wave equation stepper.
#[derive(Debug, Error)]
pub enum CNError {
    /// Returned when a non-positive `tol` value is encountered.
    #[error("tolerance must be greater than 0; got {0}")]
    BadTolerance(f64),

    /// Returned when a zero `max_iter` value is encountered.
    #[error("max_iter must be greater than 0; got {0}")]
    BadMaxIter(usize),

    /// Returned when a non-positive Courant factor is encountered.
    #[error("cfl factor must be greater than 0; got {0}")]
    BadCfl(f64),

    /// Returned when a negative dissipation coefficient is encountered.
    #[error("dissipation coefficient must be non-negative; got {0}")]
    BadDissipation(f64),

    /// Returned by strict drivers when a step fails to converge.
    #[error("step at t = {t} did not converge after {iterations} iterations (residual {residual:.3e})")]
    NonConvergence { t: f64, iterations: usize, residual: f64 },

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl CNError {
    pub(crate) fn check_tol(tol: f64) -> Result<(), Self> {
        (tol > 0.0).then_some(()).ok_or(Self::BadTolerance(tol))
    }

    pub(crate) fn check_max_iter(max_iter: usize) -> Result<(), Self> {
        (max_iter != 0).then_some(()).ok_or(Self::BadMaxIter(max_iter))
    }

    pub(crate) fn check_cfl(cfl: f64) -> Result<(), Self> {
        (cfl > 0.0).then_some(()).ok_or(Self::BadCfl(cfl))
    }

    pub(crate) fn check_eps(eps: f64) -> Result<(), Self> {
        (eps >= 0.0).then_some(()).ok_or(Self::BadDissipation(eps))
    }
}

/// Returned from the Gross-Pitaevskii simulation.
#[derive(Debug, Error)]
pub enum GpeError {
    /// Returned when fewer than two grid points per axis are requested.
    #[error("simulation grid must have more than 1 point per axis; got {0}")]
    TooFewPoints(usize),

    /// Returned when a non-positive domain half-width is encountered.
    #[error("xmax must be greater than 0; got {0}")]
    BadExtent(f64),

    /// Returned when a non-positive time step is encountered.
    #[error("time step must be greater than 0; got {0}")]
    BadTimeStep(f64),

    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when an initializer produces an array of the wrong shape.
    #[error("initial wavefunction has shape {0:?}; expected {1:?}")]
    Shape([usize; 2], [usize; 2]),

    /// Returned when the wavefunction has zero norm and cannot be normalized.
    #[error("wavefunction has zero norm")]
    ZeroNorm,

    /// Returned when imaginary-time relaxation fails to settle.
    #[error("imaginary-time relaxation did not converge after {0} steps")]
    NoConvergence(usize),
}

impl GpeError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n > 1).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_extent(xmax: f64) -> Result<(), Self> {
        (xmax > 0.0).then_some(()).ok_or(Self::BadExtent(xmax))
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt > 0.0).then_some(()).ok_or(Self::BadTimeStep(dt))
    }

    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }
}
