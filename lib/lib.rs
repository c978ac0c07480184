#![allow(non_snake_case)]

//! Provides routines for the discretized time evolution of fields on uniform
//! grids, centered on an implicit Crank-Nicolson integrator for nonlinear wave
//! equations of the form
//! ```text
//!   ∂²φ   ∂²φ
//! - --- + --- = F(φ)
//!   ∂t²   ∂x²
//! ```
//! on a periodic one-dimensional domain.
//!
//! Provides implementations for the following numerical routines:
//! - Nonlinear wave equation:
//!     - Crank-Nicolson with Picard (fixed-point) or Newton iteration and
//!       optional Kreiss-Oliger dissipation
//! - Bose-Einstein condensates:
//!     - Pseudo-spectral split-step operator for the two-dimensional
//!       Gross-Pitaevskii equation (real and imaginary time)
//! - Nonlinear dynamics:
//!     - Equilibria and stability of one-dimensional flows, analytically for
//!       the standard normal forms and numerically via zero finding
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod interp;
pub mod units;
pub mod utils;
pub mod grid;
pub mod nonlinear;
pub mod cnwave;
pub mod gpe;
pub mod bifurcation;

pub mod docs;

/// Default convergence tolerance for implicit iterations.
pub const DEF_TOL: f64 = 1e-4;
/// Default cap on the number of implicit iterations per step.
pub const DEF_MAXITERS: usize = 50;
/// Default ratio `dt / dx`.
pub const DEF_CFL: f64 = 0.5;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
