//! Crank-Nicolson integration of the nonlinear wave equation
//! ```text
//!   ∂²φ   ∂²φ
//! - --- + --- = F(φ)
//!   ∂t²   ∂x²
//! ```
//! on a periodic one-dimensional domain.
//!
//! The equation is taken to first order in time via `π = ∂φ/∂t`,
//! ```text
//! ∂φ          ∂π   ∂²φ
//! -- = π      -- = --- - F(φ)
//! ∂t          ∂t   ∂x²
//! ```
//! and each step solves the implicit average of the right-hand sides at time
//! levels `n` and `n + 1` by fixed-point iteration. A step that fails to reach
//! the requested tolerance within the iteration cap is still taken, but flagged
//! as non-converged in the returned [`StepStatus`]; what to do about it is up
//! to the caller.
//!
//! See [`docs`][crate::docs#crank-nicolson] for details.
//!
//! ```
//! use xwave::{ cnwave::CNWave, nonlinear::Linear };
//!
//! let mut wave = CNWave::new(Linear, 0.0, 1.0, 5).unwrap();
//! assert_eq!(wave.dx(), 0.25);
//! assert_eq!(wave.dt(), 0.125);
//! wave.set_phi_n(|x| x.mapv(|_| 0.0)).unwrap();
//! let status = wave.step().unwrap();
//! assert!(status.converged);
//! assert_eq!(wave.phi_np1().to_vec(), vec![0.0; 5]);
//! assert_eq!(wave.t(), 0.125);
//! ```

use log::{ debug, trace, warn };
use ndarray as nd;
use ndarray_linalg::Solve;
use crate::{
    error::CNError,
    grid::{ DISSIPATION, LAPLACIAN, Grid },
    nonlinear::Nonlinearity,
    DEF_CFL,
    DEF_MAXITERS,
    DEF_TOL,
};

pub type CNResult<T> = Result<T, CNError>;

/// Rule used to correct the level-`n + 1` iterate between residual
/// evaluations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Correction {
    /// Repeated substitution of the current iterate into the implicit update.
    ///
    /// Contracts with a factor of about `dt/dx` on the linear part.
    #[default]
    Picard,
    /// Newton's method on the full implicit system, using `dF/dφ`.
    ///
    /// Solves a dense linear system of size `2(N - 1)` on every iteration.
    Newton,
}

/// Scheme parameters, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Ratio `dt/dx`.
    pub cfl: f64,
    /// Convergence tolerance on the root-mean-square residual.
    pub tol: f64,
    /// Maximum number of corrections per step.
    pub max_iter: usize,
    /// Kreiss-Oliger dissipation coefficient.
    pub eps: f64,
    /// Correction rule.
    pub correction: Correction,
    /// Make [`CNWave::evolve`] and [`CNWave::run_until`] fail on the first
    /// non-converged step.
    pub strict: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cfl: DEF_CFL,
            tol: DEF_TOL,
            max_iter: DEF_MAXITERS,
            eps: 0.0,
            correction: Correction::Picard,
            strict: false,
        }
    }
}

impl Params {
    pub fn with_cfl(mut self, cfl: f64) -> Self { self.cfl = cfl; self }

    pub fn with_tol(mut self, tol: f64) -> Self { self.tol = tol; self }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self { self.eps = eps; self }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> CNResult<()> {
        CNError::check_cfl(self.cfl)?;
        CNError::check_tol(self.tol)?;
        CNError::check_max_iter(self.max_iter)?;
        CNError::check_eps(self.eps)?;
        Ok(())
    }
}

/// Outcome of a single time step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepStatus {
    /// Whether the residual dropped below tolerance.
    pub converged: bool,
    /// Number of corrections applied; equal to `max_iter` when not converged.
    pub iterations: usize,
    /// Final root-mean-square residual.
    pub residual: f64,
}

/// State of the Crank-Nicolson integrator.
///
/// Holds the fields at time levels `n` and `n + 1` along with all work buffers,
/// which are mutated in place on every step.
#[derive(Clone, Debug)]
pub struct CNWave<N> {
    nl: N,
    grid: Grid,
    params: Params,
    dt: f64,
    t: f64,
    phi_n: nd::Array1<f64>,
    pi_n: nd::Array1<f64>,
    phi_np1: nd::Array1<f64>,
    pi_np1: nd::Array1<f64>,
    phi_res: nd::Array1<f64>,
    pi_res: nd::Array1<f64>,
    F_n: nd::Array1<f64>,
    F_np1: nd::Array1<f64>,
    dF_np1: nd::Array1<f64>,
    // level-n contributions to each right-hand side
    rhs_phi_n: nd::Array1<f64>,
    rhs_pi_n: nd::Array1<f64>,
    // scratch for spatial operators
    lap: nd::Array1<f64>,
    diss_phi: nd::Array1<f64>,
    diss_pi: nd::Array1<f64>,
}

impl<N> CNWave<N>
where N: Nonlinearity
{
    /// Create a new integrator for `N` points over `[xmin, xmax]` with default
    /// [`Params`].
    ///
    /// All fields are initialized to zero and `t` to 0. Fails if `n <= 1`.
    pub fn new(nl: N, xmin: f64, xmax: f64, n: usize) -> CNResult<Self> {
        let grid = Grid::new(xmin, xmax, n)?;
        Self::with_params(nl, grid, Params::default())
    }

    /// Create a new integrator on a given grid with given parameters.
    pub fn with_params(nl: N, grid: Grid, params: Params) -> CNResult<Self> {
        params.validate()?;
        let n = grid.len();
        let zeros = || nd::Array1::<f64>::zeros(n);
        Ok(Self {
            nl,
            grid,
            params,
            dt: params.cfl * grid.dx(),
            t: 0.0,
            phi_n: zeros(),
            pi_n: zeros(),
            phi_np1: zeros(),
            pi_np1: zeros(),
            phi_res: zeros(),
            pi_res: zeros(),
            F_n: zeros(),
            F_np1: zeros(),
            dF_np1: zeros(),
            rhs_phi_n: zeros(),
            rhs_pi_n: zeros(),
            lap: zeros(),
            diss_phi: zeros(),
            diss_pi: zeros(),
        })
    }

    /// Spatial grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Scheme parameters.
    pub fn params(&self) -> &Params { &self.params }

    /// The nonlinearity.
    pub fn nonlinearity(&self) -> &N { &self.nl }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.grid.dx() }

    /// Time step.
    pub fn dt(&self) -> f64 { self.dt }

    /// Current time.
    pub fn t(&self) -> f64 { self.t }

    /// Spatial coordinates.
    pub fn x(&self) -> nd::Array1<f64> { self.grid.x() }

    /// `φ` at the current time level.
    pub fn phi(&self) -> nd::ArrayView1<f64> { self.phi_n.view() }

    /// `π = ∂φ/∂t` at the current time level.
    pub fn pi(&self) -> nd::ArrayView1<f64> { self.pi_n.view() }

    /// Last `φ` iterate of the most recent step; equal to [`Self::phi`] once
    /// a step has been taken.
    pub fn phi_np1(&self) -> nd::ArrayView1<f64> { self.phi_np1.view() }

    /// Last `π` iterate of the most recent step; equal to [`Self::pi`] once a
    /// step has been taken.
    pub fn pi_np1(&self) -> nd::ArrayView1<f64> { self.pi_np1.view() }

    /// Residuals `(R_φ, R_π)` of the final iterate of the most recent step.
    pub fn residuals(&self) -> (nd::ArrayView1<f64>, nd::ArrayView1<f64>) {
        (self.phi_res.view(), self.pi_res.view())
    }

    // evaluate an initializer and store it into `target`, enforcing
    // periodicity
    fn init_field<F>(grid: &Grid, target: &mut nd::Array1<f64>, init: F)
        -> CNResult<()>
    where F: FnOnce(&nd::Array1<f64>) -> nd::Array1<f64>
    {
        let values = init(&grid.x());
        grid.check_len(&values)?;
        *target = values;
        Grid::enforce_periodic(target);
        Ok(())
    }

    /// Set `φ` at the current time level from an initializer evaluated over
    /// the spatial coordinates.
    ///
    /// Any parameters of the initial condition are captured by the closure.
    pub fn set_phi_n<F>(&mut self, init: F) -> CNResult<()>
    where F: FnOnce(&nd::Array1<f64>) -> nd::Array1<f64>
    {
        Self::init_field(&self.grid, &mut self.phi_n, init)
    }

    /// Set `π` at the current time level from an initializer evaluated over
    /// the spatial coordinates.
    pub fn set_pi_n<F>(&mut self, init: F) -> CNResult<()>
    where F: FnOnce(&nd::Array1<f64>) -> nd::Array1<f64>
    {
        Self::init_field(&self.grid, &mut self.pi_n, init)
    }

    /// Like [`Self::set_phi_n`], but for a pointwise initializer.
    pub fn set_phi_n_with<F>(&mut self, init: F)
    where F: FnMut(f64) -> f64
    {
        self.phi_n = self.grid.x().mapv(init);
        Grid::enforce_periodic(&mut self.phi_n);
    }

    /// Like [`Self::set_pi_n`], but for a pointwise initializer.
    pub fn set_pi_n_with<F>(&mut self, init: F)
    where F: FnMut(f64) -> f64
    {
        self.pi_n = self.grid.x().mapv(init);
        Grid::enforce_periodic(&mut self.pi_n);
    }

    // evaluate everything depending only on level n and seed level n + 1 with
    // level n
    fn prepare(&mut self) {
        let eps = self.params.eps;
        self.nl.eval_into(&self.phi_n, &mut self.F_n);
        self.grid.laplacian_into(&self.phi_n, &mut self.lap);
        self.grid.dissipation_into(eps, &self.phi_n, &mut self.diss_phi);
        self.grid.dissipation_into(eps, &self.pi_n, &mut self.diss_pi);
        nd::Zip::from(&mut self.rhs_phi_n).and(&self.pi_n).and(&self.diss_phi)
            .for_each(|r, pi, q| { *r = pi + q; });
        nd::Zip::from(&mut self.rhs_pi_n).and(&self.lap).and(&self.F_n)
            .and(&self.diss_pi)
            .for_each(|r, lap, F, q| { *r = lap - F + q; });
        self.phi_np1.assign(&self.phi_n);
        self.pi_np1.assign(&self.pi_n);
    }

    // compute residuals of the current level-(n + 1) iterate and return their
    // root-mean-square over the independent points
    fn residual(&mut self) -> f64 {
        let eps = self.params.eps;
        let odt = self.dt.recip();
        self.nl.eval_into(&self.phi_np1, &mut self.F_np1);
        self.grid.laplacian_into(&self.phi_np1, &mut self.lap);
        self.grid.dissipation_into(eps, &self.phi_np1, &mut self.diss_phi);
        self.grid.dissipation_into(eps, &self.pi_np1, &mut self.diss_pi);
        nd::Zip::from(&mut self.phi_res)
            .and(&self.phi_np1).and(&self.phi_n)
            .and(&self.pi_np1).and(&self.diss_phi).and(&self.rhs_phi_n)
            .for_each(|r, phi1, phi0, pi1, q1, rhs0| {
                *r = (phi1 - phi0) * odt - 0.5 * (pi1 + q1 + rhs0);
            });
        self.lap -= &self.F_np1;
        nd::Zip::from(&mut self.pi_res)
            .and(&self.pi_np1).and(&self.pi_n)
            .and(&self.lap).and(&self.diss_pi).and(&self.rhs_pi_n)
            .for_each(|r, pi1, pi0, lapF1, q1, rhs0| {
                *r = (pi1 - pi0) * odt - 0.5 * (lapF1 + q1 + rhs0);
            });
        let m = self.grid.periodic_len();
        let sumsq: f64
            = self.phi_res.iter().zip(&self.pi_res).take(m)
            .map(|(rphi, rpi)| rphi.powi(2) + rpi.powi(2))
            .sum();
        (sumsq / (2 * m) as f64).sqrt()
    }

    fn correct_picard(&mut self) {
        let dt = self.dt;
        self.phi_np1.scaled_add(-dt, &self.phi_res);
        self.pi_np1.scaled_add(-dt, &self.pi_res);
        Grid::enforce_periodic(&mut self.phi_np1);
        Grid::enforce_periodic(&mut self.pi_np1);
    }

    // one Newton iteration on
    //   G_φ = φ' - φ - h (π' + Q φ' + [π + Q φ])
    //   G_π = π' - π - h (L φ' - F(φ') + Q π' + [L φ - F(φ) + Q π])
    // with h = dt/2 and G = dt R, over the independent points
    fn correct_newton(&mut self) -> CNResult<()> {
        let m = self.grid.periodic_len();
        let h = 0.5 * self.dt;
        self.nl.deriv_into(&self.phi_np1, &mut self.dF_np1);
        let L = self.grid.stencil_matrix(&LAPLACIAN, self.grid.laplacian_scale());
        let Q
            = if self.params.eps == 0.0 {
                nd::Array2::zeros((m, m))
            } else {
                self.grid.stencil_matrix(
                    &DISSIPATION, self.grid.dissipation_scale(self.params.eps))
            };
        let I: nd::Array2<f64> = nd::Array2::eye(m);
        let mut J: nd::Array2<f64> = nd::Array2::zeros((2 * m, 2 * m));
        J.slice_mut(nd::s![..m, ..m]).assign(&(&I - &(h * &Q)));
        J.slice_mut(nd::s![..m, m..]).assign(&(-h * &I));
        let mut J_pi_phi = -h * &L;
        J_pi_phi.diag_mut().iter_mut().zip(self.dF_np1.iter())
            .for_each(|(Jii, dFi)| { *Jii += h * dFi; });
        J.slice_mut(nd::s![m.., ..m]).assign(&J_pi_phi);
        J.slice_mut(nd::s![m.., m..]).assign(&(&I - &(h * &Q)));
        let rhs: nd::Array1<f64>
            = self.phi_res.iter().take(m)
            .chain(self.pi_res.iter().take(m))
            .map(|r| -self.dt * r)
            .collect();
        let delta = J.solve_into(rhs)?;
        self.phi_np1.slice_mut(nd::s![..m]).scaled_add(1.0, &delta.slice(nd::s![..m]));
        self.pi_np1.slice_mut(nd::s![..m]).scaled_add(1.0, &delta.slice(nd::s![m..]));
        Grid::enforce_periodic(&mut self.phi_np1);
        Grid::enforce_periodic(&mut self.pi_np1);
        Ok(())
    }

    /// Advance `(φ, π)` by one time step.
    ///
    /// The level-`n + 1` fields are seeded with the current ones, then corrected
    /// until the root-mean-square residual of the discretized implicit equation
    /// drops below `tol` or `max_iter` corrections have been applied. The result
    /// is promoted to the current level and `t` advances by `dt` either way;
    /// check [`StepStatus::converged`] to find out whether the step can be
    /// trusted.
    ///
    /// Only fails if a linear solve fails under [`Correction::Newton`].
    pub fn step(&mut self) -> CNResult<StepStatus> {
        self.prepare();
        let mut iterations: usize = 0;
        let mut residual = self.residual();
        let converged
            = loop {
                if residual < self.params.tol { break true; }
                if iterations == self.params.max_iter { break false; }
                match self.params.correction {
                    Correction::Picard => self.correct_picard(),
                    Correction::Newton => self.correct_newton()?,
                }
                iterations += 1;
                residual = self.residual();
                trace!("cnwave::step: iteration {}: residual {:.3e}",
                    iterations, residual);
            };
        Grid::enforce_periodic(&mut self.phi_np1);
        Grid::enforce_periodic(&mut self.pi_np1);
        self.phi_n.assign(&self.phi_np1);
        self.pi_n.assign(&self.pi_np1);
        self.t += self.dt;
        if converged {
            debug!(
                "cnwave::step: t = {:.6}: converged after {} iterations \
                (residual {:.3e})",
                self.t, iterations, residual,
            );
        } else {
            warn!(
                "cnwave::step: t = {:.6}: no convergence after {} iterations \
                (residual {:.3e})",
                self.t, iterations, residual,
            );
        }
        Ok(StepStatus { converged, iterations, residual })
    }

    /// Take `nsteps` steps, returning the status of each.
    ///
    /// If [`Params::strict`] is set, stop at the first non-converged step with
    /// [`CNError::NonConvergence`].
    pub fn evolve(&mut self, nsteps: usize) -> CNResult<Vec<StepStatus>> {
        let mut statuses: Vec<StepStatus> = Vec::with_capacity(nsteps);
        for _ in 0..nsteps {
            let status = self.step()?;
            if self.params.strict && !status.converged {
                return Err(CNError::NonConvergence {
                    t: self.t,
                    iterations: status.iterations,
                    residual: status.residual,
                });
            }
            statuses.push(status);
        }
        Ok(statuses)
    }

    /// Take the whole number of steps that brings `t` closest to `t_end`.
    ///
    /// See also [`Self::evolve`].
    pub fn run_until(&mut self, t_end: f64) -> CNResult<Vec<StepStatus>> {
        let nsteps = ((t_end - self.t) / self.dt).round().max(0.0) as usize;
        self.evolve(nsteps)
    }

    /// Compute the discrete energy
    /// ```text
    /// E = Σ dx [ π²/2 + (D₊φ)²/2 + V(φ) ]
    /// ```
    /// of the current fields, where `D₊` is the forward difference and the sum
    /// runs over the independent points.
    ///
    /// Returns `None` if the nonlinearity does not provide a potential.
    pub fn energy(&self) -> Option<f64> {
        let dphi = self.grid.forward_diff(&self.phi_n);
        let mut density: nd::Array1<f64> = nd::Array1::zeros(self.grid.len());
        for (i, ((&phi, &pi), &dphi)) in
            self.phi_n.iter().zip(&self.pi_n).zip(&dphi).enumerate()
        {
            density[i]
                = 0.5 * pi.powi(2) + 0.5 * dphi.powi(2) + self.nl.potential(phi)?;
        }
        Some(self.grid.integrate(&density))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use crate::nonlinear::{ FromFn, Linear, Phi4 };
    use super::*;

    fn max_abs_diff<A, B>(a: A, b: B) -> f64
    where
        A: IntoIterator<Item = f64>,
        B: IntoIterator<Item = f64>,
    {
        a.into_iter().zip(b)
            .map(|(ak, bk)| (ak - bk).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn zero_field_stays_zero() {
        let mut wave = CNWave::new(Linear, 0.0, 1.0, 5).unwrap();
        assert_eq!(wave.dx(), 0.25);
        assert_eq!(wave.dt(), 0.125);
        wave.set_phi_n(|x| x.mapv(|_| 0.0)).unwrap();
        assert_eq!(wave.phi().to_vec(), vec![0.0; 5]);
        let status = wave.step().unwrap();
        assert!(status.converged);
        assert_eq!(status.iterations, 0);
        assert_eq!(wave.phi_np1().to_vec(), vec![0.0; 5]);
        assert_eq!(wave.phi().to_vec(), vec![0.0; 5]);
        assert_eq!(wave.t(), 0.125);
    }

    #[test]
    fn single_point_grid_fails() {
        assert!(matches!(
            CNWave::new(Linear, 0.0, 1.0, 1),
            Err(CNError::Grid(crate::error::GridError::TooFewPoints(1))),
        ));
    }

    #[test]
    fn bad_params_fail() {
        let grid = Grid::new(0.0, 1.0, 11).unwrap();
        let bad = [
            Params::default().with_tol(0.0),
            Params::default().with_max_iter(0),
            Params::default().with_cfl(-0.5),
            Params::default().with_eps(-1.0),
        ];
        for params in bad.into_iter() {
            assert!(CNWave::with_params(Linear, grid, params).is_err());
        }
    }

    #[test]
    fn initialization_is_periodic() {
        let mut wave = CNWave::new(Linear, -2.0, 3.0, 37).unwrap();
        wave.set_phi_n(|x| x.mapv(|xk| xk.powi(2) + 1.0)).unwrap();
        wave.set_pi_n_with(|xk| (3.0 * xk).exp());
        assert_eq!(wave.phi()[36], wave.phi()[0]);
        assert_eq!(wave.pi()[36], wave.pi()[0]);
        assert_eq!(wave.phi()[0], 5.0);
        assert!(wave.set_phi_n(|_| nd::Array1::zeros(4)).is_err());
    }

    #[test]
    fn traveling_wave_returns_after_one_period() {
        let mut wave = CNWave::new(Linear, 0.0, 1.0, 101).unwrap();
        wave.set_phi_n_with(|x| (TAU * x).sin());
        wave.set_pi_n_with(|x| -TAU * (TAU * x).cos());
        let phi0 = wave.phi().to_owned();
        let statuses = wave.run_until(1.0).unwrap();
        assert_eq!(statuses.len(), 200);
        assert!(statuses.iter().all(|s| s.converged));
        assert!((wave.t() - 1.0).abs() < 1e-9);
        assert!(max_abs_diff(wave.phi().iter().copied(), phi0) < 1e-2);
        assert_eq!(wave.phi()[100], wave.phi()[0]);
        assert_eq!(wave.pi()[100], wave.pi()[0]);
    }

    #[test]
    fn quartic_energy_is_conserved() {
        let grid = Grid::new(0.0, 1.0, 65).unwrap();
        let params = Params::default().with_tol(1e-10).with_max_iter(100);
        let mut wave = CNWave::with_params(Phi4 { lambda: 1.0 }, grid, params)
            .unwrap();
        wave.set_phi_n_with(|x| 0.5 * (TAU * x).sin());
        let e0 = wave.energy().unwrap();
        assert!(wave.evolve(100).unwrap().iter().all(|s| s.converged));
        let e1 = wave.energy().unwrap();
        assert!(((e1 - e0) / e0).abs() < 1e-3);

        // at the default tolerance the energy departs from the tightly
        // converged trajectory by no more than O(tol t)
        let mut loose = CNWave::new(Phi4 { lambda: 1.0 }, 0.0, 1.0, 65).unwrap();
        loose.set_phi_n_with(|x| 0.5 * (TAU * x).sin());
        assert!(loose.evolve(100).unwrap().iter().all(|s| s.converged));
        let e1_loose = loose.energy().unwrap();
        assert!(((e1_loose - e1) / e0).abs() < 10.0 * DEF_TOL * loose.t());
    }

    #[test]
    fn energy_requires_potential() {
        let nl = FromFn::new(|phi: f64| phi, |_: f64| 1.0);
        let wave = CNWave::new(nl, 0.0, 1.0, 9).unwrap();
        assert!(wave.energy().is_none());
    }

    #[test]
    fn runaway_nonlinearity_reports_nonconvergence() {
        let nl = FromFn::new(|phi: f64| 1e6 * phi, |_: f64| 1e6);
        let mut wave = CNWave::new(nl, 0.0, 1.0, 5).unwrap();
        wave.set_phi_n_with(|x| (TAU * x).sin());
        let status = wave.step().unwrap();
        assert!(!status.converged);
        assert_eq!(status.iterations, wave.params().max_iter);
        assert_eq!(wave.t(), wave.dt());
    }

    #[test]
    fn strict_driver_stops_on_nonconvergence() {
        let nl = FromFn::new(|phi: f64| 1e6 * phi, |_: f64| 1e6);
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        let params = Params::default().with_max_iter(10).with_strict(true);
        let mut wave = CNWave::with_params(nl, grid, params).unwrap();
        wave.set_phi_n_with(|x| (TAU * x).sin());
        assert!(matches!(
            wave.evolve(3),
            Err(CNError::NonConvergence { iterations: 10, .. }),
        ));
        assert_eq!(wave.t(), wave.dt());
    }

    #[test]
    fn newton_agrees_with_picard() {
        check_newton_agrees_with_picard(0.0);
    }

    #[test]
    fn newton_agrees_with_picard_under_dissipation() {
        check_newton_agrees_with_picard(0.1);
    }

    fn check_newton_agrees_with_picard(eps: f64) {
        let grid = Grid::new(0.0, 1.0, 33).unwrap();
        let params = Params::default().with_tol(1e-10).with_max_iter(200)
            .with_eps(eps);
        let init = |x: f64| 0.8 * (TAU * x).sin() + 0.3 * (2.0 * TAU * x).cos();
        let nl = Phi4 { lambda: 1.0 };

        let mut picard = CNWave::with_params(nl, grid, params).unwrap();
        picard.set_phi_n_with(init);
        let mut newton = CNWave::with_params(
            nl, grid, params.with_correction(Correction::Newton)).unwrap();
        newton.set_phi_n_with(init);

        for (sp, sn) in picard.evolve(20).unwrap().into_iter()
            .zip(newton.evolve(20).unwrap())
        {
            assert!(sp.converged && sn.converged);
            assert!(sn.iterations <= 8);
        }
        assert!(max_abs_diff(picard.phi().iter().copied(), newton.phi().iter().copied()) < 1e-8);
        assert!(max_abs_diff(picard.pi().iter().copied(), newton.pi().iter().copied()) < 1e-8);
    }

    #[test]
    fn dissipation_damps_grid_scale_noise() {
        let grid = Grid::new(0.0, 1.0, 9).unwrap();
        let sawtooth = |x: f64| if ((x * 8.0).round() as i64) % 2 == 0 { 1.0 } else { -1.0 };
        let params = Params::default().with_tol(1e-11).with_max_iter(200);

        let mut plain = CNWave::with_params(Linear, grid, params).unwrap();
        plain.set_phi_n_with(sawtooth);
        let e0 = plain.energy().unwrap();
        plain.evolve(10).unwrap();
        assert!(((plain.energy().unwrap() - e0) / e0).abs() < 1e-9);

        let mut damped = CNWave::with_params(Linear, grid, params.with_eps(0.5))
            .unwrap();
        damped.set_phi_n_with(sawtooth);
        damped.evolve(10).unwrap();
        assert!(damped.energy().unwrap() < 0.05 * e0);
    }
}
