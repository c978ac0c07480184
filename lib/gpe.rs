//! Time evolution of a Bose-Einstein condensate wavefunction under the
//! two-dimensional Gross-Pitaevskii equation (GPE)
//! ```text
//!   ∂ψ     1           x² + y²
//! i -- = - - ∇²ψ + ( ------- + g |ψ|² ) ψ
//!   ∂t     2              2
//! ```
//! in natural units of the harmonic trap (see [`Units`][crate::units::Units]),
//! via the pseudo-spectral split-step operator method.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes `y` and the second
//! indexes `x`.
//!
//! ```
//! use xwave::gpe::{ Params, Qho, Simulation };
//!
//! let mut sim = Simulation::new(Params::default().with_n(32)).unwrap();
//! let ground = Qho::new(0);
//! sim.set_psi(|x, y| ground.eval(x, y, 0.0));
//! assert!((sim.norm() - 1.0).abs() < 1e-6);
//! sim.evolve(10);
//! assert!((sim.norm() - 1.0).abs() < 1e-6);
//! ```

use std::f64::consts::{ PI, TAU };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::GpeError,
    utils::{ Fft2, fft_freq, wf_norm2, wf_renormalize2 },
};

pub type GpeResult<T> = Result<T, GpeError>;

/// Evaluate the (physicists') Hermite polynomial `H_n(x)` by recurrence.
pub fn hermite(n: usize, x: f64) -> f64 {
    let mut hkm1: f64 = 1.0;
    if n == 0 { return hkm1; }
    let mut hk: f64 = 2.0 * x;
    for k in 1..n {
        let hkp1 = 2.0 * x * hk - 2.0 * k as f64 * hkm1;
        hkm1 = hk;
        hk = hkp1;
    }
    hk
}

/// Quantum harmonic oscillator eigenstates, as product states `ψ_n(x) ψ_n(y)`
/// of the two-dimensional isotropic trap, optionally displaced from the trap
/// center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Qho {
    n: usize,
    xshift: f64,
    yshift: f64,
    energy: f64,
    coef: f64,
}

impl Qho {
    /// The `n`-th eigenstate along each axis, centered on the trap.
    pub fn new(n: usize) -> Self {
        let fact: f64 = (1..=n).map(|k| k as f64).product();
        let coef = (2.0_f64.powi(n as i32) * fact).sqrt().recip() * PI.powf(-0.25);
        Self { n, xshift: 0.0, yshift: 0.0, energy: 2.0 * n as f64 + 1.0, coef }
    }

    /// Displace the state to be centered on `(xshift, yshift)`.
    pub fn shifted(mut self, xshift: f64, yshift: f64) -> Self {
        self.xshift = xshift;
        self.yshift = yshift;
        self
    }

    /// Eigenstate index along each axis.
    pub fn n(&self) -> usize { self.n }

    /// Energy `2n + 1` of the (centered) product state.
    pub fn energy(&self) -> f64 { self.energy }

    /// Evaluate the one-dimensional eigenfunction `ψ_n(x)`.
    pub fn eval_1d(&self, x: f64) -> f64 {
        self.coef * (-x.powi(2) / 2.0).exp() * hermite(self.n, x)
    }

    /// Evaluate `ψ_n(x - xshift) ψ_n(y - yshift) exp(-i E t)`.
    pub fn eval(&self, x: f64, y: f64, t: f64) -> C64 {
        let xs = x - self.xshift;
        let ys = y - self.yshift;
        self.eval_1d(xs) * self.eval_1d(ys) * C64::cis(-self.energy * t)
    }
}

/// Simulation parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Half-width of the square domain `[-xmax, xmax]²`.
    pub xmax: f64,
    /// Number of points along each axis.
    pub n: usize,
    /// Coefficient of the `|ψ|²` nonlinearity.
    pub g: f64,
    /// Time step.
    pub dt: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self { xmax: 8.0, n: 128, g: 0.0, dt: 5e-3 }
    }
}

impl Params {
    pub fn with_xmax(mut self, xmax: f64) -> Self { self.xmax = xmax; self }

    pub fn with_n(mut self, n: usize) -> Self { self.n = n; self }

    pub fn with_g(mut self, g: f64) -> Self { self.g = g; self }

    pub fn with_dt(mut self, dt: f64) -> Self { self.dt = dt; self }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> GpeResult<()> {
        GpeError::check_extent(self.xmax)?;
        GpeError::check_points(self.n)?;
        GpeError::check_dt(self.dt)?;
        Ok(())
    }
}

/// Split-step evolution of a condensate wavefunction on a square grid.
#[derive(Clone, Debug)]
pub struct Simulation {
    params: Params,
    x: nd::Array1<f64>,
    dx: f64,
    k: nd::Array1<f64>,
    V: nd::Array2<f64>,
    ksq: nd::Array2<f64>,
    psi: nd::Array2<C64>,
    t: f64,
    fft: Fft2,
}

impl Simulation {
    /// Set up the spatial and spectral grids and the trap.
    ///
    /// The wavefunction is initialized to zero and `t` to 0.
    pub fn new(params: Params) -> GpeResult<Self> {
        params.validate()?;
        let n = params.n;
        let x: nd::Array1<f64>
            = nd::Array1::linspace(-params.xmax, params.xmax, n);
        let dx = x[1] - x[0];
        let k: nd::Array1<f64> = TAU * fft_freq(n, dx);
        let V: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(i, j)| {
                (x[j].powi(2) + x[i].powi(2)) / 2.0
            });
        let ksq: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(i, j)| {
                k[j].powi(2) + k[i].powi(2)
            });
        Ok(Self {
            params,
            x,
            dx,
            k,
            V,
            ksq,
            psi: nd::Array2::zeros((n, n)),
            t: 0.0,
            fft: Fft2::new(n, n),
        })
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params { &self.params }

    /// Coordinates along each axis.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Wavenumbers along each axis, in FFT order.
    pub fn k(&self) -> &nd::Array1<f64> { &self.k }

    /// Trap potential.
    pub fn potential(&self) -> &nd::Array2<f64> { &self.V }

    /// Current wavefunction.
    pub fn psi(&self) -> &nd::Array2<C64> { &self.psi }

    /// Current time.
    pub fn t(&self) -> f64 { self.t }

    /// Coordinate arrays `(X, Y)` with `X[[i, j]] = x[j]` and
    /// `Y[[i, j]] = x[i]`.
    pub fn meshgrid(&self) -> (nd::Array2<f64>, nd::Array2<f64>) {
        let n = self.params.n;
        let X = nd::Array2::from_shape_fn((n, n), |(_, j)| self.x[j]);
        let Y = nd::Array2::from_shape_fn((n, n), |(i, _)| self.x[i]);
        (X, Y)
    }

    /// Set the wavefunction from an initializer `f(x, y)` evaluated over the
    /// grid.
    pub fn set_psi<F>(&mut self, mut init: F)
    where F: FnMut(f64, f64) -> C64
    {
        let x = &self.x;
        self.psi = nd::Array2::from_shape_fn(self.V.raw_dim(), |(i, j)| {
            init(x[j], x[i])
        });
    }

    /// Set the wavefunction from an array.
    pub fn set_psi_array(&mut self, psi: nd::Array2<C64>) -> GpeResult<()> {
        let n = self.params.n;
        if psi.dim() != (n, n) {
            let (a, b) = psi.dim();
            return Err(GpeError::Shape([a, b], [n, n]));
        }
        self.psi = psi;
        Ok(())
    }

    /// Compute `∫|ψ|²` via the trapezoidal rule.
    pub fn norm(&self) -> f64 { wf_norm2(&self.psi, self.dx) }

    /// Rescale the wavefunction to unit norm, returning the previous norm.
    pub fn normalize(&mut self) -> GpeResult<f64> {
        if self.norm() == 0.0 { return Err(GpeError::ZeroNorm); }
        Ok(wf_renormalize2(&mut self.psi, self.dx))
    }

    /// Compute `|ψ|²`.
    pub fn density(&self) -> nd::Array2<f64> { self.psi.mapv(|q| q.norm_sqr()) }

    // kinetic, trap, and interaction integrals ∫|∇ψ|²/2, ∫V|ψ|², ∫|ψ|⁴ along
    // with ∫|ψ|², all as grid sums
    fn integrals(&self) -> (f64, f64, f64, f64) {
        let n2 = (self.params.n * self.params.n) as f64;
        let dA = self.dx.powi(2);
        let mut psi_k = self.psi.clone();
        self.fft.forward(&mut psi_k);
        let kin: f64
            = psi_k.iter().zip(&self.ksq)
            .map(|(qk, ksq)| 0.5 * ksq * qk.norm_sqr())
            .sum::<f64>() * dA / n2;
        let (mut pot, mut int, mut norm) = (0.0, 0.0, 0.0);
        self.psi.iter().zip(&self.V)
            .for_each(|(q, V)| {
                let rho = q.norm_sqr();
                pot += V * rho;
                int += rho.powi(2);
                norm += rho;
            });
        (kin, pot * dA, int * dA, norm * dA)
    }

    /// Compute the energy per particle,
    /// `∫ [|∇ψ|²/2 + V|ψ|² + g|ψ|⁴/2] / ∫|ψ|²`.
    ///
    /// Returns NaN for a zero wavefunction.
    pub fn energy(&self) -> f64 {
        let (kin, pot, int, norm) = self.integrals();
        (kin + pot + 0.5 * self.params.g * int) / norm
    }

    /// Compute the chemical potential,
    /// `∫ [|∇ψ|²/2 + V|ψ|² + g|ψ|⁴] / ∫|ψ|²`.
    ///
    /// Returns NaN for a zero wavefunction.
    pub fn chemical_potential(&self) -> f64 {
        let (kin, pot, int, norm) = self.integrals();
        (kin + pot + self.params.g * int) / norm
    }

    // multiply by exp(-z (V + g|ψ|²)) for complex "time" z
    fn apply_split_potential(&mut self, z: C64) {
        let g = self.params.g;
        nd::Zip::from(&mut self.psi).and(&self.V)
            .for_each(|q, V| { *q *= (-z * (V + g * q.norm_sqr())).exp(); });
    }

    // multiply by exp(-z k²/2) in k-space for complex "time" z
    fn apply_split_kinetic(&mut self, z: C64) {
        self.fft.forward(&mut self.psi);
        nd::Zip::from(&mut self.psi).and(&self.ksq)
            .for_each(|q, ksq| { *q *= (-z * (*ksq / 2.0)).exp(); });
        self.fft.inverse(&mut self.psi);
    }

    /// Advance the wavefunction by one real-time step.
    pub fn step(&mut self) {
        let dt = self.params.dt;
        let z = C64::i() * dt;
        self.apply_split_potential(z / 2.0);
        self.apply_split_kinetic(z);
        self.apply_split_potential(z / 2.0);
        self.t += dt;
    }

    /// Take `nsteps` real-time steps.
    pub fn evolve(&mut self, nsteps: usize) {
        (0..nsteps).for_each(|_| self.step());
    }

    /// Take `nsteps` real-time steps, recording the wavefunction after each.
    ///
    /// The first axis of the returned array indexes time, starting with the
    /// current state.
    pub fn evolve_record(&mut self, nsteps: usize) -> (nd::Array1<f64>, nd::Array3<C64>) {
        let n = self.params.n;
        let mut t: nd::Array1<f64> = nd::Array1::zeros(nsteps + 1);
        let mut psi: nd::Array3<C64> = nd::Array3::zeros((nsteps + 1, n, n));
        t[0] = self.t;
        psi.slice_mut(nd::s![0, .., ..]).assign(&self.psi);
        let iter = t.iter_mut().skip(1).zip(psi.outer_iter_mut().skip(1));
        for (tk, mut psik) in iter {
            self.step();
            *tk = self.t;
            psik.assign(&self.psi);
        }
        (t, psi)
    }

    /// Advance the wavefunction by one imaginary-time step and renormalize.
    ///
    /// The clock is not advanced.
    pub fn step_imag(&mut self) -> GpeResult<()> {
        let z = C64::from(self.params.dt);
        self.apply_split_potential(z / 2.0);
        self.apply_split_kinetic(z);
        self.apply_split_potential(z / 2.0);
        self.normalize()?;
        Ok(())
    }

    /// Relax the current wavefunction onto the ground state of the trap by
    /// imaginary-time evolution, stopping once the chemical potential changes
    /// by less than `epsilon` between steps.
    ///
    /// Returns the number of steps taken.
    pub fn ground_state(&mut self, epsilon: f64, max_steps: usize)
        -> GpeResult<usize>
    {
        GpeError::check_epsilon(epsilon)?;
        self.normalize()?;
        let mut mu_prev = self.chemical_potential();
        for k in 1..=max_steps {
            self.step_imag()?;
            let mu = self.chemical_potential();
            if (mu - mu_prev).abs() < epsilon { return Ok(k); }
            mu_prev = mu;
        }
        Err(GpeError::NoConvergence(max_steps))
    }
}
