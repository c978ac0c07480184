//! Pointwise nonlinear forcing terms `F(φ)` for the wave equation solved in
//! [`cnwave`][crate::cnwave].
//!
//! A nonlinearity supplies `F(φ)` and its derivative `dF/dφ`, and optionally
//! the potential `V(φ)` with `V' = F` so that the discrete energy of a field
//! configuration can be computed. Parameters of the forcing live in the
//! implementing type (or are captured by closures in [`FromFn`]).
//!
//! ```
//! use xwave::nonlinear::{ FromFn, Nonlinearity, Phi4 };
//!
//! let cubic = Phi4 { lambda: 2.0 };
//! assert_eq!(cubic.eval(1.5), 2.0 * 1.5_f64.powi(3));
//!
//! let a = 0.3;
//! let custom = FromFn::new(move |phi: f64| a * phi.sinh(), move |phi: f64| a * phi.cosh());
//! assert_eq!(custom.deriv(0.0), a);
//! assert!(custom.potential(1.0).is_none());
//! ```

use ndarray as nd;
use crate::Arr1;

/// A pointwise nonlinear forcing term.
pub trait Nonlinearity {
    /// Evaluate `F(φ)`.
    fn eval(&self, phi: f64) -> f64;

    /// Evaluate `dF/dφ`.
    fn deriv(&self, phi: f64) -> f64;

    /// Evaluate the potential `V(φ)`, defined up to a constant by `V' = F`, if
    /// one is known.
    fn potential(&self, _phi: f64) -> Option<f64> { None }

    /// Evaluate `F` over an array into `out`.
    ///
    /// *Panics if the arrays have unequal lengths.*
    fn eval_into<S, T>(&self, phi: &Arr1<S>, out: &mut Arr1<T>)
    where
        S: nd::Data<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
        Self: Sized,
    {
        nd::Zip::from(out).and(phi)
            .for_each(|ok, phik| { *ok = self.eval(*phik); });
    }

    /// Evaluate `dF/dφ` over an array into `out`.
    ///
    /// *Panics if the arrays have unequal lengths.*
    fn deriv_into<S, T>(&self, phi: &Arr1<S>, out: &mut Arr1<T>)
    where
        S: nd::Data<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
        Self: Sized,
    {
        nd::Zip::from(out).and(phi)
            .for_each(|ok, phik| { *ok = self.deriv(*phik); });
    }
}

impl<N: Nonlinearity + ?Sized> Nonlinearity for &N {
    fn eval(&self, phi: f64) -> f64 { (**self).eval(phi) }

    fn deriv(&self, phi: f64) -> f64 { (**self).deriv(phi) }

    fn potential(&self, phi: f64) -> Option<f64> { (**self).potential(phi) }
}

/// `F ≡ 0`, reducing the system to the linear wave equation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Linear;

impl Nonlinearity for Linear {
    fn eval(&self, _phi: f64) -> f64 { 0.0 }

    fn deriv(&self, _phi: f64) -> f64 { 0.0 }

    fn potential(&self, _phi: f64) -> Option<f64> { Some(0.0) }
}

/// Klein-Gordon mass term `F(φ) = m² φ`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KleinGordon {
    pub m2: f64,
}

impl Nonlinearity for KleinGordon {
    fn eval(&self, phi: f64) -> f64 { self.m2 * phi }

    fn deriv(&self, _phi: f64) -> f64 { self.m2 }

    fn potential(&self, phi: f64) -> Option<f64> {
        Some(0.5 * self.m2 * phi.powi(2))
    }
}

/// Quartic self-interaction `F(φ) = λ φ³`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Phi4 {
    pub lambda: f64,
}

impl Nonlinearity for Phi4 {
    fn eval(&self, phi: f64) -> f64 { self.lambda * phi.powi(3) }

    fn deriv(&self, phi: f64) -> f64 { 3.0 * self.lambda * phi.powi(2) }

    fn potential(&self, phi: f64) -> Option<f64> {
        Some(0.25 * self.lambda * phi.powi(4))
    }
}

/// Sine-Gordon forcing `F(φ) = sin φ`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SineGordon;

impl SineGordon {
    /// Kink solution `φ(x, t) = 4 atan(exp(γ (x - x₀ - v t)))`, with `γ` the
    /// Lorentz factor for velocity `v`, along with its time derivative.
    ///
    /// Returns `(φ, ∂φ/∂t)`.
    pub fn kink(x: f64, x0: f64, v: f64, t: f64) -> (f64, f64) {
        let gamma = (1.0 - v * v).sqrt().recip();
        let xi = gamma * (x - x0 - v * t);
        let phi = 4.0 * xi.exp().atan();
        let pi = -2.0 * gamma * v / xi.cosh();
        (phi, pi)
    }
}

impl Nonlinearity for SineGordon {
    fn eval(&self, phi: f64) -> f64 { phi.sin() }

    fn deriv(&self, phi: f64) -> f64 { phi.cos() }

    fn potential(&self, phi: f64) -> Option<f64> { Some(1.0 - phi.cos()) }
}

/// Adapter for a pair of closures `(F, dF)`.
#[derive(Copy, Clone, Debug)]
pub struct FromFn<F, D> {
    f: F,
    df: D,
}

impl<F, D> FromFn<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    /// Wrap `F` and its derivative `dF`.
    pub fn new(f: F, df: D) -> Self { Self { f, df } }
}

impl<F, D> Nonlinearity for FromFn<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn eval(&self, phi: f64) -> f64 { (self.f)(phi) }

    fn deriv(&self, phi: f64) -> f64 { (self.df)(phi) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // central-difference check that each built-in's pieces are consistent
    fn check_consistent<N: Nonlinearity>(nl: N) {
        let h = 1e-5;
        for &phi in [-1.3, -0.2, 0.0, 0.7, 2.1].iter() {
            let dF = (nl.eval(phi + h) - nl.eval(phi - h)) / (2.0 * h);
            assert!((dF - nl.deriv(phi)).abs() < 1e-6);
            let dV = (
                nl.potential(phi + h).unwrap() - nl.potential(phi - h).unwrap()
            ) / (2.0 * h);
            assert!((dV - nl.eval(phi)).abs() < 1e-6);
        }
    }

    #[test]
    fn builtins_are_consistent() {
        check_consistent(Linear);
        check_consistent(KleinGordon { m2: 1.7 });
        check_consistent(Phi4 { lambda: 0.8 });
        check_consistent(SineGordon);
    }

    #[test]
    fn vectorized_matches_pointwise() {
        let nl = Phi4 { lambda: 1.0 };
        let phi = nd::array![0.0, 0.5, -2.0];
        let mut f: nd::Array1<f64> = nd::Array1::zeros(3);
        let mut df: nd::Array1<f64> = nd::Array1::zeros(3);
        nl.eval_into(&phi, &mut f);
        nl.deriv_into(&phi, &mut df);
        assert_eq!(f.to_vec(), vec![0.0, 0.125, -8.0]);
        assert_eq!(df.to_vec(), vec![0.0, 0.75, 12.0]);
    }

    #[test]
    fn kink_is_a_static_solution() {
        // φ'' = sin φ for the static kink
        let h = 1e-4;
        for &x in [-2.0, -0.5, 0.0, 0.4, 1.5].iter() {
            let (phim, _) = SineGordon::kink(x - h, 0.0, 0.0, 0.0);
            let (phi0, pi0) = SineGordon::kink(x, 0.0, 0.0, 0.0);
            let (phip, _) = SineGordon::kink(x + h, 0.0, 0.0, 0.0);
            let d2 = (phip - 2.0 * phi0 + phim) / h.powi(2);
            assert!((d2 - phi0.sin()).abs() < 1e-5);
            assert_eq!(pi0, 0.0);
        }
    }
}
