//! Equilibria and their stability for one-dimensional flows `dx/dt = f(r, x)`
//! under variation of a control parameter `r`.
//!
//! The four standard normal forms are handled analytically by [`NormalForm`];
//! arbitrary flows are handled numerically by [`find_equilibria`], which looks
//! for sign changes of `f` over a sampled grid. Equilibria at which `f` only
//! touches zero without changing sign (e.g. the saddle-node at `r = 0`) are not
//! seen by the numerical search.
//!
//! ```
//! use ndarray as nd;
//! use xwave::bifurcation::{ NormalForm, Stability, find_equilibria };
//!
//! let form = NormalForm::SupercriticalPitchfork;
//! let eq = form.equilibria(4.0);
//! assert_eq!(eq.len(), 3);
//! assert_eq!(eq[0].x, -2.0);
//! assert_eq!(eq[1].stability, Stability::Unstable);
//!
//! let x: nd::Array1<f64> = nd::Array1::linspace(-3.01, 3.0, 500);
//! let found = find_equilibria(|r, x| form.rhs(r, x), |r, x| form.drhs(r, x), 4.0, &x)
//!     .unwrap();
//! assert_eq!(found.len(), 3);
//! assert_eq!(found[2].stability, Stability::Stable);
//! ```

use std::fmt;
use ndarray as nd;
use crate::{
    Arr1,
    interp::{ InterpResult, Zero, find_zero_indices },
};

/// Linear stability of an equilibrium, from the sign of `df/dx` there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stability {
    /// `df/dx < 0`; perturbations decay.
    Stable,
    /// `df/dx > 0`; perturbations grow.
    Unstable,
    /// `df/dx = 0`; linearization is inconclusive.
    Neutral,
}

impl Stability {
    /// Classify by the slope of the flow at the equilibrium.
    pub fn from_slope(slope: f64) -> Self {
        if slope < 0.0 {
            Self::Stable
        } else if slope > 0.0 {
            Self::Unstable
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::Unstable => write!(f, "unstable"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// An equilibrium point of a flow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Equilibrium {
    /// Location.
    pub x: f64,
    /// `df/dx` at `x`.
    pub slope: f64,
    pub stability: Stability,
}

impl Equilibrium {
    fn new(x: f64, slope: f64) -> Self {
        Self { x, slope, stability: Stability::from_slope(slope) }
    }
}

/// Canonical one-dimensional bifurcations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NormalForm {
    /// `f = r - x²`
    SaddleNode,
    /// `f = r x - x²`
    Transcritical,
    /// `f = r x - x³`
    SupercriticalPitchfork,
    /// `f = r x + x³`
    SubcriticalPitchfork,
}

impl NormalForm {
    pub const ALL: [Self; 4] = [
        Self::SaddleNode,
        Self::Transcritical,
        Self::SupercriticalPitchfork,
        Self::SubcriticalPitchfork,
    ];

    /// Short name, suitable for file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaddleNode => "saddle_node",
            Self::Transcritical => "transcritical",
            Self::SupercriticalPitchfork => "supercritical_pitchfork",
            Self::SubcriticalPitchfork => "subcritical_pitchfork",
        }
    }

    /// Evaluate `f(r, x)`.
    pub fn rhs(&self, r: f64, x: f64) -> f64 {
        match self {
            Self::SaddleNode => r - x.powi(2),
            Self::Transcritical => r * x - x.powi(2),
            Self::SupercriticalPitchfork => r * x - x.powi(3),
            Self::SubcriticalPitchfork => r * x + x.powi(3),
        }
    }

    /// Evaluate `∂f/∂x (r, x)`.
    pub fn drhs(&self, r: f64, x: f64) -> f64 {
        match self {
            Self::SaddleNode => -2.0 * x,
            Self::Transcritical => r - 2.0 * x,
            Self::SupercriticalPitchfork => r - 3.0 * x.powi(2),
            Self::SubcriticalPitchfork => r + 3.0 * x.powi(2),
        }
    }

    /// Exact equilibria at parameter `r`, in ascending order of `x`.
    ///
    /// Branches that merge at the bifurcation point are reported once there,
    /// with [`Stability::Neutral`].
    pub fn equilibria(&self, r: f64) -> Vec<Equilibrium> {
        let mut xs: Vec<f64> = match self {
            Self::SaddleNode if r > 0.0 => vec![-r.sqrt(), r.sqrt()],
            Self::SaddleNode if r == 0.0 => vec![0.0],
            Self::SaddleNode => Vec::new(),
            Self::Transcritical if r == 0.0 => vec![0.0],
            Self::Transcritical => vec![0.0, r],
            Self::SupercriticalPitchfork if r > 0.0
                => vec![-r.sqrt(), 0.0, r.sqrt()],
            Self::SupercriticalPitchfork => vec![0.0],
            Self::SubcriticalPitchfork if r < 0.0
                => vec![-(-r).sqrt(), 0.0, (-r).sqrt()],
            Self::SubcriticalPitchfork => vec![0.0],
        };
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.into_iter()
            .map(|x| Equilibrium::new(x, self.drhs(r, x)))
            .collect()
    }

    /// Sweep `r`, collecting every exact equilibrium as an `(r, equilibrium)`
    /// pair.
    pub fn diagram<S>(&self, r: &Arr1<S>) -> Vec<(f64, Equilibrium)>
    where S: nd::Data<Elem = f64>
    {
        r.iter()
            .flat_map(|rk| {
                self.equilibria(*rk).into_iter().map(move |eq| (*rk, eq))
            })
            .collect()
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Locate the equilibria of the flow `f(r, x)` at fixed `r` among the
/// coordinates `x`, classifying each by the slope `df(r, x)`.
///
/// Zeros are located by Lagrange interpolation of `f` sampled over `x` (see
/// [`find_zeros`][crate::interp::find_zeros]) and returned in ascending order.
pub fn find_equilibria<F, D, S>(f: F, df: D, r: f64, x: &Arr1<S>)
    -> InterpResult<Vec<Equilibrium>>
where
    F: Fn(f64, f64) -> f64,
    D: Fn(f64, f64) -> f64,
    S: nd::Data<Elem = f64>,
{
    let y: nd::Array1<f64> = x.mapv(|xk| f(r, xk));
    let eq: Vec<Equilibrium>
        = find_zero_indices(x, &y, Zero::All)?
        .into_iter()
        .map(|(_, x0)| Equilibrium::new(x0, df(r, x0)))
        .collect();
    Ok(eq)
}

/// Sweep `r`, collecting numerically located equilibria of `f(r, x)` as
/// `(r, equilibrium)` pairs.
pub fn diagram<F, D, S, T>(f: F, df: D, r: &Arr1<S>, x: &Arr1<T>)
    -> InterpResult<Vec<(f64, Equilibrium)>>
where
    F: Fn(f64, f64) -> f64,
    D: Fn(f64, f64) -> f64,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let mut acc: Vec<(f64, Equilibrium)> = Vec::new();
    for rk in r.iter() {
        find_equilibria(&f, &df, *rk, x)?
            .into_iter()
            .for_each(|eq| { acc.push((*rk, eq)); });
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ InterpError, LagrangeError };

    fn stabilities(eq: &[Equilibrium]) -> Vec<Stability> {
        eq.iter().map(|e| e.stability).collect()
    }

    #[test]
    fn saddle_node() {
        let form = NormalForm::SaddleNode;
        assert!(form.equilibria(-1.0).is_empty());
        let eq = form.equilibria(0.0);
        assert_eq!(eq.len(), 1);
        assert_eq!(eq[0].stability, Stability::Neutral);
        let eq = form.equilibria(9.0);
        assert_eq!(eq.iter().map(|e| e.x).collect::<Vec<_>>(), vec![-3.0, 3.0]);
        assert_eq!(stabilities(&eq), vec![Stability::Unstable, Stability::Stable]);
    }

    #[test]
    fn transcritical_exchanges_stability() {
        let form = NormalForm::Transcritical;
        let below = form.equilibria(-2.0);
        assert_eq!(below.iter().map(|e| e.x).collect::<Vec<_>>(), vec![-2.0, 0.0]);
        assert_eq!(stabilities(&below), vec![Stability::Unstable, Stability::Stable]);
        let above = form.equilibria(2.0);
        assert_eq!(above.iter().map(|e| e.x).collect::<Vec<_>>(), vec![0.0, 2.0]);
        assert_eq!(stabilities(&above), vec![Stability::Unstable, Stability::Stable]);
    }

    #[test]
    fn pitchforks() {
        use Stability::*;
        let sup = NormalForm::SupercriticalPitchfork;
        assert_eq!(stabilities(&sup.equilibria(-1.0)), vec![Stable]);
        assert_eq!(stabilities(&sup.equilibria(1.0)), vec![Stable, Unstable, Stable]);
        let sub = NormalForm::SubcriticalPitchfork;
        assert_eq!(stabilities(&sub.equilibria(-1.0)), vec![Unstable, Stable, Unstable]);
        assert_eq!(stabilities(&sub.equilibria(1.0)), vec![Unstable]);
        assert_eq!(stabilities(&sub.equilibria(0.0)), vec![Neutral]);
    }

    #[test]
    fn equilibria_are_zeros() {
        for form in NormalForm::ALL {
            for &r in [-2.5, -0.3, 0.0, 0.7, 4.0].iter() {
                for eq in form.equilibria(r) {
                    assert!(form.rhs(r, eq.x).abs() < 1e-12);
                    assert_eq!(eq.slope, form.drhs(r, eq.x));
                }
            }
        }
    }

    #[test]
    fn numerical_matches_analytic() {
        // offset grid so that no sample lands exactly on an equilibrium
        let x: nd::Array1<f64> = nd::Array1::linspace(-5.013, 4.987, 1001);
        for form in NormalForm::ALL {
            for &r in [-4.0, -1.5, 1.5, 4.0].iter() {
                let exact = form.equilibria(r);
                let found = find_equilibria(
                    |r, x| form.rhs(r, x), |r, x| form.drhs(r, x), r, &x,
                ).unwrap();
                assert_eq!(found.len(), exact.len());
                found.iter().zip(&exact)
                    .for_each(|(a, b)| {
                        assert!((a.x - b.x).abs() < 1e-6);
                        assert_eq!(a.stability, b.stability);
                    });
            }
        }
    }

    #[test]
    fn equilibria_on_grid_samples() {
        // spacing 1/80 is exact, so both equilibria of 2x - x² land on samples,
        // one of them the last
        let x: nd::Array1<f64>
            = nd::Array1::from_shape_fn(302, |i| 2.0 - (301 - i) as f64 / 80.0);
        let form = NormalForm::Transcritical;
        let found = find_equilibria(
            |r, x| form.rhs(r, x), |r, x| form.drhs(r, x), 2.0, &x).unwrap();
        assert_eq!(found, form.equilibria(2.0));
        assert_eq!(found[1].x, 2.0);
        assert_eq!(found[1].stability, Stability::Stable);
    }

    #[test]
    fn diagrams_sweep_parameter() {
        let r: nd::Array1<f64> = nd::array![-1.0, 1.0, 4.0];
        let form = NormalForm::SaddleNode;
        let exact = form.diagram(&r);
        assert_eq!(exact.len(), 4);
        assert!(exact.iter().all(|(rk, _)| *rk > 0.0));
        let x: nd::Array1<f64> = nd::Array1::linspace(-3.03, 3.0, 400);
        let found = diagram(
            |r, x| form.rhs(r, x), |r, x| form.drhs(r, x), &r, &x).unwrap();
        assert_eq!(found.len(), 4);
        found.iter().zip(&exact)
            .for_each(|((ra, a), (rb, b))| {
                assert_eq!(ra, rb);
                assert!((a.x - b.x).abs() < 1e-6);
            });
    }

    #[test]
    fn short_grid_rejected() {
        let x: nd::Array1<f64> = nd::array![-1.0, 0.0, 1.0];
        assert!(matches!(
            find_equilibria(|r, x| r - x, |_, _| -1.0, 0.5, &x),
            Err(InterpError::Lagrange(LagrangeError(3))),
        ));
    }
}
