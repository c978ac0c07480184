//! Uniform one-dimensional grids with periodic boundary conditions.
//!
//! A grid of `N` points spans `[xmin, xmax]` inclusively; the final point is
//! identified with the first, leaving `N - 1` independent samples. Arrays
//! sampled on a grid are expected to keep `a[N - 1] == a[0]`, which
//! [`Grid::enforce_periodic`] restores after any update.
//!
//! ```
//! use xwave::grid::Grid;
//!
//! let grid = Grid::new(0.0, 1.0, 5).unwrap();
//! assert_eq!(grid.dx(), 0.25);
//! assert_eq!(grid.x().to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! assert!(Grid::new(0.0, 1.0, 1).is_err());
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::{ GridError, LengthError },
};

pub type GridResult<T> = Result<T, GridError>;

/// Offsets and weights of the three-point second difference.
pub const LAPLACIAN: [(isize, f64); 3] = [(-1, 1.0), (0, -2.0), (1, 1.0)];

/// Offsets and weights of the five-point fourth difference used for
/// Kreiss-Oliger dissipation.
pub const DISSIPATION: [(isize, f64); 5]
    = [(-2, 1.0), (-1, -4.0), (0, 6.0), (1, -4.0), (2, 1.0)];

/// A uniform, periodic, one-dimensional spatial grid.
///
/// Immutable after construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    xmin: f64,
    xmax: f64,
    n: usize,
    dx: f64,
}

impl Grid {
    /// Create a new grid of `n` points over `[xmin, xmax]`.
    ///
    /// Fails if `n <= 1` or `xmin >= xmax`.
    pub fn new(xmin: f64, xmax: f64, n: usize) -> GridResult<Self> {
        GridError::check_points(n)?;
        GridError::check_bounds(xmin, xmax)?;
        let dx = (xmax - xmin) / (n - 1) as f64;
        Ok(Self { xmin, xmax, n, dx })
    }

    /// Lower domain bound.
    pub fn xmin(&self) -> f64 { self.xmin }

    /// Upper domain bound.
    pub fn xmax(&self) -> f64 { self.xmax }

    /// Number of grid points, including the periodic image of the first.
    pub fn len(&self) -> usize { self.n }

    /// Always `false`; grids have at least two points.
    pub fn is_empty(&self) -> bool { false }

    /// Number of independent points, `len() - 1`.
    pub fn periodic_len(&self) -> usize { self.n - 1 }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Domain length, `xmax - xmin`.
    pub fn length(&self) -> f64 { self.xmax - self.xmin }

    /// Coordinate of the `i`-th point.
    pub fn coord(&self, i: usize) -> f64 { self.xmin + i as f64 * self.dx }

    /// Generate the array of coordinates.
    pub fn x(&self) -> nd::Array1<f64> {
        nd::Array1::from_shape_fn(self.n, |i| self.coord(i))
    }

    /// Overwrite the last sample of `a` with the first.
    ///
    /// *Panics if `a` is empty.*
    pub fn enforce_periodic<S>(a: &mut Arr1<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = a.len();
        a[n - 1] = a[0];
    }

    /// Check that `a` has one sample per grid point.
    pub fn check_len<S>(&self, a: &Arr1<S>) -> Result<(), LengthError>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check_len(a, self.n)
    }

    // neighbor indices over the independent points
    pub(crate) fn wrap(&self, i: usize, offs: isize) -> usize {
        let m = self.periodic_len() as isize;
        (i as isize + offs).rem_euclid(m) as usize
    }

    // apply `scale * stencil` to the independent points of `u`, wrapping around
    // the domain boundaries
    fn apply_stencil_into<S, T>(
        &self,
        stencil: &[(isize, f64)],
        scale: f64,
        u: &Arr1<S>,
        out: &mut Arr1<T>,
    )
    where
        S: nd::Data<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
    {
        for i in 0..self.periodic_len() {
            out[i] = scale * stencil.iter()
                .map(|(offs, w)| w * u[self.wrap(i, *offs)])
                .sum::<f64>();
        }
        Self::enforce_periodic(out);
    }

    /// Assemble the dense `(N - 1) x (N - 1)` matrix of `scale * stencil` acting
    /// on the independent points.
    pub(crate) fn stencil_matrix(&self, stencil: &[(isize, f64)], scale: f64)
        -> nd::Array2<f64>
    {
        let m = self.periodic_len();
        let mut A: nd::Array2<f64> = nd::Array2::zeros((m, m));
        for i in 0..m {
            for (offs, w) in stencil.iter() {
                A[[i, self.wrap(i, *offs)]] += scale * w;
            }
        }
        A
    }

    /// Scale factor for [`LAPLACIAN`] on this grid.
    pub(crate) fn laplacian_scale(&self) -> f64 { self.dx.powi(2).recip() }

    /// Scale factor for [`DISSIPATION`] on this grid.
    pub(crate) fn dissipation_scale(&self, eps: f64) -> f64 {
        -eps / (16.0 * self.dx)
    }

    /// Compute the centered second difference `(u[i+1] - 2u[i] + u[i-1])/dx²`
    /// of `u` into `out`, wrapping around the domain boundaries.
    ///
    /// *Panics if either array does not have one sample per grid point.*
    pub fn laplacian_into<S, T>(&self, u: &Arr1<S>, out: &mut Arr1<T>)
    where
        S: nd::Data<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
    {
        self.apply_stencil_into(&LAPLACIAN, self.laplacian_scale(), u, out);
    }

    /// Like [`Self::laplacian_into`], but allocate the output.
    pub fn laplacian<S>(&self, u: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let mut out: nd::Array1<f64> = nd::Array1::zeros(self.n);
        self.laplacian_into(u, &mut out);
        out
    }

    /// Compute fourth-order Kreiss-Oliger dissipation
    /// `-eps/(16 dx) (u[i+2] - 4u[i+1] + 6u[i] - 4u[i-1] + u[i-2])` of `u` into
    /// `out`, wrapping around the domain boundaries.
    ///
    /// *Panics if either array does not have one sample per grid point.*
    pub fn dissipation_into<S, T>(&self, eps: f64, u: &Arr1<S>, out: &mut Arr1<T>)
    where
        S: nd::Data<Elem = f64>,
        T: nd::DataMut<Elem = f64>,
    {
        if eps == 0.0 {
            out.fill(0.0);
            return;
        }
        self.apply_stencil_into(
            &DISSIPATION, self.dissipation_scale(eps), u, out);
    }

    /// Forward difference `(u[i+1] - u[i])/dx` over the independent points.
    ///
    /// Assumes `u` is periodic.
    pub fn forward_diff<S>(&self, u: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        (0..self.periodic_len())
            .map(|i| (u[i + 1] - u[i]) / self.dx)
            .collect()
    }

    /// Sum over the independent points times `dx`; the rectangle rule, which is
    /// the natural quadrature on a periodic domain.
    pub fn integrate<S>(&self, u: &Arr1<S>) -> f64
    where S: nd::Data<Elem = f64>
    {
        u.iter().take(self.periodic_len()).sum::<f64>() * self.dx
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use super::*;

    #[test]
    fn spacing_matches_formula() {
        for n in 2..50 {
            let grid = Grid::new(-1.5, 2.0, n).unwrap();
            assert_eq!(grid.dx(), (2.0 - -1.5) / (n - 1) as f64);
            assert_eq!(grid.len(), n);
            assert_eq!(grid.x().len(), n);
        }
    }

    #[test]
    fn invalid_configuration() {
        assert!(matches!(Grid::new(0.0, 1.0, 1), Err(GridError::TooFewPoints(1))));
        assert!(matches!(Grid::new(0.0, 1.0, 0), Err(GridError::TooFewPoints(0))));
        assert!(matches!(Grid::new(1.0, 1.0, 10), Err(GridError::BadBounds(..))));
    }

    #[test]
    fn periodic_laplacian_of_sine() {
        let grid = Grid::new(0.0, 1.0, 201).unwrap();
        let u = grid.x().mapv(|x| (TAU * x).sin());
        let lu = grid.laplacian(&u);
        let expected = u.mapv(|uk| -TAU.powi(2) * uk);
        lu.iter().zip(&expected)
            .for_each(|(a, b)| assert!((a - b).abs() < 1e-2));
        assert_eq!(lu[200], lu[0]);
    }

    #[test]
    fn two_point_grid_is_constant() {
        let grid = Grid::new(0.0, 1.0, 2).unwrap();
        let u = nd::array![3.0, 3.0];
        assert_eq!(grid.laplacian(&u).to_vec(), vec![0.0, 0.0]);
        let mut q: nd::Array1<f64> = nd::Array1::zeros(2);
        grid.dissipation_into(0.5, &u, &mut q);
        assert_eq!(q.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn dissipation_kills_sawtooth() {
        let grid = Grid::new(0.0, 1.0, 9).unwrap();
        let mut u: nd::Array1<f64>
            = nd::Array1::from_shape_fn(9, |i| if i % 2 == 0 { 1.0 } else { -1.0 });
        Grid::enforce_periodic(&mut u);
        let mut q: nd::Array1<f64> = nd::Array1::zeros(9);
        grid.dissipation_into(1.0, &u, &mut q);
        // the highest mode is an eigenvector with eigenvalue -16 eps/(16 dx)
        q.iter().zip(&u)
            .for_each(|(qk, uk)| assert!((qk + uk / grid.dx()).abs() < 1e-12));
    }
}
