//! Miscellaneous tools.

use std::sync::Arc;
use ndarray::{ self as nd, Ix1, concatenate };
use ndarray_linalg::Scalar;
use num_traits::One;
use rustfft::{ self as fft, Fft };
use num_complex::Complex64 as C64;
use crate::Arr2;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    (dx / two) * (y[0] + two * y.slice(nd::s![1..n - 1]).sum() + y[n - 1])
}

/// Integrate over both axes of a regularly sampled two-dimensional array using
/// the trapezoidal rule, where `dx` is the spacing along the second (column)
/// axis and `dy` the spacing along the first (row) axis.
///
/// *Panics if either axis has length less than 2*.
pub fn trapz2<S, A>(y: &Arr2<S>, dx: A, dy: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    let rows: nd::Array1<A>
        = y.rows().into_iter()
        .map(|row| trapz(&row, dx))
        .collect();
    trapz(&rows, dy)
}

/// Calculate the norm of a sampled two-dimensional wavefunction, `∫|ψ|²`.
///
/// *Panics if either axis has length less than 2*.
pub fn wf_norm2<S, A>(q: &Arr2<S>, dx: A::Real) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    let density: nd::Array2<A::Real> = q.mapv(|qk| qk.square());
    trapz2(&density, dx, dx)
}

/// Renormalize a two-dimensional wavefunction in place, returning the norm it
/// had beforehand.
///
/// *Panics if either axis has length less than 2*.
pub fn wf_renormalize2<S, A>(q: &mut Arr2<S>, dx: A::Real)
    -> A::Real
where
    S: nd::DataMut<Elem = A>,
    A: Scalar,
{
    let norm = wf_norm2(q, dx);
    let scale = A::from_real(norm.sqrt());
    q.iter_mut().for_each(|qk| { *qk /= scale; });
    norm
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling time `dt`.
pub fn fft_freq(n: usize, dt: f64) -> nd::Array1<f64> {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    let fp: nd::Array1<f64>
        = (0..m)
        .map(|k| k as f64 / (n as f64 * dt))
        .collect();
    let fm: nd::Array1<f64>
        = (1..n - m + 1).rev()
        .map(|k| -(k as f64) / (n as f64 * dt))
        .collect();
    concatenate!(nd::Axis(0), fp, fm)
}

// run a planned 1D transform over every lane of `a` along `axis`, copying
// through a scratch buffer where the lane is not contiguous
fn process_lanes(
    a: &mut nd::Array2<C64>,
    axis: nd::Axis,
    plan: &dyn Fft<f64>,
    buf: &mut Vec<C64>,
) {
    for mut lane in a.lanes_mut(axis) {
        match lane.as_slice_mut() {
            Some(s) => { plan.process(s); },
            None => {
                buf.clear();
                buf.extend(lane.iter().copied());
                plan.process(buf);
                lane.iter_mut().zip(buf.iter())
                    .for_each(|(lk, bk)| { *lk = *bk; });
            },
        }
    }
}

/// Pre-planned two-dimensional complex FFT for arrays of a fixed shape.
///
/// Plans are created once on construction and reused for every transform.
#[derive(Clone)]
pub struct Fft2 {
    shape: [usize; 2],
    fwd_rows: Arc<dyn Fft<f64>>,
    inv_rows: Arc<dyn Fft<f64>>,
    fwd_cols: Arc<dyn Fft<f64>>,
    inv_cols: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for Fft2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft2").field("shape", &self.shape).finish()
    }
}

impl Fft2 {
    /// Plan transforms for arrays of shape `(n0, n1)`.
    pub fn new(n0: usize, n1: usize) -> Self {
        let mut planner = fft::FftPlanner::new();
        Self {
            shape: [n0, n1],
            fwd_rows: planner.plan_fft_forward(n1),
            inv_rows: planner.plan_fft_inverse(n1),
            fwd_cols: planner.plan_fft_forward(n0),
            inv_cols: planner.plan_fft_inverse(n0),
        }
    }

    /// Array shape the transforms were planned for.
    pub fn shape(&self) -> [usize; 2] { self.shape }

    /// Perform the forward transform in place.
    ///
    /// *Panics if `a` does not have the planned shape.*
    pub fn forward(&self, a: &mut nd::Array2<C64>) {
        assert_eq!(a.shape(), &self.shape[..]);
        let mut buf: Vec<C64> = Vec::with_capacity(self.shape[0]);
        process_lanes(a, nd::Axis(1), self.fwd_rows.as_ref(), &mut buf);
        process_lanes(a, nd::Axis(0), self.fwd_cols.as_ref(), &mut buf);
    }

    /// Perform the (normalized) inverse transform in place.
    ///
    /// *Panics if `a` does not have the planned shape.*
    pub fn inverse(&self, a: &mut nd::Array2<C64>) {
        assert_eq!(a.shape(), &self.shape[..]);
        let mut buf: Vec<C64> = Vec::with_capacity(self.shape[0]);
        process_lanes(a, nd::Axis(1), self.inv_rows.as_ref(), &mut buf);
        process_lanes(a, nd::Axis(0), self.inv_cols.as_ref(), &mut buf);
        let n = (self.shape[0] * self.shape[1]) as f64;
        a.map_inplace(|ak| { *ak /= n; });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapz_integrates_polynomials() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 1001);
        let dx = x[1] - x[0];
        assert!((trapz(&x, dx) - 0.5).abs() < 1e-12);
        let x2 = x.mapv(|xk| xk * xk);
        assert!((trapz(&x2, dx) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn trapz2_integrates_product() {
        let v: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 201);
        let dx = v[1] - v[0];
        let y: nd::Array2<f64>
            = nd::Array2::from_shape_fn((201, 201), |(i, j)| v[i] * v[j]);
        assert!((trapz2(&y, dx, dx) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn fft_freq_layout() {
        let f = fft_freq(4, 0.5);
        assert_eq!(f.to_vec(), vec![0.0, 0.5, -1.0, -0.5]);
        let f = fft_freq(5, 1.0);
        assert_eq!(f.to_vec(), vec![0.0, 0.2, 0.4, -0.4, -0.2]);
    }

    #[test]
    fn fft2_inverts() {
        let plan = Fft2::new(6, 8);
        let a0: nd::Array2<C64>
            = nd::Array2::from_shape_fn((6, 8), |(i, j)| {
                C64::new((i * j) as f64, i as f64 - j as f64)
            });
        let mut a = a0.clone();
        plan.forward(&mut a);
        assert!((a[[0, 0]] - a0.sum()).norm() < 1e-9);
        plan.inverse(&mut a);
        a.iter().zip(a0.iter())
            .for_each(|(ak, a0k)| assert!((ak - a0k).norm() < 1e-9));
    }
}
