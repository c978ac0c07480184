//! Functions to find zeros in array-sampled (continuous) functions via Lagrange
//! interpolation.
//!
//! ```
//! use ndarray as nd;
//! use xwave::interp::{ Zero, find_zeros };
//!
//! let x: nd::Array1<f64> = nd::Array::linspace(-5.0, 5.0, 1000);
//! let y = x.mapv(|xk| (xk + 3.0) * (xk - 0.5) * (xk - 2.0));
//! let zeros = find_zeros(&x, &y, Zero::All).unwrap();
//! assert!(
//!     [-3.0, 0.5, 2.0].into_iter()
//!         .zip(zeros)
//!         .all(|(expected, computed)| (computed - expected).abs() < 1e-6)
//! )
//! ```

use std::cmp;
use log::warn;
use ndarray as nd;
use num_traits::Num;
use crate::error::*;

pub type InterpResult<T> = Result<T, InterpError>;

/// Specifies a set of zeros to look for in [`find_zeros`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zero {
    /// Points at which a function changes from positive to negative.
    Falling,
    /// Points at which a function changes from negative to positive.
    Rising,
    /// Either/both of the above.
    All,
}

impl Zero {
    fn matches<A>(&self, a: &A, b: &A) -> bool
    where A: PartialEq + PartialOrd
    {
        match self {
            Self::Falling if a > b => true,
            Self::Rising if a < b => true,
            Self::All if a != b => true,
            _ => false,
        }
    }
}

/// Compute the value of a sampled function via a Lagrange polynomial.
pub fn lagrange<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    x: A,
) -> InterpResult<A>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + Copy
{
    LengthError::check(data_x, data_y)?;
    let res: A
        = data_x.iter().zip(data_y).enumerate()
        .map(|(j, (xj, yj))| {
            let xj = *xj;
            let inner
                = data_x.iter().enumerate()
                .filter(|(m, _)| *m != j)
                .map(|(_, xm)| (x - *xm) / (xj - *xm))
                .fold(A::one(), A::mul);
            *yj * inner
        })
        .fold(A::zero(), A::add);
    Ok(res)
}

/// Compute the value of the derivative of a sampled function via a Lagrange
/// polynomial.
pub fn dlagrange<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    x: A,
) -> InterpResult<A>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + Copy
{
    LengthError::check(data_x, data_y)?;
    let res: A
        = data_x.iter().zip(data_y).enumerate()
        .map(|(j, (xj, yj))| {
            let xj = *xj;
            let inner
                = data_x.iter().enumerate()
                .filter(|(i, _)| *i != j)
                .map(|(i, xi)| {
                    data_x.iter().enumerate()
                        .filter(|(m, _)| *m != j && *m != i)
                        .map(|(_, xm)| (x - *xm) / (xj - *xm))
                        .fold(A::one(), A::mul)
                        / (xj - *xi)
                })
                .fold(A::zero(), A::add);
            *yj * inner
        })
        .fold(A::zero(), A::add);
    Ok(res)
}

// index window of up to four samples around the crossing between samples
// `i` and `i + 1`
fn window(i: usize, n: usize) -> (usize, usize) {
    let il = i.saturating_sub(1);
    let ir = cmp::min(n, i + 3);
    if ir - il < 4 {
        warn!(
            "interp::find_zeros: attempting to interpolate near an edge of \
            the given data; some accuracy may be lost"
        );
    }
    (il, ir)
}

/// Return a list of all zeros of a given kind in a sampled function.
///
/// The function must be locally invertible on the scale of a few grid points.
/// Samples that are exactly zero are returned as-is when their neighbors
/// bracket a crossing of the requested kind.
pub fn find_zeros<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    kind: Zero,
) -> InterpResult<Vec<A>>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + PartialOrd + Copy,
{
    Ok(find_zero_indices(data_x, data_y, kind)?
        .into_iter()
        .map(|(_, x0)| x0)
        .collect())
}

/// Like [`find_zeros`], but also return the index `i` of each zero such that
/// it lies in `data_x[i]..=data_x[i + 1]`.
pub fn find_zero_indices<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    kind: Zero,
) -> InterpResult<Vec<(usize, A)>>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + PartialOrd + Copy,
{
    LengthError::check(data_x, data_y)?;
    LagrangeError::check(data_x)?;
    let n = data_x.len();
    let z = A::zero();
    let mut zeros: Vec<(usize, A)> = Vec::new();
    for i in 0..n - 1 {
        let (yi, yip1) = (data_y[i], data_y[i + 1]);
        if yi == z {
            // exact zeros are reported once, from the sample itself
            let before = if i > 0 { data_y[i - 1] } else { yi };
            if kind.matches(&before, &yip1) {
                zeros.push((i, data_x[i]));
            }
        } else if yip1 != z && yi * yip1 < z && kind.matches(&yi, &yip1) {
            let (il, ir) = window(i, n);
            let x0 = lagrange(
                &data_y.slice(nd::s![il..ir]),
                &data_x.slice(nd::s![il..ir]),
                z,
            )?;
            zeros.push((i, x0));
        }
    }
    // the loop never visits the last sample as `yi`
    if data_y[n - 1] == z && kind.matches(&data_y[n - 2], &z) {
        zeros.push((n - 2, data_x[n - 1]));
    }
    Ok(zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_by_kind() {
        let x: nd::Array1<f64> = nd::Array::linspace(-3.0, 3.0, 601);
        let y = x.mapv(|xk| xk.sin());
        let falling = find_zeros(&x, &y, Zero::Falling).unwrap();
        let rising = find_zeros(&x, &y, Zero::Rising).unwrap();
        assert_eq!(rising.len(), 1);
        assert!(rising[0].abs() < 1e-10);
        assert!(falling.is_empty());
        let y = x.mapv(|xk| (xk + 0.005).cos());
        let falling = find_zeros(&x, &y, Zero::Falling).unwrap();
        let rising = find_zeros(&x, &y, Zero::Rising).unwrap();
        assert_eq!(falling.len(), 1);
        assert_eq!(rising.len(), 1);
        assert!((falling[0] - (std::f64::consts::FRAC_PI_2 - 0.005)).abs() < 1e-8);
        assert!((rising[0] + std::f64::consts::FRAC_PI_2 + 0.005).abs() < 1e-8);
    }

    #[test]
    fn derivative_of_cubic() {
        let x: nd::Array1<f64> = nd::array![0.0, 0.5, 1.0, 1.5];
        let y = x.mapv(|xk| xk.powi(3));
        let d = dlagrange(&x, &y, 0.75).unwrap();
        assert!((d - 3.0 * 0.75_f64.powi(2)).abs() < 1e-12);
    }

    #[test]
    fn zero_on_last_sample() {
        let x: nd::Array1<f64> = nd::array![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0];
        let y = x.mapv(|xk| xk - 1.0);
        assert_eq!(find_zeros(&x, &y, Zero::All).unwrap(), vec![1.0]);
        assert_eq!(find_zeros(&x, &y, Zero::Rising).unwrap(), vec![1.0]);
        assert!(find_zeros(&x, &y, Zero::Falling).unwrap().is_empty());
        assert_eq!(find_zero_indices(&x, &y, Zero::All).unwrap(), vec![(4, 1.0)]);
        // and on the first sample, reported exactly once
        let y = x.mapv(|xk| -(xk + 4.0));
        assert_eq!(find_zeros(&x, &y, Zero::Falling).unwrap(), vec![-4.0]);
    }

    #[test]
    fn short_data_rejected() {
        let x: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0];
        let y: nd::Array1<f64> = nd::array![-1.0, 0.0, 1.0];
        assert!(matches!(
            find_zeros(&x, &y, Zero::All),
            Err(InterpError::Lagrange(LagrangeError(3))),
        ));
    }
}
