//! Standard normal quantile.

use crate::traits::lit;
use crate::FloatScalar;
use super::erf_fn::erfc;
use super::utils::{p1evl, polevl};

/// Lower edge of the central region of Acklam's rational approximation.
const P_LOW: f64 = 0.02425;

const CENTRAL_NUM: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

const CENTRAL_DEN: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

const TAIL_NUM: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

const TAIL_DEN: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Inverse of the standard normal CDF: x with Φ(x) = p.
///
/// Acklam's rational approximation (relative error ~1e-9) followed by one
/// Halley step against [`erfc`], which brings it to full double precision.
/// Returns −∞ at 0, +∞ at 1 and NaN outside [0, 1].
///
/// Used to seed the incomplete gamma and beta inverters.
///
/// # Example
///
/// ```
/// use distcore::special::ndtri;
///
/// assert_eq!(ndtri(0.5_f64), 0.0);
/// assert!((ndtri(0.975_f64) - 1.959963984540054).abs() < 1e-14);
/// assert_eq!(ndtri(0.0_f64), f64::NEG_INFINITY);
/// ```
pub fn ndtri<T: FloatScalar>(p: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let half: T = lit(0.5);
    let two = one + one;

    if p.is_nan() || p < zero || p > one {
        return T::nan();
    }
    if p == zero {
        return T::neg_infinity();
    }
    if p == one {
        return T::infinity();
    }
    if p == half {
        return zero;
    }

    let p_low: T = lit(P_LOW);
    let x = if p < p_low {
        let q = (-two * p.ln()).sqrt();
        polevl(q, &TAIL_NUM) / p1evl(q, &TAIL_DEN)
    } else if p <= one - p_low {
        let q = p - half;
        let r = q * q;
        polevl(r, &CENTRAL_NUM) * q / p1evl(r, &CENTRAL_DEN)
    } else {
        let q = (-two * (-p).ln_1p()).sqrt();
        -polevl(q, &TAIL_NUM) / p1evl(q, &TAIL_DEN)
    };

    // Halley refinement on Φ(x) − p.
    let e = half * erfc(-x / lit(core::f64::consts::SQRT_2)) - p;
    let u = e * lit::<T>(num_traits::Float::sqrt(core::f64::consts::TAU)) * (x * x / two).exp();
    if !u.is_finite() {
        return x;
    }
    x - u / (one + x * u / two)
}
