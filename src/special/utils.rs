//! Machine constants, polynomial evaluation and log-domain helpers.

use crate::traits::lit;
use crate::FloatScalar;
use super::SpecialError;

/// Unit roundoff of `f64`, 2⁻⁵³.
pub const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// ln(2¹⁰²⁴): `exp` overflows above this.
pub const MAXLOG: f64 = 709.782_712_893_384;

/// ln(2⁻¹⁰⁷⁵): `exp` underflows to zero below this.
pub const MINLOG: f64 = -745.133_219_101_941_2;

/// Spacing between `x` and the next float of larger magnitude.
///
/// `ulp(0)` is the smallest subnormal, `ulp(±∞)` is +∞ and NaN propagates.
///
/// ```
/// use distcore::special::ulp;
///
/// assert_eq!(ulp(1.0_f64), f64::EPSILON);
/// assert_eq!(ulp(-1024.0_f64), 1024.0 * f64::EPSILON);
/// assert!(ulp(0.0_f64) > 0.0);
/// ```
pub fn ulp<T: FloatScalar>(x: T) -> T {
    if x.is_nan() {
        return x;
    }
    let ax = x.abs();
    if ax.is_infinite() {
        return T::infinity();
    }
    if ax < T::min_positive_value() {
        return T::min_positive_value() * T::epsilon();
    }
    // ax = m · 2^e exactly, so ax / m is the power of two 2^e.
    let (mantissa, _, _) = ax.integer_decode();
    ax / lit(mantissa as f64)
}

/// Evaluate a polynomial with coefficients ordered from the highest degree
/// down: `coef[0]·xⁿ + coef[1]·xⁿ⁻¹ + … + coef[n]`.
///
/// An empty slice evaluates to zero.
pub fn polevl<T: FloatScalar>(x: T, coef: &[f64]) -> T {
    coef.iter().fold(T::zero(), |acc, &c| acc * x + lit(c))
}

/// Like [`polevl`] with an implicit leading coefficient of 1:
/// `xⁿ + coef[0]·xⁿ⁻¹ + … + coef[n−1]`.
///
/// ```
/// use distcore::special::{p1evl, polevl};
///
/// let c = [3.0, -2.0];
/// assert_eq!(p1evl(2.0_f64, &c), polevl(2.0_f64, &[1.0, 3.0, -2.0]));
/// ```
pub fn p1evl<T: FloatScalar>(x: T, coef: &[f64]) -> T {
    coef.iter().fold(T::one(), |acc, &c| acc * x + lit(c))
}

/// Evaluate a polynomial with coefficients in ascending order:
/// `coef[0] + coef[1]·x + … + coef[n]·xⁿ`.
pub fn horner<T: FloatScalar>(x: T, coef: &[f64]) -> T {
    coef.iter().rev().fold(T::zero(), |acc, &c| acc * x + lit(c))
}

/// ln(1 + eˣ) without overflow for large x or underflow for very negative x.
///
/// ```
/// use distcore::special::log1pexp;
///
/// assert!((log1pexp(0.0_f64) - 2.0_f64.ln()).abs() < 1e-15);
/// assert_eq!(log1pexp(1000.0_f64), 1000.0);
/// assert!((log1pexp(-800.0_f64)).abs() < 1e-300);
/// ```
pub fn log1pexp<T: FloatScalar>(x: T) -> T {
    if x <= lit(-37.0) {
        x.exp()
    } else if x <= lit(18.0) {
        x.exp().ln_1p()
    } else if x <= lit(33.3) {
        x + (-x).exp()
    } else {
        x
    }
}

/// ln(1 − eˣ) for x ≤ 0.
///
/// Switches between `ln(−expm1(x))` and `ln_1p(−eˣ)` at x = −ln 2 (Mächler
/// 2012). Returns −∞ at 0 and NaN for x > 0.
///
/// ```
/// use distcore::special::log1mexp;
///
/// assert!((log1mexp(-2.0_f64.ln()) - 0.5_f64.ln()).abs() < 1e-15);
/// assert!((log1mexp(-1e-20_f64) - (1e-20_f64).ln()).abs() < 1e-12);
/// ```
pub fn log1mexp<T: FloatScalar>(x: T) -> T {
    let zero = T::zero();
    if x.is_nan() || x > zero {
        return T::nan();
    }
    if x == zero {
        return T::neg_infinity();
    }
    if x > -lit::<T>(core::f64::consts::LN_2) {
        (-x.exp_m1()).ln()
    } else {
        (-x.exp()).ln_1p()
    }
}

/// ln(1 + x) − x, accurate when the two terms nearly cancel.
///
/// Uses the alternating series for |x| < 1/2 and the direct difference
/// elsewhere. Returns −∞ at x = −1 and NaN below.
///
/// ```
/// use distcore::special::log1pmx;
///
/// // −x²/2 + x³/3 − …
/// let x = 1e-5_f64;
/// assert!((log1pmx(x) - (-x * x / 2.0 + x * x * x / 3.0)).abs() < 1e-20);
/// assert!((log1pmx(1.0_f64) - (2.0_f64.ln() - 1.0)).abs() < 1e-15);
/// ```
pub fn log1pmx<T: FloatScalar>(x: T) -> T {
    let half: T = lit(0.5);
    if x.is_nan() || x.abs() >= half {
        return x.ln_1p() - x;
    }
    if x == T::zero() {
        return x;
    }
    let eps = T::epsilon();
    let mut pow = x;
    let mut k = T::one();
    let mut sum = T::zero();
    // Terms shrink at least by half each step, so this ends well inside 64.
    for _ in 0..64 {
        pow = -pow * x;
        k = k + T::one();
        let term = pow / k;
        sum = sum + term;
        if term.abs() <= sum.abs() * eps {
            break;
        }
    }
    sum
}

/// Tsallis q-exponential: (1 + (1 − q)·x)^{1/(1−q)} where the base is
/// positive, 0 otherwise, and eˣ at q = 1.
///
/// ```
/// use distcore::special::expq;
///
/// assert_eq!(expq(0.7_f64, 1.0), 0.7_f64.exp());
/// // q = 0: 1 + x
/// assert!((expq(0.5_f64, 0.0) - 1.5).abs() < 1e-15);
/// assert_eq!(expq(-3.0_f64, 0.5), 0.0);
/// ```
pub fn expq<T: FloatScalar>(x: T, q: T) -> T {
    let one = T::one();
    if q == one {
        return x.exp();
    }
    let base = one + (one - q) * x;
    if base > T::zero() {
        base.powf(one / (one - q))
    } else {
        T::zero()
    }
}

/// Tsallis q-logarithm: (x^{1−q} − 1)/(1 − q) for x > 0, ln x at q = 1.
///
/// The inverse of [`expq`] on its range. NaN for x ≤ 0.
///
/// ```
/// use distcore::special::{expq, logq};
///
/// assert!((logq(2.0_f64, 2.0) - 0.5).abs() < 1e-15);
/// let x = logq(3.0_f64, 0.4);
/// assert!((expq(x, 0.4) - 3.0).abs() < 1e-14);
/// ```
pub fn logq<T: FloatScalar>(x: T, q: T) -> T {
    let one = T::one();
    if !(x > T::zero()) {
        return T::nan();
    }
    if q == one {
        return x.ln();
    }
    (x.powf(one - q) - one) / (one - q)
}

/// Map `val` into the interval from `min` to `max`.
///
/// With `mirror == false` the interval is treated as periodic and the
/// result lies in `[min, max)`. With `mirror == true` values are reflected
/// at the bounds, so the result traces a triangle wave in `[min, max]`.
/// Fails with [`SpecialError::DomainError`] unless `min < max`.
///
/// ```
/// use distcore::special::wrap_range;
///
/// let pi = core::f64::consts::PI;
/// let w = wrap_range(3.0 * pi / 2.0, -pi, pi, false).unwrap();
/// assert!((w + pi / 2.0).abs() < 1e-12);
///
/// // Reflected back from the upper bound.
/// assert!((wrap_range(12.0_f64, 0.0, 10.0, true).unwrap() - 8.0).abs() < 1e-12);
/// ```
pub fn wrap_range<T: FloatScalar>(val: T, min: T, max: T, mirror: bool) -> Result<T, SpecialError> {
    if !(min < max) {
        return Err(SpecialError::DomainError);
    }
    if !mirror {
        return Ok(wrap_periodic(val, min, max));
    }
    let pi: T = lit(core::f64::consts::PI);
    let spread = max - min;
    let mid = min + spread * lit(0.5);
    let x = ((val - mid) * pi / spread).sin().asin();
    Ok(x * spread / pi + mid)
}

/// Periodic wrap into `[min, max)`; values already inside are returned
/// unchanged. Callers guarantee `min < max`.
pub(crate) fn wrap_periodic<T: FloatScalar>(val: T, min: T, max: T) -> T {
    if val >= min && val < max {
        return val;
    }
    let a = val - min;
    let m = max - min;
    a - m * (a / m).floor() + min
}
