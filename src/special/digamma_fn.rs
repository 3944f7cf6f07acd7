//! Digamma (psi) function and real-argument harmonic numbers.

use crate::traits::lit;
use crate::FloatScalar;

/// Euler–Mascheroni constant γ.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// B_{2k}/(2k) for k = 1..7, the coefficients of the asymptotic expansion
/// ψ(x) ≈ ln(x) − 1/(2x) − Σ B_{2k}/(2k · x^{2k}).
const DIGAMMA_ASYMP: [f64; 7] = [
    1.0 / 12.0,
    -1.0 / 120.0,
    1.0 / 252.0,
    -1.0 / 240.0,
    1.0 / 132.0,
    -691.0 / 32760.0,
    1.0 / 12.0,
];

/// Digamma function ψ(x) = d/dx ln Γ(x).
///
/// Shifts x above 6 with ψ(x+1) = ψ(x) + 1/x, then applies the asymptotic
/// expansion. Negative x goes through ψ(x) = ψ(1−x) − π/tan(πx).
/// Poles at 0, −1, −2, … return NaN.
///
/// # Example
///
/// ```
/// use distcore::special::digamma;
///
/// let euler_mascheroni = 0.5772156649015329_f64;
/// assert!((digamma(1.0_f64) + euler_mascheroni).abs() < 1e-12);
/// ```
pub fn digamma<T: FloatScalar>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();

    if x.is_nan() {
        return x;
    }
    if x <= zero && x == x.floor() {
        return T::nan();
    }

    if x < zero {
        let pi: T = lit(core::f64::consts::PI);
        return digamma(one - x) - pi / (pi * x).tan();
    }

    let mut result = zero;
    let mut xx = x;
    let threshold: T = lit(6.0);
    while xx < threshold {
        result = result - one / xx;
        xx = xx + one;
    }

    result = result + xx.ln() - lit::<T>(0.5) / xx;

    let inv_x2 = one / (xx * xx);
    let mut term = inv_x2;
    for &c in &DIGAMMA_ASYMP {
        result = result - lit::<T>(c) * term;
        term = term * inv_x2;
    }

    result
}

/// Harmonic number H(x) = ψ(x + 1) + γ, extended to real x.
///
/// Integers 0..=25 are summed directly as 1 + 1/2 + … + 1/n; other
/// arguments go through digamma.
///
/// ```
/// use distcore::special::harmonic;
///
/// assert_eq!(harmonic(0.0_f64), 0.0);
/// assert!((harmonic(4.0_f64) - 25.0 / 12.0).abs() < 1e-15);
/// // H(1/2) = 2 − 2 ln 2
/// assert!((harmonic(0.5_f64) - (2.0 - 2.0 * 2.0_f64.ln())).abs() < 1e-13);
/// ```
pub fn harmonic<T: FloatScalar>(x: T) -> T {
    if x >= T::zero() && x <= lit(25.0) && x == x.floor() {
        if let Some(n) = num_traits::cast::<T, u32>(x) {
            return (1..=n).fold(T::zero(), |h, k| h + T::one() / lit(k as f64));
        }
    }
    digamma(x + T::one()) + lit(EULER_GAMMA)
}
