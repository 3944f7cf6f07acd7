//! Inverse of the regularized incomplete beta function.
//!
//! The search runs as a small state machine over [`Phase`]: an asymptotic
//! seed, bracketed bisection with an adaptive interpolation fraction, and a
//! single round of guarded Newton steps. Targets in the upper half are
//! solved on the mirrored problem I_{1−x}(b, a) = 1 − p and mapped back.

use crate::traits::lit;
use crate::FloatScalar;
use super::{check_probability, SpecialError};
use super::betainc::{betainc, ln_prefix};
use super::ndtri::ndtri;
use super::utils::{MACHEP, MAXLOG, MINLOG};

/// Bisection steps per bracket.
const BISECT_ITER: usize = 100;
/// Newton steps in the refinement round.
const NEWTON_ITER: usize = 8;
/// Bisection-time reflections allowed before the bracket is kept as is.
const MAX_FLIPS: u32 = 4;
/// Reflection during bisection is skipped below this target, where 1 − p
/// would round away the information.
const FLIP_MIN_TARGET: f64 = 1e-3;

/// Inverse of the regularized incomplete beta function.
///
/// Returns x ∈ [0, 1] with I_x(a, b) = p. `p = 0` gives 0 and `p = 1`
/// gives 1. Fails with [`SpecialError::DomainError`] when a ≤ 0, b ≤ 0, or
/// p is NaN or outside [0, 1].
///
/// The iteration is capped; if the cap is reached, or the forward function
/// fails to converge, the best bracketed estimate is returned. Roots closer
/// to 1 than the float spacing there come back as the nearest representable
/// value below 1.
///
/// # Example
///
/// ```
/// use distcore::special::{betainc, betainc_inv};
///
/// // I_x(a, 1) = x^a
/// let x = betainc_inv(3.0_f64, 1.0, 0.3).unwrap();
/// assert!((x - 0.3_f64.cbrt()).abs() < 1e-12);
///
/// let x = betainc_inv(10.0_f64, 50.0, 0.999232).unwrap();
/// assert!((betainc(10.0, 50.0, x).unwrap() - 0.999232).abs() < 1e-10);
/// ```
pub fn betainc_inv<T: FloatScalar>(a: T, b: T, p: T) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();

    if p.is_nan() {
        return Err(SpecialError::DomainError);
    }
    if a.is_nan() || b.is_nan() {
        return Ok(T::nan());
    }
    if a <= zero || b <= zero {
        return Err(SpecialError::DomainError);
    }
    check_probability(p)?;
    if p == zero {
        return Ok(zero);
    }
    if p == one {
        return Ok(one);
    }

    let mut search = Search::new(a, b, p);
    let mut phase = Phase::Seed;
    loop {
        let step = match phase {
            Phase::Seed => search.seed(),
            Phase::Bisect => search.bisect(),
            Phase::Newton => search.newton(),
            Phase::Done => break,
        };
        phase = match step {
            Ok(next) => next,
            // Keep the current point, as when the iteration cap is reached.
            Err(SpecialError::ConvergenceFailure) => Phase::Done,
            Err(e) => return Err(e),
        };
    }
    Ok(search.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seed,
    Bisect,
    Newton,
    Done,
}

/// Working state of one inversion.
///
/// `a`, `b`, `y0` describe the problem currently being solved, which is the
/// caller's or its reflection. The bracket is `[x0, x1]` with
/// I at the ends `yl ≤ y0 ≤ yh`.
#[derive(Debug, Clone, Copy)]
struct Search<T> {
    orig: (T, T, T),
    a: T,
    b: T,
    y0: T,
    reflected: bool,
    flips: u32,
    x0: T,
    yl: T,
    x1: T,
    yh: T,
    x: T,
    y: T,
    dithresh: T,
    newton_done: bool,
}

impl<T: FloatScalar> Search<T> {
    fn new(a: T, b: T, p: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        Self {
            orig: (a, b, p),
            a,
            b,
            y0: p,
            reflected: false,
            flips: 0,
            x0: zero,
            yl: zero,
            x1: one,
            yh: one,
            x: zero,
            y: zero,
            dithresh: zero,
            newton_done: false,
        }
    }

    /// Toggle between the caller's problem and I_{1−x}(b, a) = 1 − p.
    fn reflect(&mut self) {
        let (a, b, p) = self.orig;
        self.reflected = !self.reflected;
        if self.reflected {
            self.a = b;
            self.b = a;
            self.y0 = T::one() - p;
        } else {
            self.a = a;
            self.b = b;
            self.y0 = p;
        }
    }

    fn reset_bracket(&mut self) {
        self.x0 = T::zero();
        self.yl = T::zero();
        self.x1 = T::one();
        self.yh = T::one();
    }

    fn fraction(&self) -> T {
        let span = self.yh - self.yl;
        if span == T::zero() {
            return lit(0.5);
        }
        (self.y0 - self.yl) / span
    }

    fn seed(&mut self) -> Result<Phase, SpecialError> {
        let one = T::one();
        let two = one + one;

        if self.a <= one || self.b <= one {
            self.dithresh = lit(1e-6);
            self.x = self.a / (self.a + self.b);
            self.y = betainc(self.a, self.b, self.x)?;
            return Ok(Phase::Bisect);
        }

        self.dithresh = lit(1e-4);
        let mut yp = -ndtri(self.y0);
        if self.y0 > lit(0.5) {
            self.reflect();
            yp = -yp;
        }
        let (a, b) = (self.a, self.b);

        // Cornish–Fisher style estimate of the normal deviate in logit space.
        let lgm = (yp * yp - lit(3.0)) / lit(6.0);
        let x = two / (one / (two * a - one) + one / (two * b - one));
        let d = yp * (x + lgm).sqrt() / x
            - (one / (two * b - one) - one / (two * a - one))
                * (lgm + lit(5.0 / 6.0) - two / (lit::<T>(3.0) * x));
        let d = two * d;
        if d < lit(MINLOG) {
            self.x = T::zero();
            return Ok(Phase::Done);
        }

        self.x = a / (a + b * d.exp());
        self.y = betainc(a, b, self.x)?;
        if ((self.y - self.y0) / self.y0).abs() < lit(0.2) {
            Ok(Phase::Newton)
        } else {
            Ok(Phase::Bisect)
        }
    }

    fn bisect(&mut self) -> Result<Phase, SpecialError> {
        let zero = T::zero();
        let one = T::one();
        let half: T = lit(0.5);
        let machep: T = lit(MACHEP);

        'restart: loop {
            let mut dir: i32 = 0;
            let mut di = half;

            for i in 0..BISECT_ITER {
                if i != 0 {
                    let mut x = self.x0 + di * (self.x1 - self.x0);
                    if x == one {
                        x = one - machep;
                    }
                    if x == zero {
                        di = half;
                        x = self.x0 + di * (self.x1 - self.x0);
                        if x == zero {
                            self.x = x;
                            return Ok(Phase::Done);
                        }
                    }
                    self.x = x;
                    self.y = betainc(self.a, self.b, x)?;
                    if ((self.x1 - self.x0) / (self.x1 + self.x0)).abs() < self.dithresh {
                        return Ok(Phase::Newton);
                    }
                    if ((self.y - self.y0) / self.y0).abs() < self.dithresh {
                        return Ok(Phase::Newton);
                    }
                }

                let (x, y) = (self.x, self.y);
                if y < self.y0 {
                    self.x0 = x;
                    self.yl = y;
                    di = if dir < 0 {
                        dir = 0;
                        half
                    } else if dir > 3 {
                        one - (one - di) * (one - di)
                    } else if dir > 1 {
                        half * di + half
                    } else {
                        self.fraction()
                    };
                    dir += 1;

                    if self.x0 > lit(0.75)
                        && self.y0 >= lit(FLIP_MIN_TARGET)
                        && self.flips < MAX_FLIPS
                    {
                        self.reflect();
                        self.flips += 1;
                        self.x = one - x;
                        self.y = betainc(self.a, self.b, self.x)?;
                        self.reset_bracket();
                        continue 'restart;
                    }
                } else {
                    self.x1 = x;
                    if self.reflected && self.x1 < machep {
                        self.x = zero;
                        return Ok(Phase::Done);
                    }
                    self.yh = y;
                    di = if dir > 0 {
                        dir = 0;
                        half
                    } else if dir < -3 {
                        di * di
                    } else if dir < -1 {
                        half * di
                    } else {
                        self.fraction()
                    };
                    dir -= 1;
                }
            }

            if self.x0 >= one {
                self.x = one - machep;
                return Ok(Phase::Done);
            }
            if self.x <= zero {
                self.x = zero;
                return Ok(Phase::Done);
            }
            return Ok(Phase::Newton);
        }
    }

    fn newton(&mut self) -> Result<Phase, SpecialError> {
        if self.newton_done {
            return Ok(Phase::Done);
        }
        self.newton_done = true;

        let zero = T::zero();
        let one = T::one();
        let half: T = lit(0.5);
        let (a, b, y0) = (self.a, self.b, self.y0);

        let mut x = self.x;
        let mut y = self.y;
        for i in 0..NEWTON_ITER {
            if i != 0 {
                y = betainc(a, b, x)?;
            }
            if y < self.yl {
                x = self.x0;
                y = self.yl;
            } else if y > self.yh {
                x = self.x1;
                y = self.yh;
            } else if y < y0 {
                self.x0 = x;
                self.yl = y;
            } else {
                self.x1 = x;
                self.yh = y;
            }
            if x == one || x == zero {
                break;
            }

            // ln of the beta density at x
            let log_density = ln_prefix(a, b, x) - x.ln() - (-x).ln_1p();
            if log_density < lit(MINLOG) {
                self.x = x;
                self.y = y;
                return Ok(Phase::Done);
            }
            if log_density > lit(MAXLOG) {
                break;
            }
            let d = (y - y0) / log_density.exp();

            let mut xt = x - d;
            if xt <= self.x0 {
                let w = (x - self.x0) / (self.x1 - self.x0);
                xt = self.x0 + half * w * (x - self.x0);
                if xt <= zero {
                    break;
                }
            }
            if xt >= self.x1 {
                let w = (self.x1 - x) / (self.x1 - self.x0);
                xt = self.x1 - half * w * (self.x1 - x);
                if xt >= one {
                    break;
                }
            }
            x = xt;
            if (d / x).abs() < lit::<T>(128.0) * lit(MACHEP) {
                self.x = x;
                self.y = y;
                return Ok(Phase::Done);
            }
        }

        // Newton stalled; fall back to a tighter bisection from here.
        self.x = x;
        self.y = betainc(a, b, x)?;
        self.dithresh = lit::<T>(256.0) * lit(MACHEP);
        Ok(Phase::Bisect)
    }

    fn finish(&self) -> T {
        if !self.reflected {
            return self.x;
        }
        let machep: T = lit(MACHEP);
        if self.x <= machep {
            T::one() - machep
        } else {
            T::one() - self.x
        }
    }
}
