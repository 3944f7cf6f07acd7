use core::fmt::Debug;
use num_traits::Float;

/// Trait for the real floating-point types the special functions accept.
///
/// Blanket-implemented for every `Float + Debug` type, i.e. `f32` and `f64`.
/// Algorithms are tuned for `f64`; tables and calibrated constants are stored
/// as `f64` and cast on use.
pub trait FloatScalar: Float + Debug {}

impl<T: Float + Debug> FloatScalar for T {}

/// Cast an `f64` constant into `T`.
///
/// Every `FloatScalar` can represent (or round) any finite `f64`, so the
/// conversion never fails for the literals this crate uses.
#[inline]
pub(crate) fn lit<T: FloatScalar>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}
