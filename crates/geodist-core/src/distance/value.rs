use std::fmt;

use num_traits::{Bounded, Float, NumCast, ToPrimitive, Zero};

use crate::chamfer::{ChamferMask, WeightedOffset};
use crate::error::{GeodistError, Result};

/// Numeric domain of a distance map.
///
/// Real domains use `+inf` for unreached sites and NaN outside the mask, and
/// cannot overflow. Bounded integer domains use the type maximum for both and
/// cap every written distance at [`max_allowed`](Self::max_allowed).
pub trait DistanceValue:
    Copy + PartialOrd + fmt::Debug + fmt::Display + ToPrimitive + Send + Sync + 'static
{
    const TYPE_NAME: &'static str;

    fn zero() -> Self;

    /// Provisional value of a mask site no path has reached yet.
    fn unreached() -> Self;

    /// Value written once to sites outside the mask.
    fn excluded() -> Self;

    /// True if the value is an actual path length.
    fn is_reached(self) -> bool;

    /// Cost of one step along `offset`.
    fn step(offset: &WeightedOffset) -> Self;

    /// Divisor turning chamfer units into axis-step units.
    fn normalization_factor(mask: &ChamferMask) -> Self;

    /// `self + step`; `self` must be reached.
    fn add(self, step: Self) -> Self;

    /// Divide by the normalization factor.
    fn normalize(self, factor: Self) -> Self;

    /// Largest distance that may be written with `mask`, or `None` when the
    /// domain cannot overflow. Fails if the mask weights do not fit the type.
    fn max_allowed(mask: &ChamferMask) -> Result<Option<Self>>;
}

/// Marker for unbounded real-valued domains.
pub trait RealDistance: DistanceValue {}

/// Marker for fixed-width unsigned integer domains.
pub trait BoundedDistance: DistanceValue {}

macro_rules! impl_real_distance {
    ($($t:ty),*) => {$(
        impl DistanceValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn zero() -> Self {
                Zero::zero()
            }

            fn unreached() -> Self {
                Float::infinity()
            }

            fn excluded() -> Self {
                Float::nan()
            }

            fn is_reached(self) -> bool {
                Float::is_finite(self)
            }

            fn step(offset: &WeightedOffset) -> Self {
                offset.weight as $t
            }

            fn normalization_factor(mask: &ChamferMask) -> Self {
                mask.normalization_weight() as $t
            }

            fn add(self, step: Self) -> Self {
                self + step
            }

            fn normalize(self, factor: Self) -> Self {
                self / factor
            }

            fn max_allowed(_mask: &ChamferMask) -> Result<Option<Self>> {
                Ok(None)
            }
        }

        impl RealDistance for $t {}
    )*};
}

macro_rules! impl_bounded_distance {
    ($($t:ty),*) => {$(
        impl DistanceValue for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn zero() -> Self {
                Zero::zero()
            }

            fn unreached() -> Self {
                Bounded::max_value()
            }

            fn excluded() -> Self {
                Bounded::max_value()
            }

            fn is_reached(self) -> bool {
                self != <$t as Bounded>::max_value()
            }

            fn step(offset: &WeightedOffset) -> Self {
                <$t as NumCast>::from(offset.int_weight).unwrap_or(<$t as Bounded>::max_value())
            }

            fn normalization_factor(mask: &ChamferMask) -> Self {
                <$t as NumCast>::from(mask.int_normalization_weight())
                    .unwrap_or(<$t as Bounded>::max_value())
            }

            fn add(self, step: Self) -> Self {
                self + step
            }

            fn normalize(self, factor: Self) -> Self {
                // Rounded division, computed wide so the bias cannot wrap.
                let (v, f) = (self as u64, factor as u64);
                ((v + f / 2) / f) as $t
            }

            fn max_allowed(mask: &ChamferMask) -> Result<Option<Self>> {
                let type_max = <$t as Bounded>::max_value() as u64;
                let max_weight = mask.max_int_weight() as u64;
                match type_max.checked_sub(max_weight + 1) {
                    Some(limit) if limit > 0 => Ok(Some(limit as $t)),
                    _ => Err(GeodistError::InvalidMask(format!(
                        "integer weight {max_weight} leaves no usable range in {}",
                        stringify!($t)
                    ))),
                }
            }
        }

        impl BoundedDistance for $t {}
    )*};
}

impl_real_distance!(f32, f64);
impl_bounded_distance!(u8, u16, u32);
