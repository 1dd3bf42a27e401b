use super::FuzzyOrd;

/// Floating point number type all geometry in the crate is generic over.
///
/// Implemented for `f32` and `f64`, offsetting is tuned for and tested with `f64`.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyOrd
    + std::default::Default
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    #[inline]
    fn pi() -> Self {
        Self::from(std::f64::consts::PI).unwrap()
    }

    #[inline]
    fn tau() -> Self {
        Self::from(std::f64::consts::TAU).unwrap()
    }

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn four() -> Self {
        Self::two() + Self::two()
    }

    #[inline]
    fn min_value() -> Self {
        num_traits::real::Real::min_value()
    }

    #[inline]
    fn max_value() -> Self {
        num_traits::real::Real::max_value()
    }

    /// False for infinities and NaN.
    fn is_finite(self) -> bool;
}

macro_rules! impl_real {
    ($ty:ident) => {
        impl Real for $ty {
            #[inline]
            fn pi() -> Self {
                std::$ty::consts::PI
            }

            #[inline]
            fn tau() -> Self {
                std::$ty::consts::TAU
            }

            #[inline]
            fn two() -> Self {
                2.0
            }

            #[inline]
            fn four() -> Self {
                4.0
            }

            #[inline]
            fn is_finite(self) -> bool {
                $ty::is_finite(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
