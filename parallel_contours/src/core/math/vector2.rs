use crate::core::traits::Real;
use std::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector (or point) value type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Vector2 { x, y }
    }

    #[inline]
    pub fn zero() -> Self {
        Vector2::new(T::zero(), T::zero())
    }

    /// Uniformly scale both components by `scale_factor`.
    #[inline]
    pub fn scale(&self, scale_factor: T) -> Self {
        vec2(scale_factor * self.x, scale_factor * self.y)
    }

    #[inline]
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (`self.x * other.y - self.y * other.x`), positive if `other` is counter
    /// clockwise from `self`.
    #[inline]
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit length vector in the same direction. Zero length input gives NaN components.
    #[inline]
    pub fn normalize(&self) -> Self {
        self.scale(T::one() / self.length())
    }

    /// Component wise fuzzy equality using `fuzzy_epsilon`.
    #[inline]
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Vector rotated 90 degrees counter clockwise, `(-y, x)`.
    #[inline]
    pub fn perp(&self) -> Self {
        vec2(-self.y, self.x)
    }

    /// Unit length [Vector2::perp]. Offsetting a segment by a positive distance moves it along
    /// this direction (to the left of travel).
    #[inline]
    pub fn unit_perp(&self) -> Self {
        self.perp().normalize()
    }

    /// Rotate this point counter clockwise about `origin` by `angle` radians.
    pub fn rotate_about(&self, origin: Self, angle: T) -> Self {
        let rel = self - origin;
        let (s, c) = angle.sin_cos();
        vec2(rel.x * c - rel.y * s, rel.x * s + rel.y * c) + origin
    }
}

/// Shorthand for [Vector2::new].
#[inline(always)]
pub fn vec2<T>(x: T, y: T) -> Vector2<T>
where
    T: Real,
{
    Vector2::new(x, y)
}

macro_rules! impl_binary_op {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            #[inline]
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<&Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            #[inline]
            fn $op_func(self, rhs: &Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<&Vector2<T>> for &Vector2<T> {
            type Output = Vector2<T>;
            #[inline]
            fn $op_func(self, rhs: &Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<Vector2<T>> for &Vector2<T> {
            type Output = Vector2<T>;
            #[inline]
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

impl_binary_op!(Add, add, +);
impl_binary_op!(Sub, sub, -);

impl<T: Real> ops::Neg for Vector2<T> {
    type Output = Vector2<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}

impl<T: Real> ops::Neg for &Vector2<T> {
    type Output = Vector2<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn add_sub_neg_by_value_and_ref() {
        let a = vec2(4.0, 5.0);
        let b = vec2(1.0, 2.0);
        assert!((a + b).fuzzy_eq(vec2(5.0, 7.0)));
        assert!((&a + &b).fuzzy_eq(vec2(5.0, 7.0)));
        assert!((a - &b).fuzzy_eq(vec2(3.0, 3.0)));
        assert!((&a - b).fuzzy_eq(vec2(3.0, 3.0)));
        assert!((-a).fuzzy_eq(vec2(-4.0, -5.0)));
        assert!((-&b).fuzzy_eq(vec2(-1.0, -2.0)));
    }

    #[test]
    fn perp_is_left_of_direction() {
        let dir = vec2(3.0, 0.0);
        assert!(dir.unit_perp().fuzzy_eq(vec2(0.0, 1.0)));
        assert!(dir.perp_dot(dir.perp()) > 0.0);
        assert!(dir.dot(dir.perp()).fuzzy_eq_zero());
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = vec2(2.0, 1.0);
        let r = p.rotate_about(vec2(1.0, 1.0), FRAC_PI_2);
        assert!(r.fuzzy_eq(vec2(1.0, 2.0)));
    }

    #[test]
    fn length_and_normalize() {
        let v = vec2(3.0, 4.0);
        assert!(v.length().fuzzy_eq(5.0));
        assert!(v.length_squared().fuzzy_eq(25.0));
        assert!(v.normalize().length().fuzzy_eq(1.0));
    }
}
