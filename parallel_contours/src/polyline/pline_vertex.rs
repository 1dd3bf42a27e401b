use crate::core::{math::Vector2, traits::Real};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polyline vertex: position `x`, `y` and the `bulge` of the segment that starts at it.
///
/// `bulge = tan(sweep_angle / 4)`. Zero is a straight line to the next vertex, positive is a
/// counter clockwise arc and negative is a clockwise arc. Sweep is limited to a half circle so
/// `|bulge| <= 1`.
///
/// See [angle_from_bulge](crate::core::math::angle_from_bulge) and
/// [bulge_from_angle](crate::core::math::bulge_from_angle) for converting to and from sweep
/// angles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[T; 3]", into = "[T; 3]"))]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PlineVertex<T = f64>
where
    T: Copy,
{
    pub x: T,
    pub y: T,
    pub bulge: T,
}

impl<T> From<[T; 3]> for PlineVertex<T>
where
    T: Copy,
{
    #[inline]
    fn from([x, y, bulge]: [T; 3]) -> Self {
        PlineVertex { x, y, bulge }
    }
}

impl<T> From<PlineVertex<T>> for [T; 3]
where
    T: Copy,
{
    #[inline]
    fn from(v: PlineVertex<T>) -> Self {
        [v.x, v.y, v.bulge]
    }
}

impl<T> PlineVertex<T>
where
    T: Real,
{
    #[inline]
    pub fn new(x: T, y: T, bulge: T) -> Self {
        PlineVertex { x, y, bulge }
    }

    /// Construct a vertex from a `[x, y, bulge]` slice, `None` if the slice length is not 3.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Option<Self> {
        match *slice {
            [x, y, bulge] => Some(PlineVertex::new(x, y, bulge)),
            _ => None,
        }
    }

    #[inline]
    pub fn from_vector2(pos: Vector2<T>, bulge: T) -> Self {
        PlineVertex::new(pos.x, pos.y, bulge)
    }

    #[inline]
    pub fn pos(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    /// Copy of this vertex with `bulge` replaced.
    #[inline]
    pub fn with_bulge(&self, bulge: T) -> Self {
        PlineVertex::new(self.x, self.y, bulge)
    }

    /// True if the segment starting at this vertex is a line (`bulge` fuzzy zero).
    #[inline]
    pub fn bulge_is_zero(&self) -> bool {
        self.bulge.fuzzy_eq_zero()
    }

    /// True if the segment starting at this vertex is a counter clockwise arc.
    #[inline]
    pub fn bulge_is_pos(&self) -> bool {
        self.bulge > T::zero()
    }

    /// True if the segment starting at this vertex is a clockwise arc.
    #[inline]
    pub fn bulge_is_neg(&self) -> bool {
        self.bulge < T::zero()
    }

    #[inline]
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon)
            && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
            && self.bulge.fuzzy_eq_eps(other.bulge, fuzzy_epsilon)
    }

    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}
