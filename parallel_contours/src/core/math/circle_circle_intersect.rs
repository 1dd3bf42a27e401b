use super::Vector2;
use crate::core::traits::Real;

/// Classification of the intersect between two circles.
#[derive(Debug, Copy, Clone)]
pub enum CircleCircleIntr<T>
where
    T: Real,
{
    /// Circles are apart, nested, or concentric with different radii.
    NoIntersect,
    /// Circles touch at a single point.
    TangentIntersect { point: Vector2<T> },
    /// Circles cross at two points.
    TwoIntersects {
        point1: Vector2<T>,
        point2: Vector2<T>,
    },
    /// Same center and radius (coincident circles).
    Overlapping,
}

/// Find the intersects between the circle of `radius1` about `center1` and the circle of
/// `radius2` about `center2`.
///
/// Near tangency (within `epsilon`) is reported as [CircleCircleIntr::TangentIntersect].
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// let c1 = Vector2::new(0.0, 0.0);
/// let c2 = Vector2::new(2.0, 0.0);
/// match circle_circle_intr(1.0, c1, 1.0, c2, 1e-5) {
///     CircleCircleIntr::TangentIntersect { point } => assert!(point.fuzzy_eq(Vector2::new(1.0, 0.0))),
///     r => panic!("unexpected result: {:?}", r),
/// }
/// ```
pub fn circle_circle_intr<T>(
    radius1: T,
    center1: Vector2<T>,
    radius2: T,
    center2: Vector2<T>,
    epsilon: T,
) -> CircleCircleIntr<T>
where
    T: Real,
{
    use CircleCircleIntr::*;

    let center_delta = center2 - center1;
    let dist_sq = center_delta.length_squared();
    let dist = dist_sq.sqrt();

    if dist.fuzzy_eq_zero_eps(epsilon) {
        return if radius1.fuzzy_eq_eps(radius2, epsilon) {
            Overlapping
        } else {
            NoIntersect
        };
    }

    if !dist.fuzzy_lt_eps(radius1 + radius2, epsilon)
        || !dist.fuzzy_gt_eps((radius1 - radius2).abs(), epsilon)
    {
        return NoIntersect;
    }

    // distance from center1 along the center line to the chord joining the intersects
    let r1_sq = radius1 * radius1;
    let chord_dist = (r1_sq - radius2 * radius2 + dist_sq) / (T::two() * dist);
    let chord_mid = center1 + center_delta.scale(chord_dist / dist);
    let half_chord_sq = r1_sq - chord_dist * chord_dist;

    if half_chord_sq < T::zero() {
        return TangentIntersect { point: chord_mid };
    }

    let offset = center_delta.perp().scale(half_chord_sq.sqrt() / dist);
    let point1 = chord_mid - offset;
    let point2 = chord_mid + offset;

    if point1.fuzzy_eq_eps(point2, epsilon) {
        return TangentIntersect { point: point1 };
    }

    TwoIntersects { point1, point2 }
}
