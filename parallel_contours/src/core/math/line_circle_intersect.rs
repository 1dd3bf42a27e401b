use super::Vector2;
use crate::core::traits::Real;

/// Classification of the intersect between a line segment and a circle.
///
/// Values are parametric positions `t` along the segment `p0 + t * (p1 - p0)`. Values outside
/// `[0, 1]` are intersects with the extended line (false intersects), kept so joins can extend
/// segments to meet.
#[derive(Debug, Copy, Clone)]
pub enum LineCircleIntr<T>
where
    T: Real,
{
    NoIntersect,
    /// Line touches the circle at one point.
    TangentIntersect { t0: T },
    /// Line crosses the circle, `t0 <= t1`.
    TwoIntersects { t0: T, t1: T },
}

/// Find the intersects between the line through `p0` and `p1` and the circle of `radius` about
/// `circle_center`.
///
/// A line within `epsilon` of tangent snaps to [LineCircleIntr::TangentIntersect]. A degenerate
/// segment (`p0 == p1`) reports a tangent intersect at `t = 0` if the point is on the circle.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// let p0 = Vector2::new(-2.0, 0.0);
/// let p1 = Vector2::new(2.0, 0.0);
/// match line_circle_intr(p0, p1, 1.0, Vector2::new(0.0, 0.0), 1e-5) {
///     LineCircleIntr::TwoIntersects { t0, t1 } => {
///         assert!(t0.fuzzy_eq(0.25));
///         assert!(t1.fuzzy_eq(0.75));
///     }
///     r => panic!("unexpected result: {:?}", r),
/// }
/// ```
pub fn line_circle_intr<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    radius: T,
    circle_center: Vector2<T>,
    epsilon: T,
) -> LineCircleIntr<T>
where
    T: Real,
{
    use LineCircleIntr::*;

    if p0.fuzzy_eq_eps(p1, epsilon) {
        let dist = (p0 - circle_center).length();
        return if dist.fuzzy_eq_eps(radius, epsilon) {
            TangentIntersect { t0: T::zero() }
        } else {
            NoIntersect
        };
    }

    let dir = p1 - p0;
    let dir_len_sq = dir.length_squared();

    // foot of the perpendicular from the circle center onto the line
    let t_foot = (circle_center - p0).dot(dir) / dir_len_sq;
    let foot = p0 + dir.scale(t_foot);
    let center_dist = (foot - circle_center).length();

    if center_dist > radius + epsilon {
        return NoIntersect;
    }

    if center_dist.fuzzy_eq_eps(radius, epsilon) {
        return TangentIntersect { t0: t_foot };
    }

    // abs guards against a tiny negative from rounding
    let half_chord = (radius * radius - center_dist * center_dist).abs().sqrt();
    let t_half = half_chord / dir_len_sq.sqrt();

    TwoIntersects {
        t0: t_foot - t_half,
        t1: t_foot + t_half,
    }
}
