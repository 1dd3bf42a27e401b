use super::{base_math::parametric_from_point, Vector2};
use crate::core::traits::Real;

/// Classification of the intersect between two line segments `v1->v2` and `u1->u2`.
///
/// Parametric values follow `P(t) = p0 + t * (p1 - p0)` for each segment.
#[derive(Debug, Copy, Clone)]
pub enum LineLineIntr<T>
where
    T: Real,
{
    /// Parallel and not collinear, or disjoint points/collinear ranges.
    NoIntersect,
    /// Single intersect within both segments.
    TrueIntersect { seg1_t: T, seg2_t: T },
    /// Collinear overlap, given as the covered range along the second segment.
    Overlapping { seg2_t0: T, seg2_t1: T },
    /// The lines cross but at least one segment must be extended to reach the intersect.
    FalseIntersect { seg1_t: T, seg2_t: T },
}

/// Find the intersect between line segments `v1->v2` and `u1->u2`.
///
/// Uses the perp-dot determinant. Near zero determinant is handled as parallel/collinear rather
/// than dividing; degenerate point segments are handled explicitly. Parametric range checks are
/// scaled by segment length so `epsilon` is a distance.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// let v1 = Vector2::new(0.0, 0.0);
/// let v2 = Vector2::new(1.0, 0.0);
/// let u1 = Vector2::new(0.5, -1.0);
/// let u2 = Vector2::new(0.5, 1.0);
/// match line_line_intr(v1, v2, u1, u2, 1e-5) {
///     LineLineIntr::TrueIntersect { seg1_t, seg2_t } => {
///         assert_eq!(seg1_t, 0.5);
///         assert_eq!(seg2_t, 0.5);
///     }
///     r => panic!("unexpected result: {:?}", r),
/// }
///```
pub fn line_line_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> LineLineIntr<T>
where
    T: Real,
{
    use LineLineIntr::*;

    let eps = epsilon;
    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let denom = v.perp_dot(u);

    let seg1_len = v.length();
    let seg2_len = u.length();
    let in_seg1 = |t: T| (t * seg1_len).fuzzy_in_range_eps(T::zero(), seg1_len, eps);
    let in_seg2 = |t: T| (t * seg2_len).fuzzy_in_range_eps(T::zero(), seg2_len, eps);

    if !denom.fuzzy_eq_zero_eps(eps) {
        let seg1_t = u.perp_dot(w) / denom;
        let seg2_t = v.perp_dot(w) / denom;
        if in_seg1(seg1_t) && in_seg2(seg2_t) {
            return TrueIntersect { seg1_t, seg2_t };
        }
        return FalseIntersect { seg1_t, seg2_t };
    }

    // parallel, check collinear
    if !v.perp_dot(w).fuzzy_eq_zero_eps(eps) || !u.perp_dot(w).fuzzy_eq_zero_eps(eps) {
        return NoIntersect;
    }

    let v_is_point = v1.fuzzy_eq_eps(v2, eps);
    let u_is_point = u1.fuzzy_eq_eps(u2, eps);

    match (v_is_point, u_is_point) {
        (true, true) => {
            return if v1.fuzzy_eq_eps(u1, eps) {
                TrueIntersect {
                    seg1_t: T::zero(),
                    seg2_t: T::zero(),
                }
            } else {
                NoIntersect
            };
        }
        (true, false) => {
            let seg2_t = parametric_from_point(u1, u2, v1, eps);
            return if in_seg2(seg2_t) {
                TrueIntersect {
                    seg1_t: T::zero(),
                    seg2_t,
                }
            } else {
                NoIntersect
            };
        }
        (false, true) => {
            let seg1_t = parametric_from_point(v1, v2, u1, eps);
            return if in_seg1(seg1_t) {
                TrueIntersect {
                    seg1_t,
                    seg2_t: T::zero(),
                }
            } else {
                NoIntersect
            };
        }
        (false, false) => {}
    }

    // collinear segments, find range of the first segment along the second
    let v2_rel = v2 - u1;
    let (t_a, t_b) = if u.x.fuzzy_eq_zero_eps(eps) {
        (w.y / u.y, v2_rel.y / u.y)
    } else {
        (w.x / u.x, v2_rel.x / u.x)
    };
    let (t_min, t_max) = super::min_max(t_a, t_b);

    if !(t_min * seg2_len).fuzzy_lt_eps(seg2_len, eps) || !(t_max * seg2_len).fuzzy_gt_eps(T::zero(), eps)
    {
        return NoIntersect;
    }

    let seg2_t0 = num_traits::real::Real::max(t_min, T::zero());
    let seg2_t1 = num_traits::real::Real::min(t_max, T::one());

    if ((seg2_t1 - seg2_t0) * seg2_len).fuzzy_eq_zero_eps(eps) {
        // segments touch end to end
        let seg1_t = if v1.fuzzy_eq_eps(u1, eps) || v1.fuzzy_eq_eps(u2, eps) {
            T::zero()
        } else {
            T::one()
        };

        return TrueIntersect {
            seg1_t,
            seg2_t: seg2_t0,
        };
    }

    Overlapping { seg2_t0, seg2_t1 }
}
