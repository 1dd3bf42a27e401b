use super::{pline_seg::seg_arc_radius_and_center, PlineVertex};
use crate::core::{
    math::{
        angle, angle_from_bulge, angle_is_within_sweep_eps, circle_circle_intr, delta_angle,
        dist_squared, line_circle_intr, line_line_intr, normalize_radians, point_from_parametric,
        point_within_arc_sweep, CircleCircleIntr, LineCircleIntr, LineLineIntr, Vector2,
    },
    traits::Real,
};

/// Intersect classification between two polyline segments `v1->v2` and `u1->u2`.
///
/// Where two points are returned they are ordered along the direction of the second segment
/// (`u1->u2`).
#[derive(Debug, Copy, Clone)]
pub enum PlineSegIntr<T>
where
    T: Real,
{
    NoIntersect,
    /// Segments touch at a single tangent point.
    TangentIntersect { point: Vector2<T> },
    /// Segments cross at a single point.
    OneIntersect { point: Vector2<T> },
    TwoIntersects {
        point1: Vector2<T>,
        point2: Vector2<T>,
    },
    /// Collinear line segments sharing a range from `point1` to `point2`.
    OverlappingLines {
        point1: Vector2<T>,
        point2: Vector2<T>,
    },
    /// Co-circular arc segments sharing an arc from `point1` to `point2`.
    OverlappingArcs {
        point1: Vector2<T>,
        point2: Vector2<T>,
    },
}

/// Segment type pair used to pick the intersect routine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SegPairKind {
    LineLine,
    LineArc,
    ArcLine,
    ArcArc,
}

impl SegPairKind {
    #[inline]
    fn of<T: Real>(v1: PlineVertex<T>, u1: PlineVertex<T>) -> Self {
        match (v1.bulge_is_zero(), u1.bulge_is_zero()) {
            (true, true) => SegPairKind::LineLine,
            (true, false) => SegPairKind::LineArc,
            (false, true) => SegPairKind::ArcLine,
            (false, false) => SegPairKind::ArcArc,
        }
    }
}

/// Find the intersects between the polyline segments `v1->v2` and `u1->u2`.
///
/// `epsilon` is the distance tolerance used for tangency, overlap and end point checks. The result
/// does not depend on argument order beyond the ordering of returned points.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::polyline::*;
/// // horizontal line through a counter clockwise half circle
/// let v1 = PlineVertex::new(-1.0, -0.5, 0.0);
/// let v2 = PlineVertex::new(3.0, -0.5, 0.0);
/// let u1 = PlineVertex::new(0.0, 0.0, 1.0);
/// let u2 = PlineVertex::new(2.0, 0.0, 0.0);
/// match pline_seg_intr(v1, v2, u1, u2, 1e-5) {
///     PlineSegIntr::TwoIntersects { point1, point2 } => {
///         assert!(point1.y == -0.5 && point2.y == -0.5);
///         assert!(point1.x < point2.x);
///     }
///     r => panic!("unexpected result: {:?}", r),
/// }
/// ```
pub fn pline_seg_intr<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    u1: PlineVertex<T>,
    u2: PlineVertex<T>,
    epsilon: T,
) -> PlineSegIntr<T>
where
    T: Real,
{
    match SegPairKind::of(v1, u1) {
        SegPairKind::LineLine => line_line_seg_intr(v1, v2, u1, u2, epsilon),
        SegPairKind::LineArc => line_arc_seg_intr(v1.pos(), v2.pos(), u1, u2, true, epsilon),
        SegPairKind::ArcLine => line_arc_seg_intr(u1.pos(), u2.pos(), v1, v2, false, epsilon),
        SegPairKind::ArcArc => arc_arc_seg_intr(v1, v2, u1, u2, epsilon),
    }
}

fn line_line_seg_intr<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    u1: PlineVertex<T>,
    u2: PlineVertex<T>,
    epsilon: T,
) -> PlineSegIntr<T>
where
    T: Real,
{
    match line_line_intr(v1.pos(), v2.pos(), u1.pos(), u2.pos(), epsilon) {
        LineLineIntr::NoIntersect | LineLineIntr::FalseIntersect { .. } => PlineSegIntr::NoIntersect,
        LineLineIntr::TrueIntersect { seg1_t, .. } => PlineSegIntr::OneIntersect {
            point: point_from_parametric(v1.pos(), v2.pos(), seg1_t),
        },
        LineLineIntr::Overlapping { seg2_t0, seg2_t1 } => PlineSegIntr::OverlappingLines {
            point1: point_from_parametric(u1.pos(), u2.pos(), seg2_t0),
            point2: point_from_parametric(u1.pos(), u2.pos(), seg2_t1),
        },
    }
}

/// Line `p0->p1` against arc `a1->a2`. `arc_is_second` is true when the arc is the `u` segment
/// (points are then ordered along the arc), otherwise they are ordered along the line.
fn line_arc_seg_intr<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    a1: PlineVertex<T>,
    a2: PlineVertex<T>,
    arc_is_second: bool,
    epsilon: T,
) -> PlineSegIntr<T>
where
    T: Real,
{
    use PlineSegIntr::*;

    let (radius, center) = seg_arc_radius_and_center(a1, a2);
    let line_len = (p1 - p0).length();

    let on_both = |t: T| -> Option<Vector2<T>> {
        // parametric range check scaled by length so epsilon is a distance
        let in_line = if line_len.fuzzy_eq_zero_eps(epsilon) {
            t.fuzzy_eq_zero_eps(epsilon)
        } else {
            (t * line_len).fuzzy_in_range_eps(T::zero(), line_len, epsilon)
        };
        if !in_line {
            return None;
        }

        let p = point_from_parametric(p0, p1, t);
        point_within_arc_sweep(center, a1.pos(), a2.pos(), a1.bulge_is_neg(), p).then_some(p)
    };

    match line_circle_intr(p0, p1, radius, center, epsilon) {
        LineCircleIntr::NoIntersect => NoIntersect,
        LineCircleIntr::TangentIntersect { t0 } => match on_both(t0) {
            Some(point) => TangentIntersect { point },
            None => NoIntersect,
        },
        LineCircleIntr::TwoIntersects { t0, t1 } => match (on_both(t0), on_both(t1)) {
            (None, None) => NoIntersect,
            (Some(point), None) | (None, Some(point)) => OneIntersect { point },
            (Some(point1), Some(point2)) => {
                // t0 < t1 so points are already ordered along the line
                if !arc_is_second
                    || dist_squared(point1, a1.pos()) < dist_squared(point2, a1.pos())
                {
                    TwoIntersects { point1, point2 }
                } else {
                    TwoIntersects {
                        point1: point2,
                        point2: point1,
                    }
                }
            }
        },
    }
}

fn arc_arc_seg_intr<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    u1: PlineVertex<T>,
    u2: PlineVertex<T>,
    epsilon: T,
) -> PlineSegIntr<T>
where
    T: Real,
{
    use PlineSegIntr::*;

    let (r1, c1) = seg_arc_radius_and_center(v1, v2);
    let (r2, c2) = seg_arc_radius_and_center(u1, u2);

    let in_both_sweeps = |p: Vector2<T>| {
        point_within_arc_sweep(c1, v1.pos(), v2.pos(), v1.bulge_is_neg(), p)
            && point_within_arc_sweep(c2, u1.pos(), u2.pos(), u1.bulge_is_neg(), p)
    };

    match circle_circle_intr(r1, c1, r2, c2, epsilon) {
        CircleCircleIntr::NoIntersect => NoIntersect,
        CircleCircleIntr::TangentIntersect { point } => {
            if in_both_sweeps(point) {
                TangentIntersect { point }
            } else {
                NoIntersect
            }
        }
        CircleCircleIntr::TwoIntersects { point1, point2 } => {
            match (in_both_sweeps(point1), in_both_sweeps(point2)) {
                (true, true) => TwoIntersects { point1, point2 },
                (true, false) => OneIntersect { point: point1 },
                (false, true) => OneIntersect { point: point2 },
                (false, false) => NoIntersect,
            }
        }
        CircleCircleIntr::Overlapping => co_circular_arcs_intr(v1, v2, u1, u2, c1, r1, epsilon),
    }
}

/// Arcs `v1->v2` and `u1->u2` lie on the same circle, find how their sweeps share it.
fn co_circular_arcs_intr<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    u1: PlineVertex<T>,
    u2: PlineVertex<T>,
    center: Vector2<T>,
    radius: T,
    epsilon: T,
) -> PlineSegIntr<T>
where
    T: Real,
{
    use PlineSegIntr::*;

    // compare sweeps going the same direction by flipping the second arc when needed
    let same_direction = v1.bulge_is_neg() == u1.bulge_is_neg();
    let arc1_start = normalize_radians(angle(center, v1.pos()));
    let arc1_sweep = angle_from_bulge(v1.bulge);
    let (arc2_start, arc2_sweep) = if same_direction {
        (normalize_radians(angle(center, u1.pos())), angle_from_bulge(u1.bulge))
    } else {
        (normalize_radians(angle(center, u2.pos())), -angle_from_bulge(u1.bulge))
    };
    let arc1_end = arc1_start + arc1_sweep;
    let arc2_end = arc2_start + arc2_sweep;

    // angular tolerance equivalent to epsilon along the circle
    let angle_eps = epsilon / radius;
    let in_arc1 = |a: T| angle_is_within_sweep_eps(a, arc1_start, arc1_sweep, angle_eps);
    let in_arc2 = |a: T| angle_is_within_sweep_eps(a, arc2_start, arc2_sweep, angle_eps);

    let arc1_start_touches_arc2_end = delta_angle(arc1_start, arc2_end).fuzzy_eq_zero_eps(angle_eps);
    let arc2_start_touches_arc1_end = delta_angle(arc2_start, arc1_end).fuzzy_eq_zero_eps(angle_eps);

    // when the second arc was flipped its u1/u2 roles swap in the comparisons below
    let (arc2_first, arc2_last) = if same_direction {
        (u1.pos(), u2.pos())
    } else {
        (u2.pos(), u1.pos())
    };

    match (arc1_start_touches_arc2_end, arc2_start_touches_arc1_end) {
        (true, true) => TwoIntersects {
            point1: u1.pos(),
            point2: u2.pos(),
        },
        (true, false) => OneIntersect { point: v1.pos() },
        (false, true) => OneIntersect { point: arc2_first },
        (false, false) => {
            let arc2_starts_in_arc1 = in_arc1(arc2_start);
            let arc2_ends_in_arc1 = in_arc1(arc2_end);
            let (start, end) = if arc2_starts_in_arc1 && arc2_ends_in_arc1 {
                (arc2_first, arc2_last)
            } else if arc2_starts_in_arc1 {
                (arc2_first, v2.pos())
            } else if arc2_ends_in_arc1 {
                (v1.pos(), arc2_last)
            } else if in_arc2(arc1_start) {
                (v1.pos(), v2.pos())
            } else {
                return NoIntersect;
            };

            // start/end run in arc1's direction, report along u1->u2
            if same_direction {
                OverlappingArcs {
                    point1: start,
                    point2: end,
                }
            } else {
                OverlappingArcs {
                    point1: end,
                    point2: start,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seg_pair_kind_from_bulges() {
        let line = PlineVertex::new(0.0, 0.0, 0.0);
        let arc = PlineVertex::new(0.0, 0.0, 0.5);
        assert_eq!(SegPairKind::of(line, line), SegPairKind::LineLine);
        assert_eq!(SegPairKind::of(line, arc), SegPairKind::LineArc);
        assert_eq!(SegPairKind::of(arc, line), SegPairKind::ArcLine);
        assert_eq!(SegPairKind::of(arc, arc), SegPairKind::ArcArc);
    }

    #[test]
    fn opposite_direction_arc_overlap_ordered_along_second() {
        // both cover the upper half of the unit circle about the origin in opposite directions
        let v1 = PlineVertex::new(1.0, 0.0, 1.0);
        let v2 = PlineVertex::new(-1.0, 0.0, 0.0);
        let u1 = PlineVertex::new(-1.0, 0.0, -1.0);
        let u2 = PlineVertex::new(1.0, 0.0, 0.0);
        match pline_seg_intr(v1, v2, u1, u2, 1e-5) {
            PlineSegIntr::OverlappingArcs { point1, point2 } => {
                assert!(point1.fuzzy_eq(u1.pos()));
                assert!(point2.fuzzy_eq(u2.pos()));
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }
}
