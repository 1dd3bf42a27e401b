//! Joining adjacent raw offset segments.
//!
//! Each join is a pure function of the two segments (and the last vertex already output) that
//! returns a [SegJoin] describing the change to make to the output polyline.
use super::RawPlineOffsetSeg;
use crate::{
    core::{
        math::{
            angle, bulge_from_angle, circle_circle_intr, delta_angle, delta_angle_signed,
            dist_squared, line_circle_intr, line_line_intr, point_from_parametric,
            point_within_arc_sweep, CircleCircleIntr, LineCircleIntr, LineLineIntr, Vector2,
        },
        traits::Real,
    },
    polyline::{seg_arc_radius_and_center, PlineVertex, Polyline},
};

/// Segment type pair of a join.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JoinKind {
    LineLine,
    LineArc,
    ArcLine,
    ArcArc,
}

impl JoinKind {
    #[inline]
    pub fn of<T>(s1: &RawPlineOffsetSeg<T>, s2: &RawPlineOffsetSeg<T>) -> Self
    where
        T: Real,
    {
        match (s1.v1.bulge_is_zero(), s2.v1.bulge_is_zero()) {
            (true, true) => JoinKind::LineLine,
            (true, false) => JoinKind::LineArc,
            (false, true) => JoinKind::ArcLine,
            (false, false) => JoinKind::ArcArc,
        }
    }
}

/// Vertexes appended by a join.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum JoinVertexes<T>
where
    T: Real,
{
    One(PlineVertex<T>),
    Two(PlineVertex<T>, PlineVertex<T>),
}

/// Result of joining two raw offset segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegJoin<T>
where
    T: Real,
{
    /// New bulge for the last vertex already in the output (trims the arc ending at the join).
    pub updated_prev_bulge: Option<T>,
    pub vertexes: JoinVertexes<T>,
}

impl<T> SegJoin<T>
where
    T: Real,
{
    #[inline]
    fn one(v: PlineVertex<T>) -> Self {
        SegJoin {
            updated_prev_bulge: None,
            vertexes: JoinVertexes::One(v),
        }
    }

    #[inline]
    fn two(v1: PlineVertex<T>, v2: PlineVertex<T>) -> Self {
        SegJoin {
            updated_prev_bulge: None,
            vertexes: JoinVertexes::Two(v1, v2),
        }
    }

    /// Apply the join to `result` using add-or-replace for each appended vertex.
    pub fn apply_to(self, result: &mut Polyline<T>, pos_equal_eps: T) {
        if let Some(bulge) = self.updated_prev_bulge {
            if let Some(last) = result.last() {
                result.set_last(last.with_bulge(bulge));
            }
        }

        match self.vertexes {
            JoinVertexes::One(v) => result.add_or_replace_vertex(v, pos_equal_eps),
            JoinVertexes::Two(v1, v2) => {
                result.add_or_replace_vertex(v1, pos_equal_eps);
                result.add_or_replace_vertex(v2, pos_equal_eps);
            }
        }
    }
}

/// Per raw offset polyline join settings.
#[derive(Debug, Copy, Clone)]
pub struct JoinParams<T> {
    /// Direction of inserted connection arcs, counter clockwise for negative offsets.
    pub connection_arcs_ccw: bool,
    pub pos_equal_eps: T,
}

/// Join `s1` to `s2`, `prev_vertex` is the last vertex currently in the output.
pub fn join_raw_offset_segs<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    prev_vertex: PlineVertex<T>,
    params: &JoinParams<T>,
) -> SegJoin<T>
where
    T: Real,
{
    match JoinKind::of(s1, s2) {
        JoinKind::LineLine => line_line_join(s1, s2, params),
        JoinKind::LineArc => line_arc_join(s1, s2, params),
        JoinKind::ArcLine => arc_line_join(s1, s2, prev_vertex, params),
        JoinKind::ArcArc => arc_arc_join(s1, s2, prev_vertex, params),
    }
}

/// Parametric value outside of `[0, 1]` (segment must be extended to reach the point).
#[inline]
fn is_false_intersect<T>(t: T) -> bool
where
    T: Real,
{
    t < T::zero() || t > T::one()
}

/// Arc centered at the original shared vertex from the end of `s1` to the start of `s2`.
fn connect_using_arc<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    connection_arcs_ccw: bool,
) -> SegJoin<T>
where
    T: Real,
{
    let center = s1.orig_v2_pos;
    let sp = s1.v2.pos();
    let ep = s2.v1.pos();
    let sweep = delta_angle_signed(angle(center, sp), angle(center, ep), !connection_arcs_ccw);
    SegJoin::two(
        PlineVertex::from_vector2(sp, bulge_from_angle(sweep)),
        s2.v1,
    )
}

/// Bulge for the arc `v1->v2` (center `arc_center`) trimmed to start at `point`, keeps the
/// original bulge if trimming would flip the arc direction (point at the very end of the arc).
fn trimmed_start_bulge<T>(
    arc_center: Vector2<T>,
    v1: &PlineVertex<T>,
    v2: &PlineVertex<T>,
    point: Vector2<T>,
) -> T
where
    T: Real,
{
    let sweep = delta_angle(angle(arc_center, point), angle(arc_center, v2.pos()));
    if (sweep > T::zero()) == v1.bulge_is_pos() {
        bulge_from_angle(sweep)
    } else {
        v1.bulge
    }
}

/// Bulge replacing the previous output vertex so its arc ends at `point` on the arc of center
/// `arc_center`, `None` if the previous vertex is not an arc start or trimming would flip it.
fn trimmed_prev_bulge<T>(
    prev_vertex: PlineVertex<T>,
    arc_end: &PlineVertex<T>,
    arc_center: Vector2<T>,
    point: Vector2<T>,
    pos_equal_eps: T,
) -> Option<T>
where
    T: Real,
{
    if prev_vertex.bulge_is_zero() || prev_vertex.pos().fuzzy_eq_eps(arc_end.pos(), pos_equal_eps) {
        return None;
    }

    let (_, prev_arc_center) = seg_arc_radius_and_center(prev_vertex, *arc_end);
    let sweep = delta_angle(
        angle(prev_arc_center, prev_vertex.pos()),
        angle(arc_center, point),
    );
    if (sweep > T::zero()) == prev_vertex.bulge_is_pos() {
        Some(bulge_from_angle(sweep))
    } else {
        None
    }
}

fn line_line_join<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    params: &JoinParams<T>,
) -> SegJoin<T>
where
    T: Real,
{
    let v1 = s1.v1;
    let v2 = s1.v2;
    let u1 = s2.v1;
    let u2 = s2.v2;
    debug_assert!(v1.bulge_is_zero() && u1.bulge_is_zero());

    if s1.collapsed_arc || s2.collapsed_arc {
        return connect_using_arc(s1, s2, params.connection_arcs_ccw);
    }

    match line_line_intr(v1.pos(), v2.pos(), u1.pos(), u2.pos(), params.pos_equal_eps) {
        LineLineIntr::NoIntersect => {
            // parallel, half circle around the original vertex
            let bulge = if params.connection_arcs_ccw {
                T::one()
            } else {
                -T::one()
            };
            SegJoin::two(v2.with_bulge(bulge), u1)
        }
        LineLineIntr::TrueIntersect { seg1_t, .. } => SegJoin::one(PlineVertex::from_vector2(
            point_from_parametric(v1.pos(), v2.pos(), seg1_t),
            T::zero(),
        )),
        LineLineIntr::Overlapping { .. } => SegJoin::one(v2.with_bulge(T::zero())),
        LineLineIntr::FalseIntersect { seg1_t, seg2_t } => {
            if seg1_t > T::one() && is_false_intersect(seg2_t) {
                connect_using_arc(s1, s2, params.connection_arcs_ccw)
            } else {
                SegJoin::two(v2.with_bulge(T::zero()), u1)
            }
        }
    }
}

fn line_arc_join<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    params: &JoinParams<T>,
) -> SegJoin<T>
where
    T: Real,
{
    let v1 = s1.v1;
    let v2 = s1.v2;
    let u1 = s2.v1;
    let u2 = s2.v2;
    debug_assert!(v1.bulge_is_zero() && !u1.bulge_is_zero());

    let (arc_radius, arc_center) = seg_arc_radius_and_center(u1, u2);

    let join_at = |t: T, point: Vector2<T>| -> SegJoin<T> {
        let on_arc = point_within_arc_sweep(arc_center, u1.pos(), u2.pos(), u1.bulge_is_neg(), point);
        if !is_false_intersect(t) && on_arc {
            return SegJoin::one(PlineVertex::from_vector2(
                point,
                trimmed_start_bulge(arc_center, &u1, &u2, point),
            ));
        }

        if (t > T::one() && !on_arc) || s1.collapsed_arc {
            return connect_using_arc(s1, s2, params.connection_arcs_ccw);
        }

        SegJoin::two(v2.with_bulge(T::zero()), u1)
    };

    match line_circle_intr(v1.pos(), v2.pos(), arc_radius, arc_center, params.pos_equal_eps) {
        LineCircleIntr::NoIntersect => connect_using_arc(s1, s2, params.connection_arcs_ccw),
        LineCircleIntr::TangentIntersect { t0 } => {
            join_at(t0, point_from_parametric(v1.pos(), v2.pos(), t0))
        }
        LineCircleIntr::TwoIntersects { t0, t1 } => {
            let p0 = point_from_parametric(v1.pos(), v2.pos(), t0);
            let p1 = point_from_parametric(v1.pos(), v2.pos(), t1);
            if dist_squared(p0, s1.orig_v2_pos) < dist_squared(p1, s1.orig_v2_pos) {
                join_at(t0, p0)
            } else {
                join_at(t1, p1)
            }
        }
    }
}

fn arc_line_join<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    prev_vertex: PlineVertex<T>,
    params: &JoinParams<T>,
) -> SegJoin<T>
where
    T: Real,
{
    let v1 = s1.v1;
    let v2 = s1.v2;
    let u1 = s2.v1;
    let u2 = s2.v2;
    debug_assert!(!v1.bulge_is_zero() && u1.bulge_is_zero());

    let (arc_radius, arc_center) = seg_arc_radius_and_center(v1, v2);

    let join_at = |t: T, point: Vector2<T>| -> SegJoin<T> {
        let on_arc = point_within_arc_sweep(arc_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), point);
        if is_false_intersect(t) || !on_arc {
            return connect_using_arc(s1, s2, params.connection_arcs_ccw);
        }

        SegJoin {
            updated_prev_bulge: trimmed_prev_bulge(
                prev_vertex,
                &v2,
                arc_center,
                point,
                params.pos_equal_eps,
            ),
            vertexes: JoinVertexes::One(PlineVertex::from_vector2(point, T::zero())),
        }
    };

    match line_circle_intr(u1.pos(), u2.pos(), arc_radius, arc_center, params.pos_equal_eps) {
        LineCircleIntr::NoIntersect => connect_using_arc(s1, s2, params.connection_arcs_ccw),
        LineCircleIntr::TangentIntersect { t0 } => {
            join_at(t0, point_from_parametric(u1.pos(), u2.pos(), t0))
        }
        LineCircleIntr::TwoIntersects { t0, t1 } => {
            // a collapsed line starts at the true join position
            let reference = if s2.collapsed_arc {
                u1.pos()
            } else {
                s1.orig_v2_pos
            };
            let p0 = point_from_parametric(u1.pos(), u2.pos(), t0);
            let p1 = point_from_parametric(u1.pos(), u2.pos(), t1);
            if dist_squared(p0, reference) < dist_squared(p1, reference) {
                join_at(t0, p0)
            } else {
                join_at(t1, p1)
            }
        }
    }
}

fn arc_arc_join<T>(
    s1: &RawPlineOffsetSeg<T>,
    s2: &RawPlineOffsetSeg<T>,
    prev_vertex: PlineVertex<T>,
    params: &JoinParams<T>,
) -> SegJoin<T>
where
    T: Real,
{
    let v1 = s1.v1;
    let v2 = s1.v2;
    let u1 = s2.v1;
    let u2 = s2.v2;
    debug_assert!(!v1.bulge_is_zero() && !u1.bulge_is_zero());

    let (arc1_radius, arc1_center) = seg_arc_radius_and_center(v1, v2);
    let (arc2_radius, arc2_center) = seg_arc_radius_and_center(u1, u2);

    let on_both_arcs = |point: Vector2<T>| {
        point_within_arc_sweep(arc1_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), point)
            && point_within_arc_sweep(arc2_center, u1.pos(), u2.pos(), u1.bulge_is_neg(), point)
    };

    let join_at = |point: Vector2<T>, is_true_intersect: bool| -> SegJoin<T> {
        if !is_true_intersect {
            return connect_using_arc(s1, s2, params.connection_arcs_ccw);
        }

        SegJoin {
            updated_prev_bulge: trimmed_prev_bulge(
                prev_vertex,
                &v2,
                arc1_center,
                point,
                params.pos_equal_eps,
            ),
            vertexes: JoinVertexes::One(PlineVertex::from_vector2(
                point,
                trimmed_start_bulge(arc2_center, &u1, &u2, point),
            )),
        }
    };

    match circle_circle_intr(
        arc1_radius,
        arc1_center,
        arc2_radius,
        arc2_center,
        params.pos_equal_eps,
    ) {
        CircleCircleIntr::NoIntersect => connect_using_arc(s1, s2, params.connection_arcs_ccw),
        CircleCircleIntr::TangentIntersect { point } => join_at(point, on_both_arcs(point)),
        CircleCircleIntr::TwoIntersects { point1, point2 } => {
            let dist1 = dist_squared(point1, s1.orig_v2_pos);
            let dist2 = dist_squared(point2, s1.orig_v2_pos);
            if dist1.fuzzy_eq(dist2) {
                // equidistant when the input arcs meet at a tangent, prefer the true intersect
                if on_both_arcs(point1) {
                    join_at(point1, true)
                } else {
                    join_at(point2, on_both_arcs(point2))
                }
            } else if dist1 < dist2 {
                join_at(point1, on_both_arcs(point1))
            } else {
                join_at(point2, on_both_arcs(point2))
            }
        }
        // same circle, nothing to trim
        CircleCircleIntr::Overlapping => SegJoin::one(u1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_seg(x1: f64, y1: f64, x2: f64, y2: f64, orig: (f64, f64)) -> RawPlineOffsetSeg<f64> {
        RawPlineOffsetSeg {
            v1: PlineVertex::new(x1, y1, 0.0),
            v2: PlineVertex::new(x2, y2, 0.0),
            orig_v2_pos: Vector2::new(orig.0, orig.1),
            collapsed_arc: false,
        }
    }

    const PARAMS_CW: JoinParams<f64> = JoinParams {
        connection_arcs_ccw: false,
        pos_equal_eps: 1e-5,
    };

    const PARAMS_CCW: JoinParams<f64> = JoinParams {
        connection_arcs_ccw: true,
        pos_equal_eps: 1e-5,
    };

    #[test]
    fn join_kind_dispatch() {
        let line = line_seg(0.0, 0.0, 1.0, 0.0, (1.0, 0.0));
        let mut arc = line;
        arc.v1.bulge = 0.5;
        assert_eq!(JoinKind::of(&line, &line), JoinKind::LineLine);
        assert_eq!(JoinKind::of(&line, &arc), JoinKind::LineArc);
        assert_eq!(JoinKind::of(&arc, &line), JoinKind::ArcLine);
        assert_eq!(JoinKind::of(&arc, &arc), JoinKind::ArcArc);
    }

    #[test]
    fn crossing_lines_trim_at_intersect() {
        // inward offset of the (10, 0) corner of a counter clockwise square by 2
        let s1 = line_seg(0.0, 2.0, 10.0, 2.0, (10.0, 0.0));
        let s2 = line_seg(8.0, 0.0, 8.0, 10.0, (10.0, 10.0));
        let join = join_raw_offset_segs(&s1, &s2, s1.v1, &PARAMS_CW);
        assert_eq!(join.updated_prev_bulge, None);
        match join.vertexes {
            JoinVertexes::One(v) => assert!(v.fuzzy_eq(PlineVertex::new(8.0, 2.0, 0.0))),
            j => panic!("unexpected join: {:?}", j),
        }
    }

    #[test]
    fn diverging_lines_connect_with_arc() {
        // outward offset of the (10, 0) corner of a counter clockwise square by 2
        let s1 = line_seg(0.0, -2.0, 10.0, -2.0, (10.0, 0.0));
        let s2 = line_seg(12.0, 0.0, 12.0, 10.0, (10.0, 10.0));
        let join = join_raw_offset_segs(&s1, &s2, s1.v1, &PARAMS_CCW);
        match join.vertexes {
            JoinVertexes::Two(a, b) => {
                // quarter turn counter clockwise
                assert!(a.fuzzy_eq(PlineVertex::new(10.0, -2.0, bulge_from_angle(std::f64::consts::FRAC_PI_2))));
                assert!(b.fuzzy_eq(PlineVertex::new(12.0, 0.0, 0.0)));
            }
            j => panic!("unexpected join: {:?}", j),
        }
    }

    #[test]
    fn parallel_lines_use_half_circle() {
        // line doubling back on itself
        let s1 = line_seg(0.0, 1.0, 5.0, 1.0, (5.0, 0.0));
        let s2 = line_seg(5.0, -1.0, 0.0, -1.0, (0.0, 0.0));
        let join = join_raw_offset_segs(&s1, &s2, s1.v1, &PARAMS_CW);
        match join.vertexes {
            JoinVertexes::Two(a, b) => {
                assert!(a.fuzzy_eq(PlineVertex::new(5.0, 1.0, -1.0)));
                assert!(b.fuzzy_eq(PlineVertex::new(5.0, -1.0, 0.0)));
            }
            j => panic!("unexpected join: {:?}", j),
        }
    }

    #[test]
    fn apply_replaces_repeat_position() {
        let mut pline = Polyline::new();
        pline.add(0.0, 0.0, 0.0);
        pline.add(1.0, 0.0, 0.5);
        let join = SegJoin {
            updated_prev_bulge: Some(0.25),
            vertexes: JoinVertexes::Two(PlineVertex::new(1.0, 0.0, 0.0), PlineVertex::new(2.0, 0.0, 0.0)),
        };
        join.apply_to(&mut pline, 1e-5);
        assert_eq!(pline.len(), 3);
        assert_eq!(pline[1], PlineVertex::new(1.0, 0.0, 0.0));
        assert_eq!(pline[2], PlineVertex::new(2.0, 0.0, 0.0));
    }
}
