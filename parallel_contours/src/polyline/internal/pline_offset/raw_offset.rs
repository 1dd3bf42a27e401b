use super::join::{join_raw_offset_segs, JoinParams};
use crate::{
    core::{
        math::{angle, bulge_from_angle, delta_angle, Vector2},
        traits::Real,
    },
    polyline::{seg_arc_radius_and_center, PlineVertex, Polyline},
};

/// A single polyline segment moved to its parallel offset position, before joining.
#[derive(Debug, Copy, Clone)]
pub struct RawPlineOffsetSeg<T>
where
    T: Real,
{
    pub v1: PlineVertex<T>,
    pub v2: PlineVertex<T>,
    /// End point of the input segment (center of any connection arc inserted after this one).
    pub orig_v2_pos: Vector2<T>,
    /// Arc whose offset radius went negative, stored as a line between the two offset points.
    pub collapsed_arc: bool,
}

/// Offset every segment of `polyline` by `offset` without joining them.
///
/// # Examples
///
/// ```
/// # use parallel_contours::pline_open;
/// # use parallel_contours::polyline::internal::pline_offset::*;
/// let pline = pline_open![(0.0, 0.0, 0.0), (4.0, 0.0, 0.0)];
/// let segs = create_untrimmed_raw_offset_segs(&pline, 1.0);
/// assert_eq!(segs.len(), 1);
/// assert_eq!((segs[0].v1.x, segs[0].v1.y), (0.0, 1.0));
/// assert_eq!((segs[0].v2.x, segs[0].v2.y), (4.0, 1.0));
/// ```
pub fn create_untrimmed_raw_offset_segs<T>(
    polyline: &Polyline<T>,
    offset: T,
) -> Vec<RawPlineOffsetSeg<T>>
where
    T: Real,
{
    polyline
        .iter_segments()
        .map(|(v1, v2)| {
            if v1.bulge_is_zero() {
                offset_line_seg(v1, v2, offset)
            } else {
                offset_arc_seg(v1, v2, offset)
            }
        })
        .collect()
}

#[inline]
fn offset_line_seg<T>(v1: PlineVertex<T>, v2: PlineVertex<T>, offset: T) -> RawPlineOffsetSeg<T>
where
    T: Real,
{
    let shift = (v2.pos() - v1.pos()).unit_perp().scale(offset);
    RawPlineOffsetSeg {
        v1: PlineVertex::from_vector2(v1.pos() + shift, T::zero()),
        v2: PlineVertex::from_vector2(v2.pos() + shift, T::zero()),
        orig_v2_pos: v2.pos(),
        collapsed_arc: false,
    }
}

#[inline]
fn offset_arc_seg<T>(v1: PlineVertex<T>, v2: PlineVertex<T>, offset: T) -> RawPlineOffsetSeg<T>
where
    T: Real,
{
    let (radius, center) = seg_arc_radius_and_center(v1, v2);
    // signed radius change, left of a counter clockwise arc is toward its center
    let radius_delta = if v1.bulge_is_neg() { offset } else { -offset };
    let collapsed_arc = (radius + radius_delta).fuzzy_lt(T::zero());

    let shift_from_center =
        |p: Vector2<T>| -> Vector2<T> { p + (p - center).normalize().scale(radius_delta) };

    RawPlineOffsetSeg {
        v1: PlineVertex::from_vector2(
            shift_from_center(v1.pos()),
            if collapsed_arc { T::zero() } else { v1.bulge },
        ),
        v2: PlineVertex::from_vector2(shift_from_center(v2.pos()), v2.bulge),
        orig_v2_pos: v2.pos(),
        collapsed_arc,
    }
}

/// Create the raw offset polyline: every segment offset and joined to the next.
///
/// The result may self intersect, it is cut and filtered by the slice functions. Empty if
/// `polyline` has fewer than 2 vertexes, is a single collapsed arc, or joining leaves a single
/// vertex.
pub fn create_raw_offset_polyline<T>(
    polyline: &Polyline<T>,
    offset: T,
    pos_equal_eps: T,
) -> Polyline<T>
where
    T: Real,
{
    if polyline.len() < 2 {
        return Polyline::new();
    }

    let raw_segs = create_untrimmed_raw_offset_segs(polyline, offset);
    let (first_seg, last_seg) = match (raw_segs.first(), raw_segs.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Polyline::new(),
    };

    if raw_segs.len() == 1 && first_seg.collapsed_arc {
        return Polyline::new();
    }

    let params = JoinParams {
        connection_arcs_ccw: offset < T::zero(),
        pos_equal_eps,
    };

    let join_into = |s1: &RawPlineOffsetSeg<T>, s2: &RawPlineOffsetSeg<T>, out: &mut Polyline<T>| {
        if let Some(prev) = out.last() {
            join_raw_offset_segs(s1, s2, prev, &params).apply_to(out, pos_equal_eps);
        }
    };

    let mut result = Polyline::with_capacity(polyline.len(), polyline.is_closed());
    result.add_vertex(first_seg.v1);

    let mut seg_pairs = raw_segs.windows(2);
    if let Some([s1, s2]) = seg_pairs.next() {
        join_into(s1, s2, &mut result);
    }

    // the first join collapsed everything onto the first vertex, the closing join replaces it
    let first_vertex_replaced = result.len() == 1;

    for pair in seg_pairs {
        if let [s1, s2] = pair {
            join_into(s1, s2, &mut result);
        }
    }

    if polyline.is_closed() && result.len() > 1 {
        close_raw_offset(&mut result, last_seg, first_seg, first_vertex_replaced, &join_into);
        prune_closing_singularities(&mut result, pos_equal_eps);
    } else {
        result.add_or_replace_vertex(last_seg.v2, pos_equal_eps);
    }

    if result.len() == 1 {
        result.clear();
    }

    result
}

/// Join the last segment to the first for a closed polyline.
///
/// The join runs on a temporary polyline seeded with the current last vertex so the result is
/// only mutated when splicing the join back in.
fn close_raw_offset<T, F>(
    result: &mut Polyline<T>,
    last_seg: &RawPlineOffsetSeg<T>,
    first_seg: &RawPlineOffsetSeg<T>,
    first_vertex_replaced: bool,
    join_into: &F,
) where
    T: Real,
    F: Fn(&RawPlineOffsetSeg<T>, &RawPlineOffsetSeg<T>, &mut Polyline<T>),
{
    let mut closing = Polyline::new();
    if let Some(last) = result.last() {
        closing.add_vertex(last);
    }
    join_into(last_seg, first_seg, &mut closing);

    let (closing_first, closing_last) = match (closing.get(0), closing.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return,
    };

    result.set_last(closing_first);
    for v in closing.iter().skip(1) {
        result.add_vertex(v);
    }

    if first_vertex_replaced {
        return;
    }

    let new_start = closing_last.pos();
    let v0 = result[0];
    if v0.bulge_is_zero() {
        result[0] = PlineVertex::from_vector2(new_start, v0.bulge);
    } else if result.len() > 1 {
        let v1 = result[1];
        let (_, center) = seg_arc_radius_and_center(v0, v1);
        let sweep = delta_angle(angle(center, new_start), angle(center, v1.pos()));
        // a flipped sweep means the vertex is invalid, move it and leave it for pruning
        let bulge = if (sweep < T::zero() && v0.bulge_is_pos())
            || (sweep > T::zero() && v0.bulge_is_neg())
        {
            v0.bulge
        } else {
            bulge_from_angle(sweep)
        };
        result[0] = PlineVertex::from_vector2(new_start, bulge);
    }
}

/// Remove coincident last/first and first/second vertexes created by the closing join.
fn prune_closing_singularities<T>(result: &mut Polyline<T>, pos_equal_eps: T)
where
    T: Real,
{
    if result.len() < 2 {
        return;
    }

    if let Some(last) = result.last() {
        if result[0].pos().fuzzy_eq_eps(last.pos(), pos_equal_eps) {
            result.remove_last();
        }
    }

    if result.len() > 1 && result[0].pos().fuzzy_eq_eps(result[1].pos(), pos_equal_eps) {
        result.remove(0);
    }
}
