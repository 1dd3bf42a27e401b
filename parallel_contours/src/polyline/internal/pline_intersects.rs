//! Self intersect and polyline/polyline intersect discovery.
use crate::{
    core::{
        math::Vector2,
        traits::{ControlFlow, Real},
        Control,
    },
    polyline::{
        pline_seg_intr, seg_fast_approx_bounding_box, FindIntersectsOptions, PlineBasicIntersect,
        PlineIntersectVisitor, PlineIntersectsCollection, PlineOverlappingIntersect, PlineSegIntr,
        Polyline,
    },
    spatial_index::StaticAABB2DIndex,
};
use std::collections::HashSet;

/// Report the intersects of segment `i` and segment `hit_i` to `visitor`, dropping points for
/// which `skip` returns true. An overlap is dropped when `skip` is true for its first point.
fn visit_seg_pair_intr<T, C, V, S>(
    intr: PlineSegIntr<T>,
    i: usize,
    hit_i: usize,
    visitor: &mut V,
    skip: S,
) -> C
where
    T: Real,
    C: ControlFlow,
    V: PlineIntersectVisitor<T, C>,
    S: Fn(Vector2<T>) -> bool,
{
    match intr {
        PlineSegIntr::NoIntersect => {}
        PlineSegIntr::TangentIntersect { point } | PlineSegIntr::OneIntersect { point } => {
            if !skip(point) {
                try_cf!(visitor.visit_basic_intr(PlineBasicIntersect::new(i, hit_i, point)));
            }
        }
        PlineSegIntr::TwoIntersects { point1, point2 } => {
            for point in [point1, point2] {
                if !skip(point) {
                    try_cf!(visitor.visit_basic_intr(PlineBasicIntersect::new(i, hit_i, point)));
                }
            }
        }
        PlineSegIntr::OverlappingLines { point1, point2 }
        | PlineSegIntr::OverlappingArcs { point1, point2 } => {
            if !skip(point1) {
                try_cf!(visitor.visit_overlapping_intr(PlineOverlappingIntersect::new(
                    i, hit_i, point1, point2
                )));
            }
        }
    }

    C::continuing()
}

/// Visit intersects between each pair of adjacent segments (segments sharing a vertex).
///
/// The shared vertex itself is not reported. A zero length segment is reported as an overlap
/// (singularity) and a closed two vertex polyline whose arcs retrace each other is reported as
/// one overlap.
pub fn visit_local_self_intersects<T, C, V>(
    polyline: &Polyline<T>,
    visitor: &mut V,
    pos_equal_eps: T,
) -> C
where
    T: Real,
    C: ControlFlow,
    V: PlineIntersectVisitor<T, C>,
{
    let n = polyline.len();
    if n < 2 {
        return C::continuing();
    }

    if n == 2 {
        if polyline.is_closed() && polyline[0].bulge.fuzzy_eq(-polyline[1].bulge) {
            return visitor.visit_overlapping_intr(PlineOverlappingIntersect::new(
                0,
                1,
                polyline[0].pos(),
                polyline[1].pos(),
            ));
        }
        return C::continuing();
    }

    // segment i->j against segment j->k
    let mut visit_adjacent = |i: usize, j: usize, k: usize| -> C {
        let v1 = polyline[i];
        let v2 = polyline[j];
        let v3 = polyline[k];

        if v1.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
            return visitor.visit_overlapping_intr(PlineOverlappingIntersect::new(
                i,
                j,
                v1.pos(),
                v2.pos(),
            ));
        }

        let intr = pline_seg_intr(v1, v2, v2, v3, pos_equal_eps);
        // overlaps of adjacent segments always touch the shared vertex
        let is_overlap = matches!(
            intr,
            PlineSegIntr::OverlappingLines { .. } | PlineSegIntr::OverlappingArcs { .. }
        );
        visit_seg_pair_intr(intr, i, j, visitor, |p| {
            !is_overlap && p.fuzzy_eq_eps(v2.pos(), pos_equal_eps)
        })
    };

    for i in 2..n {
        try_cf!(visit_adjacent(i - 2, i - 1, i));
    }

    if polyline.is_closed() {
        // pairs wrapping through the last vertex back to the first
        try_cf!(visit_adjacent(n - 2, n - 1, 0));
        try_cf!(visit_adjacent(n - 1, 0, 1));
    }

    C::continuing()
}

/// Visit intersects between non adjacent segments using `aabb_index` (an index of the
/// polyline's own segment boxes) to find candidate pairs.
///
/// Each unordered segment pair is tested once. An intersect lying on the end point of both
/// segments is skipped since the segments starting there report it.
pub fn visit_global_self_intersects<T, C, V>(
    polyline: &Polyline<T>,
    aabb_index: &StaticAABB2DIndex<T>,
    visitor: &mut V,
    pos_equal_eps: T,
) -> C
where
    T: Real,
    C: ControlFlow,
    V: PlineIntersectVisitor<T, C>,
{
    let n = polyline.len();
    if n < 3 {
        return C::continuing();
    }

    let mut visited_pairs = HashSet::with_capacity(n);
    let mut query_stack = Vec::with_capacity(8);
    let fuzz = T::fuzzy_epsilon();
    let mut cf = C::continuing();

    for (box_pos, bb) in aabb_index.item_boxes().iter().enumerate() {
        let i = aabb_index.map_all_boxes_index(box_pos);
        let j = polyline.next_wrapping_index(i);
        let v1 = polyline[i];
        let v2 = polyline[j];

        let mut query_visitor = |hit_i: usize| -> Control {
            let hit_j = polyline.next_wrapping_index(hit_i);
            if i == hit_i || i == hit_j || j == hit_i || j == hit_j {
                return Control::Continue;
            }

            // (a, b) is stored when visited, skip when it comes back as (b, a)
            if visited_pairs.contains(&(hit_i, i)) {
                return Control::Continue;
            }
            visited_pairs.insert((i, hit_i));

            let u1 = polyline[hit_i];
            let u2 = polyline[hit_j];
            let at_both_ends = |p: Vector2<T>| {
                v2.pos().fuzzy_eq_eps(p, pos_equal_eps) && u2.pos().fuzzy_eq_eps(p, pos_equal_eps)
            };

            let intr = pline_seg_intr(v1, v2, u1, u2, pos_equal_eps);
            cf = visit_seg_pair_intr(intr, i, hit_i, visitor, at_both_ends);
            if cf.should_break() {
                Control::Break(())
            } else {
                Control::Continue
            }
        };

        aabb_index.visit_query_with_stack(
            bb.min_x - fuzz,
            bb.min_y - fuzz,
            bb.max_x + fuzz,
            bb.max_y + fuzz,
            &mut query_visitor,
            &mut query_stack,
        );

        if cf.should_break() {
            break;
        }
    }

    cf
}

/// Collect every self intersect (local and global) as basic intersects. An overlap contributes
/// one basic intersect at each of its end points.
pub fn all_self_intersects_as_basic<T>(
    polyline: &Polyline<T>,
    aabb_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
) -> Vec<PlineBasicIntersect<T>>
where
    T: Real,
{
    struct CollectAsBasic<U> {
        intrs: Vec<PlineBasicIntersect<U>>,
    }

    impl<U> PlineIntersectVisitor<U, ()> for CollectAsBasic<U>
    where
        U: Real,
    {
        fn visit_basic_intr(&mut self, intr: PlineBasicIntersect<U>) {
            self.intrs.push(intr);
        }

        fn visit_overlapping_intr(&mut self, intr: PlineOverlappingIntersect<U>) {
            for point in [intr.point1, intr.point2] {
                self.intrs.push(PlineBasicIntersect::new(
                    intr.start_index1,
                    intr.start_index2,
                    point,
                ));
            }
        }
    }

    let mut collector = CollectAsBasic { intrs: Vec::new() };
    visit_local_self_intersects(polyline, &mut collector, pos_equal_eps);
    visit_global_self_intersects(polyline, aabb_index, &mut collector, pos_equal_eps);
    collector.intrs
}

/// Find all intersects between `pline1` and `pline2`.
///
/// Every segment of `pline2` queries the spatial index of `pline1`. An intersect at the end point
/// of a segment is skipped (the next segment reports it at its start) except at the final end
/// point of an open polyline. Basic intersects sitting on a segment start that an overlap already
/// covers are removed.
pub fn find_intersects<T>(
    pline1: &Polyline<T>,
    pline2: &Polyline<T>,
    options: &FindIntersectsOptions<T>,
) -> PlineIntersectsCollection<T>
where
    T: Real,
{
    let mut result = PlineIntersectsCollection::new_empty();
    if pline1.len() < 2 || pline2.len() < 2 {
        return result;
    }

    let pos_equal_eps = options.pos_equal_eps;
    let constructed_index;
    let pline1_index = match options.pline1_aabb_index {
        Some(index) => index,
        None => {
            constructed_index = pline1.finite_approx_aabb_index();
            &constructed_index
        }
    };

    // segment start indexes whose start point may repeat an overlap end point
    let mut possible_duplicates1 = HashSet::<usize>::new();
    let mut possible_duplicates2 = HashSet::<usize>::new();

    let last_seg1 = pline1.len() - 2;
    let last_seg2 = pline2.len() - 2;
    let fuzz = T::fuzzy_epsilon();
    let mut query_stack = Vec::with_capacity(8);

    for (i2, j2) in pline2.iter_segment_indexes() {
        let p2v1 = pline2[i2];
        let p2v2 = pline2[j2];

        let mut query_visitor = |i1: usize| {
            let j1 = pline1.next_wrapping_index(i1);
            let p1v1 = pline1[i1];
            let p1v2 = pline1[j1];

            let skip_intr_at_end = |p: Vector2<T>| -> bool {
                let at_end1 = p1v2.pos().fuzzy_eq_eps(p, pos_equal_eps)
                    && (pline1.is_closed() || i1 != last_seg1);
                let at_end2 = p2v2.pos().fuzzy_eq_eps(p, pos_equal_eps)
                    && (pline2.is_closed() || i2 != last_seg2);
                at_end1 || at_end2
            };

            match pline_seg_intr(p1v1, p1v2, p2v1, p2v2, pos_equal_eps) {
                PlineSegIntr::NoIntersect => {}
                PlineSegIntr::TangentIntersect { point } | PlineSegIntr::OneIntersect { point } => {
                    if !skip_intr_at_end(point) {
                        result
                            .basic_intersects
                            .push(PlineBasicIntersect::new(i1, i2, point));
                    }
                }
                PlineSegIntr::TwoIntersects { point1, point2 } => {
                    for point in [point1, point2] {
                        if !skip_intr_at_end(point) {
                            result
                                .basic_intersects
                                .push(PlineBasicIntersect::new(i1, i2, point));
                        }
                    }
                }
                PlineSegIntr::OverlappingLines { point1, point2 }
                | PlineSegIntr::OverlappingArcs { point1, point2 } => {
                    result
                        .overlapping_intersects
                        .push(PlineOverlappingIntersect::new(i1, i2, point1, point2));

                    let touches = |end: Vector2<T>| {
                        end.fuzzy_eq_eps(point1, pos_equal_eps)
                            || end.fuzzy_eq_eps(point2, pos_equal_eps)
                    };
                    if touches(p1v2.pos()) {
                        possible_duplicates1.insert(j1);
                    }
                    if touches(p2v2.pos()) {
                        possible_duplicates2.insert(j2);
                    }
                }
            }
        };

        let bb = seg_fast_approx_bounding_box(p2v1, p2v2);
        pline1_index.visit_query_with_stack(
            bb.min_x - fuzz,
            bb.min_y - fuzz,
            bb.max_x + fuzz,
            bb.max_y + fuzz,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    if !possible_duplicates1.is_empty() || !possible_duplicates2.is_empty() {
        let is_duplicate = |intr: &PlineBasicIntersect<T>| {
            (possible_duplicates1.contains(&intr.start_index1)
                && intr
                    .point
                    .fuzzy_eq_eps(pline1[intr.start_index1].pos(), pos_equal_eps))
                || (possible_duplicates2.contains(&intr.start_index2)
                    && intr
                        .point
                        .fuzzy_eq_eps(pline2[intr.start_index2].pos(), pos_equal_eps))
        };
        result.basic_intersects.retain(|intr| !is_duplicate(intr));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::PlineIntersect;

    #[test]
    fn repeated_vertex_reported_as_overlap() {
        let pline = pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 1.0, 0.0)];
        let mut singularity_found = false;
        visit_local_self_intersects(
            &pline,
            &mut |intr: PlineIntersect<f64>| {
                if let PlineIntersect::Overlapping(o) = intr {
                    if (o.start_index1, o.start_index2) == (1, 2) {
                        singularity_found = true;
                    }
                }
            },
            1e-5,
        );
        assert!(singularity_found);
    }

    #[test]
    fn closed_two_vertex_retrace_is_one_overlap() {
        let pline = pline_closed![(0.0, 0.0, 0.5), (1.0, 0.0, -0.5)];
        let mut count = 0;
        visit_local_self_intersects(&pline, &mut |_: PlineIntersect<f64>| count += 1, 1e-5);
        assert_eq!(count, 1);
    }

    #[test]
    fn crossing_pair_found_once() {
        // bowtie, segments 0 and 2 cross at (1, 1)
        let pline = pline_closed![(0.0, 0.0, 0.0), (2.0, 2.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0)];
        let index = pline.create_approx_aabb_index().unwrap();
        let intrs = all_self_intersects_as_basic(&pline, &index, 1e-5);
        assert_eq!(intrs.len(), 1);
        assert!(intrs[0].point.fuzzy_eq(Vector2::new(1.0, 1.0)));
    }

    #[test]
    fn end_point_intersect_not_repeated() {
        // open pline2 passes through vertex 1 of pline1
        let pline1 = pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
        let pline2 = pline_open![(1.0, -1.0, 0.0), (1.0, 1.0, 0.0)];
        let intrs = find_intersects(&pline1, &pline2, &FindIntersectsOptions::new());
        assert_eq!(intrs.basic_intersects.len(), 1);
        assert_eq!(intrs.basic_intersects[0].start_index1, 1);
        assert!(intrs.overlapping_intersects.is_empty());
    }
}
