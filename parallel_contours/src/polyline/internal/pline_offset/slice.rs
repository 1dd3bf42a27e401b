//! Cutting the raw offset polyline into open slices and discarding the invalid ones.
use crate::{
    core::{
        math::{
            circle_circle_intr, dist_squared, line_circle_intr, point_from_parametric,
            point_within_arc_sweep, CircleCircleIntr, LineCircleIntr, Vector2,
        },
        traits::Real,
        Control,
    },
    polyline::{
        internal::pline_intersects::{all_self_intersects_as_basic, find_intersects},
        pline_seg_intr, seg_arc_radius_and_center, seg_closest_point,
        seg_fast_approx_bounding_box, seg_midpoint, seg_split_at_point, FindIntersectsOptions,
        PlineOffsetOptions, PlineSegIntr, PlineVertex, Polyline,
    },
    spatial_index::StaticAABB2DIndex,
};
use std::{cmp::Ordering, collections::BTreeMap};
use tracing::{debug, trace};

/// Open fragment of a raw offset polyline.
#[derive(Debug, Clone)]
pub struct OpenPlineSlice<T>
where
    T: Real,
{
    /// Raw offset segment index the slice starts on.
    pub start_index: usize,
    pub pline: Polyline<T>,
}

impl<T> OpenPlineSlice<T>
where
    T: Real,
{
    /// Slice covering the whole of `source`.
    pub fn from_entire_pline(source: &Polyline<T>) -> Self {
        let mut pline = source.clone();
        if source.is_closed() {
            if let Some(first) = source.get(0) {
                pline.add_vertex(first.with_bulge(T::zero()));
            }
            pline.set_is_closed(false);
        }
        OpenPlineSlice {
            start_index: 0,
            pline,
        }
    }

    #[inline]
    pub fn start_point(&self) -> Vector2<T> {
        self.pline[0].pos()
    }

    #[inline]
    pub fn end_point(&self) -> Vector2<T> {
        self.pline[self.pline.len() - 1].pos()
    }
}

/// Cut the part of `source` from `start_point` (on segment `start_index`) forward to
/// `end_point` (on segment `end_index`).
///
/// Returns `None` if the slice has no length. For open `source` `start_index <= end_index` is
/// required.
pub fn slice_between<T>(
    source: &Polyline<T>,
    start_point: Vector2<T>,
    start_index: usize,
    end_point: Vector2<T>,
    end_index: usize,
    pos_equal_eps: T,
) -> Option<OpenPlineSlice<T>>
where
    T: Real,
{
    debug_assert!(
        start_index <= end_index || source.is_closed(),
        "open polyline slices cannot wrap"
    );

    // start point on the end of its segment begins on the next segment instead
    let (start_index, start_on_vertex) = if !source.is_closed() && start_index >= end_index {
        (start_index, false)
    } else {
        let next = source.next_wrapping_index(start_index);
        if source[next].pos().fuzzy_eq_eps(start_point, pos_equal_eps) {
            (next, true)
        } else {
            (start_index, false)
        }
    };

    let traverse_count = source.fwd_wrapping_dist(start_index, end_index);
    let seg_start = source[start_index];
    let seg_end = source[source.next_wrapping_index(start_index)];

    let mut updated_start = if start_on_vertex {
        seg_start
    } else {
        seg_split_at_point(seg_start, seg_end, start_point, pos_equal_eps).split_vertex
    };

    let mut pline = Polyline::new();

    if traverse_count == 0 {
        updated_start = seg_split_at_point(updated_start, seg_end, end_point, pos_equal_eps)
            .updated_start;
        if updated_start.pos().fuzzy_eq_eps(end_point, pos_equal_eps) {
            return None;
        }
        pline.add_vertex(updated_start);
        pline.add_vertex(PlineVertex::from_vector2(end_point, T::zero()));
        return Some(OpenPlineSlice { start_index, pline });
    }

    let end_seg_start = source[end_index];
    let (end_offset, end_bulge) = if end_point.fuzzy_eq_eps(end_seg_start.pos(), pos_equal_eps) {
        // ends on a vertex, the segment before it is the last one
        let offset = traverse_count - 1;
        let bulge = if offset == 0 {
            updated_start.bulge
        } else {
            source[source.prev_wrapping_index(end_index)].bulge
        };
        (offset, bulge)
    } else {
        let end_seg_end = source[source.next_wrapping_index(end_index)];
        let split = seg_split_at_point(end_seg_start, end_seg_end, end_point, pos_equal_eps);
        (traverse_count, split.updated_start.bulge)
    };

    pline.reserve(end_offset + 2);
    if end_offset == 0 {
        pline.add_vertex(updated_start.with_bulge(end_bulge));
    } else {
        pline.add_vertex(updated_start);
        for k in 1..=end_offset {
            let v = source[source.fwd_wrapping_index(start_index, k)];
            let v = if k == end_offset {
                v.with_bulge(end_bulge)
            } else {
                v
            };
            pline.add_or_replace_vertex(v, pos_equal_eps);
        }
    }
    pline.add_or_replace_vertex(PlineVertex::from_vector2(end_point, T::zero()), pos_equal_eps);

    if pline.len() < 2 {
        return None;
    }

    Some(OpenPlineSlice { start_index, pline })
}

/// True if `point` is at least `|offset| - offset_dist_eps` from every segment of `original`.
pub fn point_valid_for_offset<T>(
    original: &Polyline<T>,
    offset: T,
    original_index: &StaticAABB2DIndex<T>,
    point: Vector2<T>,
    query_stack: &mut Vec<usize>,
    offset_dist_eps: T,
) -> bool
where
    T: Real,
{
    let min_dist = offset.abs() - offset_dist_eps;
    let min_dist_sq = min_dist * min_dist;
    let mut valid = true;
    let mut visitor = |i: usize| {
        let j = original.next_wrapping_index(i);
        let closest = seg_closest_point(original[i], original[j], point);
        valid = dist_squared(closest, point) > min_dist_sq;
        if valid {
            Control::Continue
        } else {
            Control::Break(())
        }
    };

    original_index.visit_query_with_stack(
        point.x - min_dist,
        point.y - min_dist,
        point.x + min_dist,
        point.y + min_dist,
        &mut visitor,
        query_stack,
    );

    valid
}

/// Tests slices against the original polyline.
struct SliceValidator<'a, T>
where
    T: Real,
{
    original: &'a Polyline<T>,
    original_index: &'a StaticAABB2DIndex<T>,
    offset: T,
    offset_dist_eps: T,
    pos_equal_eps: T,
    query_stack: Vec<usize>,
}

impl<'a, T> SliceValidator<'a, T>
where
    T: Real,
{
    fn new(
        original: &'a Polyline<T>,
        original_index: &'a StaticAABB2DIndex<T>,
        offset: T,
        options: &PlineOffsetOptions<T>,
    ) -> Self {
        SliceValidator {
            original,
            original_index,
            offset,
            offset_dist_eps: options.offset_dist_eps,
            pos_equal_eps: options.pos_equal_eps,
            query_stack: Vec::with_capacity(8),
        }
    }

    fn point_valid(&mut self, point: Vector2<T>) -> bool {
        point_valid_for_offset(
            self.original,
            self.offset,
            self.original_index,
            point,
            &mut self.query_stack,
            self.offset_dist_eps,
        )
    }

    fn intersects_original(&mut self, v1: PlineVertex<T>, v2: PlineVertex<T>) -> bool {
        let bb = seg_fast_approx_bounding_box(v1, v2);
        let fuzz = T::fuzzy_epsilon();
        let original = self.original;
        let pos_equal_eps = self.pos_equal_eps;
        let mut found = false;
        let mut visitor = |i: usize| {
            let j = original.next_wrapping_index(i);
            found = !matches!(
                pline_seg_intr(v1, v2, original[i], original[j], pos_equal_eps),
                PlineSegIntr::NoIntersect
            );
            if found {
                Control::Break(())
            } else {
                Control::Continue
            }
        };

        self.original_index.visit_query_with_stack(
            bb.min_x - fuzz,
            bb.min_y - fuzz,
            bb.max_x + fuzz,
            bb.max_y + fuzz,
            &mut visitor,
            &mut self.query_stack,
        );

        found
    }

    /// Every vertex, every segment midpoint and the end point must be far enough from the
    /// original, and no segment may intersect it.
    fn is_valid(&mut self, slice: &OpenPlineSlice<T>) -> bool {
        if slice.pline.len() < 2 {
            return false;
        }

        for (v1, v2) in slice.pline.iter_segments() {
            if !self.point_valid(v1.pos())
                || !self.point_valid(seg_midpoint(v1, v2))
                || self.intersects_original(v1, v2)
            {
                return false;
            }
        }

        self.point_valid(slice.end_point())
    }
}

/// Cut points keyed and ordered by raw offset segment index.
type CutPoints<T> = BTreeMap<usize, Vec<Vector2<T>>>;

fn sort_cut_points<T>(raw_offset: &Polyline<T>, cut_points: &mut CutPoints<T>)
where
    T: Real,
{
    for (&i, points) in cut_points.iter_mut() {
        let seg_start = raw_offset[i].pos();
        points.sort_unstable_by(|a, b| {
            dist_squared(*a, seg_start)
                .partial_cmp(&dist_squared(*b, seg_start))
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Build the slices between consecutive cut points and keep the valid ones.
///
/// For closed `raw_offset` (`wraps`) the last cut point joins back to the first, otherwise the
/// first slice starts at the raw offset start and the last ends at its end.
fn slices_between_cut_points<T>(
    raw_offset: &Polyline<T>,
    cut_points: &CutPoints<T>,
    wraps: bool,
    validator: &mut SliceValidator<'_, T>,
    pos_equal_eps: T,
) -> Vec<OpenPlineSlice<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    let mut keep_if_valid = |slice: Option<OpenPlineSlice<T>>| {
        if let Some(s) = slice {
            if validator.is_valid(&s) {
                result.push(s);
            } else {
                trace!(start_index = s.start_index, "discarding slice too close to input");
            }
        }
    };

    if !wraps {
        if let Some((&first_index, points)) = cut_points.iter().next() {
            keep_if_valid(
                slice_between(
                    raw_offset,
                    raw_offset[0].pos(),
                    0,
                    points[0],
                    first_index,
                    pos_equal_eps,
                ),
            );
        }
    }

    for (&start_index, points) in cut_points.iter() {
        for pair in points.windows(2) {
            keep_if_valid(
                slice_between(
                    raw_offset,
                    pair[0],
                    start_index,
                    pair[1],
                    start_index,
                    pos_equal_eps,
                ),
            );
        }

        let last_point = points[points.len() - 1];
        let next_index = raw_offset.next_wrapping_index(start_index);
        let next_cut = match cut_points.range(next_index..).next() {
            Some(found) => found,
            None if wraps => match cut_points.range(..=start_index).next() {
                Some(found) => found,
                None => break,
            },
            None => {
                let end_index = raw_offset.len() - 1;
                keep_if_valid(
                    slice_between(
                        raw_offset,
                        last_point,
                        start_index,
                        raw_offset[end_index].pos(),
                        end_index,
                        pos_equal_eps,
                    ),
                );
                break;
            }
        };

        keep_if_valid(
            slice_between(
                raw_offset,
                last_point,
                start_index,
                next_cut.1[0],
                *next_cut.0,
                pos_equal_eps,
            ),
        );
    }

    result
}

/// Slices of a closed raw offset cut at its self intersects.
pub fn slices_from_raw_offset<T>(
    original: &Polyline<T>,
    raw_offset: &Polyline<T>,
    original_index: &StaticAABB2DIndex<T>,
    offset: T,
    options: &PlineOffsetOptions<T>,
) -> Vec<OpenPlineSlice<T>>
where
    T: Real,
{
    debug_assert!(raw_offset.is_closed(), "raw offset must be closed");
    if raw_offset.len() < 2 {
        return Vec::new();
    }

    let pos_equal_eps = options.pos_equal_eps;
    let raw_offset_index = raw_offset.finite_approx_aabb_index();
    let self_intrs = all_self_intersects_as_basic(raw_offset, &raw_offset_index, pos_equal_eps);
    debug!(self_intersects = self_intrs.len(), "found raw offset self intersects");
    let mut validator = SliceValidator::new(original, original_index, offset, options);

    if self_intrs.is_empty() {
        return if validator.point_valid(raw_offset[0].pos()) {
            vec![OpenPlineSlice::from_entire_pline(raw_offset)]
        } else {
            Vec::new()
        };
    }

    let mut cut_points = CutPoints::new();
    for intr in &self_intrs {
        cut_points.entry(intr.start_index1).or_default().push(intr.point);
        cut_points.entry(intr.start_index2).or_default().push(intr.point);
    }
    sort_cut_points(raw_offset, &mut cut_points);

    slices_between_cut_points(raw_offset, &cut_points, true, &mut validator, pos_equal_eps)
}

/// Visit intersects between `pline` and the circle, skipping false intersects and those at a
/// segment start.
fn visit_circle_intersects<T, F>(
    pline: &Polyline<T>,
    circle_center: Vector2<T>,
    circle_radius: T,
    aabb_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
    visitor: &mut F,
) where
    T: Real,
    F: FnMut(usize, Vector2<T>),
{
    let valid_line_t = |t: T| t >= T::zero() && t <= T::one() && t.abs() > pos_equal_eps;

    let candidates = aabb_index.query(
        circle_center.x - circle_radius,
        circle_center.y - circle_radius,
        circle_center.x + circle_radius,
        circle_center.y + circle_radius,
    );

    for i in candidates {
        let v1 = pline[i];
        let v2 = pline[pline.next_wrapping_index(i)];
        if v1.bulge_is_zero() {
            let mut visit_t = |t: T| {
                if valid_line_t(t) {
                    visitor(i, point_from_parametric(v1.pos(), v2.pos(), t));
                }
            };
            match line_circle_intr(v1.pos(), v2.pos(), circle_radius, circle_center, pos_equal_eps) {
                LineCircleIntr::NoIntersect => {}
                LineCircleIntr::TangentIntersect { t0 } => visit_t(t0),
                LineCircleIntr::TwoIntersects { t0, t1 } => {
                    visit_t(t0);
                    visit_t(t1);
                }
            }
        } else {
            let (arc_radius, arc_center) = seg_arc_radius_and_center(v1, v2);
            let mut visit_point = |p: Vector2<T>| {
                if !v1.pos().fuzzy_eq_eps(p, pos_equal_eps)
                    && point_within_arc_sweep(arc_center, v1.pos(), v2.pos(), v1.bulge_is_neg(), p)
                {
                    visitor(i, p);
                }
            };
            match circle_circle_intr(
                arc_radius,
                arc_center,
                circle_radius,
                circle_center,
                pos_equal_eps,
            ) {
                CircleCircleIntr::NoIntersect | CircleCircleIntr::Overlapping => {}
                CircleCircleIntr::TangentIntersect { point } => visit_point(point),
                CircleCircleIntr::TwoIntersects { point1, point2 } => {
                    visit_point(point1);
                    visit_point(point2);
                }
            }
        }
    }
}

/// Slices of a raw offset cut at its self intersects, its intersects with the dual raw offset
/// (offset the opposite way) and, for open input, the end cap circles of radius `|offset|`.
pub fn slices_from_dual_raw_offsets<T>(
    original: &Polyline<T>,
    raw_offset: &Polyline<T>,
    dual_raw_offset: &Polyline<T>,
    original_index: &StaticAABB2DIndex<T>,
    offset: T,
    options: &PlineOffsetOptions<T>,
) -> Vec<OpenPlineSlice<T>>
where
    T: Real,
{
    if raw_offset.len() < 2 {
        return Vec::new();
    }

    let pos_equal_eps = options.pos_equal_eps;
    let raw_offset_index = raw_offset.finite_approx_aabb_index();
    let self_intrs = all_self_intersects_as_basic(raw_offset, &raw_offset_index, pos_equal_eps);
    let dual_intrs = find_intersects(
        raw_offset,
        dual_raw_offset,
        &FindIntersectsOptions {
            pline1_aabb_index: Some(&raw_offset_index),
            pos_equal_eps,
        },
    );

    debug!(
        self_intersects = self_intrs.len(),
        dual_intersects = dual_intrs.basic_intersects.len(),
        dual_overlaps = dual_intrs.overlapping_intersects.len(),
        "found raw offset intersects"
    );

    let mut cut_points = CutPoints::new();
    let mut add_cut = |i: usize, p: Vector2<T>| {
        cut_points.entry(i).or_default().push(p);
    };

    if !original.is_closed() {
        let radius = offset.abs();
        for end in [original[0].pos(), original[original.len() - 1].pos()] {
            visit_circle_intersects(
                raw_offset,
                end,
                radius,
                &raw_offset_index,
                pos_equal_eps,
                &mut add_cut,
            );
        }
    }

    for intr in &self_intrs {
        add_cut(intr.start_index1, intr.point);
        add_cut(intr.start_index2, intr.point);
    }

    // overlaps with the dual only come from collapsed regions and are not cut at
    for intr in &dual_intrs.basic_intersects {
        add_cut(intr.start_index1, intr.point);
    }

    let mut validator = SliceValidator::new(original, original_index, offset, options);

    if cut_points.is_empty() {
        return if validator.point_valid(raw_offset[0].pos()) {
            vec![OpenPlineSlice::from_entire_pline(raw_offset)]
        } else {
            Vec::new()
        };
    }

    sort_cut_points(raw_offset, &mut cut_points);
    slices_between_cut_points(
        raw_offset,
        &cut_points,
        original.is_closed(),
        &mut validator,
        pos_equal_eps,
    )
}
