use super::{
    internal::{
        pline_intersects::{find_intersects, visit_global_self_intersects, visit_local_self_intersects},
        pline_offset::parallel_offset,
    },
    seg_bounding_box, seg_closest_point, seg_fast_approx_bounding_box, seg_length,
    ClosestPointResult, FindIntersectsOptions, PlineIntersect, PlineIntersectVisitor,
    PlineIntersectsCollection, PlineOffsetOptions, PlineOrientation, PlineSelfIntersectOptions,
    PlineVertex, SelfIntersectsInclude,
};
use crate::{
    core::{
        math::{angle_from_bulge, Vector2},
        traits::{ControlFlow, Real},
        Control,
    },
    spatial_index::{SpatialIndexBuildError, StaticAABB2DIndex, StaticAABB2DIndexBuilder, AABB},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Sequence of [PlineVertex] forming line and arc segments, open or closed.
///
/// A closed polyline has a segment from its last vertex back to its first, so it has as many
/// segments as vertexes. An open polyline has one less. Fewer than two vertexes means no
/// segments.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<T = f64>
where
    T: Copy,
{
    #[cfg_attr(feature = "serde", serde(rename = "vertexes"))]
    pub vertex_data: Vec<PlineVertex<T>>,
    pub is_closed: bool,
}

impl<T> Default for Polyline<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Polyline<T>
where
    T: Copy,
{
    type Output = PlineVertex<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertex_data[index]
    }
}

impl<T> IndexMut<usize> for Polyline<T>
where
    T: Copy,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vertex_data[index]
    }
}

/// Collects into an open polyline.
impl<T> FromIterator<PlineVertex<T>> for Polyline<T>
where
    T: Real,
{
    fn from_iter<I: IntoIterator<Item = PlineVertex<T>>>(iter: I) -> Self {
        Polyline {
            vertex_data: iter.into_iter().collect(),
            is_closed: false,
        }
    }
}

impl<T> Extend<PlineVertex<T>> for Polyline<T>
where
    T: Real,
{
    #[inline]
    fn extend<I: IntoIterator<Item = PlineVertex<T>>>(&mut self, iter: I) {
        self.vertex_data.extend(iter);
    }
}

impl<T> Polyline<T>
where
    T: Real,
{
    /// Empty open polyline.
    #[inline]
    pub fn new() -> Self {
        Polyline {
            vertex_data: Vec::new(),
            is_closed: false,
        }
    }

    /// Empty closed polyline.
    #[inline]
    pub fn new_closed() -> Self {
        Polyline {
            vertex_data: Vec::new(),
            is_closed: true,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize, is_closed: bool) -> Self {
        Polyline {
            vertex_data: Vec::with_capacity(capacity),
            is_closed,
        }
    }

    #[inline]
    pub fn from_vertexes<I>(vertexes: I, is_closed: bool) -> Self
    where
        I: IntoIterator<Item = PlineVertex<T>>,
    {
        Polyline {
            vertex_data: vertexes.into_iter().collect(),
            is_closed,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertex_data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_data.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    #[inline]
    pub fn set_is_closed(&mut self, is_closed: bool) {
        self.is_closed = is_closed;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<PlineVertex<T>> {
        self.vertex_data.get(index).copied()
    }

    #[inline]
    pub fn last(&self) -> Option<PlineVertex<T>> {
        self.vertex_data.last().copied()
    }

    #[inline]
    pub fn add(&mut self, x: T, y: T, bulge: T) {
        self.add_vertex(PlineVertex::new(x, y, bulge));
    }

    #[inline]
    pub fn add_vertex(&mut self, vertex: PlineVertex<T>) {
        self.vertex_data.push(vertex);
    }

    /// Append `vertex` unless its position equals the last vertex position (within
    /// `pos_equal_eps`), in which case only the last vertex bulge is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::polyline::*;
    /// let mut polyline = Polyline::new();
    /// polyline.add_or_replace(1.0, 1.0, 0.0, 1e-5);
    /// polyline.add_or_replace(1.0, 1.000001, 0.5, 1e-5);
    /// assert_eq!(polyline.len(), 1);
    /// assert_eq!(polyline[0], PlineVertex::new(1.0, 1.0, 0.5));
    /// ```
    pub fn add_or_replace_vertex(&mut self, vertex: PlineVertex<T>, pos_equal_eps: T) {
        match self.vertex_data.last_mut() {
            Some(last) if last.pos().fuzzy_eq_eps(vertex.pos(), pos_equal_eps) => {
                last.bulge = vertex.bulge;
            }
            _ => self.vertex_data.push(vertex),
        }
    }

    #[inline]
    pub fn add_or_replace(&mut self, x: T, y: T, bulge: T, pos_equal_eps: T) {
        self.add_or_replace_vertex(PlineVertex::new(x, y, bulge), pos_equal_eps);
    }

    /// Replace the last vertex. Panics if the polyline is empty.
    #[inline]
    pub fn set_last(&mut self, vertex: PlineVertex<T>) {
        let n = self.len();
        self.vertex_data[n - 1] = vertex;
    }

    #[inline]
    pub fn insert(&mut self, index: usize, vertex: PlineVertex<T>) {
        self.vertex_data.insert(index, vertex);
    }

    #[inline]
    pub fn remove(&mut self, index: usize) -> PlineVertex<T> {
        self.vertex_data.remove(index)
    }

    #[inline]
    pub fn remove_last(&mut self) -> Option<PlineVertex<T>> {
        self.vertex_data.pop()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertex_data.clear();
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.vertex_data.reserve(additional);
    }

    /// Append every vertex of `vertexes` using [Polyline::add_or_replace_vertex] so no two
    /// consecutive vertexes share a position.
    pub fn extend_remove_repeat<I>(&mut self, vertexes: I, pos_equal_eps: T)
    where
        I: IntoIterator<Item = PlineVertex<T>>,
    {
        for v in vertexes {
            self.add_or_replace_vertex(v, pos_equal_eps);
        }
    }

    /// Iterate over copies of the vertexes.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PlineVertex<T>> + ExactSizeIterator + '_ {
        self.vertex_data.iter().copied()
    }

    /// Number of segments: vertex count if closed, one less if open, zero with < 2 vertexes.
    #[inline]
    pub fn segment_count(&self) -> usize {
        match self.len() {
            0 | 1 => 0,
            n if self.is_closed => n,
            n => n - 1,
        }
    }

    /// Iterate over segment `(start, end)` vertex index pairs, the closing segment of a closed
    /// polyline is `(n - 1, 0)`.
    #[inline]
    pub fn iter_segment_indexes(&self) -> PlineSegIndexIterator {
        PlineSegIndexIterator::new(self.len(), self.is_closed)
    }

    /// Iterate over segments as `(v1, v2)` vertex pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// let pline = pline_closed![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0)];
    /// let seg_ends: Vec<_> = pline.iter_segments().map(|(_, v2)| v2.pos()).collect();
    /// assert_eq!(seg_ends.len(), 3);
    /// assert_eq!(seg_ends[2], pline[0].pos());
    /// ```
    #[inline]
    pub fn iter_segments(
        &self,
    ) -> impl Iterator<Item = (PlineVertex<T>, PlineVertex<T>)> + ExactSizeIterator + '_ {
        self.iter_segment_indexes()
            .map(move |(i, j)| (self.vertex_data[i], self.vertex_data[j]))
    }

    /// `i + 1`, wrapping to 0 past the last vertex (regardless of `is_closed`).
    #[inline]
    pub fn next_wrapping_index(&self, i: usize) -> usize {
        if i + 1 >= self.len() {
            0
        } else {
            i + 1
        }
    }

    /// `i - 1`, wrapping to the last vertex before 0 (regardless of `is_closed`).
    #[inline]
    pub fn prev_wrapping_index(&self, i: usize) -> usize {
        if i == 0 {
            self.len() - 1
        } else {
            i - 1
        }
    }

    /// Number of forward steps from `start_index` to `end_index`, wrapping past the last vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// let pline = pline_closed![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0), (0.0, 1.0, 0.0)];
    /// assert_eq!(pline.fwd_wrapping_dist(0, 2), 2);
    /// assert_eq!(pline.fwd_wrapping_dist(3, 1), 2);
    /// assert_eq!(pline.fwd_wrapping_dist(2, 2), 0);
    /// ```
    #[inline]
    pub fn fwd_wrapping_dist(&self, start_index: usize, end_index: usize) -> usize {
        debug_assert!(start_index < self.len(), "start_index out of bounds");
        if start_index <= end_index {
            end_index - start_index
        } else {
            self.len() - start_index + end_index
        }
    }

    /// Index `offset` steps forward of `start_index`, wrapping at most once.
    #[inline]
    pub fn fwd_wrapping_index(&self, start_index: usize, offset: usize) -> usize {
        debug_assert!(start_index < self.len(), "start_index out of bounds");
        debug_assert!(offset <= self.len(), "offset wraps more than once");
        let i = start_index + offset;
        if i < self.len() {
            i
        } else {
            i - self.len()
        }
    }

    /// Exact bounding box of all segments, `None` when there are no segments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::polyline::*;
    /// # use parallel_contours::core::traits::*;
    /// let mut polyline = Polyline::new();
    /// polyline.add(1.0, 1.0, 1.0);
    /// assert!(polyline.extents().is_none());
    /// polyline.add(3.0, 1.0, 1.0);
    /// let extents = polyline.extents().unwrap();
    /// assert!(extents.min_y.fuzzy_eq(0.0));
    /// assert!(extents.max_y.fuzzy_eq(1.0));
    ///
    /// // closing adds the upper half circle
    /// polyline.set_is_closed(true);
    /// assert!(polyline.extents().unwrap().max_y.fuzzy_eq(2.0));
    /// ```
    pub fn extents(&self) -> Option<AABB<T>> {
        let mut segs = self.iter_segments();
        let (v1, v2) = segs.next()?;
        let mut result = seg_bounding_box(v1, v2);
        for (v1, v2) in segs {
            result.expand(&seg_bounding_box(v1, v2));
        }
        Some(result)
    }

    /// Sum of all segment lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_open;
    /// # use parallel_contours::core::traits::*;
    /// let mut polyline = pline_open![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
    /// assert!(polyline.path_length().fuzzy_eq(std::f64::consts::PI));
    /// polyline.set_is_closed(true);
    /// assert!(polyline.path_length().fuzzy_eq(2.0 * std::f64::consts::PI));
    /// ```
    pub fn path_length(&self) -> T {
        self.iter_segments()
            .fold(T::zero(), |acc, (v1, v2)| acc + seg_length(v1, v2))
    }

    /// Signed enclosed area, positive for counter clockwise and zero for open polylines.
    ///
    /// Shoelace sum over the vertexes plus the signed circular segment area of each arc.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// # use parallel_contours::core::traits::*;
    /// let mut circle = pline_closed![(1.0, 1.0, 1.0), (3.0, 1.0, 1.0)];
    /// assert!(circle.area().fuzzy_eq(std::f64::consts::PI));
    /// circle.invert_direction_mut();
    /// assert!(circle.area().fuzzy_eq(-std::f64::consts::PI));
    /// ```
    pub fn area(&self) -> T {
        if !self.is_closed {
            return T::zero();
        }

        let double_area = self.iter_segments().fold(T::zero(), |acc, (v1, v2)| {
            let mut acc = acc + v1.pos().perp_dot(v2.pos());
            if !v1.bulge_is_zero() {
                // circular segment = sector - triangle(center, v1, v2)
                let b = v1.bulge.abs();
                let chord = (v2.pos() - v1.pos()).length();
                let radius = chord * (b * b + T::one()) / (T::four() * b);
                let center_to_chord = radius - b * chord / T::two();
                let double_seg_area =
                    angle_from_bulge(b) * radius * radius - chord * center_to_chord;
                if v1.bulge_is_neg() {
                    acc = acc - double_seg_area;
                } else {
                    acc = acc + double_seg_area;
                }
            }
            acc
        });

        double_area / T::two()
    }

    /// Winding direction from the sign of [Polyline::area]. Not meaningful for self intersecting
    /// polylines.
    pub fn orientation(&self) -> PlineOrientation {
        if !self.is_closed {
            PlineOrientation::Open
        } else if self.area() < T::zero() {
            PlineOrientation::Clockwise
        } else {
            PlineOrientation::CounterClockwise
        }
    }

    /// Closest point on the polyline to `point`, `None` if the polyline is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_open;
    /// # use parallel_contours::core::math::*;
    /// # use parallel_contours::core::traits::*;
    /// let pline = pline_open![(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (10.0, 10.0, 0.0)];
    /// let result = pline.closest_point(Vector2::new(12.0, 4.0)).unwrap();
    /// assert_eq!(result.seg_start_index, 1);
    /// assert!(result.seg_point.fuzzy_eq(Vector2::new(10.0, 4.0)));
    /// assert!(result.distance.fuzzy_eq(2.0));
    /// ```
    pub fn closest_point(&self, point: Vector2<T>) -> Option<ClosestPointResult<T>> {
        let first = self.get(0)?;
        let mut result = ClosestPointResult {
            seg_start_index: 0,
            seg_point: first.pos(),
            distance: (first.pos() - point).length(),
        };

        let mut min_dist_sq = <T as Real>::max_value();
        for (i, j) in self.iter_segment_indexes() {
            let cp = seg_closest_point(self[i], self[j], point);
            let dist_sq = (point - cp).length_squared();
            if dist_sq < min_dist_sq {
                min_dist_sq = dist_sq;
                result.seg_start_index = i;
                result.seg_point = cp;
            }
        }

        if min_dist_sq < <T as Real>::max_value() {
            result.distance = min_dist_sq.sqrt();
        }

        Some(result)
    }

    /// Copy of the polyline without consecutive vertexes at the same position (and without a
    /// closing vertex on top of the first). The bulge of the last vertex at a position is kept.
    ///
    /// Returns `None` when nothing would be removed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// # use parallel_contours::polyline::*;
    /// let pline = pline_closed![(2.0, 2.0, 0.5), (2.0, 2.0, 1.0), (3.0, 3.0, 1.0), (3.0, 3.0, 0.5)];
    /// let result = pline.remove_repeat_pos(1e-5).unwrap();
    /// assert_eq!(result.len(), 2);
    /// assert!(result[0].fuzzy_eq(PlineVertex::new(2.0, 2.0, 1.0)));
    /// assert!(result[1].fuzzy_eq(PlineVertex::new(3.0, 3.0, 0.5)));
    /// ```
    pub fn remove_repeat_pos(&self, pos_equal_eps: T) -> Option<Polyline<T>> {
        let (first, last) = match (self.get(0), self.last()) {
            (Some(first), Some(last)) if self.len() > 1 => (first, last),
            _ => return None,
        };

        let has_repeat = self
            .vertex_data
            .windows(2)
            .any(|w| w[0].pos().fuzzy_eq_eps(w[1].pos(), pos_equal_eps));
        let closing_repeat = self.is_closed && last.pos().fuzzy_eq_eps(first.pos(), pos_equal_eps);
        if !has_repeat && !closing_repeat {
            return None;
        }

        let mut result = Polyline::with_capacity(self.len(), self.is_closed);
        result.extend_remove_repeat(self.iter(), pos_equal_eps);
        if self.is_closed && result.len() > 1 {
            if let (Some(first), Some(last)) = (result.get(0), result.last()) {
                if last.pos().fuzzy_eq_eps(first.pos(), pos_equal_eps) {
                    result.remove_last();
                }
            }
        }

        Some(result)
    }

    /// Copy of the polyline running in the opposite direction.
    pub fn invert_direction(&self) -> Polyline<T> {
        let mut result = self.clone();
        result.invert_direction_mut();
        result
    }

    /// Reverse the direction of travel in place.
    ///
    /// Vertex order is reversed and each bulge moves to the vertex that now starts its segment
    /// with its sign flipped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_open;
    /// # use parallel_contours::polyline::*;
    /// let mut pline = pline_open![(0.0, 0.0, 0.5), (1.0, 1.0, 0.0)];
    /// pline.invert_direction_mut();
    /// assert_eq!(pline[0], PlineVertex::new(1.0, 1.0, -0.5));
    /// assert_eq!(pline[1], PlineVertex::new(0.0, 0.0, 0.0));
    /// ```
    pub fn invert_direction_mut(&mut self) {
        let n = self.len();
        if n < 2 {
            return;
        }

        self.vertex_data.reverse();
        // after reversal segment i runs from vertex i to i + 1 and its bulge sits on i + 1
        let wrap_bulge = self.vertex_data[0].bulge;
        for i in 0..n - 1 {
            self.vertex_data[i].bulge = -self.vertex_data[i + 1].bulge;
        }

        self.vertex_data[n - 1].bulge = if self.is_closed {
            -wrap_bulge
        } else {
            T::zero()
        };
    }

    /// Uniformly scale all vertex positions about the origin.
    pub fn scale_mut(&mut self, scale_factor: T) {
        for v in self.vertex_data.iter_mut() {
            v.x = v.x * scale_factor;
            v.y = v.y * scale_factor;
        }
    }

    pub fn translate_mut(&mut self, x: T, y: T) {
        for v in self.vertex_data.iter_mut() {
            v.x = v.x + x;
            v.y = v.y + y;
        }
    }

    /// Fuzzy compare every vertex and the closed state.
    pub fn fuzzy_eq_eps(&self, other: &Polyline<T>, eps: T) -> bool {
        self.is_closed == other.is_closed
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a.fuzzy_eq_eps(b, eps))
    }

    #[inline]
    pub fn fuzzy_eq(&self, other: &Polyline<T>) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Spatial index of the segment boxes keyed by segment start index, using
    /// [seg_fast_approx_bounding_box] (boxes may be larger than the segments).
    ///
    /// Returns `None` if a vertex coordinate or bulge is not finite.
    pub fn create_approx_aabb_index(&self) -> Option<StaticAABB2DIndex<T>> {
        self.build_seg_index(seg_fast_approx_bounding_box)
    }

    /// Spatial index of the exact segment boxes keyed by segment start index.
    ///
    /// Returns `None` if a vertex coordinate or bulge is not finite.
    pub fn create_aabb_index(&self) -> Option<StaticAABB2DIndex<T>> {
        self.build_seg_index(seg_bounding_box)
    }

    /// [create_approx_aabb_index](Self::create_approx_aabb_index) for internal callers which
    /// require finite input.
    pub(crate) fn finite_approx_aabb_index(&self) -> StaticAABB2DIndex<T> {
        match self.create_approx_aabb_index() {
            Some(index) => index,
            None => panic!("polyline segment index requires finite vertex values"),
        }
    }

    fn build_seg_index<F>(&self, seg_box: F) -> Option<StaticAABB2DIndex<T>>
    where
        F: Fn(PlineVertex<T>, PlineVertex<T>) -> AABB<T>,
    {
        if !self
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.bulge.is_finite())
        {
            return None;
        }

        let mut builder = StaticAABB2DIndexBuilder::new(self.segment_count());
        for (v1, v2) in self.iter_segments() {
            let bb = seg_box(v1, v2);
            builder.add(bb.min_x, bb.min_y, bb.max_x, bb.max_y);
        }

        match builder.build() {
            Ok(index) => Some(index),
            Err(SpatialIndexBuildError::ItemCountError { .. }) => {
                unreachable!("one box is added per segment")
            }
            Err(SpatialIndexBuildError::NumericCastError) => None,
        }
    }

    /// Visit all self intersects using default options.
    ///
    /// See [ControlFlow](crate::core::traits::ControlFlow) for stopping early.
    #[inline]
    pub fn visit_self_intersects<C, V>(&self, visitor: &mut V) -> C
    where
        C: ControlFlow,
        V: PlineIntersectVisitor<T, C>,
    {
        self.visit_self_intersects_opt(visitor, &PlineSelfIntersectOptions::new())
    }

    /// Visit self intersects selected by `options.include`. Local (adjacent segment) intersects
    /// are visited before global ones.
    pub fn visit_self_intersects_opt<C, V>(
        &self,
        visitor: &mut V,
        options: &PlineSelfIntersectOptions<T>,
    ) -> C
    where
        C: ControlFlow,
        V: PlineIntersectVisitor<T, C>,
    {
        if self.len() < 2 {
            return C::continuing();
        }

        if options.include != SelfIntersectsInclude::Global {
            try_cf!(visit_local_self_intersects(
                self,
                visitor,
                options.pos_equal_eps
            ));
            if options.include == SelfIntersectsInclude::Local {
                return C::continuing();
            }
        }

        let constructed_index;
        let index = match options.aabb_index {
            Some(index) => index,
            None => {
                constructed_index = self.finite_approx_aabb_index();
                &constructed_index
            }
        };

        visit_global_self_intersects(self, index, visitor, options.pos_equal_eps)
    }

    /// True if the polyline has any self intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_open;
    /// let crossing = pline_open![(0.0, 0.0, 0.0), (0.0, 2.0, 0.0), (1.0, 1.0, 0.0), (-1.0, 1.0, 0.0)];
    /// assert!(crossing.scan_for_self_intersect());
    /// let simple = pline_open![(0.0, 0.0, 0.0), (0.0, 2.0, 0.0), (1.0, 1.0, 0.0)];
    /// assert!(!simple.scan_for_self_intersect());
    /// ```
    #[inline]
    pub fn scan_for_self_intersect(&self) -> bool {
        self.scan_for_self_intersect_opt(&PlineSelfIntersectOptions::new())
    }

    pub fn scan_for_self_intersect_opt(&self, options: &PlineSelfIntersectOptions<T>) -> bool {
        let mut found = false;
        self.visit_self_intersects_opt(
            &mut |_: PlineIntersect<T>| {
                found = true;
                Control::Break(())
            },
            options,
        );
        found
    }

    /// All intersects between this polyline and `other` using default options.
    ///
    /// `start_index1` of each result refers to `self`, `start_index2` to `other`.
    #[inline]
    pub fn find_intersects(&self, other: &Polyline<T>) -> PlineIntersectsCollection<T> {
        self.find_intersects_opt(other, &FindIntersectsOptions::new())
    }

    #[inline]
    pub fn find_intersects_opt(
        &self,
        other: &Polyline<T>,
        options: &FindIntersectsOptions<T>,
    ) -> PlineIntersectsCollection<T> {
        find_intersects(self, other, options)
    }

    /// Parallel offset polylines at `offset` using default options.
    ///
    /// Positive offsets are to the left of the direction of travel (inward for a counter
    /// clockwise polyline), negative to the right.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// # use parallel_contours::polyline::*;
    /// // counter clockwise circle of radius 0.5 about (0.5, 0)
    /// let pline = pline_closed![(0.0, 0.0, 1.0), (1.0, 0.0, 1.0)];
    /// let results = pline.parallel_offset(0.2);
    /// assert_eq!(results.len(), 1);
    /// assert!(results[0][0].fuzzy_eq(PlineVertex::new(0.2, 0.0, 1.0)));
    /// assert!(results[0][1].fuzzy_eq(PlineVertex::new(0.8, 0.0, 1.0)));
    /// ```
    #[inline]
    pub fn parallel_offset(&self, offset: T) -> Vec<Polyline<T>> {
        self.parallel_offset_opt(offset, &PlineOffsetOptions::new())
    }

    /// Parallel offset polylines at `offset` with the options given.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parallel_contours::pline_closed;
    /// # use parallel_contours::polyline::*;
    /// let pline = pline_closed![(0.0, 0.0, 1.0), (1.0, 0.0, 1.0)];
    /// let aabb_index = pline.create_approx_aabb_index().unwrap();
    /// let options = PlineOffsetOptions {
    ///     aabb_index: Some(&aabb_index),
    ///     handle_self_intersects: true,
    ///     ..Default::default()
    /// };
    /// let results = pline.parallel_offset_opt(0.2, &options);
    /// assert_eq!(results.len(), 1);
    /// assert!(results[0][0].fuzzy_eq(PlineVertex::new(0.2, 0.0, 1.0)));
    /// assert!(results[0][1].fuzzy_eq(PlineVertex::new(0.8, 0.0, 1.0)));
    /// ```
    #[inline]
    pub fn parallel_offset_opt(&self, offset: T, options: &PlineOffsetOptions<T>) -> Vec<Polyline<T>> {
        parallel_offset(self, offset, options)
    }
}

/// Iterator over the `(start, end)` vertex indexes of each polyline segment.
#[derive(Debug, Clone)]
pub struct PlineSegIndexIterator {
    next_start: usize,
    remaining: usize,
    vertex_count: usize,
}

impl PlineSegIndexIterator {
    #[inline]
    pub fn new(vertex_count: usize, is_closed: bool) -> Self {
        let remaining = match vertex_count {
            0 | 1 => 0,
            n if is_closed => n,
            n => n - 1,
        };
        PlineSegIndexIterator {
            next_start: 0,
            remaining,
            vertex_count,
        }
    }
}

impl Iterator for PlineSegIndexIterator {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let i = self.next_start;
        self.next_start += 1;
        let j = if self.next_start == self.vertex_count {
            0
        } else {
            self.next_start
        };
        Some((i, j))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PlineSegIndexIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seg_indexes_wrap_only_when_closed() {
        let open: Vec<_> = PlineSegIndexIterator::new(3, false).collect();
        assert_eq!(open, vec![(0, 1), (1, 2)]);
        let closed: Vec<_> = PlineSegIndexIterator::new(3, true).collect();
        assert_eq!(closed, vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(PlineSegIndexIterator::new(1, true).count(), 0);
    }

    #[test]
    fn invert_closed_moves_wrap_bulge() {
        let mut pline = Polyline::new_closed();
        pline.add(0.0, 0.0, 0.1);
        pline.add(1.0, 0.0, 0.2);
        pline.add(1.0, 1.0, 0.3);
        pline.invert_direction_mut();
        assert_eq!(pline[0], PlineVertex::new(1.0, 1.0, -0.2));
        assert_eq!(pline[1], PlineVertex::new(1.0, 0.0, -0.1));
        assert_eq!(pline[2], PlineVertex::new(0.0, 0.0, -0.3));
    }

    #[test]
    fn single_vertex_closest_point() {
        let mut pline = Polyline::new();
        pline.add(1.0, 1.0, 0.0);
        let r = pline.closest_point(Vector2::new(1.0, 0.0)).unwrap();
        assert_eq!(r.seg_start_index, 0);
        assert_eq!(r.distance, 1.0);
    }
}
