//! Option, result and intersect record types used by [Polyline](super::Polyline) operations.

use crate::{
    core::{
        math::Vector2,
        traits::{ControlFlow, Real},
    },
    spatial_index::StaticAABB2DIndex,
};

/// Winding direction of a polyline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlineOrientation {
    /// Polyline is open so has no winding direction.
    Open,
    Clockwise,
    CounterClockwise,
}

/// Result of [Polyline::closest_point](super::Polyline::closest_point).
#[derive(Debug, Copy, Clone)]
pub struct ClosestPointResult<T>
where
    T: Real,
{
    /// Start vertex index of the segment holding the closest point.
    pub seg_start_index: usize,
    pub seg_point: Vector2<T>,
    pub distance: T,
}

/// Parameters for [Polyline::parallel_offset_opt](super::Polyline::parallel_offset_opt).
#[derive(Debug, Clone)]
pub struct PlineOffsetOptions<'a, T>
where
    T: Real,
{
    /// Prebuilt spatial index of the input polyline's segments. Boxes may be larger than the
    /// segments (e.g. from [create_approx_aabb_index](super::Polyline::create_approx_aabb_index))
    /// but never smaller. Built internally when `None`.
    pub aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    /// Cut closed polylines at their own self intersects as well. Costs a second (dual) raw
    /// offset. Open polylines are always handled this way.
    pub handle_self_intersects: bool,
    /// Distance under which two positions are considered the same.
    pub pos_equal_eps: T,
    /// Distance under which a slice end joins the start of another slice when stitching.
    pub slice_join_eps: T,
    /// Allowed shortfall from the offset distance before a slice point is rejected as too close
    /// to the input.
    pub offset_dist_eps: T,
}

impl<T> PlineOffsetOptions<'_, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            aabb_index: None,
            handle_self_intersects: false,
            pos_equal_eps: T::from(1e-5).unwrap(),
            slice_join_eps: T::from(1e-4).unwrap(),
            offset_dist_eps: T::from(1e-4).unwrap(),
        }
    }
}

impl<T> Default for PlineOffsetOptions<'_, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Which self intersects to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfIntersectsInclude {
    /// Local and global.
    All,
    /// Only between adjacent segments.
    Local,
    /// Only between non adjacent segments.
    Global,
}

/// Parameters for [Polyline::visit_self_intersects_opt](super::Polyline::visit_self_intersects_opt).
#[derive(Debug, Clone)]
pub struct PlineSelfIntersectOptions<'a, T>
where
    T: Real,
{
    /// Prebuilt spatial index of the polyline's segments, built internally when `None`.
    pub aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    pub pos_equal_eps: T,
    pub include: SelfIntersectsInclude,
}

impl<T> PlineSelfIntersectOptions<'_, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            aabb_index: None,
            pos_equal_eps: T::from(1e-5).unwrap(),
            include: SelfIntersectsInclude::All,
        }
    }
}

impl<T> Default for PlineSelfIntersectOptions<'_, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for [Polyline::find_intersects_opt](super::Polyline::find_intersects_opt).
#[derive(Debug, Clone)]
pub struct FindIntersectsOptions<'a, T>
where
    T: Real,
{
    /// Prebuilt spatial index of the first polyline, built internally when `None`.
    pub pline1_aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    pub pos_equal_eps: T,
}

impl<T> FindIntersectsOptions<'_, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            pline1_aabb_index: None,
            pos_equal_eps: T::from(1e-5).unwrap(),
        }
    }
}

impl<T> Default for FindIntersectsOptions<'_, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Intersect at a single point between the segment starting at `start_index1` and the segment
/// starting at `start_index2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineBasicIntersect<T> {
    pub start_index1: usize,
    pub start_index2: usize,
    pub point: Vector2<T>,
}

impl<T> PlineBasicIntersect<T> {
    #[inline]
    pub fn new(start_index1: usize, start_index2: usize, point: Vector2<T>) -> Self {
        Self {
            start_index1,
            start_index2,
            point,
        }
    }
}

/// Overlap between two segments, from `point1` to `point2` along the second segment's
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineOverlappingIntersect<T> {
    pub start_index1: usize,
    pub start_index2: usize,
    pub point1: Vector2<T>,
    pub point2: Vector2<T>,
}

impl<T> PlineOverlappingIntersect<T> {
    #[inline]
    pub fn new(
        start_index1: usize,
        start_index2: usize,
        point1: Vector2<T>,
        point2: Vector2<T>,
    ) -> Self {
        Self {
            start_index1,
            start_index2,
            point1,
            point2,
        }
    }
}

/// Either kind of polyline intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlineIntersect<T> {
    Basic(PlineBasicIntersect<T>),
    Overlapping(PlineOverlappingIntersect<T>),
}

impl<T> PlineIntersect<T> {
    #[inline]
    pub fn new_basic(start_index1: usize, start_index2: usize, point: Vector2<T>) -> Self {
        PlineIntersect::Basic(PlineBasicIntersect::new(start_index1, start_index2, point))
    }

    #[inline]
    pub fn new_overlapping(
        start_index1: usize,
        start_index2: usize,
        point1: Vector2<T>,
        point2: Vector2<T>,
    ) -> Self {
        PlineIntersect::Overlapping(PlineOverlappingIntersect::new(
            start_index1,
            start_index2,
            point1,
            point2,
        ))
    }
}

/// Receives intersects as they are found. Implemented for any `FnMut(PlineIntersect<T>) -> C`.
pub trait PlineIntersectVisitor<T, C>
where
    T: Real,
    C: ControlFlow,
{
    fn visit_basic_intr(&mut self, intr: PlineBasicIntersect<T>) -> C;
    fn visit_overlapping_intr(&mut self, intr: PlineOverlappingIntersect<T>) -> C;
}

impl<T, C, F> PlineIntersectVisitor<T, C> for F
where
    T: Real,
    C: ControlFlow,
    F: FnMut(PlineIntersect<T>) -> C,
{
    #[inline]
    fn visit_basic_intr(&mut self, intr: PlineBasicIntersect<T>) -> C {
        self(PlineIntersect::Basic(intr))
    }

    #[inline]
    fn visit_overlapping_intr(&mut self, intr: PlineOverlappingIntersect<T>) -> C {
        self(PlineIntersect::Overlapping(intr))
    }
}

/// Basic and overlapping intersects collected into separate lists.
#[derive(Debug, Clone, Default)]
pub struct PlineIntersectsCollection<T> {
    pub basic_intersects: Vec<PlineBasicIntersect<T>>,
    pub overlapping_intersects: Vec<PlineOverlappingIntersect<T>>,
}

impl<T> PlineIntersectsCollection<T> {
    #[inline]
    pub fn new(
        basic_intersects: Vec<PlineBasicIntersect<T>>,
        overlapping_intersects: Vec<PlineOverlappingIntersect<T>>,
    ) -> Self {
        Self {
            basic_intersects,
            overlapping_intersects,
        }
    }

    #[inline]
    pub fn new_empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.basic_intersects.is_empty() && self.overlapping_intersects.is_empty()
    }
}
