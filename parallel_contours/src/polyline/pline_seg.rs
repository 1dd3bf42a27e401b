//! Functions operating on a single polyline segment given by its start vertex `v1` and end vertex
//! `v2` (the bulge of `v1` describes the segment).
use super::PlineVertex;
use crate::{
    core::{
        math::{
            angle, angle_is_within_sweep, bulge_from_angle, delta_angle_signed, dist_squared,
            line_seg_closest_point, midpoint, min_max, point_on_circle, point_within_arc_sweep,
            Vector2,
        },
        traits::Real,
    },
    spatial_index::AABB,
};

/// Radius and center of the arc segment `v1->v2`.
///
/// `v1.bulge` must not be zero and `v1` must not be on top of `v2` (checked by debug assertions).
///
/// # Examples
///
/// ```
/// # use parallel_contours::polyline::*;
/// # use parallel_contours::core::traits::*;
/// # use parallel_contours::core::math::*;
/// // counter clockwise half circle from (0, 0) to (2, 0)
/// let v1 = PlineVertex::new(0.0, 0.0, 1.0);
/// let v2 = PlineVertex::new(2.0, 0.0, 0.0);
/// let (radius, center) = seg_arc_radius_and_center(v1, v2);
/// assert!(radius.fuzzy_eq(1.0));
/// assert!(center.fuzzy_eq(Vector2::new(1.0, 0.0)));
///```
pub fn seg_arc_radius_and_center<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> (T, Vector2<T>)
where
    T: Real,
{
    debug_assert!(!v1.bulge_is_zero(), "segment must be an arc");
    debug_assert!(
        !v1.pos().fuzzy_eq(v2.pos()),
        "arc segment end points must not coincide"
    );

    let b = v1.bulge.abs();
    let chord = v2.pos() - v1.pos();
    let chord_len = chord.length();
    let radius = chord_len * (b * b + T::one()) / (T::four() * b);

    // distance from chord midpoint to center along the chord's left normal
    let sagitta = b * chord_len / T::two();
    let center_dist = radius - sagitta;
    let mut to_center = chord.perp().scale(center_dist / chord_len);
    if v1.bulge_is_neg() {
        to_center = -to_center;
    }

    (radius, midpoint(v1.pos(), v2.pos()) + to_center)
}

/// Result of [seg_split_at_point].
#[derive(Debug, Copy, Clone)]
pub struct SplitResult<T = f64>
where
    T: Real,
{
    /// Start vertex of the segment with its bulge adjusted to end at the split point.
    pub updated_start: PlineVertex<T>,
    /// Vertex at the split point with the bulge that continues to the original segment end.
    pub split_vertex: PlineVertex<T>,
}

/// Split the segment `v1->v2` at `point_on_seg` (assumed to lie on the segment).
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::polyline::*;
/// // counter clockwise half circle from (0, 0) to (1, 0) split at its lowest point
/// let v1 = PlineVertex::new(0.0, 0.0, 1.0);
/// let v2 = PlineVertex::new(1.0, 0.0, 0.0);
/// let SplitResult { updated_start, split_vertex } =
///     seg_split_at_point(v1, v2, Vector2::new(0.5, -0.5), 1e-5);
/// let quarter_circle_bulge = (std::f64::consts::PI / 8.0).tan();
/// assert!(updated_start.fuzzy_eq(v1.with_bulge(quarter_circle_bulge)));
/// assert!(split_vertex.fuzzy_eq(PlineVertex::new(0.5, -0.5, quarter_circle_bulge)));
/// ```
pub fn seg_split_at_point<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    point_on_seg: Vector2<T>,
    pos_equal_eps: T,
) -> SplitResult<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        return SplitResult {
            updated_start: v1,
            split_vertex: PlineVertex::from_vector2(point_on_seg, T::zero()),
        };
    }

    let at_start = v1.pos().fuzzy_eq_eps(point_on_seg, pos_equal_eps);
    if at_start || v1.pos().fuzzy_eq_eps(v2.pos(), pos_equal_eps) {
        // zero length first half, whole arc continues from the split point
        return SplitResult {
            updated_start: PlineVertex::from_vector2(point_on_seg, T::zero()),
            split_vertex: PlineVertex::from_vector2(point_on_seg, v1.bulge),
        };
    }

    if v2.pos().fuzzy_eq_eps(point_on_seg, pos_equal_eps) {
        return SplitResult {
            updated_start: v1,
            split_vertex: v2.with_bulge(T::zero()),
        };
    }

    let (_, center) = seg_arc_radius_and_center(v1, v2);
    let is_cw = v1.bulge_is_neg();
    let split_angle = angle(center, point_on_seg);
    let sweep_to_split = delta_angle_signed(angle(center, v1.pos()), split_angle, is_cw);
    let sweep_from_split = delta_angle_signed(split_angle, angle(center, v2.pos()), is_cw);

    SplitResult {
        updated_start: v1.with_bulge(bulge_from_angle(sweep_to_split)),
        split_vertex: PlineVertex::from_vector2(point_on_seg, bulge_from_angle(sweep_from_split)),
    }
}

/// Direction of travel along the segment `v1->v2` at `point_on_seg` (not normalized).
///
/// # Examples
///
/// ```
/// # use parallel_contours::polyline::*;
/// # use parallel_contours::core::math::*;
/// // counter clockwise half circle from (2, 2) to (4, 2)
/// let v1 = PlineVertex::new(2.0, 2.0, 1.0);
/// let v2 = PlineVertex::new(4.0, 2.0, 0.0);
/// let dir = |p| seg_tangent_vector(v1, v2, p).normalize();
/// assert!(dir(Vector2::new(3.0, 1.0)).fuzzy_eq(Vector2::new(1.0, 0.0)));
/// assert!(dir(v1.pos()).fuzzy_eq(Vector2::new(0.0, -1.0)));
/// assert!(dir(v2.pos()).fuzzy_eq(Vector2::new(0.0, 1.0)));
/// ```
pub fn seg_tangent_vector<T>(
    v1: PlineVertex<T>,
    v2: PlineVertex<T>,
    point_on_seg: Vector2<T>,
) -> Vector2<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        return v2.pos() - v1.pos();
    }

    let (_, center) = seg_arc_radius_and_center(v1, v2);
    let radial = (point_on_seg - center).perp();
    if v1.bulge_is_pos() {
        radial
    } else {
        -radial
    }
}

/// Closest point on the segment `v1->v2` to `point`. When several points are equally close any
/// one of them may be returned.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::polyline::*;
/// // counter clockwise half circle from (2, 2) to (4, 2)
/// let v1 = PlineVertex::new(2.0, 2.0, 1.0);
/// let v2 = PlineVertex::new(4.0, 2.0, 0.0);
/// assert!(seg_closest_point(v1, v2, Vector2::new(3.0, 0.0)).fuzzy_eq(Vector2::new(3.0, 1.0)));
/// assert!(seg_closest_point(v1, v2, Vector2::new(3.0, 1.2)).fuzzy_eq(Vector2::new(3.0, 1.0)));
/// assert!(seg_closest_point(v1, v2, Vector2::new(1.0, 5.0)).fuzzy_eq(v1.pos()));
/// ```
pub fn seg_closest_point<T>(v1: PlineVertex<T>, v2: PlineVertex<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    if v1.bulge_is_zero() {
        return line_seg_closest_point(v1.pos(), v2.pos(), point);
    }

    let (radius, center) = seg_arc_radius_and_center(v1, v2);
    if point.fuzzy_eq(center) {
        // every arc point is equidistant
        return v1.pos();
    }

    if point_within_arc_sweep(center, v1.pos(), v2.pos(), v1.bulge_is_neg(), point) {
        return center + (point - center).normalize().scale(radius);
    }

    if dist_squared(v1.pos(), point) < dist_squared(v2.pos(), point) {
        v1.pos()
    } else {
        v2.pos()
    }
}

fn line_seg_bounding_box<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> AABB<T>
where
    T: Real,
{
    let (min_x, max_x) = min_max(v1.x, v2.x);
    let (min_y, max_y) = min_max(v1.y, v2.y);
    AABB::new(min_x, min_y, max_x, max_y)
}

/// Axis aligned box that always contains the segment `v1->v2` but may be larger than its exact
/// bounds when it is an arc. Cheaper than [seg_bounding_box] for arcs.
pub fn seg_fast_approx_bounding_box<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> AABB<T>
where
    T: Real,
{
    let mut bounds = line_seg_bounding_box(v1, v2);
    if v1.bulge_is_zero() {
        return bounds;
    }

    // chord pushed outward by the sagitta, the rectangle it sweeps covers the arc
    let half_b = v1.bulge / T::two();
    let shift = Vector2::new(half_b * (v2.y - v1.y), -half_b * (v2.x - v1.x));
    let shifted = line_seg_bounding_box(
        PlineVertex::from_vector2(v1.pos() + shift, T::zero()),
        PlineVertex::from_vector2(v2.pos() + shift, T::zero()),
    );
    bounds.expand(&shifted);
    bounds
}

/// Exact axis aligned bounding box of the segment `v1->v2`.
pub fn seg_bounding_box<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> AABB<T>
where
    T: Real,
{
    if v1.bulge_is_zero() || v1.pos().fuzzy_eq(v2.pos()) {
        return line_seg_bounding_box(v1, v2);
    }

    let (radius, center) = seg_arc_radius_and_center(v1, v2);
    let start_angle = angle(center, v1.pos());
    let sweep = delta_angle_signed(start_angle, angle(center, v2.pos()), v1.bulge_is_neg());
    let sweeps_through = |a: T| angle_is_within_sweep(a, start_angle, sweep);

    let mut bounds = line_seg_bounding_box(v1, v2);
    let half_pi = T::pi() / T::two();
    if sweeps_through(T::zero()) {
        bounds.max_x = center.x + radius;
    }
    if sweeps_through(half_pi) {
        bounds.max_y = center.y + radius;
    }
    if sweeps_through(T::pi()) {
        bounds.min_x = center.x - radius;
    }
    if sweeps_through(T::pi() + half_pi) {
        bounds.min_y = center.y - radius;
    }

    bounds
}

/// Path length of the segment `v1->v2`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::polyline::*;
/// # use parallel_contours::core::traits::*;
/// // radius 1 half circle
/// let v1 = PlineVertex::new(2.0, 2.0, 1.0);
/// let v2 = PlineVertex::new(4.0, 2.0, 0.0);
/// assert!(seg_length(v1, v2).fuzzy_eq(std::f64::consts::PI));
///
/// let v1 = PlineVertex::new(2.0, 2.0, 0.0);
/// let v2 = PlineVertex::new(5.0, 6.0, 0.0);
/// assert!(seg_length(v1, v2).fuzzy_eq(5.0));
/// ```
pub fn seg_length<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> T
where
    T: Real,
{
    if v1.pos().fuzzy_eq(v2.pos()) {
        return T::zero();
    }

    if v1.bulge_is_zero() {
        return (v2.pos() - v1.pos()).length();
    }

    let (radius, center) = seg_arc_radius_and_center(v1, v2);
    let sweep = delta_angle_signed(
        angle(center, v1.pos()),
        angle(center, v2.pos()),
        v1.bulge_is_neg(),
    );
    radius * sweep.abs()
}

/// Point half way along the path of the segment `v1->v2`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::polyline::*;
/// # use parallel_contours::core::math::*;
/// let v1 = PlineVertex::new(2.0, 2.0, 1.0);
/// let v2 = PlineVertex::new(4.0, 2.0, 0.0);
/// assert!(seg_midpoint(v1, v2).fuzzy_eq(Vector2::new(3.0, 1.0)));
/// assert!(seg_midpoint(v1.with_bulge(0.0), v2).fuzzy_eq(Vector2::new(3.0, 2.0)));
/// ```
pub fn seg_midpoint<T>(v1: PlineVertex<T>, v2: PlineVertex<T>) -> Vector2<T>
where
    T: Real,
{
    if v1.bulge_is_zero() || v1.pos().fuzzy_eq(v2.pos()) {
        return midpoint(v1.pos(), v2.pos());
    }

    let (radius, center) = seg_arc_radius_and_center(v1, v2);
    let start_angle = angle(center, v1.pos());
    let sweep = delta_angle_signed(start_angle, angle(center, v2.pos()), v1.bulge_is_neg());
    point_on_circle(radius, center, start_angle + sweep / T::two())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn clockwise_arc_center_is_right_of_chord() {
        let v1 = PlineVertex::new(0.0, 0.0, -1.0);
        let v2 = PlineVertex::new(2.0, 0.0, 0.0);
        let (r, c) = seg_arc_radius_and_center(v1, v2);
        assert!(r.fuzzy_eq(1.0));
        assert!(c.fuzzy_eq(Vector2::new(1.0, 0.0)));
        // clockwise half circle from (0,0) to (2,0) bulges up
        assert!(seg_midpoint(v1, v2).fuzzy_eq(Vector2::new(1.0, 1.0)));
    }

    #[test]
    fn quarter_arc_bounds() {
        let b = (std::f64::consts::PI / 8.0).tan();
        // counter clockwise quarter circle centered at origin from (1, 0) to (0, 1)
        let v1 = PlineVertex::new(1.0, 0.0, b);
        let v2 = PlineVertex::new(0.0, 1.0, 0.0);
        let exact = seg_bounding_box(v1, v2);
        assert!(exact.min_x.fuzzy_eq(0.0));
        assert!(exact.min_y.fuzzy_eq(0.0));
        assert!(exact.max_x.fuzzy_eq(1.0));
        assert!(exact.max_y.fuzzy_eq(1.0));

        let approx = seg_fast_approx_bounding_box(v1, v2);
        assert!(approx.min_x <= exact.min_x && approx.min_y <= exact.min_y);
        assert!(approx.max_x >= exact.max_x && approx.max_y >= exact.max_y);
    }

    #[test]
    fn half_circle_bounds_reach_radius() {
        let v1 = PlineVertex::new(0.0, 0.0, 1.0);
        let v2 = PlineVertex::new(2.0, 0.0, 0.0);
        let bb = seg_bounding_box(v1, v2);
        assert!(bb.min_y.fuzzy_eq(-1.0));
        assert!(bb.max_y.fuzzy_eq(0.0));
    }

    #[test]
    fn split_line_keeps_start() {
        let v1 = PlineVertex::new(0.0, 0.0, 0.0);
        let v2 = PlineVertex::new(4.0, 0.0, 0.0);
        let r = seg_split_at_point(v1, v2, Vector2::new(1.0, 0.0), 1e-5);
        assert!(r.updated_start.fuzzy_eq(v1));
        assert!(r.split_vertex.fuzzy_eq(PlineVertex::new(1.0, 0.0, 0.0)));
    }
}
