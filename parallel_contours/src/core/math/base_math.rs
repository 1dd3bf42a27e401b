use super::Vector2;
use crate::core::traits::Real;

/// Returns `(v1, v2)` ordered as `(min, max)`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// assert_eq!(min_max(8, 4), (4, 8));
/// assert_eq!(min_max(1.0, 2.0), (1.0, 2.0));
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 { (v1, v2) } else { (v2, v1) }
}

/// Normalize an angle in radians into `[0, 2PI]`.
///
/// Angles already in range (including exactly `2PI`) are returned unchanged.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// assert!(normalize_radians(2.0 * PI).fuzzy_eq(2.0 * PI));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Signed smallest rotation from `angle1` to `angle2`, in `(-PI, PI]`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(delta_angle(0.25 * PI, 0.5 * PI).fuzzy_eq(0.25 * PI));
/// assert!(delta_angle(0.5 * PI, 0.25 * PI).fuzzy_eq(-0.25 * PI));
/// // half turn is always positive
/// assert!(delta_angle(5.0 * PI, 4.0 * PI).fuzzy_eq(PI));
/// ```
#[inline]
pub fn delta_angle<T>(angle1: T, angle2: T) -> T
where
    T: Real,
{
    let diff = normalize_radians(angle2 - angle1);
    if diff > T::pi() {
        diff - T::tau()
    } else {
        diff
    }
}

/// Same magnitude as [delta_angle] with the sign forced by `negative`.
///
/// Used where the rotation direction is already known (e.g. connection arcs) and a half turn
/// must not flip direction.
#[inline]
pub fn delta_angle_signed<T>(angle1: T, angle2: T, negative: bool) -> T
where
    T: Real,
{
    let diff = delta_angle(angle1, angle2).abs();
    if negative { -diff } else { diff }
}

/// Test if `test_angle` lies on the counter clockwise sweep from `start_angle` to `end_angle`,
/// inclusive within `epsilon`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// use std::f64::consts::PI;
/// assert!(angle_is_between_eps(PI / 2.0, 0.0, PI, 1e-5));
/// assert!(angle_is_between_eps(PI, 0.0, PI, 1e-5));
/// // counter clockwise from PI to PI / 2 passes through 0
/// assert!(angle_is_between_eps(0.0, PI, PI / 2.0, 1e-5));
/// assert!(!angle_is_between_eps(3.0 * PI / 4.0, PI, PI / 2.0, 1e-5));
/// ```
#[inline]
pub fn angle_is_between_eps<T>(test_angle: T, start_angle: T, end_angle: T, epsilon: T) -> bool
where
    T: Real,
{
    let end_sweep = normalize_radians(end_angle - start_angle);
    let mid_sweep = normalize_radians(test_angle - start_angle);

    mid_sweep < end_sweep + epsilon
}

#[inline]
pub fn angle_is_between<T>(test_angle: T, start_angle: T, end_angle: T) -> bool
where
    T: Real,
{
    angle_is_between_eps(test_angle, start_angle, end_angle, T::fuzzy_epsilon())
}

/// Test if `test_angle` is within `sweep_angle` measured from `start_angle` (negative sweep is
/// clockwise).
#[inline]
pub fn angle_is_within_sweep_eps<T>(
    test_angle: T,
    start_angle: T,
    sweep_angle: T,
    epsilon: T,
) -> bool
where
    T: Real,
{
    let end_angle = start_angle + sweep_angle;
    if sweep_angle < T::zero() {
        angle_is_between_eps(test_angle, end_angle, start_angle, epsilon)
    } else {
        angle_is_between_eps(test_angle, start_angle, end_angle, epsilon)
    }
}

#[inline]
pub fn angle_is_within_sweep<T>(test_angle: T, start_angle: T, sweep_angle: T) -> bool
where
    T: Real,
{
    angle_is_within_sweep_eps(test_angle, start_angle, sweep_angle, T::fuzzy_epsilon())
}

/// Both roots of `a*x^2 + b*x + c = 0` given the precomputed `sqrt(b^2 - 4ac)`.
///
/// The first root avoids subtracting nearly equal values and the second is recovered from the
/// product of roots (`c / a`).
#[inline]
pub fn quadratic_solutions<T>(a: T, b: T, c: T, sqrt_discriminant: T) -> (T, T)
where
    T: Real,
{
    debug_assert!(
        (b * b - T::four() * a * c)
            .sqrt()
            .fuzzy_eq(sqrt_discriminant),
        "discriminant is not valid"
    );

    let denom = T::two() * a;
    let sol1 = if b < T::zero() {
        (-b + sqrt_discriminant) / denom
    } else {
        (-b - sqrt_discriminant) / denom
    };

    let sol2 = (c / a) / sol1;

    (sol1, sol2)
}

#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    (p0 - p1).length_squared()
}

/// Polar angle of the direction from `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) / T::two(), (p0.y + p1.y) / T::two())
}

/// Point on the circle of `radius` about `center` at polar `angle`.
#[inline]
pub fn point_on_circle<T>(radius: T, center: Vector2<T>, angle: T) -> Vector2<T>
where
    T: Real,
{
    let (s, c) = angle.sin_cos();
    Vector2::new(center.x + radius * c, center.y + radius * s)
}

/// Point at parametric value `t` on the line through `p0` (t = 0) and `p1` (t = 1).
#[inline]
pub fn point_from_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Parametric value of `point` on the line through `p0` and `p1`.
///
/// `point` is assumed to lie on the line. Vertical lines (x fuzzy equal within `epsilon`) are
/// parameterized by y.
#[inline]
pub fn parametric_from_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>, epsilon: T) -> T
where
    T: Real,
{
    if p0.x.fuzzy_eq_eps(p1.x, epsilon) {
        (point.y - p0.y) / (p1.y - p0.y)
    } else {
        (point.x - p0.x) / (p1.x - p0.x)
    }
}

/// Closest point to `point` on the line segment `p0` to `p1`.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    let v = p1 - p0;
    let w = point - p0;
    let proj = w.dot(v);
    if proj < T::fuzzy_epsilon() {
        return p0;
    }

    let len_sq = v.length_squared();
    if len_sq < proj + T::fuzzy_epsilon() {
        return p1;
    }

    p0 + v.scale(proj / len_sq)
}

/// Cross product of `p1 - p0` with `point - p0`, positive when `point` is left of the direction.
#[inline]
fn side_value<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    (p1 - p0).perp_dot(point - p0)
}

/// Returns true if `point` is strictly left of the direction `p0` to `p1`.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// let p0 = Vector2::new(1.0, 1.0);
/// let p1 = Vector2::new(2.0, 2.0);
/// assert!(is_left(p0, p1, Vector2::new(0.0, 1.0)));
/// assert!(!is_left(p0, p1, Vector2::new(1.0, 0.0)));
/// ```
#[inline]
pub fn is_left<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    side_value(p0, p1, point) > T::zero()
}

#[inline]
pub fn is_left_or_equal<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    side_value(p0, p1, point) >= T::zero()
}

/// Returns true if `point` is left of, or within `epsilon` of, the line through `p0` and `p1`.
#[inline]
pub fn is_left_or_coincident_eps<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    point: Vector2<T>,
    epsilon: T,
) -> bool
where
    T: Real,
{
    debug_assert!(epsilon > T::zero());
    side_value(p0, p1, point) > -epsilon
}

#[inline]
pub fn is_left_or_coincident<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    is_left_or_coincident_eps(p0, p1, point, T::fuzzy_epsilon())
}

/// Returns true if `point` is right of, or within `epsilon` of, the line through `p0` and `p1`.
#[inline]
pub fn is_right_or_coincident_eps<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    point: Vector2<T>,
    epsilon: T,
) -> bool
where
    T: Real,
{
    debug_assert!(epsilon > T::zero());
    side_value(p0, p1, point) < epsilon
}

#[inline]
pub fn is_right_or_coincident<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    is_right_or_coincident_eps(p0, p1, point, T::fuzzy_epsilon())
}

/// Test if `point` lies within the angular region swept by an arc.
///
/// The arc runs from `arc_start` to `arc_end` about `center`, clockwise if `is_clockwise`. The
/// region is the infinite cone from `center` through the arc, so `point` is normally already
/// known to be on the arc's circle. Boundaries are fuzzy inclusive. Arcs sweeping more than a
/// half turn are handled (the cone is then the union of two half planes).
///
/// # Examples
/// ```
/// # use parallel_contours::core::math::*;
/// // quarter arc covering quadrant I
/// let center = Vector2::new(0.0, 0.0);
/// let start = Vector2::new(1.0, 0.0);
/// let end = Vector2::new(0.0, 1.0);
/// assert!(point_within_arc_sweep(center, start, end, false, Vector2::new(1.0, 1.0)));
/// assert!(point_within_arc_sweep(center, start, end, false, Vector2::new(1.0, 0.0)));
/// assert!(!point_within_arc_sweep(center, start, end, false, Vector2::new(-1.0, -1.0)));
/// // clockwise from start to end covers the other three quadrants
/// assert!(point_within_arc_sweep(center, start, end, true, Vector2::new(-1.0, -1.0)));
/// ```
#[inline]
pub fn point_within_arc_sweep<T>(
    center: Vector2<T>,
    arc_start: Vector2<T>,
    arc_end: Vector2<T>,
    is_clockwise: bool,
    point: Vector2<T>,
) -> bool
where
    T: Real,
{
    // normalize to counter clockwise from `from` to `to`
    let (from, to) = if is_clockwise {
        (arc_end, arc_start)
    } else {
        (arc_start, arc_end)
    };

    let after_start = is_left_or_coincident(center, from, point);
    let before_end = is_right_or_coincident(center, to, point);
    if side_value(center, from, to) < -T::fuzzy_epsilon() {
        after_start || before_end
    } else {
        after_start && before_end
    }
}

/// Bulge for an arc `sweep_angle` (`tan(sweep_angle / 4)`), negative sweep gives negative bulge.
#[inline]
pub fn bulge_from_angle<T>(sweep_angle: T) -> T
where
    T: Real,
{
    (sweep_angle / T::four()).tan()
}

/// Arc sweep angle for `bulge` (`4 * atan(bulge)`).
#[inline]
pub fn angle_from_bulge<T>(bulge: T) -> T
where
    T: Real,
{
    T::four() * bulge.atan()
}

/// Bulge of the arc that starts at `p1`, passes through `p2` and ends at `p3`.
///
/// Returns zero if the three points are collinear (fuzzy).
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// let b = bulge_from_three_points(
///     Vector2::new(1.0, 0.0),
///     Vector2::new(0.0, 1.0),
///     Vector2::new(-1.0, 0.0),
/// );
/// // counter clockwise half circle
/// assert!(b.fuzzy_eq(1.0));
/// ```
pub fn bulge_from_three_points<T>(p1: Vector2<T>, p2: Vector2<T>, p3: Vector2<T>) -> T
where
    T: Real,
{
    let a = p1 - p2;
    let b = p3 - p2;
    let cross = a.perp_dot(b);
    if cross.fuzzy_eq_zero() {
        return T::zero();
    }

    // inscribed angle at p2 is PI - sweep / 2, so tan(sweep / 4) = cot(angle_at_p2 / 2)
    -(a.length() * b.length() + a.dot(b)) / cross
}

/// Bulge of the minor arc of `radius` from `p1` to `p2`, counter clockwise if `is_ccw`.
///
/// Returns zero when `radius` is not greater than half the chord length.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::math::*;
/// # use parallel_contours::core::traits::*;
/// use std::f64::consts::FRAC_PI_2;
/// let p1 = Vector2::new(1.0, 0.0);
/// let p2 = Vector2::new(0.0, 1.0);
/// assert!(bulge_from_radius(p1, p2, 1.0, true).fuzzy_eq(bulge_from_angle(FRAC_PI_2)));
/// assert!(bulge_from_radius(p1, p2, 1.0, false).fuzzy_eq(-bulge_from_angle(FRAC_PI_2)));
/// assert_eq!(bulge_from_radius(p1, p2, 0.5, true), 0.0);
/// ```
pub fn bulge_from_radius<T>(p1: Vector2<T>, p2: Vector2<T>, radius: T, is_ccw: bool) -> T
where
    T: Real,
{
    let half_chord = (p2 - p1).length() / T::two();
    if radius <= half_chord {
        return T::zero();
    }

    let half_sweep = (half_chord / radius).asin();
    let bulge = (half_sweep / T::two()).tan();
    if is_ccw { bulge } else { -bulge }
}
