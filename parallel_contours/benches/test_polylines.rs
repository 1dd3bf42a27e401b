use parallel_contours::{
    core::{
        math::{point_on_circle, Vector2},
        traits::Real,
    },
    polyline::Polyline,
};

/// Closed wavy circle of alternating half circle arcs, every arc pair intersects its neighbors when
/// offset so slicing and stitching do real work.
pub fn pathological1<T>(vertex_count: usize) -> Polyline<T>
where
    T: Real,
{
    let radius = T::from(40.0).unwrap();
    let center = Vector2::zero();

    let mut result = Polyline::new_closed();

    for i in 0..vertex_count {
        let angle = T::from(i).unwrap() * T::tau() / T::from(vertex_count).unwrap();
        let point = point_on_circle(radius, center, angle);
        let bulge = if i % 2 == 0 { T::one() } else { -T::one() };
        result.add(point.x, point.y, bulge);
    }

    result
}

/// Open zig zag of `vertex_count` line segments along the x axis.
pub fn zig_zag<T>(vertex_count: usize) -> Polyline<T>
where
    T: Real,
{
    let mut result = Polyline::new();
    for i in 0..vertex_count {
        let x = T::from(i).unwrap() * T::from(2.0).unwrap();
        let y = if i % 2 == 0 { T::zero() } else { T::from(3.0).unwrap() };
        result.add(x, y, T::zero());
    }

    result
}
