use parallel_contours::core::math::{circle_circle_intr, CircleCircleIntr::*, Vector2};

const EPS: f64 = 1e-5;

macro_rules! assert_case_eq {
    ($left:expr, $right:expr) => {
        match ($left, $right) {
            (NoIntersect, NoIntersect) => {}
            (TangentIntersect { point: a }, TangentIntersect { point: b }) if a.fuzzy_eq(b) => {}
            (
                TwoIntersects {
                    point1: a1,
                    point2: b1,
                },
                TwoIntersects {
                    point1: a2,
                    point2: b2,
                },
            ) if a1.fuzzy_eq(a2) && b1.fuzzy_eq(b2) => {}
            (Overlapping, Overlapping) => {}
            (l, r) => panic!("intersect cases do not match: left: {:?}, right: {:?}", l, r),
        };
    };
}

#[test]
fn two_intersects() {
    let half_chord = 0.75f64.sqrt();
    assert_case_eq!(
        circle_circle_intr(1.0, Vector2::new(0.0, 0.0), 1.0, Vector2::new(1.0, 0.0), EPS),
        TwoIntersects {
            point1: Vector2::new(0.5, -half_chord),
            point2: Vector2::new(0.5, half_chord)
        }
    );
}

#[test]
fn two_intersects_different_radii() {
    // 3-4-5 triangle, intersects at (3, +/-4) from the first center
    assert_case_eq!(
        circle_circle_intr(5.0, Vector2::new(0.0, 0.0), 4.0, Vector2::new(3.0, 0.0), EPS),
        TwoIntersects {
            point1: Vector2::new(3.0, -4.0),
            point2: Vector2::new(3.0, 4.0)
        }
    );
}

#[test]
fn separate_circles() {
    assert_case_eq!(
        circle_circle_intr(1.0, Vector2::new(0.0, 0.0), 1.0, Vector2::new(5.0, 5.0), EPS),
        NoIntersect::<f64>
    );
}

#[test]
fn circle_inside_circle() {
    assert_case_eq!(
        circle_circle_intr(4.0, Vector2::new(0.0, 0.0), 1.0, Vector2::new(1.0, 1.0), EPS),
        NoIntersect::<f64>
    );
}

#[test]
fn touching_outside() {
    assert_case_eq!(
        circle_circle_intr(2.0, Vector2::new(0.0, 0.0), 1.0, Vector2::new(0.0, 3.0), EPS),
        TangentIntersect {
            point: Vector2::new(0.0, 2.0)
        }
    );
}

#[test]
fn touching_inside() {
    assert_case_eq!(
        circle_circle_intr(3.0, Vector2::new(0.0, 0.0), 1.0, Vector2::new(2.0, 0.0), EPS),
        TangentIntersect {
            point: Vector2::new(3.0, 0.0)
        }
    );
}

#[test]
fn same_circle() {
    assert_case_eq!(
        circle_circle_intr(2.0, Vector2::new(1.0, 1.0), 2.0, Vector2::new(1.0, 1.0), EPS),
        Overlapping::<f64>
    );
}

#[test]
fn concentric_different_radii() {
    assert_case_eq!(
        circle_circle_intr(2.0, Vector2::new(1.0, 1.0), 1.0, Vector2::new(1.0, 1.0), EPS),
        NoIntersect::<f64>
    );
}
