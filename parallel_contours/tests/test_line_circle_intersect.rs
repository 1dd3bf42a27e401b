use parallel_contours::core::{
    math::{line_circle_intr, LineCircleIntr::*, Vector2},
    traits::FuzzyEq,
};

const EPS: f64 = 1e-5;

macro_rules! assert_case_eq {
    ($left:expr, $right:expr) => {
        match ($left, $right) {
            (NoIntersect, NoIntersect) => {}
            (TangentIntersect { t0: a }, TangentIntersect { t0: b }) if a.fuzzy_eq(b) => {}
            (TwoIntersects { t0: a1, t1: b1 }, TwoIntersects { t0: a2, t1: b2 })
                if a1.fuzzy_eq(a2) && b1.fuzzy_eq(b2) => {}
            (l, r) => panic!("intersect cases do not match: left: {:?}, right: {:?}", l, r),
        };
    };
}

#[test]
fn line_through_circle() {
    let p0 = Vector2::new(-2.0, 0.0);
    let p1 = Vector2::new(2.0, 0.0);
    assert_case_eq!(
        line_circle_intr(p0, p1, 1.0, Vector2::zero(), EPS),
        TwoIntersects { t0: 0.25, t1: 0.75 }
    );
    // reversed direction gives the same parametric values relative to the new start
    assert_case_eq!(
        line_circle_intr(p1, p0, 1.0, Vector2::zero(), EPS),
        TwoIntersects { t0: 0.25, t1: 0.75 }
    );
}

#[test]
fn vertical_line_through_offset_circle() {
    let p0 = Vector2::new(3.0, 0.0);
    let p1 = Vector2::new(3.0, 10.0);
    assert_case_eq!(
        line_circle_intr(p0, p1, 2.0, Vector2::new(3.0, 5.0), EPS),
        TwoIntersects { t0: 0.3, t1: 0.7 }
    );
}

#[test]
fn intersects_outside_segment_range() {
    let p0 = Vector2::new(2.0, 0.0);
    let p1 = Vector2::new(3.0, 0.0);
    assert_case_eq!(
        line_circle_intr(p0, p1, 1.0, Vector2::zero(), EPS),
        TwoIntersects { t0: -3.0, t1: -1.0 }
    );
}

#[test]
fn tangent_line() {
    let p0 = Vector2::new(-2.0, 1.0);
    let p1 = Vector2::new(2.0, 1.0);
    assert_case_eq!(
        line_circle_intr(p0, p1, 1.0, Vector2::zero(), EPS),
        TangentIntersect { t0: 0.5 }
    );

    // within epsilon of tangent
    let p0 = Vector2::new(-2.0, 1.0 + 1e-7);
    let p1 = Vector2::new(2.0, 1.0 + 1e-7);
    assert_case_eq!(
        line_circle_intr(p0, p1, 1.0, Vector2::zero(), EPS),
        TangentIntersect { t0: 0.5 }
    );
}

#[test]
fn line_misses_circle() {
    let p0 = Vector2::new(-2.0, 2.0);
    let p1 = Vector2::new(2.0, 2.0);
    assert_case_eq!(
        line_circle_intr(p0, p1, 1.0, Vector2::zero(), EPS),
        NoIntersect::<f64>
    );
}

#[test]
fn point_segment() {
    let on_circle = Vector2::new(0.0, 1.0);
    assert_case_eq!(
        line_circle_intr(on_circle, on_circle, 1.0, Vector2::zero(), EPS),
        TangentIntersect { t0: 0.0 }
    );

    let inside = Vector2::new(0.0, 0.5);
    assert_case_eq!(
        line_circle_intr(inside, inside, 1.0, Vector2::zero(), EPS),
        NoIntersect::<f64>
    );
}
