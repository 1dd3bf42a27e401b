use parallel_contours::{
    core::math::Vector2,
    polyline::{pline_seg_intr, PlineSegIntr, PlineVertex},
};
use std::f64::consts::FRAC_PI_8;

const EPS: f64 = 1e-5;

fn v(x: f64, y: f64, bulge: f64) -> PlineVertex<f64> {
    PlineVertex::new(x, y, bulge)
}

fn p(x: f64, y: f64) -> Vector2<f64> {
    Vector2::new(x, y)
}

fn same_points(found: &[Vector2<f64>], expected: &[Vector2<f64>]) -> bool {
    found.len() == expected.len()
        && expected
            .iter()
            .all(|e| found.iter().filter(|f| f.fuzzy_eq_eps(*e, 1e-8)).count() == 1)
}

/// Variant name and points of an intersect result, used to compare results ignoring order.
fn summarize(intr: PlineSegIntr<f64>) -> (&'static str, Vec<Vector2<f64>>) {
    use PlineSegIntr::*;
    match intr {
        NoIntersect => ("none", vec![]),
        TangentIntersect { point } => ("tangent", vec![point]),
        OneIntersect { point } => ("one", vec![point]),
        TwoIntersects { point1, point2 } => ("two", vec![point1, point2]),
        OverlappingLines { point1, point2 } => ("overlapping_lines", vec![point1, point2]),
        OverlappingArcs { point1, point2 } => ("overlapping_arcs", vec![point1, point2]),
    }
}

/// Assert the segments intersect as expected with both argument orders.
fn assert_intr(
    s1: (PlineVertex<f64>, PlineVertex<f64>),
    s2: (PlineVertex<f64>, PlineVertex<f64>),
    expected_kind: &str,
    expected_points: &[Vector2<f64>],
) {
    for (a, b) in [(s1, s2), (s2, s1)] {
        let result = pline_seg_intr(a.0, a.1, b.0, b.1, EPS);
        let (kind, points) = summarize(result);
        assert_eq!(kind, expected_kind, "result: {:?}", result);
        assert!(
            same_points(&points, expected_points),
            "result: {:?}, expected points: {:?}",
            result,
            expected_points
        );
    }
}

// counter clockwise upper half of the unit circle about the origin
fn upper_half_circle() -> (PlineVertex<f64>, PlineVertex<f64>) {
    (v(1.0, 0.0, 1.0), v(-1.0, 0.0, 0.0))
}

mod line_line {
    use super::*;

    #[test]
    fn crossing() {
        assert_intr(
            (v(0.0, 0.0, 0.0), v(4.0, 4.0, 0.0)),
            (v(0.0, 4.0, 0.0), v(4.0, 0.0, 0.0)),
            "one",
            &[p(2.0, 2.0)],
        );
    }

    #[test]
    fn not_reaching() {
        assert_intr(
            (v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)),
            (v(2.0, -1.0, 0.0), v(2.0, 1.0, 0.0)),
            "none",
            &[],
        );
    }

    #[test]
    fn collinear_overlap() {
        assert_intr(
            (v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0)),
            (v(2.0, 0.0, 0.0), v(6.0, 0.0, 0.0)),
            "overlapping_lines",
            &[p(2.0, 0.0), p(4.0, 0.0)],
        );
    }

    #[test]
    fn overlap_points_follow_second_segment() {
        let result = pline_seg_intr(
            v(0.0, 0.0, 0.0),
            v(4.0, 0.0, 0.0),
            v(3.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            EPS,
        );
        match result {
            PlineSegIntr::OverlappingLines { point1, point2 } => {
                assert!(point1.fuzzy_eq(p(3.0, 0.0)));
                assert!(point2.fuzzy_eq(p(1.0, 0.0)));
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }
}

mod line_arc {
    use super::*;

    #[test]
    fn line_crosses_arc_once() {
        // the lower crossing is outside the arc sweep
        assert_intr(
            (v(0.5, -2.0, 0.0), v(0.5, 2.0, 0.0)),
            upper_half_circle(),
            "one",
            &[p(0.5, 0.75f64.sqrt())],
        );
    }

    #[test]
    fn line_crosses_arc_twice() {
        let x = 0.75f64.sqrt();
        assert_intr(
            (v(-2.0, 0.5, 0.0), v(2.0, 0.5, 0.0)),
            upper_half_circle(),
            "two",
            &[p(-x, 0.5), p(x, 0.5)],
        );
    }

    #[test]
    fn two_intersects_ordered_along_second_segment() {
        let x = 0.75f64.sqrt();
        let (a1, a2) = upper_half_circle();
        let l1 = v(-2.0, 0.5, 0.0);
        let l2 = v(2.0, 0.5, 0.0);

        // along the arc from (1, 0)
        match pline_seg_intr(l1, l2, a1, a2, EPS) {
            PlineSegIntr::TwoIntersects { point1, point2 } => {
                assert!(point1.fuzzy_eq(p(x, 0.5)));
                assert!(point2.fuzzy_eq(p(-x, 0.5)));
            }
            r => panic!("unexpected result: {:?}", r),
        }

        // along the line from (-2, 0.5)
        match pline_seg_intr(a1, a2, l1, l2, EPS) {
            PlineSegIntr::TwoIntersects { point1, point2 } => {
                assert!(point1.fuzzy_eq(p(-x, 0.5)));
                assert!(point2.fuzzy_eq(p(x, 0.5)));
            }
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn tangent_line() {
        assert_intr(
            (v(-2.0, 1.0, 0.0), v(2.0, 1.0, 0.0)),
            upper_half_circle(),
            "tangent",
            &[p(0.0, 1.0)],
        );
    }

    #[test]
    fn tangent_outside_arc_sweep() {
        // clockwise arc covers the lower half
        assert_intr(
            (v(-2.0, 1.0, 0.0), v(2.0, 1.0, 0.0)),
            (v(1.0, 0.0, -1.0), v(-1.0, 0.0, 0.0)),
            "none",
            &[],
        );
    }

    #[test]
    fn line_ends_at_arc_start() {
        assert_intr(
            (v(3.0, 0.0, 0.0), v(1.0, 0.0, 0.0)),
            upper_half_circle(),
            "one",
            &[p(1.0, 0.0)],
        );
    }
}

mod arc_arc {
    use super::*;

    #[test]
    fn crossing_twice() {
        let x = 0.75f64.sqrt();
        assert_intr(
            upper_half_circle(),
            // lower half of the unit circle about (0, 1)
            (v(-1.0, 1.0, 1.0), v(1.0, 1.0, 0.0)),
            "two",
            &[p(-x, 0.5), p(x, 0.5)],
        );
    }

    #[test]
    fn crossing_once() {
        assert_intr(
            upper_half_circle(),
            // upper half of the unit circle about (1, 0)
            (v(2.0, 0.0, 1.0), v(0.0, 0.0, 0.0)),
            "one",
            &[p(0.5, 0.75f64.sqrt())],
        );
    }

    #[test]
    fn touching_circles() {
        assert_intr(
            upper_half_circle(),
            (v(-1.0, 2.0, 1.0), v(1.0, 2.0, 0.0)),
            "tangent",
            &[p(0.0, 1.0)],
        );
    }

    #[test]
    fn same_circle_partial_overlap() {
        // left half of the unit circle, shares the quarter from (0, 1) to (-1, 0)
        assert_intr(
            upper_half_circle(),
            (v(0.0, 1.0, 1.0), v(0.0, -1.0, 0.0)),
            "overlapping_arcs",
            &[p(0.0, 1.0), p(-1.0, 0.0)],
        );
    }

    #[test]
    fn same_circle_end_to_start() {
        let quarter = FRAC_PI_8.tan();
        assert_intr(
            (v(1.0, 0.0, quarter), v(0.0, 1.0, 0.0)),
            (v(0.0, 1.0, quarter), v(-1.0, 0.0, 0.0)),
            "one",
            &[p(0.0, 1.0)],
        );
    }

    #[test]
    fn same_circle_both_ends_touch() {
        assert_intr(
            upper_half_circle(),
            (v(-1.0, 0.0, 1.0), v(1.0, 0.0, 0.0)),
            "two",
            &[p(-1.0, 0.0), p(1.0, 0.0)],
        );
    }

    #[test]
    fn same_circle_disjoint() {
        let quarter = FRAC_PI_8.tan();
        assert_intr(
            (v(1.0, 0.0, quarter), v(0.0, 1.0, 0.0)),
            (v(-1.0, 0.0, quarter), v(0.0, -1.0, 0.0)),
            "none",
            &[],
        );
    }
}
