use parallel_contours::{
    core::{math::Vector2, traits::FuzzyEq},
    pline_closed, pline_open,
};
use tracing::info;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("intersections=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    self_intersects();
    intersects_between_polylines();
}

fn self_intersects() {
    let bowtie = pline_closed![
        (0.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (10.0, 0.0, 0.0),
        (0.0, 10.0, 0.0),
    ];
    assert!(
        bowtie.scan_for_self_intersect(),
        "Bowtie segments cross at its center"
    );

    let square = pline_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0),
    ];
    assert!(
        !square.scan_for_self_intersect(),
        "Square has no self intersects"
    );
    info!("bowtie self intersects, square does not");
}

fn intersects_between_polylines() {
    let square = pline_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0),
    ];
    // horizontal line through the square
    let line = pline_open![(-5.0, 5.0, 0.0), (15.0, 5.0, 0.0)];

    let intrs = square.find_intersects(&line);
    assert_eq!(
        intrs.basic_intersects.len(),
        2,
        "Line crosses the left and right sides"
    );
    assert!(intrs.overlapping_intersects.is_empty());
    for intr in &intrs.basic_intersects {
        info!(
            x = intr.point.x,
            y = intr.point.y,
            square_segment = intr.start_index1,
            "intersect"
        );
    }
    assert!(intrs
        .basic_intersects
        .iter()
        .any(|i| i.point.fuzzy_eq(Vector2::new(10.0, 5.0))));

    // a line running along the bottom side overlaps it
    let along_bottom = pline_open![(2.0, 0.0, 0.0), (8.0, 0.0, 0.0)];
    let overlap = square.find_intersects(&along_bottom);
    assert_eq!(overlap.overlapping_intersects.len(), 1);
    let o = &overlap.overlapping_intersects[0];
    info!(
        start_x = o.point1.x,
        end_x = o.point2.x,
        "overlap along bottom side"
    );
}
