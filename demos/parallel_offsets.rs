use parallel_contours::{
    core::traits::FuzzyEq,
    pline_closed,
    polyline::{PlineOffsetOptions, Polyline},
};
use tracing::info;

fn main() {
    // Default: WARN for everything, INFO for the demo, RUST_LOG=parallel_contours=debug shows
    // the offset pipeline stages.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("parallel_offsets=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    closed_rectangle_offsets();
    arc_shape_offset();
    open_polyline_offset();
    repeated_inward_offsets();
}

fn log_results(label: &str, offset: f64, results: &[Polyline<f64>]) {
    info!(label, offset, count = results.len(), "offset results");
    for (i, pline) in results.iter().enumerate() {
        info!(
            index = i,
            closed = pline.is_closed(),
            vertexes = pline.len(),
            area = pline.area(),
            path_length = pline.path_length(),
            "result polyline"
        );
    }
}

fn closed_rectangle_offsets() {
    let rect = pline_closed![
        (0.0, 0.0, 0.0),
        (10.0, 0.0, 0.0),
        (10.0, 10.0, 0.0),
        (0.0, 10.0, 0.0),
    ];
    info!(area = rect.area(), vertexes = rect.len(), "rectangle");

    // counter clockwise input: negative offsets grow outward, corners become arcs
    let outward = rect.parallel_offset(-2.0);
    log_results("rectangle outward", -2.0, &outward);
    assert!(outward.iter().all(|p| p.is_closed()));

    let orig_ext = rect.extents().expect("rect has extents");
    let out_ext = outward[0].extents().expect("offset has extents");
    assert!(out_ext.min_x < orig_ext.min_x && out_ext.max_x > orig_ext.max_x);

    let inward = rect.parallel_offset(1.5);
    log_results("rectangle inward", 1.5, &inward);
    assert!(inward[0].area() < rect.area());

    // offsetting past half the width collapses the rectangle
    let collapsed = rect.parallel_offset(6.0);
    log_results("rectangle collapsed", 6.0, &collapsed);
    assert!(collapsed.is_empty());

    let mut options = PlineOffsetOptions::new();
    options.handle_self_intersects = true;
    options.pos_equal_eps = f64::fuzzy_epsilon() * 10.0;
    let custom = rect.parallel_offset_opt(1.0, &options);
    log_results("rectangle custom options", 1.0, &custom);
}

fn arc_shape_offset() {
    let mut arc_shape = Polyline::<f64>::new_closed();
    arc_shape.add(0.0, 0.0, 0.5);
    arc_shape.add(10.0, 0.0, 0.0);
    arc_shape.add(10.0, 10.0, -0.3);
    arc_shape.add(0.0, 10.0, 0.0);

    let results = arc_shape.parallel_offset(1.0);
    log_results("arc shape", 1.0, &results);
    assert!(!results.is_empty());
}

fn open_polyline_offset() {
    let mut open_line = Polyline::<f64>::new();
    open_line.add(0.0, 0.0, 0.0);
    open_line.add(5.0, 0.0, 0.0);
    open_line.add(5.0, 5.0, 0.0);
    open_line.add(10.0, 5.0, 0.0);

    for offset in [1.0, -1.0] {
        let results = open_line.parallel_offset(offset);
        log_results("open polyline", offset, &results);
        assert!(results.iter().all(|p| !p.is_closed()));
    }
}

fn repeated_inward_offsets() {
    // pocket style offsetting of a rounded shape until nothing is left
    let shape = pline_closed![
        (0.0, 0.0, 0.0),
        (20.0, 0.0, 1.0),
        (20.0, 10.0, 0.0),
        (0.0, 10.0, -0.5),
    ];

    let mut current = vec![shape];
    let mut pass = 0;
    while !current.is_empty() && pass < 100 {
        pass += 1;
        current = current
            .iter()
            .flat_map(|p| p.parallel_offset(1.0))
            .filter(|p| p.is_closed())
            .collect();
        info!(pass, loops = current.len(), "inward pass");
    }
}
