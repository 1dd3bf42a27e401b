use parallel_contours::{
    core::Control,
    spatial_index::{SpatialIndexBuildError, StaticAABB2DIndex, StaticAABB2DIndexBuilder, AABB},
};

/// Deterministic scattered boxes of varying size (linear congruential sequence).
fn scattered_boxes(count: usize) -> Vec<AABB<f64>> {
    let mut state: u64 = 12345;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as f64) / ((1u64 << 31) as f64)
    };

    (0..count)
        .map(|_| {
            let x = next() * 100.0;
            let y = next() * 100.0;
            let w = next() * 5.0;
            let h = next() * 5.0;
            AABB::new(x, y, x + w, y + h)
        })
        .collect()
}

fn build_index(boxes: &[AABB<f64>], node_size: usize) -> StaticAABB2DIndex<f64> {
    let mut builder = StaticAABB2DIndexBuilder::new_with_node_size(boxes.len(), node_size);
    for b in boxes {
        builder.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }
    builder.build().unwrap()
}

fn brute_force_query(boxes: &[AABB<f64>], query: &AABB<f64>) -> Vec<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.overlaps(query.min_x, query.min_y, query.max_x, query.max_y))
        .map(|(i, _)| i)
        .collect()
}

fn sorted_query(index: &StaticAABB2DIndex<f64>, query: &AABB<f64>) -> Vec<usize> {
    let mut result = index.query(query.min_x, query.min_y, query.max_x, query.max_y);
    result.sort_unstable();
    result
}

#[test]
fn query_matches_brute_force() {
    let boxes = scattered_boxes(500);
    let queries = [
        AABB::new(0.0, 0.0, 10.0, 10.0),
        AABB::new(40.0, 40.0, 60.0, 60.0),
        AABB::new(-10.0, -10.0, 200.0, 200.0),
        AABB::new(99.0, 0.0, 150.0, 100.0),
        AABB::new(50.0, 50.0, 50.0, 50.0),
        AABB::new(-20.0, -20.0, -10.0, -10.0),
    ];

    for node_size in [2, 4, 16, 64] {
        let index = build_index(&boxes, node_size);
        assert_eq!(index.count(), boxes.len());
        for q in queries.iter() {
            assert_eq!(
                sorted_query(&index, q),
                brute_force_query(&boxes, q),
                "node size: {}, query: {:?}",
                node_size,
                q
            );
        }
    }
}

#[test]
fn every_item_finds_itself() {
    let boxes = scattered_boxes(200);
    let index = build_index(&boxes, 16);
    for (i, b) in boxes.iter().enumerate() {
        let found = index.query(b.min_x, b.min_y, b.max_x, b.max_y);
        assert!(found.contains(&i), "item {} not found by its own box", i);
    }
}

#[test]
fn bounds_enclose_all_items() {
    let boxes = scattered_boxes(100);
    let index = build_index(&boxes, 8);
    let mut expected = boxes[0];
    for b in boxes.iter().skip(1) {
        expected.expand(b);
    }
    assert_eq!(index.bounds(), Some(expected));
    assert_eq!(index.all_boxes().last().copied(), Some(expected));
}

#[test]
fn item_boxes_are_a_permutation_of_added_boxes() {
    let boxes = scattered_boxes(150);
    let index = build_index(&boxes, 16);
    let mut seen = vec![false; boxes.len()];
    for (pos, b) in index.item_boxes().iter().enumerate() {
        let item = index.map_all_boxes_index(pos);
        assert_eq!(*b, boxes[item]);
        assert!(!seen[item]);
        seen[item] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn touching_boxes_overlap() {
    let boxes = [AABB::new(0.0, 0.0, 1.0, 1.0), AABB::new(2.0, 2.0, 3.0, 3.0)];
    let index = build_index(&boxes, 16);
    assert_eq!(sorted_query(&index, &AABB::new(1.0, 1.0, 2.0, 2.0)), vec![0, 1]);
    assert_eq!(sorted_query(&index, &AABB::new(1.1, 1.1, 1.9, 1.9)), Vec::<usize>::new());
}

#[test]
fn identical_boxes() {
    let boxes = vec![AABB::new(1.0, 1.0, 1.0, 1.0); 40];
    let index = build_index(&boxes, 4);
    assert_eq!(sorted_query(&index, &AABB::new(0.0, 0.0, 2.0, 2.0)).len(), 40);
}

#[test]
fn empty_index() {
    let index = StaticAABB2DIndexBuilder::<f64>::new(0).build().unwrap();
    assert_eq!(index.count(), 0);
    assert_eq!(index.bounds(), None);
    assert!(index.query(-1.0, -1.0, 1.0, 1.0).is_empty());
}

#[test]
fn single_item() {
    let mut builder = StaticAABB2DIndexBuilder::new(1);
    builder.add(1.0, 2.0, 3.0, 4.0);
    let index = builder.build().unwrap();
    assert_eq!(index.query(0.0, 0.0, 1.5, 2.5), vec![0]);
    assert!(index.query(5.0, 5.0, 6.0, 6.0).is_empty());
}

#[test]
fn too_many_items_added() {
    let mut builder = StaticAABB2DIndexBuilder::new(1);
    builder.add(0.0, 0.0, 1.0, 1.0).add(1.0, 1.0, 2.0, 2.0);
    assert_eq!(
        builder.build().unwrap_err(),
        SpatialIndexBuildError::ItemCountError {
            added: 2,
            expected: 1
        }
    );
}

#[test]
fn visit_query_stops_on_break() {
    let boxes = scattered_boxes(300);
    let index = build_index(&boxes, 16);
    let mut visited = Vec::new();
    index.visit_query(-1.0, -1.0, 200.0, 200.0, &mut |i: usize| {
        visited.push(i);
        if visited.len() == 5 {
            Control::Break(())
        } else {
            Control::Continue
        }
    });
    assert_eq!(visited.len(), 5);
}

#[test]
fn reused_stack_gives_same_results() {
    let boxes = scattered_boxes(300);
    let index = build_index(&boxes, 16);
    let mut stack = Vec::new();
    for q in [
        AABB::new(0.0, 0.0, 30.0, 30.0),
        AABB::new(20.0, 60.0, 80.0, 90.0),
    ] {
        let mut found = Vec::new();
        index.visit_query_with_stack(
            q.min_x,
            q.min_y,
            q.max_x,
            q.max_y,
            &mut |i: usize| found.push(i),
            &mut stack,
        );
        found.sort_unstable();
        assert_eq!(found, brute_force_query(&boxes, &q));
    }
}
