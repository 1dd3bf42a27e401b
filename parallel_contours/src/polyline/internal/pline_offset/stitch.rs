use super::OpenPlineSlice;
use crate::{
    core::traits::Real,
    polyline::{PlineOffsetOptions, Polyline},
    spatial_index::{SpatialIndexBuildError, StaticAABB2DIndex, StaticAABB2DIndexBuilder},
};

/// Index of slice start points, each a box of `join_eps` half width.
fn slice_start_index<T>(slices: &[OpenPlineSlice<T>], join_eps: T) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    let mut builder = StaticAABB2DIndexBuilder::new(slices.len());
    for slice in slices {
        let p = slice.start_point();
        builder.add(p.x - join_eps, p.y - join_eps, p.x + join_eps, p.y + join_eps);
    }

    match builder.build() {
        Ok(index) => index,
        Err(SpatialIndexBuildError::ItemCountError { .. }) => {
            unreachable!("one box is added per slice")
        }
        Err(e @ SpatialIndexBuildError::NumericCastError) => {
            panic!("failed to build slice start point index: {e}")
        }
    }
}

/// Chain slices end to start into the final offset polylines.
///
/// From each unvisited slice the chain continues with the unvisited slice whose start is within
/// `slice_join_eps` of the current end, choosing the smallest forward distance in raw offset
/// segment indexes (`orig_max_index` is the wrap length) and, between equal distances, the slice
/// that closes the loop back to the chain's first slice. A chain ending where it began is closed
/// when `is_closed`.
pub fn stitch_slices_together<T>(
    slices: &[OpenPlineSlice<T>],
    is_closed: bool,
    orig_max_index: usize,
    options: &PlineOffsetOptions<T>,
) -> Vec<Polyline<T>>
where
    T: Real,
{
    let join_eps = options.slice_join_eps;
    let pos_equal_eps = options.pos_equal_eps;

    match slices {
        [] => return Vec::new(),
        [single] => {
            let mut pline = single
                .pline
                .remove_repeat_pos(pos_equal_eps)
                .unwrap_or_else(|| single.pline.clone());
            if is_closed && single.start_point().fuzzy_eq_eps(single.end_point(), join_eps) {
                pline.remove_last();
                pline.set_is_closed(true);
            }
            return vec![pline];
        }
        _ => {}
    }

    let start_index = slice_start_index(slices, join_eps);
    let mut visited = vec![false; slices.len()];
    let mut candidates = Vec::new();
    let mut query_stack = Vec::with_capacity(8);
    let mut result = Vec::new();

    for first in 0..slices.len() {
        if visited[first] {
            continue;
        }
        visited[first] = true;

        let initial_start = slices[first].start_point();
        let mut current = first;
        let mut pline = Polyline::new();
        let mut loop_count = 0;

        loop {
            if loop_count > slices.len() {
                unreachable!("stitching visited more slices than exist");
            }
            loop_count += 1;

            let slice = &slices[current];
            pline.extend_remove_repeat(slice.pline.iter(), pos_equal_eps);

            let current_start_index = slice.start_index;
            let end = slice.end_point();

            candidates.clear();
            start_index.visit_query_with_stack(
                end.x - join_eps,
                end.y - join_eps,
                end.x + join_eps,
                end.y + join_eps,
                &mut |i: usize| {
                    if !visited[i] {
                        candidates.push(i);
                    }
                },
                &mut query_stack,
            );

            let index_dist = |i: usize| -> usize {
                let s = slices[i].start_index;
                if current_start_index <= s {
                    s - current_start_index
                } else {
                    orig_max_index - current_start_index + s
                }
            };
            let closes_loop =
                |i: usize| slices[i].end_point().fuzzy_eq_eps(initial_start, pos_equal_eps);

            candidates.sort_unstable_by(|&a, &b| {
                index_dist(a)
                    .cmp(&index_dist(b))
                    .then_with(|| closes_loop(b).cmp(&closes_loop(a)))
            });

            match candidates.first() {
                Some(&next) => {
                    visited[next] = true;
                    // next slice starts at this end point
                    pline.remove_last();
                    current = next;
                }
                None => {
                    if pline.len() > 1 {
                        let closes = pline[0]
                            .pos()
                            .fuzzy_eq_eps(pline[pline.len() - 1].pos(), pos_equal_eps);
                        if is_closed && closes {
                            pline.remove_last();
                            pline.set_is_closed(true);
                        }
                        result.push(pline);
                    }
                    break;
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start_index: usize, pline: Polyline<f64>) -> OpenPlineSlice<f64> {
        OpenPlineSlice { start_index, pline }
    }

    #[test]
    fn chains_slices_into_closed_loop() {
        let slices = vec![
            slice(0, pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0)]),
            slice(2, pline_open![(1.0, 1.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 0.0)]),
        ];
        let result = stitch_slices_together(&slices, true, 3, &PlineOffsetOptions::new());
        assert_eq!(result.len(), 1);
        assert!(result[0].is_closed());
        assert_eq!(result[0].len(), 4);
    }

    #[test]
    fn unconnected_slices_stay_separate() {
        let slices = vec![
            slice(0, pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]),
            slice(1, pline_open![(5.0, 5.0, 0.0), (6.0, 5.0, 0.0)]),
        ];
        let result = stitch_slices_together(&slices, false, 2, &PlineOffsetOptions::new());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| !p.is_closed() && p.len() == 2));
    }

    #[test]
    fn single_closed_slice() {
        let slices = vec![slice(
            0,
            pline_open![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0), (0.0, 0.0, 0.0)],
        )];
        let result = stitch_slices_together(&slices, true, 1, &PlineOffsetOptions::new());
        assert_eq!(result.len(), 1);
        assert!(result[0].is_closed());
        assert_eq!(result[0].len(), 2);
    }

    #[test]
    fn prefers_nearest_forward_slice() {
        // both candidates start at (1, 0), the one at index 1 is nearer than the one at index 3
        let slices = vec![
            slice(0, pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]),
            slice(3, pline_open![(1.0, 0.0, 0.0), (1.0, -1.0, 0.0)]),
            slice(1, pline_open![(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]),
        ];
        let result = stitch_slices_together(&slices, false, 4, &PlineOffsetOptions::new());
        assert_eq!(result.len(), 2);
        assert!(result[0][result[0].len() - 1].pos().fuzzy_eq(crate::core::math::Vector2::new(2.0, 0.0)));
    }

    #[test]
    fn prefers_closing_slice_at_equal_distance() {
        // both candidates start at (1, 0) with segment index 1, only the second returns to (0, 0)
        let slices = vec![
            slice(0, pline_open![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]),
            slice(1, pline_open![(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]),
            slice(1, pline_open![(1.0, 0.0, 0.0), (0.5, 1.0, 0.0), (0.0, 0.0, 0.0)]),
        ];
        let result = stitch_slices_together(&slices, true, 3, &PlineOffsetOptions::new());
        assert_eq!(result.len(), 2);

        let closed = &result[0];
        assert!(closed.is_closed());
        assert_eq!(closed.len(), 3);
        let expected = [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)];
        for (v, &(x, y)) in closed.iter().zip(expected.iter()) {
            assert!(v.pos().fuzzy_eq(crate::core::math::Vector2::new(x, y)));
        }

        let open = &result[1];
        assert!(!open.is_closed());
        assert_eq!(open.len(), 2);
        assert!(open[1].pos().fuzzy_eq(crate::core::math::Vector2::new(2.0, 0.0)));
    }
}
