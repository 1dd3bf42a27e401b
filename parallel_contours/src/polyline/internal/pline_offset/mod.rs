//! Parallel offset of a single polyline.
//!
//! The pipeline: offset each segment ([create_untrimmed_raw_offset_segs]), join them into the
//! raw offset polyline ([create_raw_offset_polyline]), cut the raw offset into slices at its
//! intersects and drop slices that come too close to the input ([slices_from_raw_offset],
//! [slices_from_dual_raw_offsets]) and finally chain the remaining slices together
//! ([stitch_slices_together]).
mod join;
mod raw_offset;
mod slice;
mod stitch;

pub use join::{join_raw_offset_segs, JoinKind, JoinParams, JoinVertexes, SegJoin};
pub use raw_offset::{
    create_raw_offset_polyline, create_untrimmed_raw_offset_segs, RawPlineOffsetSeg,
};
pub use slice::{
    point_valid_for_offset, slice_between, slices_from_dual_raw_offsets, slices_from_raw_offset,
    OpenPlineSlice,
};
pub use stitch::stitch_slices_together;

use crate::{
    core::traits::Real,
    polyline::{PlineOffsetOptions, Polyline},
};
use tracing::debug;

/// Parallel offset `polyline` by `offset`, see
/// [Polyline::parallel_offset_opt](crate::polyline::Polyline::parallel_offset_opt).
pub fn parallel_offset<T>(
    polyline: &Polyline<T>,
    offset: T,
    options: &PlineOffsetOptions<T>,
) -> Vec<Polyline<T>>
where
    T: Real,
{
    if polyline.len() < 2 {
        return Vec::new();
    }
    debug_assert!(
        polyline.remove_repeat_pos(options.pos_equal_eps).is_none(),
        "input has repeated position vertexes"
    );

    let constructed_index;
    let index = match options.aabb_index {
        Some(index) => index,
        None => {
            constructed_index = polyline.finite_approx_aabb_index();
            &constructed_index
        }
    };

    let raw_offset = create_raw_offset_polyline(polyline, offset, options.pos_equal_eps);
    debug!(
        input_vertexes = polyline.len(),
        raw_offset_vertexes = raw_offset.len(),
        "created raw offset polyline"
    );
    if raw_offset.is_empty() {
        return Vec::new();
    }

    let result = if polyline.is_closed() && !options.handle_self_intersects {
        let slices = slices_from_raw_offset(polyline, &raw_offset, index, offset, options);
        debug!(slices = slices.len(), "sliced raw offset at self intersects");
        stitch_slices_together(&slices, true, raw_offset.len() - 1, options)
    } else {
        let dual_raw_offset = create_raw_offset_polyline(polyline, -offset, options.pos_equal_eps);
        debug!(
            dual_raw_offset_vertexes = dual_raw_offset.len(),
            "created dual raw offset polyline"
        );
        let slices = slices_from_dual_raw_offsets(
            polyline,
            &raw_offset,
            &dual_raw_offset,
            index,
            offset,
            options,
        );
        debug!(slices = slices.len(), "sliced raw offset against dual");
        stitch_slices_together(&slices, polyline.is_closed(), raw_offset.len(), options)
    };

    debug!(results = result.len(), "stitched offset polylines");
    debug_assert!(
        result
            .iter()
            .all(|p| p.remove_repeat_pos(options.pos_equal_eps).is_none()),
        "offset result has repeated position vertexes"
    );

    result
}
