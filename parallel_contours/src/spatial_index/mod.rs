//! Static (build once, query many) packed Hilbert R-tree over axis aligned bounding boxes.
//!
//! Items are added to a [StaticAABB2DIndexBuilder] which is consumed by
//! [StaticAABB2DIndexBuilder::build] to produce an immutable [StaticAABB2DIndex]. Leaves are
//! ordered along a Hilbert curve so runs of `node_size` items are spatially close, parent levels
//! are then built bottom up.
mod error;
mod hilbert;

pub use error::SpatialIndexBuildError;

use crate::core::traits::{ControlFlow, Real};
use hilbert::{hilbert_xy_to_index, sort_to_node_buckets, HILBERT_MAX};

/// Default number of children per node.
pub const DEFAULT_NODE_SIZE: usize = 16;

/// Axis aligned bounding box.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AABB<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T> AABB<T> {
    #[inline]
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        AABB {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T> AABB<T>
where
    T: Real,
{
    /// Test if this box overlaps the box given (touching counts as overlapping).
    #[inline]
    pub fn overlaps(&self, min_x: T, min_y: T, max_x: T, max_y: T) -> bool {
        !(max_x < self.min_x || max_y < self.min_y || min_x > self.max_x || min_y > self.max_y)
    }

    /// Grow this box to also enclose `other`.
    #[inline]
    pub fn expand(&mut self, other: &AABB<T>) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Box grown by `amount` on every side.
    #[inline]
    pub fn expanded_by(&self, amount: T) -> Self {
        AABB::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    #[inline]
    fn empty() -> Self {
        let max = <T as Real>::max_value();
        let min = <T as Real>::min_value();
        AABB::new(max, max, min, min)
    }
}

/// Builder used to add item boxes before building a [StaticAABB2DIndex].
#[derive(Debug, Clone)]
pub struct StaticAABB2DIndexBuilder<T = f64>
where
    T: Real,
{
    node_size: usize,
    num_items: usize,
    level_bounds: Vec<usize>,
    boxes: Vec<AABB<T>>,
    indices: Vec<usize>,
    pos: usize,
    bounds: AABB<T>,
}

impl<T> StaticAABB2DIndexBuilder<T>
where
    T: Real,
{
    /// Create a builder for exactly `count` items using [DEFAULT_NODE_SIZE].
    pub fn new(count: usize) -> Self {
        Self::new_with_node_size(count, DEFAULT_NODE_SIZE)
    }

    /// Create a builder for exactly `count` items, `node_size` is clamped to `[2, 65535]`.
    pub fn new_with_node_size(count: usize, node_size: usize) -> Self {
        let node_size = node_size.clamp(2, 65535);

        // record end index of each level, leaves first
        let mut level_bounds = Vec::new();
        let mut n = count;
        let mut num_nodes = n;
        level_bounds.push(num_nodes);
        if n > 0 {
            loop {
                n = n.div_ceil(node_size);
                num_nodes += n;
                level_bounds.push(num_nodes);
                if n == 1 {
                    break;
                }
            }
        }

        StaticAABB2DIndexBuilder {
            node_size,
            num_items: count,
            level_bounds,
            boxes: Vec::with_capacity(num_nodes),
            indices: Vec::with_capacity(num_nodes),
            pos: 0,
            bounds: AABB::empty(),
        }
    }

    /// Add an item box, item index is the order boxes are added in.
    pub fn add(&mut self, min_x: T, min_y: T, max_x: T, max_y: T) -> &mut Self {
        debug_assert!(min_x <= max_x && min_y <= max_y, "invalid box");
        let aabb = AABB::new(min_x, min_y, max_x, max_y);
        self.bounds.expand(&aabb);
        self.boxes.push(aabb);
        self.indices.push(self.pos);
        self.pos += 1;
        self
    }

    /// Consume the added boxes and build the index.
    ///
    /// Fails if the number of boxes added differs from the count given at construction or if box
    /// coordinates cannot be mapped onto the Hilbert grid.
    pub fn build(mut self) -> Result<StaticAABB2DIndex<T>, SpatialIndexBuildError> {
        if self.pos != self.num_items {
            return Err(SpatialIndexBuildError::ItemCountError {
                added: self.pos,
                expected: self.num_items,
            });
        }

        if self.num_items == 0 {
            return Ok(StaticAABB2DIndex {
                node_size: self.node_size,
                num_items: 0,
                level_bounds: self.level_bounds,
                boxes: Vec::new(),
                indices: Vec::new(),
            });
        }

        let bounds = self.bounds;
        if self.num_items > self.node_size {
            let mut values = self.hilbert_values()?;
            sort_to_node_buckets(
                &mut values,
                &mut self.boxes,
                &mut self.indices,
                self.node_size,
            );
        }

        // build parent nodes, each parent box encloses a run of up to node_size children and its
        // index entry points to the first child
        let mut child_pos = 0;
        for &level_end in &self.level_bounds[..self.level_bounds.len() - 1] {
            while child_pos < level_end {
                let first_child = child_pos;
                let mut node_box = self.boxes[child_pos];
                let run_end = (child_pos + self.node_size).min(level_end);
                for b in &self.boxes[child_pos + 1..run_end] {
                    node_box.expand(b);
                }
                child_pos = run_end;
                self.boxes.push(node_box);
                self.indices.push(first_child);
            }
        }

        debug_assert_eq!(self.boxes.len(), *self.level_bounds.last().unwrap_or(&0));
        debug_assert!(self.boxes.last().is_some_and(|b| *b == bounds));

        tracing::trace!(
            items = self.num_items,
            nodes = self.boxes.len(),
            levels = self.level_bounds.len(),
            "built spatial index"
        );

        Ok(StaticAABB2DIndex {
            node_size: self.node_size,
            num_items: self.num_items,
            level_bounds: self.level_bounds,
            boxes: self.boxes,
            indices: self.indices,
        })
    }

    /// Hilbert value of each item box center mapped into the overall bounds.
    fn hilbert_values(&self) -> Result<Vec<u32>, SpatialIndexBuildError> {
        let bounds = self.bounds;
        let width = bounds.max_x - bounds.min_x;
        let height = bounds.max_y - bounds.min_y;
        let hilbert_max =
            T::from(HILBERT_MAX).ok_or(SpatialIndexBuildError::NumericCastError)?;

        let to_grid = |center: T, min: T, extent: T| -> Result<u32, SpatialIndexBuildError> {
            if extent == T::zero() {
                return Ok(0);
            }
            let scaled = (hilbert_max * (center - min) / extent).floor();
            scaled
                .to_u32()
                .map(|v| v.min(HILBERT_MAX))
                .ok_or(SpatialIndexBuildError::NumericCastError)
        };

        self.boxes
            .iter()
            .map(|b| {
                let cx = (b.min_x + b.max_x) / T::two();
                let cy = (b.min_y + b.max_y) / T::two();
                Ok(hilbert_xy_to_index(
                    to_grid(cx, bounds.min_x, width)?,
                    to_grid(cy, bounds.min_y, height)?,
                ))
            })
            .collect()
    }
}

/// Immutable packed Hilbert R-tree, see the [module level docs](self).
#[derive(Debug, Clone)]
pub struct StaticAABB2DIndex<T = f64>
where
    T: Real,
{
    node_size: usize,
    num_items: usize,
    level_bounds: Vec<usize>,
    boxes: Vec<AABB<T>>,
    indices: Vec<usize>,
}

impl<T> StaticAABB2DIndex<T>
where
    T: Real,
{
    /// Box enclosing every item, `None` if the index holds no items.
    #[inline]
    pub fn bounds(&self) -> Option<AABB<T>> {
        self.boxes.last().copied()
    }

    /// Number of items the index was built with.
    #[inline]
    pub fn count(&self) -> usize {
        self.num_items
    }

    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// End positions (exclusive) of each tree level within [StaticAABB2DIndex::all_boxes], leaves
    /// first.
    #[inline]
    pub fn level_bounds(&self) -> &[usize] {
        &self.level_bounds
    }

    /// Every node box, leaves (in Hilbert order) followed by each parent level.
    #[inline]
    pub fn all_boxes(&self) -> &[AABB<T>] {
        &self.boxes
    }

    /// Item boxes in Hilbert order, use [StaticAABB2DIndex::map_all_boxes_index] to recover the
    /// item index of a position.
    #[inline]
    pub fn item_boxes(&self) -> &[AABB<T>] {
        &self.boxes[0..self.num_items]
    }

    /// Map a position in [StaticAABB2DIndex::all_boxes] to its item index (for leaves) or first
    /// child position (for parent nodes).
    #[inline]
    pub fn map_all_boxes_index(&self, all_boxes_index: usize) -> usize {
        self.indices[all_boxes_index]
    }

    /// Collect the item indexes of every box overlapping the query box.
    pub fn query(&self, min_x: T, min_y: T, max_x: T, max_y: T) -> Vec<usize> {
        let mut results = Vec::new();
        self.visit_query(min_x, min_y, max_x, max_y, &mut |i: usize| {
            results.push(i);
        });
        results
    }

    /// Visit the item index of every box overlapping the query box.
    ///
    /// Traversal stops early when the visitor returns a breaking [ControlFlow] value.
    pub fn visit_query<V, C>(&self, min_x: T, min_y: T, max_x: T, max_y: T, visitor: &mut V)
    where
        V: FnMut(usize) -> C,
        C: ControlFlow,
    {
        let mut stack = Vec::with_capacity(16);
        self.visit_query_with_stack(min_x, min_y, max_x, max_y, visitor, &mut stack);
    }

    /// Same as [StaticAABB2DIndex::visit_query] using `stack` for traversal so repeated queries
    /// can reuse one allocation. The stack is cleared before use.
    pub fn visit_query_with_stack<V, C>(
        &self,
        min_x: T,
        min_y: T,
        max_x: T,
        max_y: T,
        visitor: &mut V,
        stack: &mut Vec<usize>,
    ) where
        V: FnMut(usize) -> C,
        C: ControlFlow,
    {
        stack.clear();
        if self.boxes.is_empty() {
            return;
        }

        let mut node_index = self.boxes.len() - 1;
        let mut level = self.level_bounds.len() - 1;

        loop {
            let end = (node_index + self.node_size).min(self.level_bounds[level]);
            for pos in node_index..end {
                if !self.boxes[pos].overlaps(min_x, min_y, max_x, max_y) {
                    continue;
                }

                let index = self.indices[pos];
                if node_index < self.num_items {
                    if visitor(index).should_break() {
                        return;
                    }
                } else {
                    stack.push(index);
                    stack.push(level - 1);
                }
            }

            // entries are pushed as (child position, level) pairs
            match (stack.pop(), stack.pop()) {
                (Some(next_level), Some(next_index)) => {
                    level = next_level;
                    node_index = next_index;
                }
                _ => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Control;

    fn grid_index(n: usize) -> StaticAABB2DIndex<f64> {
        let mut builder = StaticAABB2DIndexBuilder::new(n * n);
        for i in 0..n {
            for j in 0..n {
                let x = i as f64;
                let y = j as f64;
                builder.add(x, y, x + 0.5, y + 0.5);
            }
        }
        builder.build().unwrap()
    }

    #[test]
    fn level_bounds_for_multiple_levels() {
        let index = grid_index(10);
        // 100 leaves, 7 parents, 1 root
        assert_eq!(index.level_bounds(), &[100, 107, 108]);
        assert_eq!(index.all_boxes().len(), 108);
        assert_eq!(index.bounds(), Some(AABB::new(0.0, 0.0, 9.5, 9.5)));
    }

    #[test]
    fn item_boxes_map_back_to_added_order() {
        let index = grid_index(6);
        for (pos, b) in index.item_boxes().iter().enumerate() {
            let item = index.map_all_boxes_index(pos);
            assert_eq!(b.min_x, (item / 6) as f64);
            assert_eq!(b.min_y, (item % 6) as f64);
        }
    }

    #[test]
    fn early_break_stops_visiting() {
        let index = grid_index(10);
        let mut visited = 0;
        index.visit_query(0.0, 0.0, 10.0, 10.0, &mut |_| {
            visited += 1;
            Control::Break(())
        });
        assert_eq!(visited, 1);
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let mut builder = StaticAABB2DIndexBuilder::<f64>::new(2);
        builder.add(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            builder.build().unwrap_err(),
            SpatialIndexBuildError::ItemCountError {
                added: 1,
                expected: 2
            }
        );
    }
}
