//! Hilbert curve ordering used to pack index leaves.

use super::AABB;

/// Largest grid coordinate passed to [hilbert_xy_to_index].
pub(crate) const HILBERT_MAX: u32 = u16::MAX as u32;

/// Position of the grid cell `(x, y)` along a 16 bit order Hilbert curve.
///
/// Both `x` and `y` must be at most [HILBERT_MAX].
pub(crate) fn hilbert_xy_to_index(x: u32, y: u32) -> u32 {
    debug_assert!(x <= HILBERT_MAX && y <= HILBERT_MAX);

    // branch free bit twiddling variant (Fast Hilbert Curve Generation, rawrunprotected)
    let mut a = x ^ y;
    let mut b = 0xFFFF ^ a;
    let mut c = 0xFFFF ^ (x | y);
    let mut d = x & (y ^ 0xFFFF);

    let mut a1 = a | (b >> 1);
    let mut b1 = (a >> 1) ^ a;
    let mut c1 = ((c >> 1) ^ (b & (d >> 1))) ^ c;
    let mut d1 = ((a & (c >> 1)) ^ (d >> 1)) ^ d;

    for shift in [2, 4] {
        a = a1;
        b = b1;
        c = c1;
        d = d1;
        a1 = (a & (a >> shift)) ^ (b & (b >> shift));
        b1 = (a & (b >> shift)) ^ (b & ((a ^ b) >> shift));
        c1 ^= (a & (c >> shift)) ^ (b & (d >> shift));
        d1 ^= (b & (c >> shift)) ^ ((a ^ b) & (d >> shift));
    }

    a = a1;
    b = b1;
    c = c1;
    d = d1;
    c1 ^= (a & (c >> 8)) ^ (b & (d >> 8));
    d1 ^= (b & (c >> 8)) ^ ((a ^ b) & (d >> 8));

    a = c1 ^ (c1 >> 1);
    b = d1 ^ (d1 >> 1);

    let i0 = x ^ y;
    let i1 = b | (0xFFFF ^ (i0 | a));

    (interleave(i1) << 1) | interleave(i0)
}

/// Spread the low 16 bits of `v` into the even bit positions.
#[inline]
fn interleave(mut v: u32) -> u32 {
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

/// Sort `values` ascending (moving `boxes` and `indices` along with them) only until every run
/// of `node_size` items holds the right set of items, order within a run is left unspecified.
pub(crate) fn sort_to_node_buckets<T: Copy>(
    values: &mut [u32],
    boxes: &mut [AABB<T>],
    indices: &mut [usize],
    node_size: usize,
) {
    if values.len() < 2 {
        return;
    }

    let mut ranges = vec![(0usize, values.len() - 1)];
    while let Some((left, right)) = ranges.pop() {
        if left / node_size >= right / node_size {
            continue;
        }

        let pivot = values[(left + right) / 2];
        let mut i = left;
        let mut j = right;
        // hoare partition
        let split = loop {
            while values[i] < pivot {
                i += 1;
            }
            while values[j] > pivot {
                j -= 1;
            }
            if i >= j {
                break j;
            }
            values.swap(i, j);
            boxes.swap(i, j);
            indices.swap(i, j);
            i += 1;
            j -= 1;
        };

        ranges.push((left, split));
        ranges.push((split + 1, right));
    }
}
