//! Small hand-shaped terrains: flat ground, stacked floating islands, and
//! overhangs. Deterministic in world coordinates so adjacent regions agree.

use bloom_blocks::Block;
use bloom_world::BlockPos;

use crate::RegionBuf;

/// Solid up to and including `top_y` everywhere.
pub fn flat_ground(
    origin: BlockPos,
    sx: usize,
    sy: usize,
    sz: usize,
    top_y: i32,
    solid: Block,
) -> RegionBuf {
    RegionBuf::fill_with(origin, sx, sy, sz, |_, y, _| {
        if y <= top_y { solid } else { Block::AIR }
    })
}

/// Horizontal slab `y_lo..=y_hi` over the whole region footprint.
pub fn add_slab(buf: &mut RegionBuf, y_lo: i32, y_hi: i32, solid: Block) {
    let b = buf.region_bounds();
    for y in y_lo.max(b.min.y)..=y_hi.min(b.max.y) {
        for z in b.min.z..=b.max.z {
            for x in b.min.x..=b.max.x {
                buf.set_world(x, y, z, solid);
            }
        }
    }
}

#[inline]
fn lattice(x: i32, z: i32, salt: i32) -> u32 {
    let h = (x as u32)
        .wrapping_mul(0x9E37_79B1)
        .wrapping_add((z as u32).wrapping_mul(0x85EB_CA77))
        .wrapping_add(salt as u32);
    (h ^ (h >> 15)).wrapping_mul(0x2C1B_3C6D) >> 16
}

/// Three island layers stacked above `base_y`, each a few blocks thick.
///
/// The lower layer covers every column; the middle and upper layers have
/// holes and ragged undersides, so many columns see open sky above some
/// surfaces and a canopy above others.
pub fn floating_islands(
    origin: BlockPos,
    sx: usize,
    sy: usize,
    sz: usize,
    base_y: i32,
    solid: Block,
) -> RegionBuf {
    RegionBuf::fill_with(origin, sx, sy, sz, |x, y, z| {
        let low = y >= base_y && y <= base_y + 2;
        let mid_h = lattice(x, z, 1);
        let mid_bottom = base_y + 8 + (mid_h % 3) as i32;
        let mid = mid_h % 5 != 0 && y >= mid_bottom && y <= base_y + 12;
        let top_h = lattice(x, z, 2);
        let top_bottom = base_y + 20 + (top_h % 4) as i32;
        let top = top_h % 3 != 0 && y >= top_bottom && y <= base_y + 24;
        if low || mid || top { solid } else { Block::AIR }
    })
}

/// Ground at `ground_y` with a one-block-thick roof at `roof_y` over the
/// half of the region with `x` below `split_x`.
#[allow(clippy::too_many_arguments)]
pub fn overhang(
    origin: BlockPos,
    sx: usize,
    sy: usize,
    sz: usize,
    ground_y: i32,
    roof_y: i32,
    split_x: i32,
    solid: Block,
) -> RegionBuf {
    RegionBuf::fill_with(origin, sx, sy, sz, |x, y, _| {
        if y <= ground_y || (y == roof_y && x < split_x) {
            solid
        } else {
            Block::AIR
        }
    })
}
