//! Dense region buffer and terrain fixtures for the decoration pass.
#![forbid(unsafe_code)]

pub mod fixtures;

use bloom_blocks::Block;
use bloom_world::{BlockPos, RegionBounds, VoxelBuffer};

/// Blocks of an axis-aligned box, addressed by world coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionBuf {
    pub origin: BlockPos,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl RegionBuf {
    pub fn new(origin: BlockPos, sx: usize, sy: usize, sz: usize) -> Self {
        Self::from_blocks_local(origin, sx, sy, sz, Vec::new())
    }

    pub fn from_blocks_local(
        origin: BlockPos,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        RegionBuf {
            origin,
            sx,
            sy,
            sz,
            blocks: b,
        }
    }

    /// Builds a region by evaluating `f` at every world position.
    pub fn fill_with(
        origin: BlockPos,
        sx: usize,
        sy: usize,
        sz: usize,
        mut f: impl FnMut(i32, i32, i32) -> Block,
    ) -> Self {
        let mut blocks = Vec::with_capacity(sx * sy * sz);
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    blocks.push(f(
                        origin.x + x as i32,
                        origin.y + y as i32,
                        origin.z + z as i32,
                    ));
                }
            }
        }
        Self::from_blocks_local(origin, sx, sy, sz, blocks)
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn region_bounds(&self) -> RegionBounds {
        RegionBounds::new(
            self.origin,
            self.origin
                .offset(self.sx as i32 - 1, self.sy as i32 - 1, self.sz as i32 - 1),
        )
    }

    #[inline]
    fn local(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, usize)> {
        let lx = i64::from(wx) - i64::from(self.origin.x);
        let ly = i64::from(wy) - i64::from(self.origin.y);
        let lz = i64::from(wz) - i64::from(self.origin.z);
        if lx < 0 || ly < 0 || lz < 0 {
            return None;
        }
        let (lx, ly, lz) = (lx as usize, ly as usize, lz as usize);
        if lx < self.sx && ly < self.sy && lz < self.sz {
            Some((lx, ly, lz))
        } else {
            None
        }
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.local(wx, wy, wz).is_some()
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        let (lx, ly, lz) = self.local(wx, wy, wz)?;
        Some(self.get_local(lx, ly, lz))
    }

    /// Returns false (and writes nothing) outside the region.
    #[inline]
    pub fn set_world(&mut self, wx: i32, wy: i32, wz: i32, block: Block) -> bool {
        match self.local(wx, wy, wz) {
            Some((lx, ly, lz)) => {
                let i = self.idx(lx, ly, lz);
                self.blocks[i] = block;
                true
            }
            None => false,
        }
    }

    /// Copy of the part of this region starting at `origin` with the given
    /// size; cells outside this region read as air.
    pub fn extract(&self, origin: BlockPos, sx: usize, sy: usize, sz: usize) -> RegionBuf {
        RegionBuf::fill_with(origin, sx, sy, sz, |x, y, z| {
            self.get_world(x, y, z).unwrap_or(Block::AIR)
        })
    }

    /// Writes every block of `other` that falls inside this region.
    pub fn paste(&mut self, other: &RegionBuf) {
        for y in 0..other.sy {
            for z in 0..other.sz {
                for x in 0..other.sx {
                    let b = other.get_local(x, y, z);
                    self.set_world(
                        other.origin.x + x as i32,
                        other.origin.y + y as i32,
                        other.origin.z + z as i32,
                        b,
                    );
                }
            }
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}

impl VoxelBuffer for RegionBuf {
    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> Block {
        self.get_world(x, y, z).unwrap_or(Block::AIR)
    }

    #[inline]
    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) {
        let written = self.set_world(x, y, z, block);
        debug_assert!(written, "write at ({x}, {y}, {z}) outside region");
    }

    #[inline]
    fn bounds_min(&self) -> BlockPos {
        self.origin
    }

    #[inline]
    fn bounds_max(&self) -> BlockPos {
        self.region_bounds().max
    }
}
