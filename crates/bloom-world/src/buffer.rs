use bloom_blocks::{Block, BlockId};

use crate::region::{BlockPos, RegionBounds};

/// Mutable block storage addressed by absolute world coordinates.
///
/// Implementations own the storage; the decoration pass only reads and writes
/// inside `bounds()` and never resizes or replaces the buffer.
pub trait VoxelBuffer {
    fn block_at(&self, x: i32, y: i32, z: i32) -> Block;

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block);

    fn bounds_min(&self) -> BlockPos;

    fn bounds_max(&self) -> BlockPos;

    /// Writes the default state of `id`.
    #[inline]
    fn set_block_kind(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        self.set_block(x, y, z, Block::kind(id));
    }

    #[inline]
    fn bounds(&self) -> RegionBounds {
        RegionBounds::new(self.bounds_min(), self.bounds_max())
    }
}
