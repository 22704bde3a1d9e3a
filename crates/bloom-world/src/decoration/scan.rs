use bloom_blocks::{Block, BlockRegistry};

use crate::buffer::VoxelBuffer;

/// Walks a column downward across solid/empty runs.
///
/// Non-solid block types (air, cover, flowers) count as empty, so decoration
/// already placed never becomes a surface of its own. Ids the registry does
/// not know take the solidity of its `unknown_block`.
#[derive(Clone, Debug)]
pub struct ColumnScanner {
    solid: Vec<bool>,
    unknown_solid: bool,
}

impl ColumnScanner {
    pub fn from_registry(reg: &BlockRegistry) -> Self {
        Self {
            solid: reg.blocks.iter().map(|ty| ty.solid).collect(),
            unknown_solid: reg.unknown_is_solid(),
        }
    }

    #[inline]
    pub fn is_empty(&self, block: Block) -> bool {
        !self
            .solid
            .get(block.id as usize)
            .copied()
            .unwrap_or(self.unknown_solid)
    }

    /// First solid `y` at or below `y`, or `y_end - 1` if the run reaches the floor.
    pub fn next_solid<B: VoxelBuffer + ?Sized>(
        &self,
        buf: &B,
        x: i32,
        mut y: i32,
        z: i32,
        y_end: i32,
    ) -> i32 {
        while y >= y_end && self.is_empty(buf.block_at(x, y, z)) {
            y -= 1;
        }
        y
    }

    /// First empty `y` at or below `y`, or `y_end - 1` if the run reaches the floor.
    pub fn next_air<B: VoxelBuffer + ?Sized>(
        &self,
        buf: &B,
        x: i32,
        mut y: i32,
        z: i32,
        y_end: i32,
    ) -> i32 {
        while y >= y_end && !self.is_empty(buf.block_at(x, y, z)) {
            y -= 1;
        }
        y
    }
}
