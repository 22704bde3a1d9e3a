use std::collections::HashMap;

use bloom_blocks::{Block, BlockRegistry};

use super::DecorationEngine;
use crate::buffer::VoxelBuffer;
use crate::region::{BlockPos, RegionBounds};
use crate::worldgen::DecorationParams;

pub(crate) const BLOCKS: &str = r#"
    [[blocks]]
    name = "air"
    solid = false
    [[blocks]]
    name = "stone"
    [[blocks]]
    name = "tall_grass"
    solid = false
    state_schema = { shrub = ["dead_bush", "tall_grass", "fern"] }
    [[blocks]]
    name = "double_tall_grass"
    solid = false
    [[blocks]]
    name = "poppy"
    solid = false
    [[blocks]]
    name = "rose_bush_lower"
    solid = false
    [[blocks]]
    name = "rose_bush_upper"
    solid = false
"#;

pub(crate) const STONE: Block = Block::kind(1);

pub(crate) fn registry() -> BlockRegistry {
    BlockRegistry::from_toml_str(BLOCKS).expect("registry")
}

pub(crate) fn engine(reg: &BlockRegistry) -> DecorationEngine {
    let params = DecorationParams::from_toml_str("", reg).expect("params");
    DecorationEngine::new(params, reg)
}

/// Region buffer storing only non-air blocks; panics on writes outside bounds.
#[derive(Clone, Debug)]
pub(crate) struct SparseBuf {
    bounds: RegionBounds,
    blocks: HashMap<(i32, i32, i32), Block>,
    writes: usize,
}

impl SparseBuf {
    pub(crate) fn new(min: BlockPos, max: BlockPos) -> Self {
        Self {
            bounds: RegionBounds::new(min, max),
            blocks: HashMap::new(),
            writes: 0,
        }
    }

    pub(crate) fn fill_solid_below(&mut self, y_top: i32) {
        let rows: Vec<i32> = (self.bounds.min.y..y_top).collect();
        self.fill_solid_rows(&rows);
    }

    pub(crate) fn fill_solid_rows(&mut self, rows: &[i32]) {
        let b = self.bounds;
        for &y in rows {
            for z in b.min.z..=b.max.z {
                for x in b.min.x..=b.max.x {
                    self.blocks.insert((x, y, z), STONE);
                }
            }
        }
    }

    pub(crate) fn is_untouched(&self) -> bool {
        self.writes == 0
    }
}

// Contents only; the write counter is bookkeeping.
impl PartialEq for SparseBuf {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds && self.blocks == other.blocks
    }
}

impl VoxelBuffer for SparseBuf {
    fn block_at(&self, x: i32, y: i32, z: i32) -> Block {
        self.blocks.get(&(x, y, z)).copied().unwrap_or(Block::AIR)
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) {
        assert!(
            self.bounds.contains(x, y, z),
            "write at ({x}, {y}, {z}) outside {:?}",
            self.bounds
        );
        self.writes += 1;
        if block == Block::AIR {
            self.blocks.remove(&(x, y, z));
        } else {
            self.blocks.insert((x, y, z), block);
        }
    }

    fn bounds_min(&self) -> BlockPos {
        self.bounds.min
    }

    fn bounds_max(&self) -> BlockPos {
        self.bounds.max
    }
}
