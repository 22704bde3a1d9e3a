use bloom_blocks::Block;

/// Number of cell buckets; also fixes the cell-index displacement.
pub const FEATURE_TABLE_LEN: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feature {
    #[default]
    None,
    Single(Block),
    Double { lower: Block, upper: Block },
}

impl Feature {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Feature::None)
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

/// Cell index -> feature. Empty slots keep plain cover between flower cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureTable {
    slots: [Feature; FEATURE_TABLE_LEN],
}

impl FeatureTable {
    pub const fn new(slots: [Feature; FEATURE_TABLE_LEN]) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn get(&self, cell_index: usize) -> Feature {
        self.slots[cell_index]
    }

    pub fn concrete_count(&self) -> usize {
        self.slots.iter().filter(|f| f.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.slots.iter()
    }
}
