//! Surface decoration: flowers in overlapping noise cells, ground cover by
//! odds, and sparser cover under every overhang below the top surface.

mod cellular;
mod engine;
mod feature;
mod hash;
mod rarity;
mod scan;
#[cfg(test)]
mod testutil;

pub use cellular::{
    CellField, CellularFeatureField, FEATURE_CELL_DISPLACEMENT, LayerSeeds, cell_slot,
};
pub use engine::{DecorationEngine, DecorationStats, VerticalSpan, resolve_feature};
pub use feature::{FEATURE_TABLE_LEN, Feature, FeatureTable};
pub use hash::column_hash;
pub use rarity::RarityCurve;
pub use scan::ColumnScanner;
