//! World context, decoration parameters, and the surface decoration pass.
#![forbid(unsafe_code)]

mod buffer;
mod context;
pub mod decoration;
mod region;
pub mod worldgen;

pub use buffer::VoxelBuffer;
pub use context::{DEFAULT_MAX_HEIGHT, DEFAULT_MIN_HEIGHT, WorldContext};
pub use decoration::{DecorationEngine, DecorationStats, Feature};
pub use region::{BlockPos, RegionBounds};
pub use worldgen::{ConfigError, DecorationConfig, DecorationParams};
