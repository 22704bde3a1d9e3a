//! Surface decoration for floating voxel islands.
//!
//! Re-exports the member crates and wires a block registry and decoration
//! config from disk into a ready engine.
#![forbid(unsafe_code)]

use std::path::Path;

use thiserror::Error;

pub use bloom_blocks as blocks;
pub use bloom_chunk as chunk;
pub use bloom_runtime as runtime;
pub use bloom_world as world;

pub use bloom_blocks::{Block, BlockId, BlockRegistry, RegistryError};
pub use bloom_chunk::RegionBuf;
pub use bloom_runtime::{DecorateJob, DecorateOut, Runtime, RuntimeError, decorate_regions_par};
pub use bloom_world::{
    BlockPos, ConfigError, DecorationConfig, DecorationEngine, DecorationParams, DecorationStats,
    Feature, RegionBounds, VoxelBuffer, WorldContext,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Initializes `env_logger` with a default `info` filter; `RUST_LOG` overrides.
/// Later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Builds an engine from a block registry file and a decoration config file.
pub fn load_engine(
    blocks_path: impl AsRef<Path>,
    decoration_path: impl AsRef<Path>,
) -> Result<(BlockRegistry, DecorationEngine), LoadError> {
    let reg = BlockRegistry::load_from_path(blocks_path)?;
    let params = bloom_world::worldgen::load_params_from_path(decoration_path.as_ref(), &reg)?;
    log::info!(
        "decoration engine ready: {} block kinds, {} flowers",
        reg.blocks.len(),
        params.features.concrete_count()
    );
    let engine = DecorationEngine::new(params, &reg);
    Ok((reg, engine))
}

/// Same as [`load_engine`] from in-memory TOML.
pub fn engine_from_toml_str(
    blocks_toml: &str,
    decoration_toml: &str,
) -> Result<(BlockRegistry, DecorationEngine), LoadError> {
    let reg = BlockRegistry::from_toml_str(blocks_toml)?;
    let params = DecorationParams::from_toml_str(decoration_toml, &reg)?;
    let engine = DecorationEngine::new(params, &reg);
    Ok((reg, engine))
}

#[cfg(test)]
mod tests {
    use bloom_chunk::fixtures::floating_islands;

    use super::*;

    const BLOCKS: &str = include_str!("../assets/blocks.toml");
    const DECORATION: &str = include_str!("../assets/decoration.toml");

    #[test]
    fn shipped_assets_build_an_engine() {
        let (reg, engine) = engine_from_toml_str(BLOCKS, DECORATION).expect("engine");
        let p = engine.params();
        assert_eq!(p.grass_odds, 0.3);
        assert_eq!(p.double_grass_odds, 0.9);
        assert_eq!(p.covered_grass_odds, 0.8);
        assert_eq!(p.features.concrete_count(), 2);

        let tall = reg.id_by_name("tall_grass").unwrap();
        assert_eq!(p.cover.id, tall);
        let shrub = reg.get(tall).unwrap().state_prop_value(p.cover.state, "shrub");
        assert_eq!(shrub, Some("tall_grass"));
        assert_eq!(reg.unknown_block_id, reg.id_by_name("stone"));

        let rose = reg.make_block_by_name("rose_bush_lower", None).unwrap();
        assert!(
            p.features
                .iter()
                .any(|f| matches!(f, Feature::Double { lower, .. } if *lower == rose))
        );
    }

    #[test]
    fn shipped_assets_decorate_islands() {
        let (reg, engine) = engine_from_toml_str(BLOCKS, DECORATION).expect("engine");
        let stone = reg.make_block_by_name("stone", None).unwrap();
        let mut buf = floating_islands(BlockPos::new(0, 64, 0), 16, 48, 16, 70, stone);
        let stats = engine.decorate(&mut buf, &WorldContext::new(12345));
        assert_eq!(stats.columns, 256);
        assert!(stats.surfaces > 0);
        assert!(stats.placements() > 0);
    }

    #[test]
    fn bad_decoration_config_is_reported() {
        let err = engine_from_toml_str(BLOCKS, "[cover]\nblock = \"moss\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
        let err = engine_from_toml_str("[[blocks]]\nname = 3\n", DECORATION).unwrap_err();
        assert!(matches!(err, LoadError::Registry(_)));
    }

    #[test]
    fn logging_can_be_initialised_twice() {
        init_logging();
        init_logging();
        log::info!("logging ready");
    }
}
