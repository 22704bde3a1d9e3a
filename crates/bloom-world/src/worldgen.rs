use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bloom_blocks::{Block, BlockId, BlockRegistry};
use serde::Deserialize;
use thiserror::Error;

use crate::decoration::{FEATURE_TABLE_LEN, Feature, FeatureTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read decoration config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse decoration config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("decoration block `{0}` is not in the block registry")]
    UnknownBlock(String),
    #[error("{count} flowers configured but the feature table only has {max} slots")]
    TooManyFlowers { count: usize, max: usize },
    #[error("odds `{name}` = {value} is outside [0, 1]")]
    OddsOutOfRange { name: &'static str, value: f64 },
    #[error("cell frequency must be positive and finite, got {0}")]
    BadFrequency(f32),
    #[error("rarity degree must be finite and at least 1, got {0}")]
    BadDegree(f64),
}

#[derive(Clone, Debug, Deserialize)]
pub struct DecorationConfig {
    #[serde(default)]
    pub odds: Odds,
    #[serde(default)]
    pub cells: Cells,
    #[serde(default)]
    pub cover: Cover,
    #[serde(default = "default_flowers")]
    pub flowers: Vec<FlowerDef>,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            odds: Odds::default(),
            cells: Cells::default(),
            cover: Cover::default(),
            flowers: default_flowers(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Odds {
    #[serde(default = "default_grass_odds")]
    pub grass: f64,
    #[serde(default = "default_double_grass_odds")]
    pub double_grass: f64,
    #[serde(default = "default_covered_grass_odds")]
    pub covered_grass: f64,
}
fn default_grass_odds() -> f64 {
    0.3
}
fn default_double_grass_odds() -> f64 {
    0.9
}
fn default_covered_grass_odds() -> f64 {
    0.8
}
impl Default for Odds {
    fn default() -> Self {
        Self {
            grass: default_grass_odds(),
            double_grass: default_double_grass_odds(),
            covered_grass: default_covered_grass_odds(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Cells {
    #[serde(default = "default_cell_frequency")]
    pub frequency: f32,
    #[serde(default = "default_rarity_degree")]
    pub rarity_degree: f64,
    #[serde(default = "default_overlap_seed_multiplier")]
    pub overlap_seed_multiplier: i32,
}
fn default_cell_frequency() -> f32 {
    0.1
}
fn default_rarity_degree() -> f64 {
    4.0
}
fn default_overlap_seed_multiplier() -> i32 {
    28_703
}
impl Default for Cells {
    fn default() -> Self {
        Self {
            frequency: default_cell_frequency(),
            rarity_degree: default_rarity_degree(),
            overlap_seed_multiplier: default_overlap_seed_multiplier(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Cover {
    #[serde(default = "default_cover_block")]
    pub block: String,
    #[serde(default = "default_cover_state")]
    pub state: HashMap<String, String>,
    #[serde(default = "default_double_cover")]
    pub double_lower: String,
    #[serde(default = "default_double_cover")]
    pub double_upper: String,
}
fn default_cover_block() -> String {
    "tall_grass".into()
}
fn default_cover_state() -> HashMap<String, String> {
    HashMap::from([("shrub".to_string(), "tall_grass".to_string())])
}
fn default_double_cover() -> String {
    "double_tall_grass".into()
}
impl Default for Cover {
    fn default() -> Self {
        Self {
            block: default_cover_block(),
            state: default_cover_state(),
            double_lower: default_double_cover(),
            double_upper: default_double_cover(),
        }
    }
}

/// A flower occupying one table slot; `upper` makes it two blocks tall.
#[derive(Clone, Debug, Deserialize)]
pub struct FlowerDef {
    pub block: String,
    #[serde(default)]
    pub upper: Option<String>,
}

fn default_flowers() -> Vec<FlowerDef> {
    vec![
        FlowerDef {
            block: "poppy".into(),
            upper: None,
        },
        FlowerDef {
            block: "rose_bush_lower".into(),
            upper: Some("rose_bush_upper".into()),
        },
    ]
}

// Flattened params used in the column loop (names resolved to blocks)
#[derive(Clone, Debug)]
pub struct DecorationParams {
    pub grass_odds: f64,
    pub double_grass_odds: f64,
    pub covered_grass_odds: f64,
    pub cell_frequency: f32,
    pub rarity_degree: f64,
    pub overlap_seed_multiplier: i32,
    pub cover: Block,
    pub double_cover_lower: BlockId,
    pub double_cover_upper: BlockId,
    pub features: FeatureTable,
}

impl DecorationParams {
    pub fn from_config(cfg: &DecorationConfig, reg: &BlockRegistry) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("grass", cfg.odds.grass),
            ("double_grass", cfg.odds.double_grass),
            ("covered_grass", cfg.odds.covered_grass),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OddsOutOfRange { name, value });
            }
        }
        if !(cfg.cells.frequency.is_finite() && cfg.cells.frequency > 0.0) {
            return Err(ConfigError::BadFrequency(cfg.cells.frequency));
        }
        if !(cfg.cells.rarity_degree.is_finite() && cfg.cells.rarity_degree >= 1.0) {
            return Err(ConfigError::BadDegree(cfg.cells.rarity_degree));
        }
        if cfg.flowers.len() > FEATURE_TABLE_LEN {
            return Err(ConfigError::TooManyFlowers {
                count: cfg.flowers.len(),
                max: FEATURE_TABLE_LEN,
            });
        }

        let lookup = |name: &str, props: Option<&HashMap<String, String>>| {
            reg.make_block_by_name(name, props)
                .ok_or_else(|| ConfigError::UnknownBlock(name.to_string()))
        };

        let mut slots = [Feature::None; FEATURE_TABLE_LEN];
        for (slot, def) in slots.iter_mut().zip(&cfg.flowers) {
            let lower = lookup(&def.block, None)?;
            *slot = match def.upper.as_deref() {
                Some(upper) => Feature::Double {
                    lower,
                    upper: lookup(upper, None)?,
                },
                None => Feature::Single(lower),
            };
        }

        Ok(Self {
            grass_odds: cfg.odds.grass,
            double_grass_odds: cfg.odds.double_grass,
            covered_grass_odds: cfg.odds.covered_grass,
            cell_frequency: cfg.cells.frequency,
            rarity_degree: cfg.cells.rarity_degree,
            overlap_seed_multiplier: cfg.cells.overlap_seed_multiplier,
            cover: lookup(&cfg.cover.block, Some(&cfg.cover.state))?,
            double_cover_lower: lookup(&cfg.cover.double_lower, None)?.id,
            double_cover_upper: lookup(&cfg.cover.double_upper, None)?.id,
            features: FeatureTable::new(slots),
        })
    }

    pub fn from_toml_str(toml_str: &str, reg: &BlockRegistry) -> Result<Self, ConfigError> {
        let cfg: DecorationConfig = toml::from_str(toml_str)?;
        Self::from_config(&cfg, reg)
    }
}

pub fn load_params_from_path(
    path: &Path,
    reg: &BlockRegistry,
) -> Result<DecorationParams, ConfigError> {
    let s = fs::read_to_string(path)?;
    DecorationParams::from_toml_str(&s, reg)
}
