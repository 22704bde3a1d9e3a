use fastnoise_lite::{CellularDistanceFunction, CellularReturnType, FastNoiseLite, NoiseType};

use super::feature::FEATURE_TABLE_LEN;

/// Scale applied to the unit cell value before truncating to a table index.
/// One bucket per table slot, so every slot owns an equal share of cells.
pub const FEATURE_CELL_DISPLACEMENT: f32 = FEATURE_TABLE_LEN as f32;

/// Table slot for a raw cell value in `[-1, 1]`.
#[inline]
pub fn cell_slot(raw: f32) -> usize {
    let unit = (raw + 1.0) * 0.5;
    // Truncation, not rounding; `as` saturates below zero. A cell value of
    // exactly 1.0 (hashes that round up in f32) joins the last bucket.
    ((unit * FEATURE_CELL_DISPLACEMENT) as usize).min(FEATURE_TABLE_LEN - 1)
}

/// Cell lookups the feature resolver needs from one layer.
pub trait CellField {
    /// Table index of the cell containing the column, in `0..FEATURE_TABLE_LEN`.
    fn cell_index(&self, x: i32, z: i32) -> usize;

    /// Distance from the cell's feature point, in `[0, 1]`.
    fn density(&self, x: i32, z: i32) -> f64;
}

/// Seeds of the primary and overlap cell layers derived from a world seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerSeeds {
    pub primary: i32,
    pub overlap: i32,
}

impl LayerSeeds {
    pub fn from_world_seed(seed: i64, overlap_multiplier: i32) -> Self {
        let primary = ((seed >> 32) ^ seed) as i32;
        Self {
            primary,
            overlap: primary.wrapping_mul(overlap_multiplier),
        }
    }
}

/// One seeded layer of flower cells: a bucket selector and a density sampler
/// sharing the same cell lattice. Immutable once built.
pub struct CellularFeatureField {
    cells: FastNoiseLite,
    density: FastNoiseLite,
}

impl CellularFeatureField {
    pub fn new(seed: i32, frequency: f32) -> Self {
        let mut cells = FastNoiseLite::with_seed(seed);
        cells.set_noise_type(Some(NoiseType::Cellular));
        cells.set_frequency(Some(frequency));
        cells.set_cellular_distance_function(Some(CellularDistanceFunction::Euclidean));
        cells.set_cellular_return_type(Some(CellularReturnType::CellValue));

        let mut density = FastNoiseLite::with_seed(seed);
        density.set_noise_type(Some(NoiseType::Cellular));
        density.set_frequency(Some(frequency));
        density.set_cellular_distance_function(Some(CellularDistanceFunction::Euclidean));
        density.set_cellular_return_type(Some(CellularReturnType::Distance));

        Self { cells, density }
    }
}

impl CellField for CellularFeatureField {
    #[inline]
    fn cell_index(&self, x: i32, z: i32) -> usize {
        cell_slot(self.cells.get_noise_2d(x as f32, z as f32))
    }

    #[inline]
    fn density(&self, x: i32, z: i32) -> f64 {
        let raw = self.density.get_noise_2d(x as f32, z as f32);
        f64::from((raw + 1.0).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_split_the_unit_range_evenly() {
        assert_eq!(cell_slot(-1.0), 0);
        assert_eq!(cell_slot(-0.75), 1);
        assert_eq!(cell_slot(-0.7501), 0);
        assert_eq!(cell_slot(0.0), 4);
        assert_eq!(cell_slot(0.75), 7);
        assert_eq!(cell_slot(0.9999), 7);
        assert_eq!(cell_slot(1.0), FEATURE_TABLE_LEN - 1);
        assert_eq!(cell_slot(-1.5), 0);
    }

    #[test]
    fn every_slot_is_reachable() {
        let field = CellularFeatureField::new(1234, 0.1);
        let mut hist = [0usize; FEATURE_TABLE_LEN];
        for z in -100..100 {
            for x in -100..100 {
                hist[field.cell_index(x, z)] += 1;
            }
        }
        for (slot, &n) in hist.iter().enumerate() {
            assert!(n > 1000, "slot {slot} hit {n} times: {hist:?}");
        }
    }

    #[test]
    fn pinned_cells_for_a_known_seed() {
        // Primary layer seed of world seed 0x5DEECE66D.
        let field = CellularFeatureField::new(-554_899_864, 0.1);
        let density = |bits: u32| f64::from(f32::from_bits(bits));
        for (x, z, slot, d) in [
            (0, 0, 6, 0x3edf_c08e),
            (17, -42, 3, 0x3ea9_650c),
            (-123, 456, 2, 0x3ef0_2ad8),
            (1000, -1000, 1, 0x3edf_c08e),
        ] {
            assert_eq!(field.cell_index(x, z), slot, "slot at ({x}, {z})");
            assert_eq!(field.density(x, z), density(d), "density at ({x}, {z})");
        }
    }

    #[test]
    fn layer_seeds_fold_and_multiply() {
        let s = LayerSeeds::from_world_seed(0x5_DEEC_E66D, 28_703);
        assert_eq!(s.primary, -554_899_864);
        assert_eq!(s.overlap, -1_552_062_824);

        let s = LayerSeeds::from_world_seed(-1, 28_703);
        assert_eq!(s, LayerSeeds { primary: 0, overlap: 0 });

        let s = LayerSeeds::from_world_seed((1_i64 << 32) | 7, 28_703);
        assert_eq!(s, LayerSeeds { primary: 6, overlap: 172_218 });

        let s = LayerSeeds::from_world_seed(-8_070_450_532_247_928_832, 28_703);
        assert_eq!(s.primary, -1_879_048_192);
        assert_eq!(s.overlap, 1_879_048_192);
    }

    #[test]
    fn indices_stay_inside_the_table() {
        let field = CellularFeatureField::new(1234, 0.1);
        for z in -64..64 {
            for x in -64..64 {
                assert!(field.cell_index(x * 3, z * 5) < FEATURE_TABLE_LEN);
            }
        }
    }

    #[test]
    fn density_is_a_unit_value() {
        let field = CellularFeatureField::new(-77, 0.1);
        for z in -40..40 {
            for x in -40..40 {
                let d = field.density(x, z);
                assert!((0.0..=1.0).contains(&d), "density {d} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn cells_are_spatially_coherent() {
        // Neighbouring columns mostly share a cell at frequency 0.1.
        let field = CellularFeatureField::new(99, 0.1);
        let mut same = 0;
        let mut total = 0;
        for z in 0..64 {
            for x in 0..63 {
                total += 1;
                if field.cell_index(x, z) == field.cell_index(x + 1, z) {
                    same += 1;
                }
            }
        }
        assert!(same * 2 > total, "{same} of {total} neighbours matched");
    }

    #[test]
    fn same_seed_same_field() {
        let a = CellularFeatureField::new(5, 0.1);
        let b = CellularFeatureField::new(5, 0.1);
        for i in -100..100 {
            assert_eq!(a.cell_index(i, -i), b.cell_index(i, -i));
            assert_eq!(a.density(i, 2 * i).to_bits(), b.density(i, 2 * i).to_bits());
        }
    }
}
