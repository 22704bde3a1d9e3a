use std::ops::AddAssign;
use std::sync::Arc;

use bloom_blocks::BlockRegistry;

use super::cellular::{CellField, CellularFeatureField, LayerSeeds};
use super::feature::{Feature, FeatureTable};
use super::hash::column_hash;
use super::rarity::RarityCurve;
use super::scan::ColumnScanner;
use crate::buffer::VoxelBuffer;
use crate::context::WorldContext;
use crate::region::RegionBounds;
use crate::worldgen::DecorationParams;

/// Vertical range a region is decorated over, after clamping to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalSpan {
    /// Scan start: region top minus the two-block margin, capped at the world ceiling.
    pub y_start: i32,
    /// Inclusive scan floor.
    pub y_end: i32,
    /// Region top minus the margin, unclamped; tall cover must start below it.
    pub y_max: i32,
}

impl VerticalSpan {
    /// `None` when the region lies entirely outside the generated height range.
    pub fn clamp(bounds: &RegionBounds, ctx: &WorldContext) -> Option<Self> {
        let y_max = bounds.max.y.saturating_sub(2);
        let y_min = bounds.min.y;
        if y_max < ctx.min_height || y_min > ctx.max_height {
            return None;
        }
        Some(Self {
            y_start: y_max.min(ctx.max_height),
            y_end: y_min.max(ctx.min_height),
            y_max,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecorationStats {
    pub regions: u32,
    pub skipped_regions: u32,
    pub columns: u32,
    /// Columns with a top surface inside the span.
    pub surfaces: u32,
    pub features: u32,
    pub cover: u32,
    pub double_cover: u32,
    /// Cover placed on surfaces below an overhang.
    pub covered_cover: u32,
}

impl DecorationStats {
    pub fn placements(&self) -> u32 {
        self.features + self.cover + self.double_cover + self.covered_cover
    }
}

impl AddAssign for DecorationStats {
    fn add_assign(&mut self, rhs: Self) {
        self.regions += rhs.regions;
        self.skipped_regions += rhs.skipped_regions;
        self.columns += rhs.columns;
        self.surfaces += rhs.surfaces;
        self.features += rhs.features;
        self.cover += rhs.cover;
        self.double_cover += rhs.double_cover;
        self.covered_cover += rhs.covered_cover;
    }
}

/// Picks the flower for a column, if any.
///
/// A flower from the primary layer survives when `value` clears the layer's
/// rarity threshold. Otherwise the overlap layer is consulted; its flower is
/// kept only if `value` also clears the overlap threshold, and an empty
/// overlap cell yields no flower.
pub fn resolve_feature<C: CellField + ?Sized>(
    table: &FeatureTable,
    rarity: RarityCurve,
    primary: &C,
    overlap: &C,
    x: i32,
    z: i32,
    value: f32,
) -> Feature {
    let value = f64::from(value);
    let feature = table.get(primary.cell_index(x, z));
    if feature.is_some() && value >= rarity.apply(primary.density(x, z)) {
        return feature;
    }
    let feature = table.get(overlap.cell_index(x, z));
    if feature.is_some() && value < rarity.apply(overlap.density(x, z)) {
        return Feature::None;
    }
    feature
}

/// Decorates regions of voxel terrain with flowers and ground cover.
///
/// Holds configuration only: cell layers are rebuilt from the world seed on
/// every call, so one engine can be shared across worker threads and the
/// output for a column never depends on which region or thread produced it.
#[derive(Clone, Debug)]
pub struct DecorationEngine {
    params: Arc<DecorationParams>,
    scanner: ColumnScanner,
    rarity: RarityCurve,
}

struct Layers {
    primary: CellularFeatureField,
    overlap: CellularFeatureField,
}

impl DecorationEngine {
    pub fn new(params: DecorationParams, reg: &BlockRegistry) -> Self {
        let rarity = RarityCurve::new(params.rarity_degree);
        Self {
            params: Arc::new(params),
            scanner: ColumnScanner::from_registry(reg),
            rarity,
        }
    }

    #[inline]
    pub fn params(&self) -> &DecorationParams {
        &self.params
    }

    /// Primary and overlap cell layers for a world seed.
    pub fn cell_layers(&self, seed: i64) -> (CellularFeatureField, CellularFeatureField) {
        let seeds = LayerSeeds::from_world_seed(seed, self.params.overlap_seed_multiplier);
        let freq = self.params.cell_frequency;
        (
            CellularFeatureField::new(seeds.primary, freq),
            CellularFeatureField::new(seeds.overlap, freq),
        )
    }

    /// Flower decision for a single column under the given world seed.
    pub fn feature_at(&self, seed: i64, x: i32, z: i32) -> Feature {
        let (primary, overlap) = self.cell_layers(seed);
        let value = column_hash(x, z, seed);
        resolve_feature(&self.params.features, self.rarity, &primary, &overlap, x, z, value)
    }

    pub fn decorate<B: VoxelBuffer + ?Sized>(
        &self,
        buf: &mut B,
        ctx: &WorldContext,
    ) -> DecorationStats {
        let bounds = buf.bounds();
        let mut stats = DecorationStats {
            regions: 1,
            ..DecorationStats::default()
        };
        let Some(span) = VerticalSpan::clamp(&bounds, ctx) else {
            log::trace!(
                "decoration skipped: region y {}..={} outside world {}..={}",
                bounds.min.y,
                bounds.max.y,
                ctx.min_height,
                ctx.max_height
            );
            stats.skipped_regions = 1;
            return stats;
        };

        let (primary, overlap) = self.cell_layers(ctx.seed);
        let layers = Layers { primary, overlap };
        for z in bounds.min.z..=bounds.max.z {
            for x in bounds.min.x..=bounds.max.x {
                stats.columns += 1;
                self.decorate_column(buf, &layers, span, ctx.seed, x, z, &mut stats);
            }
        }
        log::debug!(
            "decorated region min=({}, {}, {}) max=({}, {}, {}) surfaces={} features={} cover={} double={} covered={}",
            bounds.min.x,
            bounds.min.y,
            bounds.min.z,
            bounds.max.x,
            bounds.max.y,
            bounds.max.z,
            stats.surfaces,
            stats.features,
            stats.cover,
            stats.double_cover,
            stats.covered_cover
        );
        stats
    }

    #[allow(clippy::too_many_arguments)]
    fn decorate_column<B: VoxelBuffer + ?Sized>(
        &self,
        buf: &mut B,
        layers: &Layers,
        span: VerticalSpan,
        seed: i64,
        x: i32,
        z: i32,
        stats: &mut DecorationStats,
    ) {
        let p = &*self.params;
        let mut yy = self.scanner.next_solid(buf, x, span.y_start, z, span.y_end);
        if yy < span.y_end {
            return;
        }
        stats.surfaces += 1;

        let value = column_hash(x, z, seed);
        let feature = resolve_feature(
            &p.features,
            self.rarity,
            &layers.primary,
            &layers.overlap,
            x,
            z,
            value,
        );
        let odds = f64::from(value);
        match feature {
            Feature::Single(block) => {
                buf.set_block(x, yy + 1, z, block);
                stats.features += 1;
            }
            Feature::Double { lower, upper } => {
                buf.set_block(x, yy + 1, z, lower);
                buf.set_block(x, yy + 2, z, upper);
                stats.features += 1;
            }
            Feature::None if odds >= p.grass_odds => {
                if odds >= p.double_grass_odds && yy + 1 < span.y_max {
                    buf.set_block_kind(x, yy + 1, z, p.double_cover_lower);
                    buf.set_block_kind(x, yy + 2, z, p.double_cover_upper);
                    stats.double_cover += 1;
                } else {
                    buf.set_block(x, yy + 1, z, p.cover);
                    stats.cover += 1;
                }
            }
            Feature::None => {}
        }

        // Covered surfaces only get cover, with a fresh sample per depth.
        yy = self.scanner.next_air(buf, x, yy, z, span.y_end);
        yy = self.scanner.next_solid(buf, x, yy, z, span.y_end);
        while yy >= span.y_end {
            let value = column_hash(x, z, seed ^ i64::from(yy));
            if f64::from(value) >= p.covered_grass_odds {
                buf.set_block(x, yy + 1, z, p.cover);
                stats.covered_cover += 1;
            }
            yy = self.scanner.next_air(buf, x, yy, z, span.y_end);
            yy = self.scanner.next_solid(buf, x, yy, z, span.y_end);
        }
    }
}
