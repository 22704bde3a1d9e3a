use bloom_blocks::{Block, BlockRegistry};
use bloom_chunk::RegionBuf;
use bloom_chunk::fixtures::{floating_islands, overhang};
use bloom_world::{BlockPos, DecorationEngine, DecorationParams, DecorationStats, WorldContext};

const BLOCKS: &str = r#"
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

const STONE: Block = Block::kind(1);

fn setup() -> (BlockRegistry, DecorationEngine) {
    let reg = BlockRegistry::from_toml_str(BLOCKS).expect("registry");
    let params = DecorationParams::from_toml_str("", &reg).expect("params");
    let engine = DecorationEngine::new(params, &reg);
    (reg, engine)
}

fn islands() -> RegionBuf {
    floating_islands(BlockPos::new(-8, 64, -8), 16, 48, 16, 70, STONE)
}

#[test]
fn quadrants_decorate_like_the_whole_region() {
    let (_reg, engine) = setup();
    let ctx = WorldContext::new(0x5DEE_CE66D);

    let mut whole = islands();
    let whole_stats = engine.decorate(&mut whole, &ctx);

    let mut stitched = islands();
    let mut stats = DecorationStats::default();
    for (ox, oz) in [(-8, -8), (0, -8), (-8, 0), (0, 0)] {
        let mut part = stitched.extract(BlockPos::new(ox, 64, oz), 8, 48, 8);
        stats += engine.decorate(&mut part, &ctx);
        stitched.paste(&part);
    }

    assert_eq!(stitched, whole);
    assert_eq!(stats.columns, whole_stats.columns);
    assert_eq!(stats.placements(), whole_stats.placements());
    assert_eq!(stats.regions, 4);
}

#[test]
fn every_decoration_rests_on_ground() {
    let (reg, engine) = setup();
    let mut buf = islands();
    let stats = engine.decorate(&mut buf, &WorldContext::new(42));
    assert!(stats.placements() > 0);
    assert!(stats.covered_cover > 0, "islands should have covered surfaces");

    let lower_halves = ["double_tall_grass", "rose_bush_lower"]
        .map(|n| reg.id_by_name(n).expect("block"));
    let b = buf.region_bounds();
    let mut decorations = 0;
    for y in b.min.y + 1..=b.max.y {
        for z in b.min.z..=b.max.z {
            for x in b.min.x..=b.max.x {
                let block = buf.get_world(x, y, z).unwrap();
                if block == Block::AIR || block == STONE {
                    continue;
                }
                decorations += 1;
                let below = buf.get_world(x, y - 1, z).unwrap();
                assert!(
                    below == STONE || lower_halves.contains(&below.id),
                    "{block:?} at ({x}, {y}, {z}) sits on {below:?}"
                );
            }
        }
    }
    assert!(decorations as u32 >= stats.placements());
}

#[test]
fn world_seed_changes_the_layout() {
    let (_reg, engine) = setup();
    let mut a = islands();
    let mut b = islands();
    engine.decorate(&mut a, &WorldContext::new(1));
    engine.decorate(&mut b, &WorldContext::new(2));
    assert_ne!(a, b);

    let mut again = islands();
    engine.decorate(&mut again, &WorldContext::new(1));
    assert_eq!(again, a);
}

#[test]
fn roofed_ground_only_gets_single_cover() {
    let (reg, engine) = setup();
    let mut buf = overhang(BlockPos::new(0, 64, 0), 16, 24, 16, 70, 80, 8, STONE);
    engine.decorate(&mut buf, &WorldContext::new(7));

    let cover = engine.params().cover;
    let flowers: Vec<u16> = ["poppy", "rose_bush_lower", "double_tall_grass"]
        .iter()
        .map(|n| reg.id_by_name(n).expect("block"))
        .collect();
    for z in 0..16 {
        for x in 0..8 {
            let above_ground = buf.get_world(x, 71, z).unwrap();
            assert!(
                above_ground == Block::AIR || above_ground == cover,
                "under the roof at ({x}, {z}) found {above_ground:?}"
            );
            assert!(!flowers.contains(&above_ground.id));
        }
    }
}
