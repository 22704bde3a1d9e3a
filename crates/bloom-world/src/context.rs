pub const DEFAULT_MIN_HEIGHT: i32 = 64;
pub const DEFAULT_MAX_HEIGHT: i32 = 192;

/// What the decoration pass needs to know about the world it runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldContext {
    pub seed: i64,
    /// Lowest y the generator produces terrain at (inclusive).
    pub min_height: i32,
    /// Highest y the generator produces terrain at (inclusive).
    pub max_height: i32,
}

impl WorldContext {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    pub fn with_height_range(seed: i64, min_height: i32, max_height: i32) -> Self {
        debug_assert!(min_height <= max_height);
        Self {
            seed,
            min_height,
            max_height,
        }
    }
}

impl Default for WorldContext {
    fn default() -> Self {
        Self::new(0)
    }
}
