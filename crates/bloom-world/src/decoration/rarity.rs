/// Maps a cell density into the odds a column must reach to keep its flower.
///
/// `1 - (1 - d)^degree`: dense cell centres stay near zero, edges climb
/// quickly toward one, so higher degrees sharpen the cell outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityCurve {
    degree: f64,
}

impl RarityCurve {
    pub const fn new(degree: f64) -> Self {
        Self { degree }
    }

    #[inline]
    pub fn apply(&self, density: f64) -> f64 {
        1.0 - (1.0 - density).powf(self.degree)
    }
}

impl Default for RarityCurve {
    fn default() -> Self {
        Self::new(4.0)
    }
}
