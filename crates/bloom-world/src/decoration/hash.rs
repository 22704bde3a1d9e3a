/// Positional hash of a column mapped into `[0, 1)`.
///
/// The coordinate products wrap as 32-bit integers before being sign-extended,
/// the rest of the mix wraps as 64-bit. Output is a multiple of 2^-24, so the
/// `f32` is exact and identical on every platform.
#[inline]
pub fn column_hash(x: i32, z: i32, seed: i64) -> f32 {
    let h = i64::from(x.wrapping_mul(73_428_767))
        ^ i64::from(z.wrapping_mul(9_122_569))
        ^ seed.wrapping_mul(457);
    let bits = h.wrapping_mul(h.wrapping_add(456_149)) & 0x00FF_FFFF;
    bits as f32 / 16_777_216.0
}
