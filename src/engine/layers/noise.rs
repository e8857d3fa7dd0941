//! Smooth 2-D value noise for the fog texture.

fn hash(x: i32, y: i32, seed: u32) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x8da6_b343)
        ^ (y as u32).wrapping_mul(0xd816_3841)
        ^ seed.wrapping_mul(0xcb1a_b31f);
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^= h >> 15;
    (h & 0x00ff_ffff) as f32 / 16_777_216.0
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Value noise in [0, 1) with one unit per lattice cell.
pub fn value(x: f32, y: f32, seed: u32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let (ix, iy) = (x0 as i32, y0 as i32);
    let tx = smooth(x - x0);
    let ty = smooth(y - y0);

    let top = hash(ix, iy, seed) + (hash(ix + 1, iy, seed) - hash(ix, iy, seed)) * tx;
    let bottom =
        hash(ix, iy + 1, seed) + (hash(ix + 1, iy + 1, seed) - hash(ix, iy + 1, seed)) * tx;
    top + (bottom - top) * ty
}

/// Two octaves of value noise, normalised to [0, 1).
pub fn fbm(x: f32, y: f32, seed: u32) -> f32 {
    (value(x, y, seed) * 2.0 + value(x * 2.0, y * 2.0, seed ^ 0x9e37)) / 3.0
}
