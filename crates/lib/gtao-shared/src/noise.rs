use crate::hilbert::{hilbert_index, HILBERT_WIDTH};
use glam::{UVec2, Vec2};

// Tried out a few with HILBERT_LEVEL 6; this one looked best so far.
pub const HILBERT_TEMPORAL_STRIDE: u32 = 288;

// R2 sequence - see http://extremelearning.com.au/unreasonable-effectiveness-of-quasirandom-sequences/
pub const R2_ALPHA: Vec2 = Vec2::new(0.754_877_7, 0.569_840_3);

/// Hilbert curve driving R2. Without temporal accumulation, `temporal_index` should be 0.
pub fn spatio_temporal_noise(pix: UVec2, temporal_index: u32) -> Vec2 {
    let mut index = hilbert_index(pix.x % HILBERT_WIDTH, pix.y % HILBERT_WIDTH);
    index += HILBERT_TEMPORAL_STRIDE * (temporal_index % 64);

    (Vec2::splat(0.5) + index as f32 * R2_ALPHA).fract()
}

#[test]
fn test_origin() {
    assert_eq!(spatio_temporal_noise(UVec2::ZERO, 0), Vec2::splat(0.5));
}

#[test]
fn test_unit_range() {
    for t in 0..4 {
        for y in 0..HILBERT_WIDTH {
            for x in 0..HILBERT_WIDTH {
                let n = spatio_temporal_noise(UVec2::new(x, y), t);
                assert!(n.cmpge(Vec2::ZERO).all() && n.cmplt(Vec2::ONE).all(), "{:?}", n);
            }
        }
    }
}

#[test]
fn test_tiles_and_wraps() {
    let pix = UVec2::new(13, 41);
    let offset = UVec2::splat(HILBERT_WIDTH);

    assert_eq!(
        spatio_temporal_noise(pix, 5),
        spatio_temporal_noise(pix + offset * 3, 5)
    );
    assert_eq!(spatio_temporal_noise(pix, 5), spatio_temporal_noise(pix, 5 + 64));
    assert_ne!(spatio_temporal_noise(pix, 5), spatio_temporal_noise(pix, 6));
}

#[test]
fn test_first_step() {
    let n = spatio_temporal_noise(UVec2::new(1, 0), 0);
    assert!((n - Vec2::new(0.254_877_7, 0.069_840_3)).abs().max_element() < 1e-5);
}
