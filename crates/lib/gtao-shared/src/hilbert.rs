// Hilbert curve index within a square tile, used to decorrelate per-pixel noise.
// From https://www.shadertoy.com/view/3tB3z3

pub const HILBERT_LEVEL: u32 = 6;
pub const HILBERT_WIDTH: u32 = 1 << HILBERT_LEVEL;
pub const HILBERT_AREA: u32 = HILBERT_WIDTH * HILBERT_WIDTH;

/// Position of `(pos_x, pos_y)` along the Hilbert curve covering a `2^LEVEL` wide tile.
///
/// Both coordinates must be below `1 << LEVEL`; nothing is checked. `LEVEL` up to 16 fits in `u32`.
#[inline]
pub fn hilbert_index_for_level<const LEVEL: u32>(mut pos_x: u32, mut pos_y: u32) -> u32 {
    let width = 1u32 << LEVEL;
    let mut index = 0u32;
    let mut cur_level = width / 2;

    while cur_level > 0 {
        let region_x = ((pos_x & cur_level) > 0) as u32;
        let region_y = ((pos_y & cur_level) > 0) as u32;
        index += cur_level * cur_level * ((3 * region_x) ^ region_y);

        if region_y == 0 {
            if region_x == 1 {
                pos_x = (width - 1) - pos_x;
                pos_y = (width - 1) - pos_y;
            }

            core::mem::swap(&mut pos_x, &mut pos_y);
        }

        cur_level /= 2;
    }

    index
}

#[inline]
pub fn hilbert_index(pos_x: u32, pos_y: u32) -> u32 {
    hilbert_index_for_level::<HILBERT_LEVEL>(pos_x, pos_y)
}

#[cfg(test)]
fn all_tile_indices() -> Vec<(u32, u32, u32)> {
    let mut res = Vec::with_capacity(HILBERT_AREA as usize);
    for y in 0..HILBERT_WIDTH {
        for x in 0..HILBERT_WIDTH {
            res.push((x, y, hilbert_index(x, y)));
        }
    }
    res
}

#[test]
fn test_bijection() {
    let mut seen = vec![false; HILBERT_AREA as usize];

    for (x, y, index) in all_tile_indices() {
        assert!(index < HILBERT_AREA, "({}, {}) -> {}", x, y, index);
        assert!(!seen[index as usize], "index {} visited twice", index);
        seen[index as usize] = true;
    }

    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_known_values() {
    assert_eq!(hilbert_index(0, 0), 0);
    assert_eq!(hilbert_index(1, 0), 1);
    assert_eq!(hilbert_index(1, 1), 2);
    assert_eq!(hilbert_index(0, 1), 3);
    assert_eq!(hilbert_index(32, 32), 2048);
    assert_eq!(hilbert_index(0, 63), 1365);
    assert_eq!(hilbert_index(63, 0), HILBERT_AREA - 1);
}

#[test]
fn test_deterministic() {
    for (x, y, index) in all_tile_indices() {
        assert_eq!(hilbert_index(x, y), index);
    }
}

#[test]
fn test_consecutive_indices_are_neighbors() {
    let mut coords = vec![(0u32, 0u32); HILBERT_AREA as usize];
    for (x, y, index) in all_tile_indices() {
        coords[index as usize] = (x, y);
    }

    for pair in coords.windows(2) {
        let (ax, ay) = pair[0];
        let (bx, by) = pair[1];
        assert_eq!(ax.abs_diff(bx) + ay.abs_diff(by), 1);
    }
}

#[test]
fn test_locality() {
    let mut delta_sum = 0u64;
    let mut pair_count = 0u64;

    for y in 0..HILBERT_WIDTH {
        for x in 0..HILBERT_WIDTH {
            let index = hilbert_index(x, y);
            if x + 1 < HILBERT_WIDTH {
                delta_sum += index.abs_diff(hilbert_index(x + 1, y)) as u64;
                pair_count += 1;
            }
            if y + 1 < HILBERT_WIDTH {
                delta_sum += index.abs_diff(hilbert_index(x, y + 1)) as u64;
                pair_count += 1;
            }
        }
    }

    // Uniformly random pairs differ by W²/3 on average.
    let avg_delta = delta_sum as f64 / pair_count as f64;
    let random_avg_delta = HILBERT_AREA as f64 / 3.0;
    assert!(avg_delta * 10.0 < random_avg_delta, "{}", avg_delta);
}

#[test]
fn test_smaller_level() {
    // Level 1 is the basic U shape, entered along y.
    assert_eq!(hilbert_index_for_level::<1>(0, 0), 0);
    assert_eq!(hilbert_index_for_level::<1>(0, 1), 1);
    assert_eq!(hilbert_index_for_level::<1>(1, 1), 2);
    assert_eq!(hilbert_index_for_level::<1>(1, 0), 3);
}
