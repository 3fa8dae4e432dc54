use gtao_shared::hilbert::{hilbert_index, HILBERT_AREA, HILBERT_WIDTH};

/// Hilbert indices of a full tile, row-major, for upload as a `HILBERT_WIDTH`² R16_UINT texture.
/// Lets the main pass load the index instead of computing it in place.
pub fn hilbert_lut() -> Vec<u16> {
    let mut lut = Vec::with_capacity(HILBERT_AREA as usize);

    for y in 0..HILBERT_WIDTH {
        for x in 0..HILBERT_WIDTH {
            lut.push(hilbert_index(x, y) as u16);
        }
    }

    lut
}

/// Little-endian texel data of [`hilbert_lut`].
pub fn hilbert_lut_bytes() -> Vec<u8> {
    hilbert_lut()
        .into_iter()
        .flat_map(|texel| texel.to_le_bytes())
        .collect()
}

#[test]
fn test_lut() {
    let lut = hilbert_lut();
    assert_eq!(lut.len(), HILBERT_AREA as usize);
    assert_eq!(lut[0], 0);
    assert_eq!(lut[1], 1);
    assert_eq!(lut[HILBERT_WIDTH as usize], 3);
    assert_eq!(lut[HILBERT_WIDTH as usize - 1], (HILBERT_AREA - 1) as u16);

    let mut sorted = lut.clone();
    sorted.sort_unstable();
    assert!(sorted.iter().enumerate().all(|(i, &v)| i as u16 == v));
}

#[test]
fn test_lut_bytes() {
    let bytes = hilbert_lut_bytes();
    assert_eq!(bytes.len(), HILBERT_AREA as usize * 2);
    // (63, 0) -> 4095
    assert_eq!(&bytes[126..128], &[0xff, 0x0f]);
}
