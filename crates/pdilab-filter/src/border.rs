//! Border handling
//!
//! Out-of-range coordinates are mirrored about the edge pixel without
//! repeating it (`gfedcb|abcdefgh|gfedcba`).

/// Map a possibly out-of-range coordinate into `0..n` by reflect-101.
///
/// Offsets of any magnitude are folded, so kernels wider than the image
/// stay defined. A one-pixel axis always maps to 0.
#[inline]
pub fn reflect101(i: i64, n: u32) -> u32 {
    if n == 1 {
        return 0;
    }
    let last = n as i64 - 1;
    let period = 2 * last;
    let m = i.rem_euclid(period);
    (if m > last { period - m } else { m }) as u32
}
