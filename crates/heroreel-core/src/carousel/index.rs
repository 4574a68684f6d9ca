//! Index arithmetic for a ring of slides
//!
//! Every function is total for any `i64` input; `len` must be non-zero.

/// Map any integer onto `[0, len)` using floored modulo, so `-1` lands on `len - 1`
#[inline]
pub fn normalize(index: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as i64) as usize
}

/// Index reached by moving `delta` steps from `current`, wrapping both ways
#[inline]
pub fn offset(current: usize, delta: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as i64;
    // both terms are below len, so the sum cannot overflow
    ((current as i64 % len) + delta.rem_euclid(len)).rem_euclid(len) as usize
}
