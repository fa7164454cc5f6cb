//! Bounded string helpers

use heapless::String;

/// Append as much of `src` as fits, stopping on a char boundary
///
/// Returns `true` when all of `src` was copied.
pub fn push_truncated<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    for c in src.chars() {
        if dst.push(c).is_err() {
            return false;
        }
    }
    true
}

/// Copy `src` into a new bounded string, truncating if needed
pub fn truncated<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    push_truncated(&mut out, src);
    out
}
