//! Wrapped stepping over index ranges.

/// Index one step after `current` in a list of `len` items, wrapping to the first.
///
/// Returns `None` when `current` is not a valid index for `len`.
pub const fn next_index(current: usize, len: usize) -> Option<usize> {
    if current >= len {
        return None;
    }
    Some((current + 1) % len)
}

/// Index one step before `current` in a list of `len` items, wrapping to the last.
///
/// Returns `None` when `current` is not a valid index for `len`.
pub const fn prev_index(current: usize, len: usize) -> Option<usize> {
    if current >= len {
        return None;
    }
    if current == 0 {
        Some(len - 1)
    } else {
        Some(current - 1)
    }
}
