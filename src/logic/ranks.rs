//! Shared-rank numbering over an already sorted list.

use std::cmp::Ordering;

/// Standard competition ranks (1, 2, 2, 4) for `sorted`, which must already be ordered by `cmp`.
///
/// An item shares the previous item's rank iff `cmp` finds them equal; otherwise its rank is
/// its position + 1.
pub(crate) fn competition_ranks<T>(sorted: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Vec<u32> {
    let mut ranks: Vec<u32> = Vec::with_capacity(sorted.len());
    for (i, item) in sorted.iter().enumerate() {
        let rank = match i.checked_sub(1) {
            Some(prev) if cmp(&sorted[prev], item) == Ordering::Equal => ranks[prev],
            _ => i as u32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}

/// Higher-first float ordering; `0.0` and `-0.0` compare equal.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
