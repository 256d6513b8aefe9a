//! Boundary search over ascending-sorted sequences.
//!
//! [`locate`] is the generic ceiling/floor binary search the timeline
//! wrappers on [`Board`](crate::Board) are built on.

/// Which boundary [`locate`] resolves toward when the value falls between keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Smallest element with `key >= value`.
    Ceiling,
    /// Largest element with `key <= value`.
    Floor,
}

/// Finds the boundary index for `value` in a sequence sorted ascending by `key`.
///
/// Returns `None` when no element satisfies the bound: an empty sequence,
/// `Ceiling` with `value` above every key, or `Floor` with `value` below
/// every key. An exact match returns a matching index under either bound.
///
/// Runs in O(log n): the search keeps a `[min, max]` window, probes the pair
/// of keys straddling the ceiling midpoint, and narrows toward the side that
/// still brackets `value`.
///
/// Keys are assumed effectively unique. With duplicate keys the result is
/// deterministic but unspecified among the matching indices: an exact hit on
/// the straddling pair resolves to the earlier index first.
pub fn locate<T, K, F>(value: &K, items: &[T], key: F, bound: Bound) -> Option<usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let len = items.len();
    if len == 0 {
        return None;
    }
    let first = key(&items[0]);
    let last = key(&items[len - 1]);
    match bound {
        Bound::Ceiling if *value > last => return None,
        Bound::Floor if *value < first => return None,
        _ => {}
    }
    if len == 1 {
        return Some(0);
    }
    match bound {
        Bound::Ceiling if *value < first => return Some(0),
        Bound::Floor if *value > last => return Some(len - 1),
        _ => {}
    }

    // Invariant: key(min) <= value <= key(max). Once the window narrows to
    // adjacent indices the straddling pair brackets the value and we resolve.
    let mut min = 0;
    let mut max = len - 1;
    loop {
        let cur = min + (max - min).div_ceil(2);
        let prev = key(&items[cur - 1]);
        let next = key(&items[cur]);
        if prev <= *value && *value <= next {
            if prev == *value {
                return Some(cur - 1);
            }
            if next == *value {
                return Some(cur);
            }
            return match bound {
                Bound::Ceiling => Some(cur),
                Bound::Floor => Some(cur - 1),
            };
        }
        if prev < *value {
            min = cur;
        } else {
            max = cur;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(value: i64, keys: &[i64], bound: Bound) -> Option<usize> {
        locate(&value, keys, |k| *k, bound)
    }

    #[test]
    fn empty_sequence_finds_nothing() {
        assert_eq!(find(10, &[], Bound::Ceiling), None);
        assert_eq!(find(10, &[], Bound::Floor), None);
    }

    #[test]
    fn singleton_in_range_resolves_to_it() {
        assert_eq!(find(10, &[10], Bound::Ceiling), Some(0));
        assert_eq!(find(10, &[10], Bound::Floor), Some(0));
        assert_eq!(find(5, &[10], Bound::Ceiling), Some(0));
        assert_eq!(find(15, &[10], Bound::Floor), Some(0));
    }

    #[test]
    fn singleton_out_of_range() {
        assert_eq!(find(15, &[10], Bound::Ceiling), None);
        assert_eq!(find(5, &[10], Bound::Floor), None);
    }

    #[test]
    fn exact_match_under_both_bounds() {
        let keys = [10, 20, 30];
        assert_eq!(find(20, &keys, Bound::Ceiling), Some(1));
        assert_eq!(find(20, &keys, Bound::Floor), Some(1));
        assert_eq!(find(10, &keys, Bound::Ceiling), Some(0));
        assert_eq!(find(10, &keys, Bound::Floor), Some(0));
        assert_eq!(find(30, &keys, Bound::Ceiling), Some(2));
        assert_eq!(find(30, &keys, Bound::Floor), Some(2));
    }

    #[test]
    fn between_keys_resolves_per_bound() {
        let keys = [10, 20, 30];
        assert_eq!(find(25, &keys, Bound::Ceiling), Some(2));
        assert_eq!(find(25, &keys, Bound::Floor), Some(1));
        assert_eq!(find(15, &keys, Bound::Ceiling), Some(1));
        assert_eq!(find(15, &keys, Bound::Floor), Some(0));
    }

    #[test]
    fn out_of_range_values() {
        let keys = [10, 20, 30];
        assert_eq!(find(5, &keys, Bound::Ceiling), Some(0));
        assert_eq!(find(5, &keys, Bound::Floor), None);
        assert_eq!(find(35, &keys, Bound::Ceiling), None);
        assert_eq!(find(35, &keys, Bound::Floor), Some(2));
    }

    #[test]
    fn larger_sequence_agrees_with_linear_scan() {
        let keys: Vec<i64> = (0..50).map(|i| i * 10).collect();
        for value in -5..505 {
            let ceiling = keys.iter().position(|&k| k >= value);
            let floor = keys.iter().rposition(|&k| k <= value);
            assert_eq!(find(value, &keys, Bound::Ceiling), ceiling, "ceiling {value}");
            assert_eq!(find(value, &keys, Bound::Floor), floor, "floor {value}");
        }
    }

    #[test]
    fn works_with_keyed_structs() {
        struct Item {
            at: i64,
        }
        let items = [Item { at: 100 }, Item { at: 200 }];
        assert_eq!(locate(&150, &items, |i| i.at, Bound::Floor), Some(0));
        assert_eq!(locate(&150, &items, |i| i.at, Bound::Ceiling), Some(1));
    }
}
