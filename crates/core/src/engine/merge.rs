//! Two-way merge of pre-sorted streams.

use std::iter::Peekable;

/// Iterator interleaving two streams that are each sorted by `key`.
///
/// On equal keys the item from `left` is yielded first, so the output is
/// stable with respect to which stream an item came from.
pub struct MergeByKey<L, R, F>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
{
    left: Peekable<L>,
    right: Peekable<R>,
    key: F,
}

/// Merges `left` and `right` in O(n + m), preferring `left` on ties.
///
/// Both inputs must already be sorted by `key`; nothing is re-sorted.
pub fn merge_by_key<L, R, K, F>(left: L, right: R, key: F) -> MergeByKey<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    K: Ord,
    F: FnMut(&L::Item) -> K,
{
    MergeByKey {
        left: left.into_iter().peekable(),
        right: right.into_iter().peekable(),
        key,
    }
}

impl<L, R, K, F> Iterator for MergeByKey<L, R, F>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
    K: Ord,
    F: FnMut(&L::Item) -> K,
{
    type Item = L::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let take_left = match (self.left.peek(), self.right.peek()) {
            (Some(l), Some(r)) => (self.key)(l) <= (self.key)(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        if take_left {
            self.left.next()
        } else {
            self.right.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (l_lo, l_hi) = self.left.size_hint();
        let (r_lo, r_hi) = self.right.size_hint();
        let hi = match (l_hi, r_hi) {
            (Some(l), Some(r)) => l.checked_add(r),
            _ => None,
        };
        (l_lo.saturating_add(r_lo), hi)
    }
}
