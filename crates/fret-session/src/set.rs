//! The bounded, ordered comparison set.
//!
//! The set owns which products are being compared. It is mutated only
//! through the named operations below, each of which reports a
//! [`Transition`] so the session knows whether to re-fetch data and rewrite
//! the URL.

use fret_core::ProductId;
use serde::{Deserialize, Serialize};

/// Device class driving the comparison capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Viewport {
    /// Narrow screens compare at most two products side by side.
    Narrow,
    /// Everything else fits four columns.
    #[default]
    Wide,
}

impl Viewport {
    /// Maximum number of products in the comparison set.
    pub fn capacity(self) -> usize {
        match self {
            Self::Narrow => 2,
            Self::Wide => 4,
        }
    }
}

/// Coarse state of the set, driving which UI variant renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetState {
    /// No products; search/empty UI.
    Empty,
    /// One product; "add more to compare" prompt.
    Single,
    /// Two or more products; the full comparison.
    Comparison,
}

/// What a controller operation did to the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No change; callers skip the fetch and the URL rewrite.
    Unchanged,
    /// A product was appended; at capacity the oldest entry was evicted.
    Added { evicted: Option<ProductId> },
    /// A product was removed and at least two remain.
    Removed,
    /// The set emptied: explicit clear, or a removal below two products.
    Cleared,
    /// Wholesale replacement from an external URL change.
    Replaced,
}

impl Transition {
    /// Whether the set actually changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered, duplicate-free product set bounded by viewport capacity.
///
/// Order reflects addition order except when capacity eviction removes the
/// oldest entry (FIFO, not LRU-by-access).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSet {
    entries: Vec<ProductId>,
    viewport: Viewport,
}

impl ComparisonSet {
    /// Create an empty set for a viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            entries: Vec::new(),
            viewport,
        }
    }

    /// Current members, addition order.
    pub fn ids(&self) -> &[ProductId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.contains(&id)
    }

    /// Capacity for the current viewport.
    pub fn capacity(&self) -> usize {
        self.viewport.capacity()
    }

    /// Coarse state for render selection.
    pub fn state(&self) -> SetState {
        match self.entries.len() {
            0 => SetState::Empty,
            1 => SetState::Single,
            _ => SetState::Comparison,
        }
    }

    /// Add a product.
    ///
    /// Adding a member already present is a no-op. At capacity, the
    /// least-recently-added entry is evicted first.
    pub fn add(&mut self, id: ProductId) -> Transition {
        if self.contains(id) {
            return Transition::Unchanged;
        }
        let evicted = if self.entries.len() >= self.capacity() {
            Some(self.entries.remove(0))
        } else {
            None
        };
        self.entries.push(id);
        Transition::Added { evicted }
    }

    /// Remove a product.
    ///
    /// Dropping below two products collapses the comparison entirely: a
    /// just-removed-down-to-one state does not linger.
    pub fn remove(&mut self, id: ProductId) -> Transition {
        let before = self.entries.len();
        self.entries.retain(|entry| *entry != id);
        if self.entries.len() == before {
            return Transition::Unchanged;
        }
        if self.entries.len() < 2 {
            self.entries.clear();
            Transition::Cleared
        } else {
            Transition::Removed
        }
    }

    /// Empty the set.
    pub fn clear(&mut self) -> Transition {
        if self.entries.is_empty() {
            return Transition::Unchanged;
        }
        self.entries.clear();
        Transition::Cleared
    }

    /// Replace the whole membership, used when the URL changes externally.
    ///
    /// Incoming ids are de-duplicated and truncated to capacity. When the
    /// incoming ids equal the current ones as an unordered set the call is
    /// a no-op: this equality check is what breaks the
    /// mutation -> URL-write -> URL-read -> mutation loop.
    pub fn replace_all(&mut self, ids: Vec<ProductId>) -> Transition {
        let mut seen = std::collections::HashSet::new();
        let mut incoming: Vec<ProductId> =
            ids.into_iter().filter(|id| seen.insert(*id)).collect();
        incoming.truncate(self.capacity());

        if same_id_set(&incoming, &self.entries) {
            return Transition::Unchanged;
        }

        let was_empty = self.entries.is_empty();
        self.entries = incoming;
        if self.entries.is_empty() && !was_empty {
            Transition::Cleared
        } else {
            Transition::Replaced
        }
    }
}

/// Order-insensitive id-set equality.
pub fn same_id_set(a: &[ProductId], b: &[ProductId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let set: std::collections::HashSet<_> = a.iter().collect();
    b.iter().all(|id| set.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u64]) -> Vec<ProductId> {
        values.iter().map(|v| ProductId::new(*v)).collect()
    }

    #[test]
    fn capacity_depends_on_viewport() {
        assert_eq!(Viewport::Narrow.capacity(), 2);
        assert_eq!(Viewport::Wide.capacity(), 4);
    }

    #[test]
    fn add_at_capacity_evicts_the_oldest() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        for id in ids(&[1, 2, 3, 4]) {
            set.add(id);
        }

        let transition = set.add(ProductId::new(5));
        assert_eq!(
            transition,
            Transition::Added {
                evicted: Some(ProductId::new(1))
            }
        );
        assert_eq!(set.ids(), ids(&[2, 3, 4, 5]).as_slice());
    }

    #[test]
    fn add_on_narrow_viewport_caps_at_two() {
        let mut set = ComparisonSet::new(Viewport::Narrow);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));
        set.add(ProductId::new(3));
        assert_eq!(set.ids(), ids(&[1, 3]).as_slice());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));

        let transition = set.add(ProductId::new(1));
        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(set.ids(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn first_add_reaches_the_single_state() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        assert_eq!(set.state(), SetState::Empty);
        set.add(ProductId::new(1));
        assert_eq!(set.state(), SetState::Single);
        set.add(ProductId::new(2));
        assert_eq!(set.state(), SetState::Comparison);
    }

    #[test]
    fn remove_below_two_collapses_to_empty() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));

        let transition = set.remove(ProductId::new(2));
        assert_eq!(transition, Transition::Cleared);
        assert!(set.is_empty());
        assert_eq!(set.state(), SetState::Empty);
    }

    #[test]
    fn remove_from_three_keeps_a_comparison() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        for id in ids(&[1, 2, 3]) {
            set.add(id);
        }
        let transition = set.remove(ProductId::new(2));
        assert_eq!(transition, Transition::Removed);
        assert_eq!(set.ids(), ids(&[1, 3]).as_slice());
    }

    #[test]
    fn remove_of_absent_member_is_a_no_op() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));
        assert_eq!(set.remove(ProductId::new(9)), Transition::Unchanged);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn replace_all_with_same_unordered_set_is_a_no_op() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));

        let transition = set.replace_all(ids(&[2, 1]));
        assert_eq!(transition, Transition::Unchanged);
        // original order preserved
        assert_eq!(set.ids(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn replace_all_truncates_to_capacity() {
        let mut set = ComparisonSet::new(Viewport::Narrow);
        let transition = set.replace_all(ids(&[1, 2, 3, 4]));
        assert_eq!(transition, Transition::Replaced);
        assert_eq!(set.ids(), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn replace_all_to_empty_reports_cleared() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        set.add(ProductId::new(2));
        assert_eq!(set.replace_all(Vec::new()), Transition::Cleared);
        assert!(set.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut set = ComparisonSet::new(Viewport::Wide);
        set.add(ProductId::new(1));
        assert_eq!(set.clear(), Transition::Cleared);
        assert_eq!(set.clear(), Transition::Unchanged);
    }
}
