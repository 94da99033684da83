//! Equivalence-class grouping over unsortable, unhashable items.
//!
//! Structure entries cannot be totally ordered or hashed in any way that
//! respects structural equivalence; the only available notion of equality is
//! an expensive pairwise fit test. The routines here partition a sequence of
//! such items into labeled groups using nothing but a caller-supplied
//! symmetric predicate, at the cost of O(n²) predicate evaluations.
//!
//! Two strategies are provided:
//!
//! - [`group_by_scan`]: a single forward scan that assigns labels greedily.
//!   This mirrors the historical behavior of the grouping pass used for
//!   structure deduplication. Items that compare equal directly always share
//!   a label; items connected only through a longer chain of pairwise links
//!   may end up in separate groups depending on scan order.
//! - [`group_by_components`]: connected components via a disjoint-set
//!   structure. Guarantees the transitive closure of the predicate at the
//!   same O(n²) evaluation cost. Use this when chain merges must be exact.
//!
//! Neither routine validates that the predicate is symmetric or reflexive;
//! violations silently produce a best-effort, but still total, labeling.

/// Sentinel for an index that has not been assigned a label yet.
const UNSET: usize = usize::MAX;

/// Partitions `items` into groups with a single forward-linking scan.
///
/// Returns one label per input index, in input order. Labels are assigned in
/// first-appearance order of each new group. When the scan discovers that the
/// current item belongs to a group resolved earlier, it adopts that group's
/// label and gives the freshly allocated label value back, so label values
/// stay dense in the common case.
///
/// Already-labeled items are never revisited, so a chain `a ~ b, b ~ c` in
/// which `b` was claimed before `c` was ever compared against it can leave
/// `a` and `c` in different groups. Callers that need guaranteed chain
/// merging should use [`group_by_components`] instead.
///
/// # Arguments
///
/// * `items` - The sequence to partition; may be empty.
/// * `eq` - A symmetric, reflexive equivalence predicate.
pub fn group_by_scan<T, F>(items: &[T], mut eq: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut labels = vec![UNSET; items.len()];
    let mut next_label: usize = 0;

    for i in 0..items.len() {
        if labels[i] != UNSET {
            continue;
        }
        labels[i] = next_label;
        for j in (i + 1)..items.len() {
            if !eq(&items[i], &items[j]) {
                continue;
            }
            if labels[j] == UNSET {
                // Propagate the current label of `i`, which may already have
                // been revised by a merge earlier in this inner scan.
                labels[j] = labels[i];
            } else {
                // `j` was claimed by an earlier pass; adopt its label and
                // retire the fresh one instead of leaving a gap.
                labels[i] = labels[j];
                next_label = next_label.saturating_sub(1);
            }
        }
        next_label += 1;
    }

    labels
}

/// Partitions `items` into the connected components of the predicate graph.
///
/// Every unordered pair of indices is evaluated exactly once and united in a
/// disjoint-set structure on a `true` result, so transitive chains are merged
/// regardless of input order. Component roots are then compacted to dense
/// labels in first-appearance order, matching the labeling convention of
/// [`group_by_scan`].
pub fn group_by_components<T, F>(items: &[T], mut eq: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut sets = DisjointSet::new(items.len());
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if eq(&items[i], &items[j]) {
                sets.union(i, j);
            }
        }
    }

    let mut root_labels = std::collections::HashMap::new();
    let mut labels = Vec::with_capacity(items.len());
    for i in 0..items.len() {
        let root = sets.find(i);
        let next = root_labels.len();
        labels.push(*root_labels.entry(root).or_insert(next));
    }
    labels
}

/// A disjoint-set (union-find) structure over the dense index range `0..n`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Returns the root of the set containing `x`, with path halving.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets containing `x` and `y`. The root of `x`'s set becomes
    /// a child of the root of `y`'s set; merging a set with itself is a no-op.
    pub fn union(&mut self, x: usize, y: usize) {
        let x = self.find(x);
        let y = self.find(y);
        if x != y {
            self.parent[x] = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collapses a label sequence into sets of indices per label.
    fn partition(labels: &[usize]) -> Vec<Vec<usize>> {
        let mut groups: std::collections::BTreeMap<usize, Vec<usize>> = Default::default();
        for (idx, lab) in labels.iter().enumerate() {
            groups.entry(*lab).or_default().push(idx);
        }
        groups.into_values().collect()
    }

    #[test]
    fn scan_returns_empty_for_empty_input() {
        let labels = group_by_scan(&[] as &[i32], |a, b| a == b);
        assert!(labels.is_empty());
    }

    #[test]
    fn scan_assigns_distinct_labels_when_nothing_matches() {
        let items = [1, 2, 3, 4, 5];
        let labels = group_by_scan(&items, |_, _| false);
        assert_eq!(labels, vec![0, 1, 2, 3, 4]);
        let distinct: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(distinct.len(), items.len());
    }

    #[test]
    fn scan_assigns_one_label_when_everything_matches() {
        let items = ["a", "b", "c", "d"];
        let labels = group_by_scan(&items, |_, _| true);
        assert_eq!(labels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn scan_groups_two_disjoint_pairs() {
        // eq(A,B) and eq(C,D) only.
        let items = ["A", "B", "C", "D"];
        let labels = group_by_scan(&items, |a, b| {
            matches!(
                (*a, *b),
                ("A", "B") | ("B", "A") | ("C", "D") | ("D", "C")
            )
        });
        assert_eq!(labels, vec![0, 0, 1, 1]);
        let groups = partition(&labels);
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), items.len());
    }

    #[test]
    fn scan_matches_value_equality_grouping() {
        let items = [3, 1, 3, 7, 1, 3];
        let labels = group_by_scan(&items, |a, b| a == b);
        assert_eq!(labels, vec![0, 1, 0, 2, 1, 0]);
    }

    #[test]
    fn scan_keeps_labels_dense_after_a_merge() {
        // a ~ c and b ~ c: the pass for `b` finds `c` already labeled, adopts
        // its label, and retires the fresh label value so none is skipped.
        let items = ["a", "b", "c"];
        let labels = group_by_scan(&items, |x, y| {
            matches!((*x, *y), ("a", "c") | ("c", "a") | ("b", "c") | ("c", "b"))
        });
        assert_eq!(labels, vec![0, 0, 0]);
    }

    #[test]
    fn scan_agrees_with_components_for_transitive_predicates() {
        let items = [10, 20, 10, 30, 20, 10, 30];
        let eq = |a: &i32, b: &i32| a == b;
        assert_eq!(group_by_scan(&items, eq), group_by_components(&items, eq));
    }

    #[test]
    fn components_returns_empty_for_empty_input() {
        let labels = group_by_components(&[] as &[i32], |a, b| a == b);
        assert!(labels.is_empty());
    }

    #[test]
    fn components_merges_chains_regardless_of_order() {
        // a ~ b and b ~ c but never a ~ c directly; the scan variant can
        // miss this merge, the component variant must not.
        let items = ["a", "b", "c"];
        let labels = group_by_components(&items, |x, y| {
            matches!((*x, *y), ("a", "b") | ("b", "a") | ("b", "c") | ("c", "b"))
        });
        assert_eq!(labels, vec![0, 0, 0]);
    }

    #[test]
    fn components_compacts_labels_in_first_appearance_order() {
        let items = [5, 9, 5, 2, 9];
        let labels = group_by_components(&items, |a, b| a == b);
        assert_eq!(labels, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn components_every_index_appears_in_exactly_one_group() {
        let items: Vec<u32> = (0..20).collect();
        let labels = group_by_components(&items, |a, b| (*a % 4) == (*b % 4));
        assert_eq!(labels.len(), items.len());
        let groups = partition(&labels);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), items.len());
    }

    #[test]
    fn disjoint_set_find_and_union_behave() {
        let mut sets = DisjointSet::new(4);
        assert_ne!(sets.find(0), sets.find(1));
        sets.union(0, 1);
        assert_eq!(sets.find(0), sets.find(1));
        sets.union(2, 3);
        sets.union(0, 3);
        assert_eq!(sets.find(1), sets.find(2));
        sets.union(1, 1);
        assert_eq!(sets.find(1), sets.find(2));
    }
}
