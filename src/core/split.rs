// split.rs - Bipartitions, the split database and the incompatibility test
//
// A split is the unordered pair of disjoint taxon sets induced by one
// internal tree edge. Canonicalization happens through a signature string
// over the sorted union of taxa (the lexicographically first taxon is always
// written with '*'), so a bipartition and its swapped-half form compare,
// order and hash identically.

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::tree::Tree;

pub type TaxonSet = BTreeSet<String>;

/// Canonical string form of a taxon set (space-joined, members sorted).
pub fn taxon_set_string(set: &TaxonSet) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(" ")
}

/// One bipartition of the full leaf set, with a stable integer id once the
/// owning database has assigned ids.
#[derive(Debug, Clone)]
pub struct Split {
    pub id: u32,
    first: TaxonSet,
    second: TaxonSet,
    signature: String,
}

impl Split {
    pub fn new(first: TaxonSet, second: TaxonSet) -> Self {
        let signature = Self::make_signature(&first, &second);
        Self {
            id: 0,
            first,
            second,
            signature,
        }
    }

    pub fn with_id(first: TaxonSet, second: TaxonSet, id: u32) -> Self {
        let mut split = Self::new(first, second);
        split.id = id;
        split
    }

    pub fn first(&self) -> &TaxonSet {
        &self.first
    }

    pub fn second(&self) -> &TaxonSet {
        &self.second
    }

    pub fn smaller(&self) -> &TaxonSet {
        if self.first.len() < self.second.len() {
            &self.first
        } else {
            &self.second
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// '*'/'.' pattern over the sorted union of both halves. The first taxon
    /// in sort order is always assigned '*', which is what makes the
    /// signature independent of which half came first.
    fn make_signature(first: &TaxonSet, second: &TaxonSet) -> String {
        let mut star = '*';
        let mut dot = '.';
        let mut signature = String::new();
        for (i, taxon) in first.union(second).enumerate() {
            if i == 0 && !first.contains(taxon) {
                std::mem::swap(&mut star, &mut dot);
            }
            signature.push(if first.contains(taxon) { star } else { dot });
        }
        signature
    }
}

impl PartialEq for Split {
    fn eq(&self, other: &Self) -> bool {
        self.signature == other.signature
    }
}

impl Eq for Split {}

impl PartialOrd for Split {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Split {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.signature.cmp(&other.signature)
    }
}

impl std::hash::Hash for Split {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.signature.hash(state);
    }
}

/// True iff all four cross-intersections of the two splits' halves are
/// non-empty: the classical four-point incompatibility test.
pub fn are_incompatible(a: &Split, b: &Split) -> bool {
    let intersects = |x: &TaxonSet, y: &TaxonSet| x.intersection(y).next().is_some();
    intersects(a.first(), b.first())
        && intersects(a.first(), b.second())
        && intersects(a.second(), b.first())
        && intersects(a.second(), b.second())
}

/// All splits of one segment's tree sample, keyed canonically, each owning
/// the set of sample-tree indices that support it.
#[derive(Debug, Default)]
pub struct SplitDatabase {
    entries: BTreeMap<String, (Split, BTreeSet<usize>)>,
}

impl SplitDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one observation of `split` in sample tree `tree_index`.
    pub fn add(&mut self, split: Split, tree_index: usize) {
        self.entries
            .entry(split.signature.clone())
            .or_insert_with(|| (split, BTreeSet::new()))
            .1
            .insert(tree_index);
    }

    /// Insert a split read back from a mapping file, keeping its id and an
    /// empty support set.
    pub fn insert_mapped(&mut self, split: Split) {
        self.entries
            .entry(split.signature.clone())
            .or_insert_with(|| (split, BTreeSet::new()));
    }

    /// Drop splits supported by fewer than `min_support` trees.
    pub fn cull(&mut self, min_support: usize) {
        self.entries
            .retain(|_, (_, support)| support.len() >= min_support);
    }

    /// Keep only splits whose id is in `keep`. Used to apply a support
    /// cull read back from a presence table.
    pub fn retain_ids(&mut self, keep: &BTreeSet<u32>) {
        self.entries.retain(|_, (split, _)| keep.contains(&split.id));
    }

    /// Assign sequential ids in canonical order. Called once after culling.
    pub fn assign_ids(&mut self) {
        for (id, (split, _)) in self.entries.values_mut().enumerate() {
            split.id = id as u32;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Split, &BTreeSet<usize>)> {
        self.entries.values().map(|(s, t)| (s, t))
    }

    /// Map split ids to splits. Duplicate ids mean the database was
    /// assembled inconsistently, which is fatal.
    pub fn index_by_id(&self) -> Result<BTreeMap<u32, &Split>, String> {
        let mut index = BTreeMap::new();
        for (split, _) in self.iter() {
            if index.insert(split.id, split).is_some() {
                return Err(format!("Duplicate split id {} in split database", split.id));
            }
        }
        Ok(index)
    }
}

/// Extract every non-trivial bipartition from a tree sample. Root and leaf
/// edges are skipped; the smaller half is stored first.
pub fn extract_splits(trees: &[Tree]) -> SplitDatabase {
    let mut db = SplitDatabase::new();
    for (tree_index, tree) in trees.iter().enumerate() {
        let taxa = tree.all_leaves();
        for node in tree.internal_nodes() {
            let mut a: TaxonSet = tree.leaves_of(node);
            let mut b: TaxonSet = taxa.difference(&a).cloned().collect();
            if a.len() > b.len() {
                std::mem::swap(&mut a, &mut b);
            }
            db.add(Split::new(a, b), tree_index);
        }
    }
    db
}

/// All incompatible (leftId, rightId) pairs between two databases, sorted
/// lexicographically for determinism. The cross product is pure per pair,
/// so it is evaluated in parallel and sorted afterwards. Empty databases
/// yield an empty list.
pub fn build_edge_list(
    left: &SplitDatabase,
    right: &SplitDatabase,
) -> Result<Vec<(u32, u32)>, String> {
    // id uniqueness is an invariant of both inputs
    left.index_by_id()?;
    right.index_by_id()?;

    let left_splits: Vec<&Split> = left.iter().map(|(s, _)| s).collect();
    let right_splits: Vec<&Split> = right.iter().map(|(s, _)| s).collect();

    let mut edges: Vec<(u32, u32)> = left_splits
        .par_iter()
        .flat_map_iter(|l| {
            right_splits
                .iter()
                .filter(|r| are_incompatible(l, r))
                .map(|r| (l.id, r.id))
                .collect::<Vec<_>>()
        })
        .collect();

    edges.sort_unstable();
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn taxa(names: &[&str]) -> TaxonSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn hash_of(split: &Split) -> u64 {
        let mut h = DefaultHasher::new();
        split.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_swapped_halves_are_identical() {
        let s1 = Split::new(taxa(&["A", "B"]), taxa(&["C", "D"]));
        let s2 = Split::new(taxa(&["C", "D"]), taxa(&["A", "B"]));
        assert_eq!(s1, s2);
        assert_eq!(s1.cmp(&s2), std::cmp::Ordering::Equal);
        assert_eq!(s1.signature(), s2.signature());
        assert_eq!(hash_of(&s1), hash_of(&s2));
    }

    #[test]
    fn test_signature_star_convention() {
        // First taxon in sort order always gets '*'
        let s = Split::new(taxa(&["C", "D"]), taxa(&["A", "B"]));
        assert_eq!(s.signature(), "..**");
    }

    #[test]
    fn test_distinct_splits_differ() {
        let s1 = Split::new(taxa(&["A", "B"]), taxa(&["C", "D"]));
        let s2 = Split::new(taxa(&["A", "C"]), taxa(&["B", "D"]));
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_incompatibility_is_symmetric() {
        // AB|CD vs AC|BD conflict; AB|CD vs AB|CD do not
        let s1 = Split::new(taxa(&["A", "B"]), taxa(&["C", "D"]));
        let s2 = Split::new(taxa(&["A", "C"]), taxa(&["B", "D"]));
        let s3 = Split::new(taxa(&["A", "B"]), taxa(&["C", "D"]));
        assert!(are_incompatible(&s1, &s2));
        assert!(are_incompatible(&s2, &s1));
        assert!(!are_incompatible(&s1, &s3));
        assert!(!are_incompatible(&s3, &s1));
    }

    #[test]
    fn test_compatible_nested_splits() {
        // AB|CDE nests inside ABC|DE on the same taxon set
        let s1 = Split::new(taxa(&["A", "B"]), taxa(&["C", "D", "E"]));
        let s2 = Split::new(taxa(&["A", "B", "C"]), taxa(&["D", "E"]));
        assert!(!are_incompatible(&s1, &s2));
    }

    #[test]
    fn test_extract_and_cull() {
        let t = crate::core::tree::tests::four_leaf_tree();
        let db = extract_splits(&[t.clone(), t]);
        // both internal edges of ((A,B),(C,D)) induce the same canonical
        // split AB|CD, supported by both sample trees
        assert_eq!(db.len(), 1);
        for (_, support) in db.iter() {
            assert_eq!(support.len(), 2);
        }

        let mut db = extract_splits(&[crate::core::tree::tests::four_leaf_tree()]);
        db.cull(2);
        assert!(db.is_empty());
    }

    #[test]
    fn test_edge_list_sorted_and_symmetric_free() {
        let mut left = SplitDatabase::new();
        left.insert_mapped(Split::with_id(taxa(&["A", "B"]), taxa(&["C", "D"]), 1));
        left.insert_mapped(Split::with_id(taxa(&["A", "C"]), taxa(&["B", "D"]), 0));

        let mut right = SplitDatabase::new();
        right.insert_mapped(Split::with_id(taxa(&["A", "D"]), taxa(&["B", "C"]), 0));

        let edges = build_edge_list(&left, &right).unwrap();
        // both left splits conflict with AD|BC
        assert_eq!(edges, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_empty_databases_yield_empty_edges() {
        let empty = SplitDatabase::new();
        let mut right = SplitDatabase::new();
        right.insert_mapped(Split::with_id(taxa(&["A", "B"]), taxa(&["C", "D"]), 0));
        assert!(build_edge_list(&empty, &right).unwrap().is_empty());
        assert!(build_edge_list(&empty, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_fatal() {
        let mut left = SplitDatabase::new();
        left.insert_mapped(Split::with_id(taxa(&["A", "B"]), taxa(&["C", "D"]), 3));
        left.insert_mapped(Split::with_id(taxa(&["A", "C"]), taxa(&["B", "D"]), 3));
        assert!(build_edge_list(&left, &SplitDatabase::new()).is_err());
    }
}
