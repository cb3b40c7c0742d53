// presence.rs - Tree-presence tables and complement-encoded scored sets
//
// A presence table records, per label, which sampled trees support that
// taxon subset as a monophyletic unit. A ScoredSet is a label set plus the
// complement of the intersection of its members' support sets: the trees in
// which at least one member is *not* supported. Storing the complement lets
// `intersect` grow candidate bicliques with a plain set union (De Morgan).

use std::collections::{BTreeMap, BTreeSet};

use crate::core::split::SplitDatabase;

/// Per-label support table over `0..total_trees` sample-tree indices.
#[derive(Debug, Clone, Default)]
pub struct PresenceTable<T: Ord + Clone> {
    pub total_trees: usize,
    support: BTreeMap<T, BTreeSet<usize>>,
}

impl<T: Ord + Clone> PresenceTable<T> {
    pub fn new(total_trees: usize) -> Self {
        Self {
            total_trees,
            support: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, label: T, trees: BTreeSet<usize>) {
        self.support.insert(label, trees);
    }

    /// Add tree indices to `label`'s support, keeping whatever is already
    /// recorded for it.
    pub fn merge(&mut self, label: T, trees: impl IntoIterator<Item = usize>) {
        self.support.entry(label).or_default().extend(trees);
    }

    pub fn len(&self) -> usize {
        self.support.len()
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    pub fn support(&self, label: &T) -> Option<&BTreeSet<usize>> {
        self.support.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &BTreeSet<usize>)> {
        self.support.iter()
    }

    /// Indices in `0..total_trees` that do *not* support `label`. A label
    /// absent from the table has empty support, so its complement is the
    /// full range.
    fn complement_of(&self, label: &T) -> BTreeSet<usize> {
        match self.support.get(label) {
            Some(trees) => (0..self.total_trees).filter(|i| !trees.contains(i)).collect(),
            None => (0..self.total_trees).collect(),
        }
    }
}

impl PresenceTable<u32> {
    /// Presence of each split (keyed by id) across the sample it was
    /// extracted from.
    pub fn from_database(db: &SplitDatabase, total_trees: usize) -> Self {
        let mut table = Self::new(total_trees);
        for (split, support) in db.iter() {
            table.insert(split.id, support.iter().copied().collect());
        }
        table
    }
}

/// A label set scored by how often all members co-occur across the sampled
/// trees. Equality and ordering consider the member set only, which is what
/// deduplicates search frontiers during enumeration.
#[derive(Debug, Clone)]
pub struct ScoredSet<T: Ord + Clone> {
    members: BTreeSet<T>,
    complement: BTreeSet<usize>,
}

impl<T: Ord + Clone> ScoredSet<T> {
    /// Build from a member set: the complement of the intersection of the
    /// members' support sets, accumulated pairwise as the union of
    /// per-member complements.
    pub fn new(members: BTreeSet<T>, table: &PresenceTable<T>) -> Self {
        let mut complement = BTreeSet::new();
        for member in &members {
            let member_complement = table.complement_of(member);
            complement = complement.union(&member_complement).cloned().collect();
        }
        Self {
            members,
            complement,
        }
    }

    pub fn singleton(member: T, table: &PresenceTable<T>) -> Self {
        let mut members = BTreeSet::new();
        members.insert(member);
        Self::new(members, table)
    }

    pub fn members(&self) -> &BTreeSet<T> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fraction of sampled trees supporting the simultaneous co-occurrence
    /// of every member; 0 for an empty member set. Monotonically
    /// non-increasing as the member set grows.
    pub fn score(&self, total_trees: usize) -> f64 {
        if self.members.is_empty() || total_trees == 0 {
            0.0
        } else {
            (total_trees - self.complement.len()) as f64 / total_trees as f64
        }
    }

    /// The sole primitive for growing candidate bicliques: member sets
    /// intersect, complements union.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            members: self.members.intersection(&other.members).cloned().collect(),
            complement: self
                .complement
                .union(&other.complement)
                .cloned()
                .collect(),
        }
    }
}

impl<T: Ord + Clone> PartialEq for ScoredSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<T: Ord + Clone> Eq for ScoredSet<T> {}

impl<T: Ord + Clone> PartialOrd for ScoredSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord + Clone> Ord for ScoredSet<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.members.cmp(&other.members)
    }
}
