// bigraph.rs - Bipartite adjacency with mirrored edge maps
//
// Both directions are stored and kept consistent: an edge exists left→right
// iff it exists right→left. One `Bigraph` holds the subgraph of a single
// edge-label class; `LabeledBigraphs` groups them per label.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct Bigraph<L: Ord + Clone, R: Ord + Clone> {
    left_adjacency: BTreeMap<L, BTreeSet<R>>,
    right_adjacency: BTreeMap<R, BTreeSet<L>>,
}

impl<L: Ord + Clone, R: Ord + Clone> Bigraph<L, R> {
    pub fn new() -> Self {
        Self {
            left_adjacency: BTreeMap::new(),
            right_adjacency: BTreeMap::new(),
        }
    }

    pub fn add_edge(&mut self, left: L, right: R) {
        self.left_adjacency
            .entry(left.clone())
            .or_default()
            .insert(right.clone());
        self.right_adjacency.entry(right).or_default().insert(left);
    }

    pub fn left_adjacency(&self) -> &BTreeMap<L, BTreeSet<R>> {
        &self.left_adjacency
    }

    pub fn right_adjacency(&self) -> &BTreeMap<R, BTreeSet<L>> {
        &self.right_adjacency
    }

    pub fn edge_count(&self) -> usize {
        self.left_adjacency.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.left_adjacency.is_empty()
    }

    pub fn has_edge(&self, left: &L, right: &R) -> bool {
        self.left_adjacency
            .get(left)
            .is_some_and(|s| s.contains(right))
    }

    /// Remove every edge of the given biclique, then drop any vertex left
    /// without edges on either side. Returns the number of vertices
    /// removed.
    pub fn remove_biclique(&mut self, left_nodes: &BTreeSet<L>, right_nodes: &BTreeSet<R>) -> usize {
        for l in left_nodes {
            for r in right_nodes {
                if let Some(adj) = self.left_adjacency.get_mut(l) {
                    adj.remove(r);
                }
                if let Some(adj) = self.right_adjacency.get_mut(r) {
                    adj.remove(l);
                }
            }
        }

        let mut removed = 0;
        for l in left_nodes {
            if self.left_adjacency.get(l).is_some_and(|s| s.is_empty()) {
                self.left_adjacency.remove(l);
                removed += 1;
            }
        }
        for r in right_nodes {
            if self.right_adjacency.get(r).is_some_and(|s| s.is_empty()) {
                self.right_adjacency.remove(r);
                removed += 1;
            }
        }
        removed
    }
}

/// One bigraph per edge label, as produced by the labeled-graph file or
/// built in memory from the filtered candidate output.
#[derive(Debug, Clone, Default)]
pub struct LabeledBigraphs<L: Ord + Clone, R: Ord + Clone, E: Ord + Clone> {
    graphs: BTreeMap<E, Bigraph<L, R>>,
}

impl<L: Ord + Clone, R: Ord + Clone, E: Ord + Clone> LabeledBigraphs<L, R, E> {
    pub fn new() -> Self {
        Self {
            graphs: BTreeMap::new(),
        }
    }

    pub fn add_edge(&mut self, label: E, left: L, right: R) {
        self.graphs
            .entry(label)
            .or_insert_with(Bigraph::new)
            .add_edge(left, right);
    }

    pub fn labels(&self) -> impl Iterator<Item = &E> {
        self.graphs.keys()
    }

    pub fn graph(&self, label: &E) -> Option<&Bigraph<L, R>> {
        self.graphs.get(label)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_edges_are_mirrored() {
        let mut g: Bigraph<u32, u32> = Bigraph::new();
        g.add_edge(1, 10);
        g.add_edge(1, 11);
        g.add_edge(2, 10);

        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge(&1, &10));
        assert_eq!(g.left_adjacency()[&1], set(&[10, 11]));
        assert_eq!(g.right_adjacency()[&10], set(&[1, 2]));
    }

    #[test]
    fn test_remove_biclique_drops_empty_vertices() {
        let mut g: Bigraph<u32, u32> = Bigraph::new();
        g.add_edge(1, 10);
        g.add_edge(1, 11);
        g.add_edge(2, 10);

        // removing {1}×{10,11} empties vertex 1 and vertex 11
        let removed = g.remove_biclique(&set(&[1]), &set(&[10, 11]));
        assert_eq!(removed, 2);
        assert!(!g.has_edge(&1, &10));
        assert!(g.has_edge(&2, &10));
        assert!(!g.left_adjacency().contains_key(&1));
        assert!(!g.right_adjacency().contains_key(&11));
        assert!(g.right_adjacency().contains_key(&10));
    }

    #[test]
    fn test_labeled_bigraphs_partition_by_label() {
        let mut lg: LabeledBigraphs<u32, u32, u32> = LabeledBigraphs::new();
        lg.add_edge(5, 0, 0);
        lg.add_edge(5, 0, 1);
        lg.add_edge(7, 1, 0);

        assert_eq!(lg.len(), 2);
        assert_eq!(lg.labels().copied().collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(lg.graph(&5).unwrap().edge_count(), 2);
        assert_eq!(lg.graph(&7).unwrap().edge_count(), 1);
        assert!(lg.graph(&9).is_none());
    }
}
