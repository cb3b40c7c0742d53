// mica.rs - Maximal biclique enumeration over one edge-label subgraph
//
// Closure-lattice search: seed with the "stars" (each left vertex's full
// right-neighborhood), intersect every unordered pair, then keep folding the
// new frontier back against the stars until a rank adds nothing. The
// accumulator of seen closures strictly grows each rank and is bounded by
// the finite set of distinct closures over left vertices, so termination is
// guaranteed and the enumeration is exact for the given threshold. Every
// score gate is strict `>`.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::bigraph::Bigraph;
use crate::core::presence::{PresenceTable, ScoredSet};

/// How the per-label subgraphs are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationMode {
    /// All maximal bicliques, stars included.
    All,
    /// Only bicliques with more than one member on each side.
    NonStar,
    /// Per-edge singleton scoring, no biclique search.
    Edges,
}

impl std::str::FromStr for EnumerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "all" => Ok(EnumerationMode::All),
            "non-star" => Ok(EnumerationMode::NonStar),
            "edges" => Ok(EnumerationMode::Edges),
            other => Err(format!(
                "Invalid mode '{}'. Available: all, non-star, edges",
                other
            )),
        }
    }
}

/// One maximal biclique passing the threshold on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Biclique<L: Ord + Clone, R: Ord + Clone> {
    pub left: BTreeSet<L>,
    pub right: BTreeSet<R>,
    pub left_score: f64,
    pub right_score: f64,
}

/// Intersection of the adjacency lists of every vertex in `input`: the
/// other-side closure of a vertex set. Empty input closes to nothing.
fn closure<A: Ord + Clone, B: Ord + Clone>(
    input: &BTreeSet<A>,
    adjacency: &BTreeMap<A, BTreeSet<B>>,
) -> BTreeSet<B> {
    let mut members = input.iter();
    let first = match members.next() {
        Some(m) => m,
        None => return BTreeSet::new(),
    };
    let mut out = adjacency.get(first).cloned().unwrap_or_default();
    for m in members {
        let adj = adjacency.get(m).cloned().unwrap_or_default();
        out = out.intersection(&adj).cloned().collect();
    }
    out
}

/// Rank 2: intersect every unordered pair of stars, keeping results above
/// the threshold that are not already stars.
fn expand_stars<R: Ord + Clone>(
    stars: &BTreeSet<ScoredSet<R>>,
    threshold: f64,
    total_trees: usize,
) -> BTreeSet<ScoredSet<R>> {
    let mut result = BTreeSet::new();
    for (i, a) in stars.iter().enumerate() {
        for b in stars.iter().skip(i + 1) {
            let intersection = a.intersect(b);
            if intersection.score(total_trees) > threshold && !stars.contains(&intersection) {
                result.insert(intersection);
            }
        }
    }
    result
}

/// Ranks 3+: intersect the current frontier against the full star set,
/// keeping results above the threshold not seen in any earlier rank.
fn expand<R: Ord + Clone>(
    stars: &BTreeSet<ScoredSet<R>>,
    current: &BTreeSet<ScoredSet<R>>,
    all: &BTreeSet<ScoredSet<R>>,
    threshold: f64,
    total_trees: usize,
) -> BTreeSet<ScoredSet<R>> {
    let mut result = BTreeSet::new();
    for star in stars {
        for frontier in current {
            let intersection = star.intersect(frontier);
            if intersection.score(total_trees) > threshold && !all.contains(&intersection) {
                result.insert(intersection);
            }
        }
    }
    result
}

/// Enumerate all maximal bicliques of `graph` whose right-hand and
/// left-hand scored sets both score strictly above `threshold`. In
/// `non_star` mode, bicliques with a single vertex on either side are
/// suppressed.
pub fn enumerate_maximal_bicliques<L, R>(
    graph: &Bigraph<L, R>,
    left_presence: &PresenceTable<L>,
    right_presence: &PresenceTable<R>,
    threshold: f64,
    non_star: bool,
) -> Vec<Biclique<L, R>>
where
    L: Ord + Clone,
    R: Ord + Clone,
{
    let left_total = left_presence.total_trees;
    let right_total = right_presence.total_trees;

    // seed with the stars
    let mut stars: BTreeSet<ScoredSet<R>> = BTreeSet::new();
    for neighborhood in graph.left_adjacency().values() {
        let star = ScoredSet::new(neighborhood.clone(), right_presence);
        if star.score(right_total) > threshold {
            stars.insert(star);
        }
    }

    let mut all = stars.clone();

    // pairwise expansion, then iterate to the fixed point
    let mut current = expand_stars(&stars, threshold, right_total);
    all.extend(current.iter().cloned());

    while !current.is_empty() {
        current = expand(&stars, &current, &all, threshold, right_total);
        all.extend(current.iter().cloned());
    }

    // recover each right-set's left closure and emit the passing pairs
    let mut bicliques = Vec::new();
    for right_set in &all {
        let left_members = closure(right_set.members(), graph.right_adjacency());
        let left_set = ScoredSet::new(left_members, left_presence);

        if left_set.score(left_total) > threshold
            && (!non_star || (left_set.len() > 1 && right_set.len() > 1))
        {
            bicliques.push(Biclique {
                left: left_set.members().clone(),
                right: right_set.members().clone(),
                left_score: left_set.score(left_total),
                right_score: right_set.score(right_total),
            });
        }
    }
    bicliques
}

/// O(E) approximate fast path: score the two singleton endpoints of every
/// edge independently and emit the edge iff both exceed the threshold.
pub fn good_edges<L, R>(
    graph: &Bigraph<L, R>,
    left_presence: &PresenceTable<L>,
    right_presence: &PresenceTable<R>,
    threshold: f64,
) -> Vec<Biclique<L, R>>
where
    L: Ord + Clone,
    R: Ord + Clone,
{
    let left_total = left_presence.total_trees;
    let right_total = right_presence.total_trees;

    let mut bicliques = Vec::new();
    for (left, neighborhood) in graph.left_adjacency() {
        let scored_left = ScoredSet::singleton(left.clone(), left_presence);
        if scored_left.score(left_total) <= threshold {
            continue;
        }
        for right in neighborhood {
            let scored_right = ScoredSet::singleton(right.clone(), right_presence);
            if scored_right.score(right_total) > threshold {
                bicliques.push(Biclique {
                    left: scored_left.members().clone(),
                    right: scored_right.members().clone(),
                    left_score: scored_left.score(left_total),
                    right_score: scored_right.score(right_total),
                });
            }
        }
    }
    bicliques
}

/// Aggregate confidence over one label's bicliques: the probability that at
/// least one biclique is real, treating `leftScore·rightScore` as each
/// biclique's own confidence. Returns the confidence and the clique count.
pub fn confidence_score<L: Ord + Clone, R: Ord + Clone>(
    bicliques: &[Biclique<L, R>],
) -> (f64, usize) {
    let mut pval = 1.0;
    for b in bicliques {
        pval *= 1.0 - b.left_score * b.right_score;
    }
    (1.0 - pval, bicliques.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_presence(labels: &[u32], total: usize) -> PresenceTable<u32> {
        let mut t = PresenceTable::new(total);
        for &l in labels {
            t.insert(l, (0..total).collect());
        }
        t
    }

    /// Fixture with known maximal bicliques:
    ///   1-10 1-11 2-10 2-11 3-11 3-12
    /// Maximal: {1,2}×{10,11}, {1,2,3}×{11}, {3}×{11,12}.
    fn fixture() -> Bigraph<u32, u32> {
        let mut g = Bigraph::new();
        g.add_edge(1, 10);
        g.add_edge(1, 11);
        g.add_edge(2, 10);
        g.add_edge(2, 11);
        g.add_edge(3, 11);
        g.add_edge(3, 12);
        g
    }

    fn set(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_enumeration_is_complete_on_fixture() {
        let g = fixture();
        let left = full_presence(&[1, 2, 3], 4);
        let right = full_presence(&[10, 11, 12], 4);

        let mut found: Vec<(BTreeSet<u32>, BTreeSet<u32>)> =
            enumerate_maximal_bicliques(&g, &left, &right, 0.5, false)
                .into_iter()
                .map(|b| (b.left, b.right))
                .collect();
        found.sort();

        let mut expected = vec![
            (set(&[1, 2]), set(&[10, 11])),
            (set(&[1, 2, 3]), set(&[11])),
            (set(&[3]), set(&[11, 12])),
        ];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_emitted_bicliques_are_sound() {
        let g = fixture();
        let left = full_presence(&[1, 2, 3], 4);
        let right = full_presence(&[10, 11, 12], 4);

        for b in enumerate_maximal_bicliques(&g, &left, &right, 0.5, false) {
            // full left↔right adjacency
            for l in &b.left {
                for r in &b.right {
                    assert!(g.has_edge(l, r));
                }
            }
            // no vertex can be added to either side without losing adjacency
            for l in g.left_adjacency().keys() {
                if !b.left.contains(l) {
                    assert!(!b.right.iter().all(|r| g.has_edge(l, r)));
                }
            }
            for r in g.right_adjacency().keys() {
                if !b.right.contains(r) {
                    assert!(!b.left.iter().all(|l| g.has_edge(l, r)));
                }
            }
        }
    }

    #[test]
    fn test_non_star_mode_suppresses_stars() {
        let g = fixture();
        let left = full_presence(&[1, 2, 3], 4);
        let right = full_presence(&[10, 11, 12], 4);

        let found = enumerate_maximal_bicliques(&g, &left, &right, 0.5, true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].left, set(&[1, 2]));
        assert_eq!(found[0].right, set(&[10, 11]));
        assert_eq!(found[0].left_score, 1.0);
        assert_eq!(found[0].right_score, 1.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        // left vertex supported in 1 of 2 trees scores exactly 0.5 and must
        // be excluded at threshold 0.5
        let mut g = Bigraph::new();
        g.add_edge(1u32, 10u32);

        let mut left = PresenceTable::new(2);
        left.insert(1, set(&[0]).into_iter().map(|i| i as usize).collect());
        let right = full_presence(&[10], 2);

        assert!(enumerate_maximal_bicliques(&g, &left, &right, 0.5, false).is_empty());
        // just below the score it is admitted
        let found = enumerate_maximal_bicliques(&g, &left, &right, 0.49, false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].left_score, 0.5);
    }

    #[test]
    fn test_empty_graph_yields_nothing() {
        let g: Bigraph<u32, u32> = Bigraph::new();
        let left = full_presence(&[], 2);
        let right = full_presence(&[], 2);
        assert!(enumerate_maximal_bicliques(&g, &left, &right, 0.1, false).is_empty());
    }

    #[test]
    fn test_good_edges_mode() {
        let g = fixture();
        let left = full_presence(&[1, 2, 3], 4);
        let mut right = PresenceTable::new(4);
        right.insert(10, (0..4).collect());
        right.insert(11, (0..4).collect());
        right.insert(12, (0..1).collect()); // score 0.25

        let found = good_edges(&g, &left, &right, 0.5);
        // every edge except 3-12 survives
        assert_eq!(found.len(), 5);
        assert!(found
            .iter()
            .all(|b| b.left.len() == 1 && b.right.len() == 1));
        assert!(!found
            .iter()
            .any(|b| b.right.contains(&12)));
    }

    #[test]
    fn test_confidence_score() {
        let left = full_presence(&[1], 2);
        let right = full_presence(&[10], 2);
        let mut g = Bigraph::new();
        g.add_edge(1u32, 10u32);
        let bicliques = enumerate_maximal_bicliques(&g, &left, &right, 0.1, false);

        let (conf, count) = confidence_score(&bicliques);
        assert_eq!(count, 1);
        assert_eq!(conf, 1.0);

        let half = vec![Biclique {
            left: set(&[1]),
            right: set(&[10]),
            left_score: 0.8,
            right_score: 0.5,
        }];
        let (conf, _) = confidence_score(&half);
        assert!((conf - 0.4).abs() < 1e-12);
    }
}
