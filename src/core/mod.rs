// mod.rs - Core logic module

pub mod bigraph;
pub mod candidates;
pub mod mica;
pub mod numerics;
pub mod presence;
pub mod split;
pub mod stats;
pub mod tree;

// Re-export main types for convenience
pub use bigraph::{Bigraph, LabeledBigraphs};
pub use candidates::{construct_candidate_sets, CandidateTaxonSet, LabelTable};
pub use mica::{
    confidence_score, enumerate_maximal_bicliques, good_edges, Biclique, EnumerationMode,
};
pub use presence::{PresenceTable, ScoredSet};
pub use split::{
    are_incompatible, build_edge_list, extract_splits, Split, SplitDatabase, TaxonSet,
};
pub use stats::{
    all_candidate_rows, compute_moved_matrix, compute_pair_distances, filter_labeled_graph,
    MovedMatrix, PairTests,
};
pub use tree::{Tree, TreeNode};
