// lib.rs - reascan library root

//! # reascan - Reassortment signature detection from segment tree samples
//!
//! This library compares posterior tree samples of two genome segments and
//! reports taxon sets whose placement is incompatible between them. Splits
//! are extracted per segment, incompatible split pairs become a labeled
//! bipartite graph, candidate taxon sets are filtered by a paired-distance
//! significance test, and maximal bicliques of co-occurring incompatibilities
//! yield per-candidate confidence scores.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use reascan::prelude::*;
//! use std::path::Path;
//!
//! // Load the split databases of the two segments
//! let left = read_split_mapping(Path::new("seg1.splits"))?;
//! let right = read_split_mapping(Path::new("seg2.splits"))?;
//!
//! // All incompatible split pairs between them
//! let edges = build_edge_list(&left, &right)?;
//!
//! // Candidate taxon sets, one per edge, interned in a shared label table
//! let mut labels = LabelTable::new();
//! let candidates = construct_candidate_sets(&left, &right, &edges, &mut labels)?;
//! # let _ = candidates;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{
        are_incompatible, build_edge_list, construct_candidate_sets, extract_splits,
    };
    pub use crate::core::{
        confidence_score, enumerate_maximal_bicliques, good_edges, Biclique, Bigraph,
        CandidateTaxonSet, LabelTable, LabeledBigraphs, PresenceTable, ScoredSet, Split,
        SplitDatabase, TaxonSet, Tree,
    };
    pub use crate::data::{
        read_label_mapping, read_labeled_graph, read_presence_table, read_split_mapping,
        DistRecord,
    };
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{Biclique, Bigraph, LabelTable, PresenceTable, Split, SplitDatabase, Tree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
