// mod.rs - Data structures module

pub mod loaders;

// Re-export main types for convenience
pub use loaders::dist::{read_dist_file, DistRecord};
pub use loaders::graph::{read_label_mapping, read_labeled_graph};
pub use loaders::presence::read_presence_table;
pub use loaders::splits::read_split_mapping;
