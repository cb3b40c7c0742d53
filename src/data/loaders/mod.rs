// mod.rs - File format loaders

pub mod dist;
pub mod graph;
pub mod presence;
pub mod splits;
