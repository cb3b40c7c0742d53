// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// reascan - Reassortment signature detector for segment tree samples
pub struct Args {
    /// base name of the first segment's inputs (<base>.splits, <base>.trees, <base>.dist)
    #[argh(option)]
    pub left_base: Option<String>,

    /// base name of the second segment's inputs
    #[argh(option)]
    pub right_base: Option<String>,

    /// base name of the output files (<base>.labels, <base>.graph.labelled, <base>.bicliques)
    #[argh(option)]
    pub out_base: Option<String>,

    /// biclique confidence cutoff in (0,1); square-rooted into the per-side bound (default: 0.5)
    #[argh(option, default = "0.5")]
    pub threshold: f64,

    /// e-value threshold for the moved-pair significance test (default: 0.01)
    #[argh(option, default = "0.01")]
    pub evalue: f64,

    /// drop splits present in fewer than N sample trees (default: 0 = keep all)
    #[argh(option, default = "0")]
    pub min_support: usize,

    /// enumeration mode: all, non-star, edges (default: all)
    #[argh(option, default = "String::from(\"all\")")]
    pub mode: String,

    /// test the largest candidate set even without a size tie
    #[argh(switch)]
    pub test_all_candidates: bool,

    /// skip the distance-based confidence filter; keep all candidate labels
    #[argh(switch)]
    pub no_dist: bool,

    /// report candidates supported by a single biclique too
    #[argh(switch)]
    pub single: bool,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
