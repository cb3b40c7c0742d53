// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub left_base: Option<String>,
    pub right_base: Option<String>,
    pub out_base: Option<String>,

    // Detection settings
    pub threshold: Option<f64>,
    pub evalue: Option<f64>,
    pub min_support: Option<usize>,
    pub mode: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub test_all_candidates: Option<bool>,
    pub no_dist: Option<bool>,
    pub single: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            left_base: None,
            right_base: None,
            out_base: None,
            threshold: None,
            evalue: None,
            min_support: None,
            mode: None,
            threads: None,
            test_all_candidates: None,
            no_dist: None,
            single: None,
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# reascan.toml - Configuration file for reascan
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Base name of the first segment's inputs (<base>.splits, <base>.trees, <base>.dist)
left_base = "seg1/HA"

# Base name of the second segment's inputs
right_base = "seg2/NA"

# Base name of the output files (<base>.labels, <base>.graph.labelled, <base>.bicliques)
out_base = "out/HA_NA"

# =============================================================================
# DETECTION SETTINGS
# =============================================================================

# Biclique confidence cutoff in (0,1); square-rooted into the per-side bound
threshold = 0.5

# E-value threshold for the moved-pair significance test
evalue = 0.01

# Drop splits present in fewer than N sample trees (0 = keep all)
min_support = 0

# Enumeration mode: all, non-star, edges
mode = "all"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Test the largest candidate set even without a size tie
test_all_candidates = false

# Skip the distance-based confidence filter; keep all candidate labels
no_dist = false

# Report candidates supported by a single biclique too
single = false
"#
        .to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
