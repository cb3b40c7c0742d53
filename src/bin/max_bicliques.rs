// max_bicliques.rs - Standalone biclique enumeration over a work directory
//
// Runs only the enumeration stage: reads `left_trees`, `right_trees` and
// `graph.labelled` from the work directory and writes `bicliques` next to
// them. The threshold here is the per-side bound, used as given.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use argh::FromArgs;

use reascan::core::mica::EnumerationMode;
use reascan::core::{enumerate_maximal_bicliques, good_edges, Biclique, LabeledBigraphs};
use reascan::data::{read_labeled_graph, read_presence_table};
use reascan::output::write_bicliques;

#[derive(FromArgs)]
/// max_bicliques - Enumerate maximal bicliques of a labeled incompatibility graph
struct Args {
    /// work directory holding left_trees, right_trees and graph.labelled
    #[argh(option)]
    work_dir: String,

    /// per-side score bound; sets strictly at or below it are dropped
    #[argh(option)]
    threshold: f64,

    /// enumeration mode: all, non-star, edges (default: all)
    #[argh(option, default = "String::from(\"all\")")]
    mode: String,
}

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let args: Args = argh::from_env();
    let mode = EnumerationMode::from_str(&args.mode)?;
    let work_dir = PathBuf::from(&args.work_dir);

    println!("🚀 max_bicliques v{}", env!("CARGO_PKG_VERSION"));
    println!("🎯 Per-side score bound: {:.4}", args.threshold);

    let left_presence = read_presence_table(&work_dir.join("left_trees"))?;
    let right_presence = read_presence_table(&work_dir.join("right_trees"))?;
    let rows = read_labeled_graph(&work_dir.join("graph.labelled"))?;

    let mut graphs: LabeledBigraphs<u32, u32, u32> = LabeledBigraphs::new();
    for (left, right, labels) in &rows {
        for label in labels {
            graphs.add_edge(*label, *left, *right);
        }
    }
    println!(
        "📊 {} graph rows over {} labels",
        rows.len(),
        graphs.len()
    );

    let start = Instant::now();
    let mut by_label: BTreeMap<u32, Vec<Biclique<u32, u32>>> = BTreeMap::new();
    for label in graphs.labels() {
        let graph = match graphs.graph(label) {
            Some(g) => g,
            None => continue,
        };
        let bicliques = match mode {
            EnumerationMode::All => enumerate_maximal_bicliques(
                graph,
                &left_presence,
                &right_presence,
                args.threshold,
                false,
            ),
            EnumerationMode::NonStar => enumerate_maximal_bicliques(
                graph,
                &left_presence,
                &right_presence,
                args.threshold,
                true,
            ),
            EnumerationMode::Edges => {
                good_edges(graph, &left_presence, &right_presence, args.threshold)
            }
        };
        by_label.insert(*label, bicliques);
    }
    println!("✅ Enumeration done ({:.2?})", start.elapsed());

    let results = work_dir.join("bicliques");
    write_bicliques(&results.to_string_lossy(), &by_label)?;
    Ok(())
}
