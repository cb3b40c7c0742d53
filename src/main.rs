// main.rs - CLI entry point

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use reascan::cli::{Config, ValidationResult};
use reascan::core::mica::EnumerationMode;
use reascan::core::presence::PresenceTable;
use reascan::core::split::SplitDatabase;
use reascan::core::stats::LabeledRow;
use reascan::core::{
    all_candidate_rows, build_edge_list, compute_moved_matrix, compute_pair_distances,
    confidence_score, construct_candidate_sets, enumerate_maximal_bicliques, filter_labeled_graph,
    good_edges, Biclique, CandidateTaxonSet, LabelTable, LabeledBigraphs,
};
use reascan::data::{read_dist_file, read_presence_table, read_split_mapping};
use reascan::output::{write_bicliques, write_label_mapping, write_labeled_graph};
use reascan::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

/// Drop splits the segment's own tree sample supports fewer than
/// `min_support` times.
fn apply_support_cull(db: &mut SplitDatabase, table: &PresenceTable<u32>, min_support: usize) {
    if min_support == 0 {
        return;
    }
    let keep: BTreeSet<u32> = table
        .iter()
        .filter(|(_, trees)| trees.len() >= min_support)
        .map(|(label, _)| *label)
        .collect();
    db.retain_ids(&keep);
}

/// Candidate labels per edge, either filtered by the moved test or kept
/// wholesale when the distance files are not used.
fn label_edges(
    args: &Args,
    files: &ValidationResult,
    edges: &[(u32, u32)],
    candidates: &[CandidateTaxonSet],
) -> Result<Vec<LabeledRow>, String> {
    if args.no_dist {
        println!("📊 Distance filter disabled, keeping all candidate labels");
        return Ok(all_candidate_rows(edges, candidates));
    }

    println!("📊 Computing paired distance tests...");
    let stage_start = Instant::now();
    let left_dists = read_dist_file(&files.left.dist)?;
    let right_dists = read_dist_file(&files.right.dist)?;
    let tests = compute_pair_distances(&left_dists, &right_dists)?;
    let (moved, ge_freq, le_freq) = compute_moved_matrix(&tests, args.evalue)?;
    println!(
        "📊 Moved-pair frequencies: {:.4} apart, {:.4} together ({:.2?})",
        ge_freq,
        le_freq,
        stage_start.elapsed()
    );

    filter_labeled_graph(
        edges,
        candidates,
        &moved,
        ge_freq,
        le_freq,
        args.evalue,
        args.test_all_candidates,
    )
}

fn run_main() -> Result<(), String> {
    let args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    let args = args.load_with_config()?;

    // Validate all arguments
    let files = validate_args(&args)?;

    println!("🚀 reascan v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "🕒 Started: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("🎯 Per-side score bound: {:.4}", files.side_threshold);

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to configure thread pool");
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    // Split databases and tree-presence tables of both segments
    println!("\n🔍 Loading split databases...");
    let mut left = read_split_mapping(&files.left.splits)?;
    let mut right = read_split_mapping(&files.right.splits)?;
    let left_presence = read_presence_table(&files.left.trees)?;
    let right_presence = read_presence_table(&files.right.trees)?;

    apply_support_cull(&mut left, &left_presence, args.min_support);
    apply_support_cull(&mut right, &right_presence, args.min_support);
    println!(
        "✅ Splits: {} vs {} ({} and {} sample trees)",
        left.len(),
        right.len(),
        left_presence.total_trees,
        right_presence.total_trees
    );

    // Incompatibility edges between the two databases
    println!("\n🔍 Building incompatibility edge list...");
    let stage_start = Instant::now();
    let edges = build_edge_list(&left, &right)?;
    println!(
        "✅ {} incompatible split pairs ({:.2?})",
        edges.len(),
        stage_start.elapsed()
    );

    // Candidate taxon sets, one per edge, sharing one label table
    let mut labels = LabelTable::new();
    let candidates = construct_candidate_sets(&left, &right, &edges, &mut labels)?;
    println!("✅ {} candidate labels", labels.len());

    let rows = label_edges(&args, &files, &edges, &candidates)?;

    write_label_mapping(&format!("{}.labels", files.out_base), &labels)?;
    write_labeled_graph(&format!("{}.graph.labelled", files.out_base), &rows)?;

    // One bipartite subgraph per surviving label
    let mut graphs: LabeledBigraphs<u32, u32, u32> = LabeledBigraphs::new();
    for (l, r, edge_labels) in &rows {
        for label in edge_labels {
            graphs.add_edge(*label, *l, *r);
        }
    }
    println!(
        "\n🔍 Enumerating bicliques over {} labeled subgraphs...",
        graphs.len()
    );

    let stage_start = Instant::now();
    let mut by_label: BTreeMap<u32, Vec<Biclique<u32, u32>>> = BTreeMap::new();
    for label in graphs.labels() {
        let graph = match graphs.graph(label) {
            Some(g) => g,
            None => continue,
        };
        let bicliques = match files.mode {
            EnumerationMode::All => enumerate_maximal_bicliques(
                graph,
                &left_presence,
                &right_presence,
                files.side_threshold,
                false,
            ),
            EnumerationMode::NonStar => enumerate_maximal_bicliques(
                graph,
                &left_presence,
                &right_presence,
                files.side_threshold,
                true,
            ),
            EnumerationMode::Edges => {
                good_edges(graph, &left_presence, &right_presence, files.side_threshold)
            }
        };
        by_label.insert(*label, bicliques);
    }
    println!("✅ Enumeration done ({:.2?})", stage_start.elapsed());

    write_bicliques(&format!("{}.bicliques", files.out_base), &by_label)?;

    // Per-candidate confidence summary
    let label_taxa = labels.by_id();
    println!("\n📋 Candidate reassortments:");
    let mut reported = 0usize;
    for (label, bicliques) in &by_label {
        let (confidence, cliques) = confidence_score(bicliques);
        if cliques == 0 || (cliques == 1 && !args.single) {
            continue;
        }
        let taxa = label_taxa
            .get(label)
            .map(String::as_str)
            .unwrap_or("<unknown>");
        println!(
            "   {} {{{}}}: confidence {:.4}, {} cliques",
            label, taxa, confidence, cliques
        );
        reported += 1;
    }
    if reported == 0 {
        println!("   (none)");
    }

    println!("\n✅ Finished in {:.2?}", total_start.elapsed());
    Ok(())
}
