// mod.rs - Output formatters module
//
// These files are consumed verbatim by the downstream stages and the
// standalone biclique tool, so no comment headers are written.

use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::candidates::LabelTable;
use crate::core::mica::Biclique;
use crate::core::presence::PresenceTable;
use crate::core::split::SplitDatabase;
use crate::core::stats::LabeledRow;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

fn create_writer(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the split mapping: `<id> {taxa} {taxa}`, larger half first.
pub fn write_split_mapping(file_path: &str, db: &SplitDatabase) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    for (split, _) in db.iter() {
        let (big, small) = if split.first().len() >= split.second().len() {
            (split.first(), split.second())
        } else {
            (split.second(), split.first())
        };
        writeln!(writer, "{} {{{}}} {{{}}}", split.id, join(big), join(small))
            .map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Split mapping written to: {}", file_path);
    Ok(())
}

/// Write the tree-presence table: `>> <totalTrees> <numEntries>` header
/// then `<label> <count> <treeIndex>...` per entry.
pub fn write_tree_presence(file_path: &str, table: &PresenceTable<u32>) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    writeln!(writer, ">> {} {}", table.total_trees, table.len())
        .map_err(|e| format!("Write error: {}", e))?;
    for (label, trees) in table.iter() {
        writeln!(writer, "{} {} {}", label, trees.len(), join(trees))
            .map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Tree presence written to: {}", file_path);
    Ok(())
}

/// Write the label mapping, sorted by id, each entry followed by a blank
/// line.
pub fn write_label_mapping(file_path: &str, labels: &LabelTable) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    for (id, taxa) in labels.by_id() {
        writeln!(writer, "{} {}\n", id, taxa).map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Label mapping written to: {}", file_path);
    Ok(())
}

/// Write labeled graph rows: `<leftId> <rightId> <labelId>*`. Rows with no
/// surviving labels are still written.
pub fn write_labeled_graph(file_path: &str, rows: &[LabeledRow]) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    for (left, right, labels) in rows {
        write!(writer, "{} {}", left, right).map_err(|e| format!("Write error: {}", e))?;
        for label in labels {
            write!(writer, " {}", label).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Labeled graph written to: {}", file_path);
    Ok(())
}

/// Write the per-label biclique sections. A section is the `Label:` header
/// plus a blank line, the blocks (left members, right members, the two
/// scores, a blank line each), one more blank line and a rule. Labels with
/// no bicliques are skipped.
pub fn write_bicliques(
    file_path: &str,
    by_label: &BTreeMap<u32, Vec<Biclique<u32, u32>>>,
) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    for (label, bicliques) in by_label {
        if bicliques.is_empty() {
            continue;
        }
        writeln!(writer, "Label: {}\n", label).map_err(|e| format!("Write error: {}", e))?;
        for biclique in bicliques {
            writeln!(writer, "{}", join(&biclique.left))
                .map_err(|e| format!("Write error: {}", e))?;
            writeln!(writer, "{}", join(&biclique.right))
                .map_err(|e| format!("Write error: {}", e))?;
            writeln!(writer, "{:.6} {:.6}", biclique.left_score, biclique.right_score)
                .map_err(|e| format!("Write error: {}", e))?;
            writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer, "\n------------").map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Bicliques written to: {}", file_path);
    Ok(())
}
