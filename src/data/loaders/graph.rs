// graph.rs - Labeled incompatibility graph and label mapping loaders
//
// Graph rows: `<leftId> <rightId> <labelId>*` (zero or more labels).
// Label mapping: `<labelId> <taxon ...>` entries, each followed by a
// blank line. Blank lines are skipped, so a trailing blank is fine too.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::split::TaxonSet;

/// Load labeled graph rows. Rows keep their file order.
pub fn read_labeled_graph(file_path: &Path) -> Result<Vec<(u32, u32, Vec<u32>)>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open graph file {}: {}", file_path.display(), e))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields = trimmed
            .split_whitespace()
            .map(|f| {
                f.parse::<u32>()
                    .map_err(|_| format!("Line {}: invalid id '{}'", line_num + 1, f))
            })
            .collect::<Result<Vec<u32>, String>>()?;
        if fields.len() < 2 {
            return Err(format!(
                "Line {}: expected `<leftId> <rightId> <labelId>*`",
                line_num + 1
            ));
        }
        rows.push((fields[0], fields[1], fields[2..].to_vec()));
    }
    Ok(rows)
}

/// Load the label id to taxon set mapping.
pub fn read_label_mapping(file_path: &Path) -> Result<BTreeMap<u32, TaxonSet>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open label file {}: {}", file_path.display(), e))?;
    let reader = BufReader::new(file);

    let mut mapping = BTreeMap::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let id = fields
            .next()
            .ok_or_else(|| format!("Line {}: missing label id", line_num + 1))?;
        let id: u32 = id
            .parse()
            .map_err(|_| format!("Line {}: invalid label id '{}'", line_num + 1, id))?;

        let taxa: TaxonSet = fields.map(|t| t.to_string()).collect();
        if mapping.insert(id, taxa).is_some() {
            return Err(format!("Line {}: duplicate label id {}", line_num + 1, id));
        }
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_labeled_graph() {
        let path = write_temp("reascan_graph_basic.txt", "0 1 4 7\n2 3\n");
        let rows = read_labeled_graph(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], (0, 1, vec![4, 7]));
        assert_eq!(rows[1], (2, 3, vec![]));
    }

    #[test]
    fn test_read_labeled_graph_rejects_short_row() {
        let path = write_temp("reascan_graph_short.txt", "5\n");
        assert!(read_labeled_graph(&path).is_err());
    }

    #[test]
    fn test_read_label_mapping() {
        let path = write_temp("reascan_labels_basic.txt", "0 A B\n1 C\n");
        let mapping = read_label_mapping(&path).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&0].len(), 2);
        assert!(mapping[&1].contains("C"));
    }

    #[test]
    fn test_read_label_mapping_blank_separated_entries() {
        // entries separated by blank lines load in full
        let path = write_temp("reascan_labels_blanks.txt", "0 A B\n\n1 C\n\n");
        let mapping = read_label_mapping(&path).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&0].len(), 2);
        assert!(mapping[&1].contains("C"));
    }

    #[test]
    fn test_read_label_mapping_duplicate_id() {
        let path = write_temp("reascan_labels_dup.txt", "0 A\n0 B\n");
        assert!(read_label_mapping(&path).is_err());
    }
}
