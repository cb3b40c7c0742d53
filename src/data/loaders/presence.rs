// presence.rs - Tree-presence table loader
//
// Header `<marker> <totalTrees> <numEntries>`, then one line per entry:
// `<label> <count> <treeIndex> ...` with exactly <count> indices.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::presence::PresenceTable;

/// Load a tree-presence table keyed by split id.
pub fn read_presence_table(file_path: &Path) -> Result<PresenceTable<u32>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open presence file {}: {}", file_path.display(), e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| format!("Empty presence file {}", file_path.display()))?
        .map_err(|e| format!("Failed to read header: {}", e))?;
    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!(
            "Presence header must be `<marker> <totalTrees> <numEntries>`, got '{}'",
            header
        ));
    }
    let total_trees: usize = parts[1]
        .parse()
        .map_err(|_| format!("Invalid tree count '{}' in presence header", parts[1]))?;
    let num_entries: usize = parts[2]
        .parse()
        .map_err(|_| format!("Invalid entry count '{}' in presence header", parts[2]))?;

    let mut table = PresenceTable::new(total_trees);
    let mut entries_read = 0usize;
    for (entry, line) in lines.enumerate() {
        if entry >= num_entries {
            break;
        }
        let line_num = entry + 2;
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(format!(
                "Line {}: expected `<label> <count> <treeIndex>...`",
                line_num
            ));
        }

        let label: u32 = fields[0]
            .parse()
            .map_err(|_| format!("Line {}: invalid label '{}'", line_num, fields[0]))?;
        let count: usize = fields[1]
            .parse()
            .map_err(|_| format!("Line {}: invalid count '{}'", line_num, fields[1]))?;
        if fields.len() != 2 + count {
            return Err(format!(
                "Line {}: label {} declares {} trees but lists {}",
                line_num,
                label,
                count,
                fields.len() - 2
            ));
        }

        let trees = fields[2..]
            .iter()
            .map(|f| {
                f.parse::<usize>()
                    .map_err(|_| format!("Line {}: invalid tree index '{}'", line_num, f))
            })
            .collect::<Result<Vec<usize>, String>>()?;
        // repeated lines for one label accumulate into a single set
        table.merge(label, trees);
        entries_read += 1;
    }

    if entries_read != num_entries {
        return Err(format!(
            "Presence file {} declares {} entries but lists {}",
            file_path.display(),
            num_entries,
            entries_read
        ));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_presence_table() {
        let path = write_temp(
            "reascan_presence_basic.txt",
            ">> 5 2\n0 3 0 2 4\n1 1 3\n",
        );
        let table = read_presence_table(&path).unwrap();
        assert_eq!(table.total_trees, 5);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.support(&0),
            Some(&BTreeSet::from([0usize, 2, 4]))
        );
        assert_eq!(table.support(&1), Some(&BTreeSet::from([3usize])));
    }

    #[test]
    fn test_read_presence_table_empty_body() {
        let path = write_temp("reascan_presence_empty.txt", ">> 10 0\n");
        let table = read_presence_table(&path).unwrap();
        assert_eq!(table.total_trees, 10);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_presence_table_count_mismatch() {
        let path = write_temp("reascan_presence_short.txt", ">> 5 1\n0 3 0 2\n");
        let err = read_presence_table(&path).unwrap_err();
        assert!(err.contains("declares 3 trees"));
    }

    #[test]
    fn test_read_presence_table_missing_entries() {
        let path = write_temp("reascan_presence_missing.txt", ">> 5 2\n0 1 0\n");
        assert!(read_presence_table(&path).is_err());
    }

    #[test]
    fn test_read_presence_table_merges_duplicate_labels() {
        let path = write_temp(
            "reascan_presence_dup.txt",
            ">> 5 2\n0 2 0 2\n0 1 4\n",
        );
        let table = read_presence_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.support(&0),
            Some(&BTreeSet::from([0usize, 2, 4]))
        );
    }
}
