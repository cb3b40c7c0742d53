// splits.rs - Split mapping file loader
//
// One split per line: `<id> {taxon ...} {taxon ...}`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::split::{Split, SplitDatabase, TaxonSet};

fn parse_brace_group(s: &str) -> Result<(TaxonSet, &str), String> {
    let open = s
        .find('{')
        .ok_or_else(|| "Missing '{' in taxon group".to_string())?;
    let close = s[open..]
        .find('}')
        .map(|i| open + i)
        .ok_or_else(|| "Missing '}' in taxon group".to_string())?;
    let set: TaxonSet = s[open + 1..close]
        .split_whitespace()
        .map(|t| t.to_string())
        .collect();
    if set.is_empty() {
        return Err("Empty taxon group".to_string());
    }
    Ok((set, &s[close + 1..]))
}

/// Load a split mapping file into a database. Ids come from the file;
/// duplicate ids are caught later by `index_by_id`.
pub fn read_split_mapping(file_path: &Path) -> Result<SplitDatabase, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open split file {}: {}", file_path.display(), e))?;
    let reader = BufReader::new(file);

    let mut db = SplitDatabase::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let id_end = trimmed
            .find(char::is_whitespace)
            .ok_or_else(|| format!("Line {}: expected `<id> {{..}} {{..}}`", line_num + 1))?;
        let id: u32 = trimmed[..id_end]
            .parse()
            .map_err(|_| format!("Line {}: invalid split id '{}'", line_num + 1, &trimmed[..id_end]))?;

        let (first, rest) = parse_brace_group(&trimmed[id_end..])
            .map_err(|e| format!("Line {}: {}", line_num + 1, e))?;
        let (second, _) =
            parse_brace_group(rest).map_err(|e| format!("Line {}: {}", line_num + 1, e))?;

        db.insert_mapped(Split::with_id(first, second, id));
    }
    Ok(db)
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
    fn test_read_split_mapping() {
        let path = write_temp(
            "reascan_splits_basic.txt",
            "0 {A B C} {D E}\n1 {A D} {B C E}\n",
        );
        let db = read_split_mapping(&path).unwrap();
        assert_eq!(db.len(), 2);

        let by_id = db.index_by_id().unwrap();
        let s0 = by_id[&0];
        let union: Vec<&String> = s0.first().union(s0.second()).collect();
        assert_eq!(union.len(), 5);
    }

    #[test]
    fn test_read_split_mapping_canonicalizes_halves() {
        // same bipartition written with halves swapped maps to one entry
        let path = write_temp(
            "reascan_splits_swapped.txt",
            "0 {C D} {A B}\n1 {A B} {C D}\n",
        );
        let db = read_split_mapping(&path).unwrap();
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_read_split_mapping_rejects_garbage() {
        let path = write_temp("reascan_splits_bad.txt", "0 {A B} C D\n");
        let err = read_split_mapping(&path).unwrap_err();
        assert!(err.contains("Line 1"));

        let path = write_temp("reascan_splits_bad_id.txt", "x {A} {B}\n");
        assert!(read_split_mapping(&path).is_err());
    }

    #[test]
    fn test_read_split_mapping_skips_blank_lines() {
        let path = write_temp("reascan_splits_blank.txt", "\n0 {A} {B}\n\n");
        let db = read_split_mapping(&path).unwrap();
        assert_eq!(db.len(), 1);
    }
}
