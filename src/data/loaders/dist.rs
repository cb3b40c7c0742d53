// dist.rs - Paired distance vector loader
//
// One taxon pair per line: `<taxon1> <taxon2> <dist1> ... <distN>`. The
// vector length is fixed by the first line of the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of a distance file: a taxon pair and its per-sample distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistRecord {
    pub taxon1: String,
    pub taxon2: String,
    pub values: Vec<f64>,
}

/// Load a per-segment distance file. A later line whose vector length
/// differs from the first line's is fatal.
pub fn read_dist_file(file_path: &Path) -> Result<Vec<DistRecord>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open distance file {}: {}", file_path.display(), e))?;
    let reader = BufReader::new(file);

    let mut records: Vec<DistRecord> = Vec::new();
    let mut expected_len: Option<usize> = None;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let taxon1 = fields
            .next()
            .ok_or_else(|| format!("Line {}: missing first taxon", line_num + 1))?
            .to_string();
        let taxon2 = fields
            .next()
            .ok_or_else(|| format!("Line {}: missing second taxon", line_num + 1))?
            .to_string();

        let values = fields
            .map(|f| {
                f.parse::<f64>()
                    .map_err(|_| format!("Line {}: invalid distance '{}'", line_num + 1, f))
            })
            .collect::<Result<Vec<f64>, String>>()?;
        if values.is_empty() {
            return Err(format!(
                "Line {}: no distances for pair ({}, {})",
                line_num + 1,
                taxon1,
                taxon2
            ));
        }

        match expected_len {
            None => expected_len = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err(format!(
                    "Line {}: expected {} distances, got {}",
                    line_num + 1,
                    n,
                    values.len()
                ));
            }
            Some(_) => {}
        }

        records.push(DistRecord {
            taxon1,
            taxon2,
            values,
        });
    }
    Ok(records)
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
    fn test_read_dist_file() {
        let path = write_temp(
            "reascan_dist_basic.txt",
            "A B 0.1 0.2 0.3\nA C 0.4 0.5 0.6\n",
        );
        let records = read_dist_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].taxon1, "A");
        assert_eq!(records[0].taxon2, "B");
        assert_eq!(records[0].values, vec![0.1, 0.2, 0.3]);
        assert_eq!(records[1].values.len(), 3);
    }

    #[test]
    fn test_read_dist_file_length_mismatch_is_fatal() {
        let path = write_temp("reascan_dist_mismatch.txt", "A B 0.1 0.2\nA C 0.4\n");
        let err = read_dist_file(&path).unwrap_err();
        assert!(err.contains("expected 2 distances"));
    }

    #[test]
    fn test_read_dist_file_bad_number() {
        let path = write_temp("reascan_dist_bad.txt", "A B 0.1 oops\n");
        assert!(read_dist_file(&path).is_err());
    }

    #[test]
    fn test_read_dist_file_empty() {
        let path = write_temp("reascan_dist_empty.txt", "");
        assert!(read_dist_file(&path).unwrap().is_empty());
    }
}
