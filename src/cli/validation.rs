// validation.rs - Input validation utilities

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::args::Args;
use crate::core::mica::EnumerationMode;

/// Input file set of one segment.
pub struct SegmentFiles {
    pub splits: PathBuf,
    pub trees: PathBuf,
    pub dist: PathBuf,
}

impl SegmentFiles {
    fn from_base(base: &str) -> Self {
        Self {
            splits: PathBuf::from(format!("{}.splits", base)),
            trees: PathBuf::from(format!("{}.trees", base)),
            dist: PathBuf::from(format!("{}.dist", base)),
        }
    }
}

pub struct ValidationResult {
    pub left: SegmentFiles,
    pub right: SegmentFiles,
    pub out_base: String,
    pub mode: EnumerationMode,
    /// Per-side score bound, already square-rooted.
    pub side_threshold: f64,
}

fn require_file(path: &Path, what: &str) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("{} file not found: {}", what, path.display()));
    }
    Ok(())
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let left_base = args
        .left_base
        .as_deref()
        .ok_or("Missing required argument --left-base")?;
    let right_base = args
        .right_base
        .as_deref()
        .ok_or("Missing required argument --right-base")?;
    let out_base = args
        .out_base
        .as_deref()
        .ok_or("Missing required argument --out-base")?;

    if !(args.threshold > 0.0 && args.threshold < 1.0) {
        return Err(format!(
            "--threshold must be in (0, 1), got {}",
            args.threshold
        ));
    }
    if args.evalue <= 0.0 {
        return Err(format!("--evalue must be > 0, got {}", args.evalue));
    }

    let mode = EnumerationMode::from_str(&args.mode)?;

    let left = SegmentFiles::from_base(left_base);
    let right = SegmentFiles::from_base(right_base);
    for (files, side) in [(&left, "First segment"), (&right, "Second segment")] {
        require_file(&files.splits, &format!("{} split", side))?;
        require_file(&files.trees, &format!("{} tree-presence", side))?;
        if !args.no_dist {
            require_file(&files.dist, &format!("{} distance", side))?;
        }
    }

    Ok(ValidationResult {
        left,
        right,
        out_base: out_base.to_string(),
        mode,
        side_threshold: args.threshold.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn args_with_bases(left: &str, right: &str) -> Args {
        Args {
            left_base: Some(left.to_string()),
            right_base: Some(right.to_string()),
            out_base: Some("out/test".to_string()),
            threshold: 0.5,
            evalue: 0.01,
            min_support: 0,
            mode: "all".to_string(),
            test_all_candidates: false,
            no_dist: true,
            single: false,
            threads: None,
            config: None,
            generate_config: false,
        }
    }

    fn touch_segment(base: &std::path::Path) {
        File::create(base.with_extension("splits")).unwrap();
        File::create(base.with_extension("trees")).unwrap();
    }

    fn valid_args(tag: &str) -> Args {
        let dir = std::env::temp_dir();
        let left = dir.join(format!("reascan_val_{}_l", tag));
        let right = dir.join(format!("reascan_val_{}_r", tag));
        touch_segment(&left);
        touch_segment(&right);
        args_with_bases(&left.to_string_lossy(), &right.to_string_lossy())
    }

    #[test]
    fn test_validates_and_square_roots_threshold() {
        let mut args = valid_args("ok");
        args.threshold = 0.49;
        let result = validate_args(&args).unwrap();
        assert!((result.side_threshold - 0.7).abs() < 1e-12);
        assert_eq!(result.mode, EnumerationMode::All);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        for bad in [0.0, 1.0, -0.5, 1.5] {
            let mut args = valid_args("range");
            args.threshold = bad;
            assert!(validate_args(&args).is_err());
        }
    }

    #[test]
    fn test_rejects_bad_evalue_and_mode() {
        let mut args = valid_args("evalue");
        args.evalue = 0.0;
        assert!(validate_args(&args).is_err());

        let mut args = valid_args("mode");
        args.mode = "stars".to_string();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_rejects_missing_inputs() {
        let args = args_with_bases("/nonexistent/a", "/nonexistent/b");
        assert!(validate_args(&args).is_err());

        let mut args = valid_args("dist");
        // distance files were never created, so requiring them must fail
        args.no_dist = false;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_missing_base_arguments() {
        let mut args = valid_args("nobase");
        args.out_base = None;
        assert!(validate_args(&args).is_err());
    }
}
