// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.left_base.is_none() {
            self.left_base = config.left_base;
        }
        if self.right_base.is_none() {
            self.right_base = config.right_base;
        }
        if self.out_base.is_none() {
            self.out_base = config.out_base;
        }

        // Detection settings (only override defaults, not explicit CLI values)
        if self.threshold == 0.5 && config.threshold.is_some() {
            self.threshold = config.threshold.unwrap();
        }
        if self.evalue == 0.01 && config.evalue.is_some() {
            self.evalue = config.evalue.unwrap();
        }
        if self.min_support == 0 && config.min_support.is_some() {
            self.min_support = config.min_support.unwrap();
        }
        if self.mode == "all" && config.mode.is_some() {
            self.mode = config.mode.unwrap();
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (config can only turn them on)
        if !self.test_all_candidates {
            self.test_all_candidates = config.test_all_candidates.unwrap_or(false);
        }
        if !self.no_dist {
            self.no_dist = config.no_dist.unwrap_or(false);
        }
        if !self.single {
            self.single = config.single.unwrap_or(false);
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn load_with_config(self) -> Result<Self, String> {
        match &self.config {
            Some(path) => {
                let config = Config::from_file(path)?;
                Ok(self.merge_with_config(config))
            }
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            left_base: None,
            right_base: None,
            out_base: None,
            threshold: 0.5,
            evalue: 0.01,
            min_support: 0,
            mode: "all".to_string(),
            test_all_candidates: false,
            no_dist: false,
            single: false,
            threads: None,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_config_fills_unset_options() {
        let mut config = Config::new();
        config.left_base = Some("seg1/HA".to_string());
        config.threshold = Some(0.8);
        config.single = Some(true);

        let args = default_args().merge_with_config(config);
        assert_eq!(args.left_base.as_deref(), Some("seg1/HA"));
        assert_eq!(args.threshold, 0.8);
        assert!(args.single);
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let mut args = default_args();
        args.left_base = Some("cli/base".to_string());
        args.mode = "edges".to_string();

        let mut config = Config::new();
        config.left_base = Some("cfg/base".to_string());
        config.mode = Some("non-star".to_string());

        let merged = args.merge_with_config(config);
        assert_eq!(merged.left_base.as_deref(), Some("cli/base"));
        assert_eq!(merged.mode, "edges");
    }

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.mode.as_deref(), Some("all"));
        assert_eq!(config.evalue, Some(0.01));
    }
}
