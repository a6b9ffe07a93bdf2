//! Configuration module for Guide-Crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a crawl can run from the
//! command line alone.
//!
//! # Example
//!
//! ```no_run
//! use guide_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("guide.toml")).unwrap();
//! println!("Politeness delay: {}ms", config.crawler.politeness_delay_ms);
//! ```

mod exclusions;
mod parser;
mod types;
mod validation;

// Re-export types
pub use exclusions::ExclusionSet;
pub use types::{
    ClientConfig, Config, CrawlerConfig, ExclusionConfig, OutputConfig, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_POLITENESS_DELAY_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

impl Config {
    /// Builds the exclusion set from the configured names
    pub fn exclusion_set(&self) -> ExclusionSet {
        self.exclusions.names.iter().collect()
    }
}
