//! Guide-Crawler: a paginated restaurant guide harvester
//!
//! This crate walks a multi-page restaurant listing, extracts one typed record
//! per listing card, optionally enriches each record from its detail page, and
//! follows the "next page" link until the listing runs out.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Guide-Crawler operations
#[derive(Debug, Error)]
pub enum GuideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid crawl transition: {0}")]
    InvalidTransition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Field extraction errors
///
/// These never abort a crawl. Callers log them and record the affected
/// fields as absent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("Footer text does not split into price and cuisine: {0:?}")]
    MalformedFooter(String),

    #[error("Map coordinates could not be parsed: {0:?}")]
    CoordinateParse(String),
}

/// Result type alias for Guide-Crawler operations
pub type Result<T> = std::result::Result<T, GuideError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for field extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome};
pub use model::{Coordinates, DetailInfo, ListingCard, RatingTier, RestaurantRecord};
pub use state::{CrawlState, TerminationReason};
