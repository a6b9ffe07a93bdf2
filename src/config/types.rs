use serde::Deserialize;

/// Browser identity sent with every request
///
/// The guide serves degraded pages to clients that do not look like a
/// desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Accept-Language header sent with every request
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Pause between listing pages in milliseconds
pub const DEFAULT_POLITENESS_DELAY_MS: u64 = 2000;

/// Main configuration structure for Guide-Crawler
///
/// Every section is optional in the TOML file; missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub client: ClientConfig,
    pub exclusions: ExclusionConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// First listing page to crawl
    #[serde(rename = "start-url")]
    pub start_url: Option<String>,

    /// Delay between successive listing pages (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Whether to visit each restaurant's detail page
    #[serde(rename = "fetch-details")]
    pub fetch_details: bool,

    /// Maximum number of detail pages fetched at once
    #[serde(rename = "detail-concurrency")]
    pub detail_concurrency: u32,

    /// Delay before each detail-page fetch (milliseconds)
    #[serde(rename = "detail-delay-ms")]
    pub detail_delay_ms: u64,

    /// Stop after this many listing pages
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Drop cards whose name was already seen earlier in the run
    #[serde(rename = "dedupe-names")]
    pub dedupe_names: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: None,
            politeness_delay_ms: DEFAULT_POLITENESS_DELAY_MS,
            fetch_details: true,
            detail_concurrency: 1,
            detail_delay_ms: 0,
            max_pages: None,
            dedupe_names: true,
        }
    }
}

/// HTTP client identity configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Names of listing entries to skip
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Exact restaurant names (surrounding whitespace ignored)
    pub names: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file of records
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the markdown run summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,

    /// Number of records shown in the summary preview table
    #[serde(rename = "preview-rows")]
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "restaurants.csv".to_string(),
            summary_path: None,
            preview_rows: 10,
        }
    }
}
