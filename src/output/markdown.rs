//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl run:
//! run metadata, the termination reason, rating statistics and a preview
//! table of the first records.

use crate::model::{RatingTier, RestaurantRecord};
use crate::output::traits::{CrawlSummary, OutputHandler, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a markdown summary with a preview of the first records
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `preview` - Records shown in the preview table
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    summary: &CrawlSummary,
    preview: &[RestaurantRecord],
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary, preview);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary, preview: &[RestaurantRecord]) -> String {
    let mut md = String::new();

    md.push_str("# Guide-Crawler Run Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", summary.start_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        summary.duration_seconds
    ));
    let status = if summary.is_success() {
        "completed"
    } else {
        "failed"
    };
    md.push_str(&format!(
        "- **Status**: {} ({}: {})\n",
        status,
        summary.reason,
        summary.reason.description()
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Traversal
    md.push_str("## Traversal\n\n");
    md.push_str(&format!("- **Listing Pages**: {}\n", summary.pages_visited));
    md.push_str(&format!("- **Records**: {}\n", summary.record_count()));
    md.push_str(&format!(
        "- **Records per Page**: {:.1}\n",
        summary.records_per_page()
    ));
    md.push_str(&format!(
        "- **Excluded Cards**: {}\n",
        summary.excluded_cards
    ));
    md.push_str(&format!(
        "- **Duplicate Cards**: {}\n\n",
        summary.duplicate_cards
    ));

    // Rating breakdown, highest tier first
    let stats = &summary.statistics;
    md.push_str("## Rating Breakdown\n\n");
    md.push_str("| Rating | Count |\n");
    md.push_str("|--------|-------|\n");
    for tier in RatingTier::ALL.iter().rev() {
        md.push_str(&format!("| {} | {} |\n", tier, stats.count(*tier)));
    }
    md.push('\n');

    // Enrichment
    md.push_str("## Enrichment\n\n");
    md.push_str(&format!(
        "- **With Detail Fields**: {} ({:.1}%)\n",
        stats.with_details,
        stats.detail_coverage()
    ));
    md.push_str(&format!(
        "- **With Coordinates**: {}\n",
        stats.with_coordinates
    ));
    md.push_str(&format!("- **With Website**: {}\n", stats.with_website));
    md.push_str(&format!(
        "- **Missing Price/Cuisine**: {}\n\n",
        stats.missing_price
    ));

    if !preview.is_empty() {
        md.push_str(&format!("## First {} Records\n\n", preview.len()));
        md.push_str(&format_preview_table(preview));
        md.push('\n');
    }

    md
}

/// Formats records as a markdown table
pub fn format_preview_table(records: &[RestaurantRecord]) -> String {
    let mut md = String::new();
    md.push_str("| Name | Rating | City | Price Range | Cuisine |\n");
    md.push_str("|------|--------|------|-------------|---------|\n");

    for record in records {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            cell(&record.name),
            record.rating,
            cell(record.city.as_deref().unwrap_or("")),
            cell(record.price_range.as_deref().unwrap_or("")),
            cell(record.cuisine.as_deref().unwrap_or(""))
        ));
    }

    md
}

/// Escapes a table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Output handler writing the markdown summary on finalize
pub struct MarkdownOutputHandler {
    path: PathBuf,
    preview_rows: usize,
    preview: Vec<RestaurantRecord>,
}

impl MarkdownOutputHandler {
    /// Creates a handler writing to `path` with up to `preview_rows` records
    pub fn new(path: impl Into<PathBuf>, preview_rows: usize) -> Self {
        Self {
            path: path.into(),
            preview_rows,
            preview: Vec::new(),
        }
    }
}

impl OutputHandler for MarkdownOutputHandler {
    fn write_records(&mut self, records: &[RestaurantRecord]) -> OutputResult<()> {
        let remaining = self.preview_rows.saturating_sub(self.preview.len());
        self.preview.extend(records.iter().take(remaining).cloned());
        Ok(())
    }

    fn finalize(&mut self, summary: &CrawlSummary) -> OutputResult<()> {
        generate_markdown_summary(summary, &self.preview, &self.path)
    }
}
