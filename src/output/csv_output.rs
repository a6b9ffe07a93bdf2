//! CSV output of crawl records
//!
//! One row per record, in crawl order. Absent fields are written as empty
//! cells.

use crate::model::RestaurantRecord;
use crate::output::traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row, in the order of the `CsvRow` fields
const COLUMNS: [&str; 13] = [
    "Name",
    "Rating",
    "City",
    "Price Range",
    "Cuisine",
    "Description",
    "Address",
    "Latitude",
    "Longitude",
    "Website URL",
    "Telephone",
    "Reservation URL",
    "Michelin URL",
];

/// Column layout of the CSV file
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Rating")]
    rating: &'static str,
    #[serde(rename = "City")]
    city: Option<&'a str>,
    #[serde(rename = "Price Range")]
    price_range: Option<&'a str>,
    #[serde(rename = "Cuisine")]
    cuisine: Option<&'a str>,
    #[serde(rename = "Description")]
    description: Option<&'a str>,
    #[serde(rename = "Address")]
    address: Option<&'a str>,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Website URL")]
    website_url: Option<&'a str>,
    #[serde(rename = "Telephone")]
    telephone: Option<&'a str>,
    #[serde(rename = "Reservation URL")]
    reservation_url: Option<&'a str>,
    #[serde(rename = "Michelin URL")]
    detail_url: Option<&'a str>,
}

impl<'a> From<&'a RestaurantRecord> for CsvRow<'a> {
    fn from(record: &'a RestaurantRecord) -> Self {
        Self {
            name: &record.name,
            rating: record.rating.label(),
            city: record.city.as_deref(),
            price_range: record.price_range.as_deref(),
            cuisine: record.cuisine.as_deref(),
            description: record.description.as_deref(),
            address: record.address.as_deref(),
            latitude: record.coordinates.map(|c| c.latitude),
            longitude: record.coordinates.map(|c| c.longitude),
            website_url: record.website_url.as_deref(),
            telephone: record.telephone.as_deref(),
            reservation_url: record.reservation_url.as_deref(),
            detail_url: record.detail_url.as_ref().map(|url| url.as_str()),
        }
    }
}

/// Writes records as CSV to any writer
///
/// The header row is always written, even for a crawl without records.
pub struct CsvOutputHandler<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows_written: usize,
}

impl CsvOutputHandler<File> {
    /// Creates (or truncates) a CSV file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvOutputHandler<W> {
    /// Wraps an arbitrary writer
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            header_written: false,
            rows_written: 0,
        }
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn write_header(&mut self) -> OutputResult<()> {
        if !self.header_written {
            self.writer.write_record(COLUMNS)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.write_header()?;
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Write(e.to_string()))
    }
}

impl<W: Write> OutputHandler for CsvOutputHandler<W> {
    fn write_records(&mut self, records: &[RestaurantRecord]) -> OutputResult<()> {
        self.write_header()?;
        for record in records {
            self.writer.serialize(CsvRow::from(record))?;
            self.rows_written += 1;
        }
        Ok(())
    }

    fn finalize(&mut self, summary: &CrawlSummary) -> OutputResult<()> {
        self.write_header()?;
        self.writer.flush()?;
        tracing::debug!(
            "Wrote {} CSV rows for crawl of {}",
            self.rows_written,
            summary.start_url
        );
        Ok(())
    }
}
