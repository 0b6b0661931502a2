//! CSV batch encoding.
//!
//! Streams an input CSV one row at a time, encodes each row's address, and writes
//! the row to the output CSV with the normalized address and its Placekey. A row
//! that fails to encode is written through unchanged with an empty Placekey.

use std::path::PathBuf;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Writer};
use log::{error, info};

use crate::config::PLACEKEY_COLUMN;
use crate::error_handling::{BatchError, ProcessingStats};
use crate::normalizer::AddressNormalizer;

/// Input/output files and the columns to read.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub address_column: String,
    pub location_column: String,
}

/// Results of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Rows read from the input (and written to the output)
    pub total_rows: usize,
    /// Rows that received a Placekey
    pub encoded: usize,
    /// Rows written through without a Placekey
    pub failed: usize,
    pub elapsed_seconds: f64,
    pub output: PathBuf,
}

/// Column order of the output file.
///
/// The header starts with the location column, the address column and
/// `placekey`, followed by every other input column in input order.
struct OutputLayout {
    address_idx: usize,
    location_idx: usize,
    /// Input indices of the remaining columns
    extra: Vec<usize>,
    header: Vec<String>,
}

impl OutputLayout {
    fn new(headers: &StringRecord, address_column: &str, location_column: &str) -> Result<Self, BatchError> {
        let address_idx = column_index(headers, address_column)?;
        let location_idx = column_index(headers, location_column)?;

        let extra: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(i, name)| {
                *i != address_idx && *i != location_idx && *name != PLACEKEY_COLUMN
            })
            .map(|(i, _)| i)
            .collect();

        let mut header = vec![
            location_column.to_string(),
            address_column.to_string(),
            PLACEKEY_COLUMN.to_string(),
        ];
        header.extend(extra.iter().map(|&i| headers[i].to_string()));

        Ok(Self {
            address_idx,
            location_idx,
            extra,
            header,
        })
    }

    fn row<'a>(&self, record: &'a StringRecord, address: &'a str, placekey: &'a str) -> Vec<&'a str> {
        let mut row = vec![
            record.get(self.location_idx).unwrap_or(""),
            address,
            placekey,
        ];
        row.extend(self.extra.iter().map(|&i| record.get(i).unwrap_or("")));
        row
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, BatchError> {
    headers
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| BatchError::MissingColumn(column.to_string()))
}

/// Encodes every row of `options.input` into `options.output`.
///
/// Each row is written and flushed before the next one is read, so an aborted run
/// leaves every finished row on disk.
///
/// # Errors
///
/// Per-row encoding failures are logged and counted, never returned. This function
/// fails only if:
/// - the input cannot be opened or the output cannot be created
/// - either configured column is missing from the input header
/// - reading or writing a CSV record fails
pub async fn process_file(
    normalizer: &AddressNormalizer,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    let start_time = Instant::now();

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(&options.input)
        .map_err(|source| BatchError::OpenInput {
            path: options.input.clone(),
            source,
        })?;
    let headers = reader.headers()?.clone();
    let layout = OutputLayout::new(&headers, &options.address_column, &options.location_column)?;

    let mut writer = Writer::from_path(&options.output).map_err(|source| BatchError::CreateOutput {
        path: options.output.clone(),
        source,
    })?;
    writer.write_record(&layout.header)?;
    writer.flush()?;

    let stats = ProcessingStats::new();
    let mut total_rows = 0usize;
    let mut encoded = 0usize;

    for record in reader.records() {
        let record = record?;
        total_rows += 1;

        let address = record.get(layout.address_idx).unwrap_or("");
        let location = record.get(layout.location_idx).unwrap_or("");
        info!("Row {}: ({:?}, {:?})", total_rows, address, location);

        let hint = Some(location).filter(|l| !l.trim().is_empty());
        let (clean_address, placekey) = match normalizer.encode(address, hint, false).await {
            Ok(result) => {
                encoded += 1;
                (result.location.formatted_address().to_string(), result.placekey)
            }
            Err(e) => {
                stats.increment_failure(e.category());
                error!(
                    "Error occurred fetching placekey for {} | {} | {}",
                    address, location, e
                );
                (address.to_string(), String::new())
            }
        };

        writer.write_record(layout.row(&record, &clean_address, &placekey))?;
        writer.flush()?;
    }

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    let failed = total_rows - encoded;
    info!(
        "Encoded {} of {} rows ({} failed) in {:.1}s",
        encoded, total_rows, failed, elapsed_seconds
    );
    stats.log_summary();

    Ok(BatchReport {
        total_rows,
        encoded,
        failed,
        elapsed_seconds,
        output: options.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_layout_header_leads_with_fixed_columns() {
        let layout =
            OutputLayout::new(&headers(&["Id", "Address", "City", "Name"]), "Address", "Name")
                .unwrap();
        assert_eq!(layout.header, vec!["Name", "Address", "placekey", "Id", "City"]);
    }

    #[test]
    fn test_layout_row_follows_header() {
        let layout =
            OutputLayout::new(&headers(&["Id", "Address", "City", "Name"]), "Address", "Name")
                .unwrap();
        let record = StringRecord::from(vec!["7", "1153 valley rd", "Stirling", "ShopRite"]);
        assert_eq!(
            layout.row(&record, "1153 Valley Rd, Long Hill", "zzw-223@628-hy8-4qf"),
            vec![
                "ShopRite",
                "1153 Valley Rd, Long Hill",
                "zzw-223@628-hy8-4qf",
                "7",
                "Stirling"
            ]
        );
    }

    #[test]
    fn test_layout_drops_stale_placekey_column() {
        let layout =
            OutputLayout::new(&headers(&["Name", "Address", "placekey"]), "Address", "Name")
                .unwrap();
        assert_eq!(layout.header, vec!["Name", "Address", "placekey"]);
    }

    #[test]
    fn test_layout_short_row_pads_with_empty_values() {
        let layout =
            OutputLayout::new(&headers(&["Name", "Address", "Notes"]), "Address", "Name").unwrap();
        let record = StringRecord::from(vec!["ShopRite", "1153 Valley Rd"]);
        assert_eq!(
            layout.row(&record, "1153 Valley Rd", ""),
            vec!["ShopRite", "1153 Valley Rd", "", ""]
        );
    }

    #[test]
    fn test_missing_column() {
        let err = OutputLayout::new(&headers(&["Name", "Street"]), "Address", "Name")
            .err()
            .unwrap();
        assert!(matches!(err, BatchError::MissingColumn(ref c) if c == "Address"));
    }
}
