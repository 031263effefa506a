//! Row-oriented CSV access with a header row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use vcfmaker_core::types::ContactRow;

use crate::error::{ServiceError, ServiceResult};

const UTF8_BOM: char = '\u{feff}';

/// An opened CSV source: its column names plus the reader positioned at the
/// first data row.
pub struct ContactSource<R: Read> {
    columns: Vec<String>,
    reader: csv::Reader<R>,
}

impl<R: Read> std::fmt::Debug for ContactSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactSource")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl ContactSource<BufReader<File>> {
    /// ## Summary
    /// Opens a CSV file for the main streaming pass.
    ///
    /// ## Errors
    /// Returns `NotFound` if the path does not exist, or `ReadError` if the
    /// file cannot be opened or its header row is not valid UTF-8 CSV.
    pub fn open(path: &Path) -> ServiceResult<Self> {
        let file = open_existing(path)?;
        let mut reader = csv_reader(BufReader::new(file));
        let columns = header_columns(&mut reader)
            .map_err(|e| ServiceError::read(path.display().to_string(), e))?;

        Ok(Self { columns, reader })
    }
}

impl<R: Read> ContactSource<R> {
    /// ## Summary
    /// Wraps any byte reader holding CSV text with a header row.
    ///
    /// ## Errors
    /// Returns `ReadError` if the header row cannot be read or decoded.
    pub fn from_reader(reader: R) -> ServiceResult<Self> {
        let mut reader = csv_reader(reader);
        let columns = header_columns(&mut reader)
            .map_err(|e| ServiceError::read("invalid header row", e))?;

        Ok(Self { columns, reader })
    }

    /// Column names in header order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Consumes the source into a lazy sequence of rows.
    #[must_use]
    pub fn into_rows(self) -> ContactRows<R> {
        ContactRows {
            columns: self.columns,
            records: self.reader.into_records(),
            line: 1,
        }
    }
}

/// Lazy sequence of [`ContactRow`]s in source order.
///
/// Each item is produced from one CSV record and owns nothing after it is
/// yielded.
pub struct ContactRows<R: Read> {
    columns: Vec<String>,
    records: StringRecordsIntoIter<R>,
    line: u64,
}

impl<R: Read> std::fmt::Debug for ContactRows<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRows")
            .field("columns", &self.columns)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

impl<R: Read> Iterator for ContactRows<R> {
    type Item = ServiceResult<ContactRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.line += 1;
        Some(
            record
                .map(|r| row_from_record(&self.columns, &r))
                .map_err(|e| ServiceError::read(format!("record {}", self.line), e)),
        )
    }
}

/// ## Summary
/// Opens a CSV file and returns it ready for streaming.
///
/// ## Errors
/// See [`ContactSource::open`].
pub fn open_tabular_source(path: &Path) -> ServiceResult<ContactSource<BufReader<File>>> {
    ContactSource::open(path)
}

/// ## Summary
/// Counts data rows (header excluded) with a full pass over the file.
///
/// Runs separately from the streaming pass so progress has a denominator
/// without buffering rows.
///
/// ## Errors
/// Returns `NotFound` if the path does not exist, or `ReadError` if any
/// record fails to parse or decode.
pub fn count_rows(path: &Path) -> ServiceResult<usize> {
    let file = open_existing(path)?;
    let mut reader = csv_reader(BufReader::new(file));
    let mut record = StringRecord::new();
    let mut count = 0;

    // Header first, so an undecodable header fails here rather than later
    reader
        .headers()
        .map_err(|e| ServiceError::read(path.display().to_string(), e))?;

    while reader
        .read_record(&mut record)
        .map_err(|e| ServiceError::read(path.display().to_string(), e))?
    {
        count += 1;
    }

    tracing::debug!(path = %path.display(), rows = count, "Counted data rows");
    Ok(count)
}

fn open_existing(path: &Path) -> ServiceResult<File> {
    if !path.exists() {
        return Err(ServiceError::NotFound(path.display().to_string()));
    }

    File::open(path).map_err(|e| ServiceError::read(path.display().to_string(), e))
}

/// Header names, with a leading BOM removed from the first one.
fn header_columns<R: Read>(reader: &mut csv::Reader<R>) -> csv::Result<Vec<String>> {
    Ok(reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect())
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Pairs a record with the header. Short records leave trailing columns
/// absent; surplus fields are dropped. A repeated column name keeps the
/// rightmost value.
fn row_from_record(columns: &[String], record: &StringRecord) -> ContactRow {
    columns
        .iter()
        .zip(record.iter())
        .map(|(column, value)| (column.clone(), value.to_string()))
        .collect()
}
