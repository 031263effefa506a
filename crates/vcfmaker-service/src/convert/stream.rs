use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use vcfmaker_core::constants::DEFAULT_PHONE_LABEL;
use vcfmaker_core::error::{CoreError, CoreResult};
use vcfmaker_core::types::{ContactRow, PhoneEntry};
use vcfmaker_rfc::rfc::vcard::build::{build_record, serialize_record};

use super::cancel::CancelToken;
use super::progress::ProgressSink;
use crate::error::{ServiceError, ServiceResult};
use crate::source::{ContactRows, ContactSource, count_rows};

/// Column mapping and name decoration for one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub name_field: String,
    /// Phone columns, read in this order for every row.
    pub phone_fields: Vec<String>,
    /// Labels paired by position with `phone_fields`; missing entries are
    /// `CELL`.
    pub phone_labels: Option<Vec<String>>,
    pub prefix: String,
    pub postfix: String,
}

impl ConvertOptions {
    #[must_use]
    pub fn new(name_field: impl Into<String>, phone_fields: Vec<String>) -> Self {
        Self {
            name_field: name_field.into(),
            phone_fields,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.phone_labels = Some(labels);
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    /// ## Summary
    /// Checks that the options can produce records at all.
    ///
    /// ## Errors
    /// Returns `ValidationError` when no phone column is selected.
    pub fn validate(&self) -> CoreResult<()> {
        if self.phone_fields.is_empty() {
            return Err(CoreError::ValidationError(
                "no phone columns selected".to_string(),
            ));
        }
        Ok(())
    }

    /// Label for the phone column at `index`.
    #[must_use]
    pub fn label_for(&self, index: usize) -> &str {
        self.phone_labels
            .as_ref()
            .and_then(|labels| labels.get(index))
            .map_or(DEFAULT_PHONE_LABEL, String::as_str)
    }

    /// Joins the trimmed prefix, the row's name, and the trimmed postfix with
    /// single spaces, leaving out any that are empty.
    #[must_use]
    pub fn full_name(&self, name: &str) -> String {
        [self.prefix.trim(), name.trim(), self.postfix.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Non-empty phone values of `row`, in column order, with their labels.
    #[must_use]
    pub fn phones_for(&self, row: &ContactRow) -> Vec<PhoneEntry> {
        self.phone_fields
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| {
                let number = field_value(row, field);
                (!number.is_empty()).then(|| PhoneEntry::new(number, self.label_for(idx)))
            })
            .collect()
    }
}

/// Counters for one streaming pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamState {
    pub rows_total: usize,
    pub rows_processed: usize,
    pub records_written: usize,
    pub cancelled: bool,
}

/// ## Summary
/// Converts the CSV at `input` into vCards written to `output`.
///
/// Rows are counted in a first pass for the progress denominator, then
/// streamed. The output file is truncated and written incrementally; on
/// cancellation or failure whatever was already written stays in place.
/// Returns the number of vCards written.
///
/// ## Errors
/// - `CoreError` if `options` fail [`ConvertOptions::validate`]
/// - `NotFound` if `input` does not exist
/// - `ReadError` if the input cannot be opened, parsed, or decoded as UTF-8
/// - `WriteError` if the output cannot be created or written
#[tracing::instrument(
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn stream_convert(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    progress: Option<&mut dyn ProgressSink>,
    cancel: &CancelToken,
) -> ServiceResult<usize> {
    options.validate()?;
    let rows_total = count_rows(input)?;
    let source = ContactSource::open(input)?;

    let file = File::create(output)
        .map_err(|e| ServiceError::write(output.display().to_string(), e))?;
    let mut writer = BufWriter::new(file);

    tracing::info!(rows_total, "Streaming contacts");

    let state = stream_rows(
        source.into_rows(),
        &mut writer,
        rows_total,
        options,
        progress,
        cancel,
    )?;

    writer
        .flush()
        .map_err(|e| ServiceError::write(output.display().to_string(), e))?;

    if state.cancelled {
        tracing::info!(
            rows_processed = state.rows_processed,
            records_written = state.records_written,
            "Conversion cancelled"
        );
    } else {
        tracing::info!(records_written = state.records_written, "Conversion finished");
    }

    Ok(state.records_written)
}

/// ## Summary
/// Runs the per-row loop over already-opened rows, writing each record to
/// `sink` as soon as it is formatted.
///
/// Rows without any phone value are skipped but still reported to
/// `progress`. The cancel token is checked before each row.
///
/// ## Errors
/// Returns `ReadError` for a row that fails to parse and `WriteError` if
/// `sink` rejects a record.
pub fn stream_rows<R: Read, W: Write>(
    rows: ContactRows<R>,
    sink: &mut W,
    rows_total: usize,
    options: &ConvertOptions,
    mut progress: Option<&mut dyn ProgressSink>,
    cancel: &CancelToken,
) -> ServiceResult<StreamState> {
    let mut state = StreamState {
        rows_total,
        ..StreamState::default()
    };
    let mut buffer = String::new();

    for row in rows {
        if cancel.is_cancelled() {
            state.cancelled = true;
            break;
        }

        let row = row?;
        state.rows_processed += 1;

        let phones = options.phones_for(&row);
        if phones.is_empty() {
            tracing::trace!(row = state.rows_processed, "Row has no phone value");
        } else {
            let full_name = options.full_name(field_value(&row, &options.name_field));

            buffer.clear();
            serialize_record(&build_record(&full_name, &phones), &mut buffer);
            sink.write_all(buffer.as_bytes())
                .map_err(|e| ServiceError::write(format!("record {}", state.rows_processed), e))?;

            state.records_written += 1;
        }

        if let Some(progress) = progress.as_deref_mut() {
            progress.report(state.rows_processed, state.rows_total);
        }
    }

    Ok(state)
}

fn field_value<'a>(row: &'a ContactRow, field: &str) -> &'a str {
    row.get(field).map_or("", |v| v.trim())
}
