//! Preview reads with encoding negotiation.

use std::path::Path;

use vcfmaker_core::types::ContactRow;

use super::encoding::{PREVIEW_ENCODINGS, TextEncoding};
use super::reader::ContactSource;
use crate::error::{ServiceError, ServiceResult};

/// Header and leading rows of a source, for showing before a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularPreview {
    pub headers: Vec<String>,
    pub rows: Vec<ContactRow>,
    /// Encoding that produced the header, `None` when every attempt failed.
    pub encoding: Option<TextEncoding>,
}

impl TabularPreview {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// ## Summary
/// Reads the header and up to `limit` rows, trying each encoding in
/// [`PREVIEW_ENCODINGS`] until one yields a non-empty header row.
///
/// When no encoding works the preview is empty rather than an error.
///
/// ## Errors
/// Returns `NotFound` if the path does not exist, or `ReadError` if the
/// file cannot be read at all.
pub fn preview_source(path: &Path, limit: usize) -> ServiceResult<TabularPreview> {
    if !path.exists() {
        return Err(ServiceError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ServiceError::read(path.display().to_string(), e))?;

    for encoding in PREVIEW_ENCODINGS {
        if let Some(preview) = preview_with(&bytes, encoding, limit) {
            tracing::debug!(
                path = %path.display(),
                %encoding,
                columns = preview.headers.len(),
                "Preview decoded"
            );
            return Ok(preview);
        }
        tracing::trace!(path = %path.display(), %encoding, "Preview encoding rejected");
    }

    tracing::warn!(path = %path.display(), "No encoding produced a header row");
    Ok(TabularPreview::default())
}

fn preview_with(bytes: &[u8], encoding: TextEncoding, limit: usize) -> Option<TabularPreview> {
    let text = encoding.decode(bytes)?;
    let source = ContactSource::from_reader(text.as_bytes()).ok()?;
    if source.columns().iter().all(String::is_empty) {
        return None;
    }

    let headers = source.columns().to_vec();
    let rows = source
        .into_rows()
        .take(limit)
        .map_while(Result::ok)
        .collect();

    Some(TabularPreview {
        headers,
        rows,
        encoding: Some(encoding),
    })
}
