//! An assembled vCard as an ordered list of content lines.

use vcfmaker_core::constants::{VCARD_BEGIN_LINE, VCARD_END_LINE, VCARD_VERSION_LINE};

/// One vCard, `BEGIN:VCARD` through `END:VCARD`, in output order.
///
/// Lines are stored unterminated; [`crate::rfc::vcard::build::serialize_record`]
/// adds the line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardRecord {
    lines: Vec<String>,
}

impl VCardRecord {
    /// Starts a record with `BEGIN` and `VERSION`.
    #[must_use]
    pub fn begin() -> Self {
        Self {
            lines: vec![VCARD_BEGIN_LINE.to_string(), VCARD_VERSION_LINE.to_string()],
        }
    }

    /// Appends a `NAME:value` line. The value must already be escaped.
    pub fn push_property(&mut self, name: &str, value: &str) {
        self.lines.push(format!("{name}:{value}"));
    }

    /// Appends the closing `END:VCARD` line.
    #[must_use]
    pub fn end(mut self) -> Self {
        self.lines.push(VCARD_END_LINE.to_string());
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of `TEL` lines in the record.
    #[must_use]
    pub fn phone_count(&self) -> usize {
        self.lines.iter().filter(|l| l.starts_with("TEL")).count()
    }
}
