//! Text encodings tried by preview reads.

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Encodings a preview read may decode the source with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8 without a signature. Text starting with a BOM is
    /// rejected so it falls through to [`TextEncoding::Utf8Bom`].
    Utf8,
    /// UTF-8 with a leading BOM removed when present.
    Utf8Bom,
    /// ISO-8859-1. Every byte maps to the code point of the same value, so
    /// decoding never fails.
    Latin1,
}

/// Order in which preview reads try encodings.
pub const PREVIEW_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Utf8Bom,
    TextEncoding::Latin1,
];

impl TextEncoding {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-sig",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decodes `bytes`, or returns `None` if they are not valid in this
    /// encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 if bytes.starts_with(UTF8_BOM) => None,
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::Utf8Bom => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            Self::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_rejects_invalid_bytes() {
        assert_eq!(TextEncoding::Utf8.decode(b"Jos\xe9"), None);
        assert_eq!(TextEncoding::Utf8.decode("José".as_bytes()), Some("José".to_string()));
    }

    #[test]
    fn utf8_bom_strips_marker() {
        assert_eq!(
            TextEncoding::Utf8Bom.decode(b"\xEF\xBB\xBFname"),
            Some("name".to_string())
        );
        assert_eq!(TextEncoding::Utf8.decode(b"\xEF\xBB\xBFname"), None);
        assert_eq!(TextEncoding::Utf8Bom.decode(b"name"), Some("name".to_string()));
    }

    #[test]
    fn latin1_always_decodes() {
        assert_eq!(TextEncoding::Latin1.decode(b"Jos\xe9"), Some("José".to_string()));
    }

    #[test]
    fn preview_order() {
        assert_eq!(PREVIEW_ENCODINGS[0], TextEncoding::Utf8);
        assert_eq!(PREVIEW_ENCODINGS[2].to_string(), "latin-1");
    }
}
