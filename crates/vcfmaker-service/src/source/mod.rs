//! Contact Source Reader.
//!
//! The main pass reads strict UTF-8 through [`ContactSource`]; a separate
//! count pass ([`count_rows`]) supplies the progress denominator. Preview
//! reads ([`preview_source`]) negotiate the text encoding instead.

mod encoding;
mod preview;
mod reader;

pub use encoding::{PREVIEW_ENCODINGS, TextEncoding};
pub use preview::{TabularPreview, preview_source};
pub use reader::{ContactRows, ContactSource, count_rows, open_tabular_source};
