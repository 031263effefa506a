//! vCard serialization.
//!
//! ## Features
//!
//! - Text escaping for vCard 3.0 value fields (backslash, comma, semicolon)
//! - Line breaks inside values collapsed to spaces
//! - Phone numbers reduced to digits and `+`
//! - One `TEL` line per usable phone entry, typed by its label

mod escape;
mod serializer;

pub use escape::{escape_vcard_value, sanitize_phone};
pub use serializer::{build_record, format_vcard, serialize_record};
