//! vCard implementation (RFC 2426, version 3.0 output only).
//!
//! ## Usage
//!
//! ```rust
//! use vcfmaker_core::types::PhoneEntry;
//! use vcfmaker_rfc::rfc::vcard::format_vcard;
//!
//! let card = format_vcard("Jane Doe", &[PhoneEntry::new("+1 555 0100", "home")]);
//! assert!(card.contains("FN:Jane Doe\n"));
//! assert!(card.contains("TEL;TYPE=HOME:+15550100\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`NameParts`, `VCardRecord`)
//! - [`build`] - Value escaping, phone sanitization and record formatting

pub mod build;
pub mod core;


// Re-export commonly used types
pub use build::{escape_vcard_value, format_vcard, sanitize_phone};
pub use core::{NameParts, VCardRecord, decompose_name};
