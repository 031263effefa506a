//! Shared building blocks for the CSV to vCard converter.
//!
//! Holds configuration loading, the core error type, constants shared across
//! crates, and the small domain types that flow between the reader, the
//! formatter, and the streaming converter.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
