//! Conversion pipeline: reading contact rows, choosing columns, and streaming
//! vCards to disk.

pub mod convert;
pub mod error;
pub mod mapping;
pub mod resolve;
pub mod source;
