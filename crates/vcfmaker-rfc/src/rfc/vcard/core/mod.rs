//! Core vCard types.

mod record;
mod structured;

pub use record::VCardRecord;
pub use structured::{NameParts, decompose_name};
