//! Field Resolver: maps requested column names onto the columns a source
//! actually has.
//!
//! Resolution order for one field:
//!
//! 1. the requested name, if it is a column
//! 2. the injected [`ResolutionStrategy`] (prompt, stored mapping, or nothing)
//! 3. the first heuristic keyword matching a column case-insensitively
//! 4. the first column

mod resolver;
mod strategy;

pub use resolver::{PhoneColumn, heuristic_match, resolve_field, resolve_phone_fields};
pub use strategy::{MappingStrategy, PromptStrategy, ResolutionStrategy, SilentStrategy};
