//! The `vcfmaker` command-line front end.

pub mod cli;
pub mod error;
pub mod run;
