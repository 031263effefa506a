//! Pluggable strategies for choosing a column when the requested one is
//! missing.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use vcfmaker_core::types::FieldKind;

use crate::error::ServiceResult;

/// Chooses a column for `kind` after an exact match has failed.
///
/// Returning `Ok(None)` defers to the heuristic and first-column tiers.
pub trait ResolutionStrategy {
    /// ## Errors
    /// Implementations return an error when their own I/O fails.
    fn choose(&mut self, columns: &[String], kind: FieldKind) -> ServiceResult<Option<String>>;
}

/// Never picks anything; resolution goes straight to heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentStrategy;

impl ResolutionStrategy for SilentStrategy {
    fn choose(&mut self, _columns: &[String], _kind: FieldKind) -> ServiceResult<Option<String>> {
        Ok(None)
    }
}

/// Uses a column chosen ahead of time, such as one from a saved mapping.
///
/// A stored column that the source does not have is ignored.
#[derive(Debug, Clone, Default)]
pub struct MappingStrategy {
    columns: HashMap<FieldKind, String>,
}

impl MappingStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: FieldKind, column: impl Into<String>) -> Self {
        self.columns.insert(kind, column.into());
        self
    }
}

impl ResolutionStrategy for MappingStrategy {
    fn choose(&mut self, columns: &[String], kind: FieldKind) -> ServiceResult<Option<String>> {
        Ok(self
            .columns
            .get(&kind)
            .filter(|stored| columns.contains(stored))
            .cloned())
    }
}

/// Asks on a line-oriented console: prints a numbered menu and reads a
/// 1-based index or an exact column name.
///
/// Invalid answers repeat the question. End of input ends the prompt and
/// defers to heuristics.
#[derive(Debug)]
pub struct PromptStrategy<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptStrategy<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn write_menu(&mut self, columns: &[String], kind: FieldKind) -> ServiceResult<()> {
        writeln!(self.output, "Available columns for {kind}:")?;
        for (idx, column) in columns.iter().enumerate() {
            writeln!(self.output, "  {}. {column}", idx + 1)?;
        }
        Ok(())
    }

    fn ask(&mut self, kind: FieldKind) -> ServiceResult<Option<String>> {
        write!(self.output, "Choose column number or name for {kind}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> ResolutionStrategy for PromptStrategy<R, W> {
    fn choose(&mut self, columns: &[String], kind: FieldKind) -> ServiceResult<Option<String>> {
        self.write_menu(columns, kind)?;

        loop {
            let Some(answer) = self.ask(kind)? else {
                tracing::warn!(%kind, "Prompt input closed, falling back to heuristics");
                return Ok(None);
            };
            if answer.is_empty() {
                continue;
            }
            if let Some(column) = select(columns, &answer) {
                return Ok(Some(column.clone()));
            }
            writeln!(self.output, "Invalid selection - try again.")?;
        }
    }
}

/// An all-digit answer is only ever read as an index.
fn select<'a>(columns: &'a [String], answer: &str) -> Option<&'a String> {
    if answer.chars().all(|c| c.is_ascii_digit()) {
        return answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| columns.get(idx));
    }
    columns.iter().find(|c| *c == answer)
}
