use std::collections::HashMap;

use crate::constants::{DEFAULT_PHONE_LABEL, NAME_FIELD_HEURISTICS, PHONE_FIELD_HEURISTICS};

/// One input record, keyed by column name.
pub type ContactRow = HashMap<String, String>;

/// Logical role a column plays in the conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
        }
    }

    /// Lowercase column names that are accepted for this role without asking.
    #[must_use]
    pub const fn heuristics(self) -> &'static [&'static str] {
        match self {
            Self::Name => NAME_FIELD_HEURISTICS,
            Self::Phone => PHONE_FIELD_HEURISTICS,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phone number paired with its vCard `TYPE` label.
///
/// `number` is kept as read from the source; the formatter sanitizes it when
/// the `TEL` line is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneEntry {
    pub number: String,
    pub label: String,
}

impl PhoneEntry {
    #[must_use]
    pub fn new(number: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            label: label.into(),
        }
    }

    /// Creates an entry with the default `CELL` label.
    #[must_use]
    pub fn cell(number: impl Into<String>) -> Self {
        Self::new(number, DEFAULT_PHONE_LABEL)
    }

    /// Upper-cased label, falling back to `CELL` when blank.
    #[must_use]
    pub fn type_label(&self) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            DEFAULT_PHONE_LABEL.to_string()
        } else {
            label.to_uppercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_display() {
        assert_eq!(FieldKind::Name.to_string(), "name");
        assert_eq!(FieldKind::Phone.to_string(), "phone");
    }

    #[test]
    fn field_kind_heuristics_start_with_plain_name() {
        assert_eq!(FieldKind::Name.heuristics().first(), Some(&"name"));
        assert_eq!(FieldKind::Phone.heuristics().first(), Some(&"phone"));
        assert!(FieldKind::Phone.heuristics().contains(&"cellphone"));
    }

    #[test]
    fn type_label_is_uppercased() {
        assert_eq!(PhoneEntry::new("1", "home").type_label(), "HOME");
        assert_eq!(PhoneEntry::new("1", "work,voice").type_label(), "WORK,VOICE");
    }

    #[test]
    fn type_label_defaults_to_cell() {
        assert_eq!(PhoneEntry::new("1", "").type_label(), "CELL");
        assert_eq!(PhoneEntry::new("1", "   ").type_label(), "CELL");
        assert_eq!(PhoneEntry::cell("1").label, "CELL");
    }
}
