//! Structured name (N property, RFC 2426 §3.1.2).

use crate::rfc::vcard::build::escape_vcard_value;

/// The five ordered components of an `N` value.
///
/// Absent components are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    /// Family name (surname).
    pub family: String,
    /// Given name (first name).
    pub given: String,
    /// Additional names (middle names), space separated.
    pub additional: String,
    /// Honorific prefix. Never filled by [`decompose_name`].
    pub prefix: String,
    /// Honorific suffix. Never filled by [`decompose_name`].
    pub suffix: String,
}

impl NameParts {
    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.given.is_empty()
            && self.additional.is_empty()
            && self.prefix.is_empty()
            && self.suffix.is_empty()
    }

    /// Components in `N` order: family, given, additional, prefix, suffix.
    #[must_use]
    pub fn components(&self) -> [&str; 5] {
        [
            self.family.as_str(),
            self.given.as_str(),
            self.additional.as_str(),
            self.prefix.as_str(),
            self.suffix.as_str(),
        ]
    }

    /// Formats the `N` property value.
    ///
    /// Each component's content is escaped; the four `;` separators between
    /// components are written literally.
    #[must_use]
    pub fn to_value(&self) -> String {
        self.components()
            .into_iter()
            .map(escape_vcard_value)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Splits a display name into `N` components by position.
///
/// One token is the given name. With two or more, the first token is the
/// given name, the last is the family name, and anything between becomes the
/// additional names joined by single spaces. No locale rules are applied.
#[must_use]
pub fn decompose_name(full_name: &str) -> NameParts {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => NameParts::default(),
        [given] => NameParts {
            given: (*given).to_string(),
            ..NameParts::default()
        },
        [given, middle @ .., family] => NameParts {
            family: (*family).to_string(),
            given: (*given).to_string(),
            additional: middle.join(" "),
            ..NameParts::default()
        },
    }
}
