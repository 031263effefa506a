//! vCard serialization.

use vcfmaker_core::types::PhoneEntry;

use super::escape::{escape_vcard_value, sanitize_phone};
use crate::rfc::vcard::core::{VCardRecord, decompose_name};

/// Assembles the record for one contact.
///
/// `FN` carries the escaped display name and `N` its positional
/// decomposition. Each phone entry whose sanitized number is empty is
/// dropped; the rest become `TEL;TYPE=<LABEL>` lines in the given order.
/// `FN` and `N` are present even when empty.
#[must_use]
pub fn build_record(full_name: &str, phones: &[PhoneEntry]) -> VCardRecord {
    let mut record = VCardRecord::begin();

    record.push_property("FN", &escape_vcard_value(full_name));
    record.push_property("N", &decompose_name(full_name).to_value());

    for phone in phones {
        let number = sanitize_phone(&phone.number);
        if number.is_empty() {
            continue;
        }
        record.push_property(&format!("TEL;TYPE={}", phone.type_label()), &number);
    }

    record.end()
}

/// Appends a record to `output`, one LF-terminated line each, followed by a
/// blank line so concatenated records stay visually separated.
pub fn serialize_record(record: &VCardRecord, output: &mut String) {
    for line in record.lines() {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
}

/// Formats one contact as a complete vCard 3.0 text block.
#[must_use]
pub fn format_vcard(full_name: &str, phones: &[PhoneEntry]) -> String {
    let mut output = String::new();
    serialize_record(&build_record(full_name, phones), &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_single_phone() {
        let card = format_vcard("Jo, Smith", &[PhoneEntry::new("555-1212", "home")]);
        assert_eq!(
            card,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jo\\, Smith\nN:Smith;Jo\\,;;;\nTEL;TYPE=HOME:5551212\nEND:VCARD\n\n"
        );
    }

    #[test]
    fn default_label_is_cell() {
        let card = format_vcard("Ann", &[PhoneEntry::new("123", "")]);
        assert!(card.contains("\nTEL;TYPE=CELL:123\n"));
    }

    #[test]
    fn skips_phones_without_digits() {
        let record = build_record(
            "Ann Lee",
            &[
                PhoneEntry::cell("---"),
                PhoneEntry::new("+44 20 7946 0000", "work"),
            ],
        );
        assert_eq!(record.phone_count(), 1);
        assert!(record.lines().contains(&"TEL;TYPE=WORK:+442079460000".to_string()));
    }

    #[test]
    fn keeps_phone_order() {
        let card = format_vcard(
            "Ann",
            &[PhoneEntry::new("1", "home"), PhoneEntry::new("2", "cell")],
        );
        let home = card.find("TYPE=HOME").expect("home line");
        let cell = card.find("TYPE=CELL").expect("cell line");
        assert!(home < cell);
    }

    #[test]
    fn empty_record_still_has_name_lines() {
        let card = format_vcard("", &[]);
        assert_eq!(card, "BEGIN:VCARD\nVERSION:3.0\nFN:\nN:;;;;\nEND:VCARD\n\n");
    }
}
