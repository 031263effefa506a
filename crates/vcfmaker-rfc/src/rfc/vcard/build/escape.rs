//! vCard text escaping.

/// Escapes a text value for a vCard 3.0 value field.
///
/// Backslash, comma, and semicolon are backslash-escaped. CR and LF each
/// become a single space rather than an escaped newline. The result is
/// trimmed.
///
/// Every character is mapped from the input exactly once, so the backslashes
/// introduced for commas and semicolons are never escaped a second time.
#[must_use]
pub fn escape_vcard_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\r' | '\n' => result.push(' '),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            _ => result.push(c),
        }
    }

    result.trim().to_string()
}

/// Reduces a phone number to ASCII digits and `+`.
///
/// Order and multiplicity are kept, so a `+` in the middle survives. This is
/// lenient on purpose: the number is cleaned, not validated.
#[must_use]
pub fn sanitize_phone(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain() {
        assert_eq!(escape_vcard_value("hello"), "hello");
        assert_eq!(escape_vcard_value(""), "");
    }

    #[test]
    fn escape_special() {
        assert_eq!(escape_vcard_value("a,b;c\\d"), "a\\,b\\;c\\\\d");
    }

    #[test]
    fn escape_line_breaks_become_spaces() {
        assert_eq!(escape_vcard_value("line1\nline2"), "line1 line2");
        assert_eq!(escape_vcard_value("line1\r\nline2"), "line1  line2");
    }

    #[test]
    fn escape_trims_result() {
        assert_eq!(escape_vcard_value("  Jo  \n"), "Jo");
    }

    #[test]
    fn escape_backslash_before_separators() {
        // A literal "\," in the input must not collapse into an escaped comma
        assert_eq!(escape_vcard_value("\\,"), "\\\\\\,");
    }

    #[test]
    fn escape_twice_doubles_escapes() {
        let once = escape_vcard_value("a,b");
        assert_eq!(once, "a\\,b");
        let twice = escape_vcard_value(&once);
        assert_eq!(twice, "a\\\\\\,b");
        assert_ne!(once, twice);
    }

    #[test]
    fn escape_twice_is_stable_without_specials() {
        let once = escape_vcard_value("Jane Doe");
        assert_eq!(escape_vcard_value(&once), once);
    }

    #[test]
    fn sanitize_formatted_number() {
        assert_eq!(sanitize_phone("+1 (555) 123-4567"), "+15551234567");
    }

    #[test]
    fn sanitize_keeps_inner_plus() {
        assert_eq!(sanitize_phone("555+12+"), "555+12+");
    }

    #[test]
    fn sanitize_without_digits_is_empty() {
        assert_eq!(sanitize_phone("n/a"), "");
        assert_eq!(sanitize_phone(""), "");
    }

    #[test]
    fn sanitize_drops_non_ascii_digits() {
        // Arabic-Indic digits are not ASCII
        assert_eq!(sanitize_phone("٠١٢ 34"), "34");
    }
}
