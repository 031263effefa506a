/// vCard dialect emitted by the formatter
pub const VCARD_VERSION: &str = "3.0";
pub const VCARD_BEGIN_LINE: &str = "BEGIN:VCARD";
pub const VCARD_END_LINE: &str = "END:VCARD";
pub const VCARD_VERSION_LINE: &str = const_str::concat!("VERSION:", VCARD_VERSION);

/// Phone type label used when none is configured for a column
pub const DEFAULT_PHONE_LABEL: &str = "CELL";

pub const DEFAULT_INPUT_PATH: &str = "contacts.csv";
pub const DEFAULT_NAME_FIELD: &str = "name";
pub const DEFAULT_PHONE_FIELD: &str = "phone";
pub const VCF_EXTENSION: &str = "vcf";

/// Number of data rows shown by a preview read
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// Column names tried, in order, when guessing the name column
pub const NAME_FIELD_HEURISTICS: &[&str] = &[
    "name",
    "full_name",
    "fullname",
    "fn",
    "display_name",
    "given_name",
];

/// Column names tried, in order, when guessing the phone column
pub const PHONE_FIELD_HEURISTICS: &[&str] = &[
    "phone",
    "phone_number",
    "phone1",
    "mobile",
    "mobile_phone",
    "cell",
    "cellphone",
];
