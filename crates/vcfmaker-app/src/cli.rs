//! Command-line arguments and how they combine with configuration and a
//! saved mapping.

use std::path::{Path, PathBuf};

use clap::Parser;
use vcfmaker_core::config::ConversionDefaults;
use vcfmaker_core::constants::VCF_EXTENSION;
use vcfmaker_core::error::{CoreError, CoreResult};
use vcfmaker_service::mapping::MappingProfile;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "vcfmaker",
    version,
    about = "Create a .vcf file from a CSV of contacts"
)]
pub struct Cli {
    /// Input CSV file path [default: contacts.csv]
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Output VCF file path [default: same directory as input, <input name>.vcf]
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Text prepended to each contact name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text appended to each contact name
    #[arg(long, short = 'p')]
    pub postfix: Option<String>,

    /// CSV column holding the contact name
    #[arg(long)]
    pub name_field: Option<String>,

    /// CSV column holding the phone number (deprecated, use --phone-fields)
    #[arg(long)]
    pub phone_field: Option<String>,

    /// Comma-separated CSV columns holding phone numbers
    #[arg(long)]
    pub phone_fields: Option<String>,

    /// Comma-separated labels matching --phone-fields (e.g. CELL,HOME)
    #[arg(long)]
    pub phone_labels: Option<String>,

    /// Never prompt for columns, even on a terminal
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the header and first rows of the input, then exit
    #[arg(long)]
    pub preview: bool,

    /// Load a saved column mapping (JSON) before applying flags
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Save the resolved column mapping (JSON) after converting
    #[arg(long, value_name = "FILE")]
    pub save_mapping: Option<PathBuf>,
}

/// Everything a run needs, after flags, saved mapping, and configuration are
/// merged. Columns are still requests; they are resolved against the header
/// later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name_field: String,
    pub phone_fields: Vec<String>,
    /// Labels paired by position with `phone_fields`, when any were given.
    pub phone_labels: Option<Vec<String>>,
    /// Label for phone columns that have no paired label.
    pub default_label: String,
    pub prefix: String,
    pub postfix: String,
    pub interactive: bool,
    /// Columns stored in the loaded mapping, offered when a request misses.
    pub profile: MappingProfile,
}

impl Cli {
    /// ## Summary
    /// Merges flags over the saved mapping over configuration defaults.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if no output path is given and none can be
    /// derived from the input path.
    pub fn into_request(
        self,
        defaults: &ConversionDefaults,
        profile: MappingProfile,
    ) -> CoreResult<Request> {
        let input = self
            .input
            .unwrap_or_else(|| PathBuf::from(&defaults.input));

        let output = match self
            .output
            .or_else(|| profile.output.as_ref().map(PathBuf::from))
        {
            Some(output) => output,
            None => default_output_path(&input)?,
        };

        let phone_fields = self
            .phone_fields
            .as_deref()
            .map(split_list)
            .or_else(|| self.phone_field.clone().map(|f| vec![f]))
            .or_else(|| profile.phone_fields.clone())
            .unwrap_or_else(|| vec![defaults.phone_field.clone()]);

        let phone_labels = self
            .phone_labels
            .as_deref()
            .map(split_positional)
            .or_else(|| profile.phone_labels.clone());

        Ok(Request {
            name_field: self
                .name_field
                .or_else(|| profile.name_field.clone())
                .unwrap_or_else(|| defaults.name_field.clone()),
            prefix: self
                .prefix
                .or_else(|| profile.prefix.clone())
                .unwrap_or_else(|| defaults.prefix.clone()),
            postfix: self
                .postfix
                .or_else(|| profile.postfix.clone())
                .unwrap_or_else(|| defaults.postfix.clone()),
            default_label: defaults.phone_label.clone(),
            interactive: defaults.interactive && !self.no_prompt,
            input,
            output,
            phone_fields,
            phone_labels,
            profile,
        })
    }
}

/// Splits a comma-separated flag value, trimming items and dropping empties.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Splits a comma-separated flag value, trimming items but keeping empty
/// ones so later items stay at their positions.
#[must_use]
pub fn split_positional(value: &str) -> Vec<String> {
    value.split(',').map(|item| item.trim().to_string()).collect()
}

/// ## Summary
/// `<input directory>/<input stem>.vcf`, with `.` standing in for a bare
/// file name's directory.
///
/// ## Errors
/// Returns `InvalidInput` if the input path has no file name.
pub fn default_output_path(input: &Path) -> CoreResult<PathBuf> {
    let stem = input.file_stem().ok_or_else(|| {
        CoreError::InvalidInput(format!(
            "cannot derive an output name from {}",
            input.display()
        ))
    })?;

    let dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(VCF_EXTENSION);
    Ok(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vcfmaker").chain(args.iter().copied()))
            .expect("valid args")
    }

    fn request(args: &[&str]) -> Request {
        parse(args)
            .into_request(&ConversionDefaults::default(), MappingProfile::default())
            .expect("request")
    }

    #[test]
    fn defaults_without_flags() {
        let req = request(&[]);
        assert_eq!(req.input, PathBuf::from("contacts.csv"));
        assert_eq!(req.output, PathBuf::from("./contacts.vcf"));
        assert_eq!(req.name_field, "name");
        assert_eq!(req.phone_fields, ["phone"]);
        assert_eq!(req.phone_labels, None);
        assert_eq!(req.default_label, "CELL");
        assert!(req.interactive);
    }

    #[test]
    fn output_defaults_next_to_input() {
        let req = request(&["-i", "data/export.v2.csv"]);
        assert_eq!(req.output, PathBuf::from("data/export.v2.vcf"));
    }

    #[test]
    fn phone_fields_supersede_deprecated_flag() {
        let req = request(&[
            "--phone-field",
            "old",
            "--phone-fields",
            " mobile, home ,,",
            "--phone-labels",
            "cell,home",
        ]);
        assert_eq!(req.phone_fields, ["mobile", "home"]);
        assert_eq!(
            req.phone_labels,
            Some(vec!["cell".to_string(), "home".to_string()])
        );

        let req = request(&["--phone-field", "old"]);
        assert_eq!(req.phone_fields, ["old"]);
    }

    #[test]
    fn blank_labels_hold_their_position() {
        let req = request(&["--phone-fields", "a,b,c", "--phone-labels", "FAX, ,HOME"]);
        assert_eq!(
            req.phone_labels,
            Some(vec!["FAX".to_string(), String::new(), "HOME".to_string()])
        );
    }

    #[test]
    fn flags_override_profile_over_defaults() {
        let profile = MappingProfile {
            name_field: Some("Full Name".into()),
            phone_fields: Some(vec!["Mobile".into()]),
            prefix: Some("Saved".into()),
            output: Some("saved.vcf".into()),
            ..MappingProfile::default()
        };
        let req = parse(&["--prefix", "Flag", "--no-prompt"])
            .into_request(&ConversionDefaults::default(), profile)
            .expect("request");

        assert_eq!(req.name_field, "Full Name");
        assert_eq!(req.phone_fields, ["Mobile"]);
        assert_eq!(req.prefix, "Flag");
        assert_eq!(req.output, PathBuf::from("saved.vcf"));
        assert!(!req.interactive);
    }

    #[test]
    fn config_can_disable_prompting() {
        let defaults = ConversionDefaults {
            interactive: false,
            postfix: "Work".into(),
            ..ConversionDefaults::default()
        };
        let req = parse(&[])
            .into_request(&defaults, MappingProfile::default())
            .expect("request");
        assert!(!req.interactive);
        assert_eq!(req.postfix, "Work");
    }

    #[test]
    fn output_requires_a_file_name() {
        assert!(matches!(
            default_output_path(Path::new("/")),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
