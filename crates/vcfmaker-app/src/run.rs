//! Drives one conversion: column resolution in the foreground, the streaming
//! pass on a blocking worker, progress and Ctrl-C handling on the async side.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use tokio::sync::mpsc;
use vcfmaker_core::constants::PREVIEW_ROW_LIMIT;
use vcfmaker_core::types::FieldKind;
use vcfmaker_service::convert::{
    CancelToken, ConvertOptions, ProgressChannel, ProgressEvent, stream_convert,
};
use vcfmaker_service::error::ServiceError;
use vcfmaker_service::mapping::MappingProfile;
use vcfmaker_service::resolve::{
    MappingStrategy, PromptStrategy, ResolutionStrategy, resolve_field, resolve_phone_fields,
};
use vcfmaker_service::source::{TabularPreview, open_tabular_source, preview_source};

use crate::cli::Request;
use crate::error::{AppError, AppResult};

/// Outcome of a completed (possibly cancelled) conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub output: PathBuf,
    pub cancelled: bool,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} vCards to {}",
            self.written,
            self.output.display()
        )
    }
}

/// ## Summary
/// Resolves columns for `request` against the input header.
///
/// Prompts on the terminal when the request allows it and stdin is a TTY;
/// otherwise columns stored in the request's mapping are offered before the
/// heuristics.
///
/// ## Errors
/// Returns `NotFound` or `ReadError` if the header cannot be read and
/// `ValidationError` if the input has no columns.
pub fn resolve_options(request: &Request) -> AppResult<ConvertOptions> {
    let columns = open_tabular_source(&request.input)?.columns().to_vec();

    let mut strategy: Box<dyn ResolutionStrategy> =
        if request.interactive && std::io::stdin().is_terminal() {
            Box::new(PromptStrategy::new(
                std::io::stdin().lock(),
                std::io::stdout(),
            ))
        } else {
            Box::new(mapping_strategy(&request.profile))
        };

    let name_field = resolve_field(
        &columns,
        &request.name_field,
        FieldKind::Name,
        strategy.as_mut(),
    )?;
    let phones = resolve_phone_fields(
        &columns,
        &request.phone_fields,
        request.phone_labels.as_deref().unwrap_or_default(),
        strategy.as_mut(),
    )?;

    let (phone_fields, phone_labels): (Vec<String>, Vec<String>) = phones
        .into_iter()
        .map(|phone| {
            let label = phone
                .label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| request.default_label.clone());
            (phone.field, label)
        })
        .unzip();

    tracing::info!(%name_field, ?phone_fields, ?phone_labels, "Columns resolved");

    Ok(ConvertOptions::new(name_field, phone_fields)
        .with_labels(phone_labels)
        .with_prefix(request.prefix.clone())
        .with_postfix(request.postfix.clone()))
}

fn mapping_strategy(profile: &MappingProfile) -> MappingStrategy {
    let mut strategy = MappingStrategy::new();
    if let Some(name_field) = &profile.name_field {
        strategy = strategy.with(FieldKind::Name, name_field.clone());
    }
    if let Some(phone_field) = profile.phone_fields.as_ref().and_then(|f| f.first()) {
        strategy = strategy.with(FieldKind::Phone, phone_field.clone());
    }
    strategy
}

/// ## Summary
/// Runs the streaming pass on a blocking worker while this task reports
/// progress and turns Ctrl-C into cancellation.
///
/// ## Errors
/// Returns the conversion's `ServiceError`, or `WorkerError` if the worker
/// thread panicked.
pub async fn convert(request: &Request, options: ConvertOptions) -> AppResult<RunSummary> {
    let token = CancelToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();

    let worker = {
        let token = token.clone();
        let input = request.input.clone();
        let output = request.output.clone();
        tokio::task::spawn_blocking(move || {
            let mut channel = ProgressChannel::new(tx);
            stream_convert(&input, &output, &options, Some(&mut channel), &token)
        })
    };

    let mut last_decile = None;
    let mut listen_for_signal = true;
    loop {
        tokio::select! {
            event = rx.recv() => {
                // The sender is dropped when the worker returns
                let Some(event) = event else { break };
                log_progress(event, &mut last_decile);
            }
            signal = tokio::signal::ctrl_c(), if listen_for_signal => {
                listen_for_signal = false;
                match signal {
                    Ok(()) => {
                        tracing::warn!("Interrupted, stopping after the current row");
                        token.cancel();
                    }
                    Err(e) => tracing::warn!(error = %e, "Cannot listen for Ctrl-C"),
                }
            }
        }
    }

    let written = worker
        .await
        .map_err(|e| AppError::WorkerError(e.to_string()))??;

    Ok(RunSummary {
        written,
        output: request.output.clone(),
        cancelled: token.is_cancelled(),
    })
}

fn log_progress(event: ProgressEvent, last_decile: &mut Option<usize>) {
    let decile = event.percent() / 10;
    if *last_decile != Some(decile) {
        *last_decile = Some(decile);
        tracing::info!(
            processed = event.processed,
            total = event.total,
            percent = event.percent(),
            "Progress"
        );
    } else {
        tracing::trace!(processed = event.processed, total = event.total, "Progress");
    }
}

/// ## Summary
/// Prints the header and first rows of the input as tab-separated text.
///
/// ## Errors
/// Returns `NotFound` if the input is missing, `ReadError` if it cannot be
/// read, and `ConsoleError` if writing to `out` fails.
pub fn print_preview(request: &Request, out: &mut impl Write) -> AppResult<TabularPreview> {
    let preview = preview_source(&request.input, PREVIEW_ROW_LIMIT)?;
    write_preview(&preview, out).map_err(ServiceError::from)?;
    Ok(preview)
}

fn write_preview(preview: &TabularPreview, out: &mut impl Write) -> std::io::Result<()> {
    match preview.encoding {
        Some(encoding) => writeln!(out, "# encoding: {encoding}")?,
        None => writeln!(out, "# no readable header")?,
    }
    writeln!(out, "{}", preview.headers.join("\t"))?;
    for row in &preview.rows {
        let values: Vec<&str> = preview
            .headers
            .iter()
            .map(|h| row.get(h).map_or("", String::as_str))
            .collect();
        writeln!(out, "{}", values.join("\t"))?;
    }
    Ok(())
}

/// ## Summary
/// Resolves columns, converts, and saves the mapping when asked to.
///
/// Column resolution may block on the terminal prompt, so it runs on the
/// blocking pool like the conversion itself.
///
/// ## Errors
/// Any error from [`resolve_options`], [`convert`], or saving the mapping.
pub async fn run(request: Request, save_mapping: Option<PathBuf>) -> AppResult<RunSummary> {
    let options = {
        let request = request.clone();
        tokio::task::spawn_blocking(move || resolve_options(&request))
            .await
            .map_err(|e| AppError::WorkerError(e.to_string()))??
    };
    let profile = MappingProfile::from_options(&options, &request.output);

    let summary = convert(&request, options).await?;

    if let Some(path) = save_mapping {
        profile.save(&path)?;
        tracing::info!(path = %path.display(), "Mapping saved");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use vcfmaker_core::config::ConversionDefaults;

    use super::*;
    use crate::cli::Cli;

    fn request_for(dir: &std::path::Path, csv: &str, extra: &[&str]) -> Request {
        let input = dir.join("people.csv");
        fs::write(&input, csv).expect("write csv");

        let mut args = vec![
            "vcfmaker".to_string(),
            "--no-prompt".to_string(),
            "-i".to_string(),
            input.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));

        <Cli as clap::Parser>::try_parse_from(args)
            .expect("args")
            .into_request(&ConversionDefaults::default(), MappingProfile::default())
            .expect("request")
    }

    #[test_log::test(tokio::test)]
    async fn converts_with_heuristic_columns() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = request_for(
            dir.path(),
            "Full_Name,Mobile\nAnn Lee,555 0100\nBob,\n",
            &[],
        );

        let summary = run(request, None).await.expect("run");

        assert_eq!(summary.written, 1);
        assert!(!summary.cancelled);
        assert_eq!(summary.output, dir.path().join("people.vcf"));
        assert_eq!(
            summary.to_string(),
            format!("Wrote 1 vCards to {}", dir.path().join("people.vcf").display())
        );

        let text = fs::read_to_string(&summary.output).expect("output");
        assert!(text.contains("FN:Ann Lee\n"));
        assert!(text.contains("TEL;TYPE=CELL:5550100\n"));
    }

    #[tokio::test]
    async fn saves_resolved_mapping() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = request_for(
            dir.path(),
            "name,home,work\nAnn,1,2\n",
            &["--phone-fields", "home,work", "--phone-labels", "HOME,WORK"],
        );
        let mapping = dir.path().join("mapping.json");

        let summary = run(request, Some(mapping.clone())).await.expect("run");
        assert_eq!(summary.written, 1);

        let profile = MappingProfile::load(&mapping);
        assert_eq!(profile.name_field.as_deref(), Some("name"));
        assert_eq!(
            profile.phone_fields,
            Some(vec!["home".to_string(), "work".to_string()])
        );
        assert_eq!(
            profile.phone_labels,
            Some(vec!["HOME".to_string(), "WORK".to_string()])
        );
    }

    #[tokio::test]
    async fn labels_follow_their_columns_past_a_missing_one() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = request_for(
            dir.path(),
            "name,mobile\nAnn,555\n",
            &["--phone-fields", "fax,mobile", "--phone-labels", "FAX,HOME"],
        );

        let summary = run(request, None).await.expect("run");

        let text = fs::read_to_string(&summary.output).expect("output");
        assert!(text.contains("TEL;TYPE=HOME:555\n"));
        assert!(!text.contains("TYPE=FAX"));
    }

    #[test]
    fn fallback_phone_column_gets_default_label() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = request_for(
            dir.path(),
            "name,Mobile\nAnn,555\n",
            &["--phone-fields", "fax", "--phone-labels", "FAX"],
        );

        let options = resolve_options(&request).expect("options");
        assert_eq!(options.phone_fields, ["Mobile"]);
        assert_eq!(options.phone_labels, Some(vec!["CELL".to_string()]));
    }

    #[test]
    fn stored_mapping_is_offered_when_flag_misses() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut request = request_for(
            dir.path(),
            "Who,Tel\nAnn,1\n",
            &["--name-field", "Missing"],
        );
        request.profile = MappingProfile {
            name_field: Some("Who".into()),
            phone_fields: Some(vec!["Tel".into()]),
            ..MappingProfile::default()
        };

        let options = resolve_options(&request).expect("options");
        assert_eq!(options.name_field, "Who");
        assert_eq!(options.phone_fields, ["Tel"]);
    }

    #[tokio::test]
    async fn missing_input_exits_with_two() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut request = request_for(dir.path(), "name,phone\n", &[]);
        request.input = dir.path().join("absent.csv");

        let err = run(request, None).await.expect_err("missing input");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn unwritable_output_exits_with_three() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut request = request_for(dir.path(), "name,phone\nAnn,1\n", &[]);
        request.output = dir.path().join("missing_dir").join("out.vcf");

        let err = run(request, None).await.expect_err("unwritable output");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn preview_prints_tab_separated_rows() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = request_for(dir.path(), "name,phone\nAnn,1\nBob,2\n", &[]);
        let mut out = Vec::new();

        let preview = print_preview(&request, &mut out).expect("preview");

        assert_eq!(preview.rows.len(), 2);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "# encoding: utf-8\nname\tphone\nAnn\t1\nBob\t2\n");
    }
}
