use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use vcfmaker_app::cli::Cli;
use vcfmaker_app::run::{print_preview, run};
use vcfmaker_core::config::load_config;
use vcfmaker_service::mapping::MappingProfile;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let profile = cli
        .mapping
        .as_deref()
        .map(MappingProfile::load)
        .unwrap_or_default();
    let preview = cli.preview;
    let save_mapping = cli.save_mapping.clone();

    let result = match cli.into_request(&config.defaults, profile) {
        Ok(request) if preview => print_preview(&request, &mut std::io::stdout().lock()).map(|_| None),
        Ok(request) => run(request, save_mapping).await.map(Some),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(Some(summary)) => {
            if summary.cancelled {
                tracing::warn!(written = summary.written, "Conversion cancelled, output is partial");
            }
            println!("{summary}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            tracing::error!(error = %err, "Conversion failed");
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
